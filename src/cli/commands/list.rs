//! List command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("list").about("List the registered data source type names")
}

pub async fn run(_matches: &ArgMatches) -> Result<()> {
    let provider = utils::builtin_provider()?;

    for type_name in provider.data_source_names() {
        println!("{type_name}");
    }

    Ok(())
}
