//! Validate command implementation

use crate::cli::utils;
use crate::utils::format_diagnostics;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate").about("Check the schema of every data source")
}

pub async fn run(_matches: &ArgMatches) -> Result<()> {
    info!("Validating data source schemas");

    let provider = utils::builtin_provider()?;
    let findings = provider.validate_implementation();

    for (type_name, diagnostics) in &findings {
        println!("{type_name}:");
        println!("{}", format_diagnostics(diagnostics));
    }

    let failed = findings
        .values()
        .filter(|diagnostics| diagnostics.has_error())
        .count();
    if failed > 0 {
        return Err(anyhow!("{failed} data source schemas are invalid"));
    }

    println!("All {} data source schemas are valid!", provider.len());
    Ok(())
}
