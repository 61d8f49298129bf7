//! Schema command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("schema")
        .about("Print the schema of a data source")
        .arg(
            clap::Arg::new("type")
                .help("Data source type name")
                .value_name("TYPE")
                .required(true),
        )
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format")
                .value_parser(["yaml", "json"])
                .default_value("yaml"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let type_name = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let provider = utils::builtin_provider()?;
    let schema = provider.schema(type_name)?;

    let output = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => serde_json::to_string_pretty(&schema)?,
        _ => serde_yaml::to_string(&schema)?,
    };
    println!("{output}");

    Ok(())
}
