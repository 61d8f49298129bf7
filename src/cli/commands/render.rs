//! Render command implementation

use crate::cli::utils;
use crate::utils::{format_diagnostics, read_config_value};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn command() -> Command {
    Command::new("render")
        .about("Validate a configuration and print the rendered manifest")
        .arg(
            clap::Arg::new("type")
                .help("Data source type name")
                .value_name("TYPE")
                .required(true),
        )
        .arg(
            clap::Arg::new("input")
                .short('i')
                .long("input")
                .help("Configuration file (YAML or JSON)")
                .value_name("FILE")
                .required(true),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let type_name = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or_default();
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();

    info!("Rendering {} from {:?}", type_name, input);

    let provider = utils::builtin_provider()?;
    let config = read_config_value(&input)?;
    let response = provider.read_data_source(type_name, config).await?;

    if response.has_error() {
        eprintln!("{}", format_diagnostics(&response.diagnostics));
        return Err(anyhow!(
            "{} rejected the configuration in {}",
            type_name,
            input.display()
        ));
    }

    if !response.diagnostics.is_empty() {
        warn!("{}", format_diagnostics(&response.diagnostics));
    }

    let yaml = response
        .yaml()
        .ok_or_else(|| anyhow!("{type_name} returned no manifest"))?;
    print!("{yaml}");

    Ok(())
}
