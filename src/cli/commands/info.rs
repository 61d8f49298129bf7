//! Info command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};

pub fn command() -> Command {
    Command::new("info").about("Show tool information").arg(
        clap::Arg::new("detailed")
            .short('d')
            .long("detailed")
            .help("Show detailed information")
            .action(clap::ArgAction::SetTrue),
    )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let provider = utils::builtin_provider()?;

    println!("k8s-manifests - Kubernetes manifest data sources");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Provider: {}", provider.name());
    println!("Data sources: {}", provider.len());

    if matches.get_flag("detailed") {
        println!("\nData sources:");
        for type_name in provider.data_source_names() {
            let schema = provider.schema(type_name)?;
            println!("  - {type_name}");
            println!("      {}", schema.description);
        }

        println!("\nGenerator:");
        println!("  - Parses CustomResourceDefinition files, one data source per served version");
        println!("  - Output organized by API group or flat");
        println!("  - Generated modules record the SHA-256 of their source file");
    }

    Ok(())
}
