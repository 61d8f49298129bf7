//! Generate command implementation

use crate::cli::utils;
use crate::utils::{ensure_directory, format_duration};
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub fn command() -> Command {
    Command::new("generate")
        .about("Generate data source modules from configured CRD sources")
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file path")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory")
                .value_name("DIR"),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Don't write files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("fail-fast")
                .long("fail-fast")
                .help("Stop on first error")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Starting data source generation");

    let mut config = utils::load_config(matches)?;

    // Override output path if specified
    if let Some(output_path) = matches.get_one::<String>("output") {
        config.output.base_path = PathBuf::from(output_path);
    }

    if matches.get_flag("fail-fast") {
        config.generation.fail_fast = true;
    }

    let dry_run = matches.get_flag("dry-run");
    if dry_run {
        println!("Dry run mode - no files will be written");
    } else {
        ensure_directory(&config.output.base_path)?;
    }

    let app = utils::create_app(config);
    let result = app.generate(dry_run).await?;

    let verb = if dry_run { "would be generated" } else { "generated" };
    println!(
        "Sources processed: {}/{}",
        result.sources_processed, result.total_sources
    );
    println!("Files {verb}: {}", result.statistics.files_generated);
    println!(
        "Processing time: {}",
        format_duration(Duration::from_millis(
            result.statistics.total_processing_time_ms
        ))
    );
    println!("Finished at: {}", result.generated_at.to_rfc3339());

    for source_result in &result.results {
        println!(
            "  {}: {} files {verb} in {}",
            source_result.source_name,
            source_result.files_generated,
            source_result.output_path.display()
        );
        for warning in &source_result.warnings {
            println!("    Warning: {warning}");
        }
        for error in &source_result.errors {
            eprintln!("    Error: {error}");
        }
    }

    if result.statistics.error_count > 0 {
        return Err(anyhow!(
            "Generation finished with {} errors",
            result.statistics.error_count
        ));
    }

    Ok(())
}
