//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("k8s-manifests")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Render Kubernetes custom resource manifests from typed configuration")
            .subcommand_negates_reqs(true)
            .subcommand(commands::list::command())
            .subcommand(commands::schema::command())
            .subcommand(commands::render::command())
            .subcommand(commands::validate::command())
            .subcommand(commands::init::command())
            .subcommand(commands::generate::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", sub_matches)) => commands::list::run(sub_matches).await,
            Some(("schema", sub_matches)) => commands::schema::run(sub_matches).await,
            Some(("render", sub_matches)) => commands::render::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            Some(("init", sub_matches)) => commands::init::run(sub_matches).await,
            Some(("generate", sub_matches)) => commands::generate::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    use crate::config::CONFIG_FILE_NAMES;
    use crate::provider::Provider;

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        let user_config = crate::utils::get_config_dir()
            .ok()
            .map(|dir| dir.join("config.yaml"));

        CONFIG_FILE_NAMES
            .iter()
            .map(PathBuf::from)
            .chain(user_config)
            .find(|path| path.exists())
            .ok_or_else(|| {
                anyhow!("No configuration file found. Use --config to specify a file or create one with 'k8s-manifests init'")
            })
    }

    /// Load configuration from file
    pub fn load_config(matches: &clap::ArgMatches) -> Result<crate::Config> {
        let config_path = get_config_path(matches)?;
        crate::Config::from_file(&config_path)
    }

    /// Create ManifestGen instance
    pub fn create_app(config: crate::Config) -> crate::ManifestGen {
        crate::ManifestGen::new(config)
    }

    /// Provider with the built-in data sources
    pub fn builtin_provider() -> Result<Provider> {
        Ok(Provider::with_builtin_data_sources()?)
    }
}
