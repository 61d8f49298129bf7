//! Init command implementation

use crate::config::CrdSource;
use crate::Config;
use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("init")
        .about("Initialize a new generator configuration file")
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file path")
                .value_name("FILE")
                .default_value(".k8s-manifests.yaml"),
        )
        .arg(
            clap::Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_default();

    if output_path.exists() && !matches.get_flag("force") {
        return Err(anyhow!(
            "{} already exists, use --force to overwrite it",
            output_path.display()
        ));
    }

    info!("Initializing configuration file: {:?}", output_path);

    create_default_config().save_to_file(&output_path)?;

    println!("Configuration file created: {}", output_path.display());
    println!("Point the sources at directories of CRD files, then run 'k8s-manifests generate'.");

    Ok(())
}

/// Configuration with one source per built-in API group
pub fn create_default_config() -> Config {
    let mut config = Config::default();

    config.sources.push(CrdSource {
        name: "openshift".to_string(),
        path: PathBuf::from("./crds/openshift"),
        filters: vec!["machineconfiguration.openshift.io/*".to_string()],
        output_path: None,
    });
    config.sources.push(CrdSource {
        name: "knative".to_string(),
        path: PathBuf::from("./crds/knative"),
        filters: vec!["operator.knative.dev/v1beta1".to_string()],
        output_path: None,
    });

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(create_default_config().validate().is_ok());
    }
}
