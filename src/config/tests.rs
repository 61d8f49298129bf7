//! Configuration tests

use super::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn openshift_source() -> CrdSource {
    CrdSource {
        name: "openshift".to_string(),
        path: PathBuf::from("./crds/openshift"),
        filters: vec!["machineconfiguration.openshift.io/v1".to_string()],
        output_path: None,
    }
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(parsed.provider_name, "k8s");
}

#[test]
fn test_config_from_file() {
    let mut config = Config::default();
    config.sources.push(openshift_source());
    config.generation.fail_fast = true;

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(config.version, loaded.version);
    assert_eq!(loaded.sources.len(), 1);
    assert!(loaded.generation.fail_fast);
    assert_eq!(loaded.output.organization, OrganizationStrategy::ApiGroup);
}

#[test]
fn test_minimal_file_uses_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        "version: \"1.0\"\nsources:\n  - name: knative\n    path: ./crds/knative\n",
    )
    .unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded.provider_name, "k8s");
    assert!(loaded.sources[0].filters.is_empty());
    assert_eq!(loaded.output.base_path, PathBuf::from("./generated"));
    assert!(!loaded.generation.fail_fast);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.sources.push(openshift_source());
    assert!(config.validate().is_ok());

    config.sources.push(openshift_source());
    assert!(config.validate().is_err());
}

#[test]
fn test_unsupported_version_is_rejected() {
    let mut config = Config::default();
    config.sources.push(openshift_source());
    config.version = "2.0".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Unsupported configuration version"));
}
