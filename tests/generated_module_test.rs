//! A checked-in generated module, compared against the generator and then
//! compiled and read like a built-in data source.

use k8s_manifests::config::OutputConfig;
use k8s_manifests::{CrdParser, ManifestGenerator, Provider};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

// Generated modules address the library through `crate::manifest` and `crate::provider`
mod manifest {
    pub use k8s_manifests::manifest::*;
}

mod provider {
    pub use k8s_manifests::provider::*;
}

#[path = "fixtures/generated/gadget_v1.rs"]
mod gadget_v1;

const GADGET_TYPE: &str = "k8s_example_com_gadget_v1_manifest";

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn gadget_provider() -> Provider {
    let mut provider = Provider::new("k8s");
    provider
        .register(Arc::new(gadget_v1::GadgetV1ManifestDataSource))
        .unwrap();
    provider
}

#[test]
fn test_generated_module_is_current() {
    let parsed = CrdParser::new()
        .parse_from_directory(&fixtures().join("crds"), &[])
        .unwrap();
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    assert_eq!(parsed.schemas.len(), 1);

    let generator = ManifestGenerator::new(OutputConfig::default());
    let (content, warnings) = generator.render_module(&parsed.schemas[0]).unwrap();
    assert!(warnings.is_empty());

    let expected = std::fs::read_to_string(fixtures().join("generated/gadget_v1.rs")).unwrap();
    assert_eq!(content, expected);
}

#[test]
fn test_generated_schema_is_consistent() {
    let provider = gadget_provider();

    assert_eq!(provider.data_source_names(), vec![GADGET_TYPE]);
    assert!(provider.validate_implementation().is_empty());
}

#[tokio::test]
async fn test_generated_module_renders() {
    let response = gadget_provider()
        .read_data_source(
            GADGET_TYPE,
            json!({
                "metadata": {"name": "g1"},
                "spec": {
                    "crate": "box",
                    "mode": "fast",
                    "replicas": 2,
                    "wheel_sizes": [16, 18]
                }
            }),
        )
        .await
        .unwrap();

    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
    assert_eq!(
        response.yaml(),
        Some("apiVersion: example.com/v1\nkind: Gadget\nmetadata:\n  name: g1\nspec:\n  crate: box\n  mode: fast\n  replicas: 2\n  wheelSizes:\n  - 16\n  - 18\n")
    );
    assert_eq!(response.id(), Some("g1"));
}

#[tokio::test]
async fn test_generated_validators_apply() {
    let response = gadget_provider()
        .read_data_source(
            GADGET_TYPE,
            json!({
                "metadata": {"name": "g1"},
                "spec": {"replicas": 0}
            }),
        )
        .await
        .unwrap();

    assert!(response.state.is_none());
    let paths: Vec<&str> = response
        .diagnostics
        .iter()
        .filter_map(|d| d.path.as_deref())
        .collect();
    assert!(paths.contains(&"spec.mode"), "{paths:?}");
    assert!(paths.contains(&"spec.replicas"), "{paths:?}");
}
