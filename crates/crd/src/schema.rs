//! CRD schema definition and implementation

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use manifest_schema::naming;

/// Resource scope declared by `spec.scope`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Namespaced,
    Cluster,
}

/// One served version of a parsed CRD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrdSchema {
    /// CRD name, e.g. `machineconfigs.machineconfiguration.openshift.io`
    pub name: String,

    /// API group
    pub group: String,

    /// API version
    pub version: String,

    /// Full API version (group/version)
    pub api_version: String,

    /// Resource kind (from spec.names.kind)
    pub kind: String,

    /// Plural resource name (from spec.names.plural)
    pub plural: String,

    pub scope: Scope,

    /// OpenAPI v3 schema
    pub schema: serde_yaml::Value,

    /// Source file path
    pub source_path: PathBuf,
}

impl CrdSchema {
    /// Get the kind name (from spec.names.kind)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_namespaced(&self) -> bool {
        self.scope == Scope::Namespaced
    }

    /// The OpenAPI schema of `spec`, if the CRD declares one
    pub fn spec_schema(&self) -> Option<&serde_yaml::Value> {
        self.schema.get("properties")?.get("spec")
    }

    /// Data source type name under the given provider
    pub fn type_name(&self, provider: &str) -> String {
        naming::manifest_type_name(provider, &self.group, &self.kind, &self.version)
    }

    /// Rust module name, e.g. `machine_config_v1`
    pub fn module_name(&self) -> String {
        format!(
            "{}_{}",
            naming::snake_case(&self.kind),
            naming::snake_case(&self.version)
        )
    }
}
