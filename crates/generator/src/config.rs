//! Configuration types for the generator

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base path for generated files
    pub base_path: PathBuf,

    /// Organization strategy for output files
    pub organization: OrganizationStrategy,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_path.to_string_lossy().is_empty() {
            return Err(anyhow!("Base path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./generated"),
            organization: OrganizationStrategy::ApiGroup,
        }
    }
}

/// Organization strategy for output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStrategy {
    /// One module directory per API group (e.g. `operator_knative_dev/`)
    ApiGroup,

    /// All modules in one directory, prefixed with the API group
    Flat,
}
