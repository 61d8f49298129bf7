//! Main configuration structure and implementation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::{CrdSource, GenerationConfig, OutputConfig};
use crate::provider::DEFAULT_PROVIDER_NAME;
use crate::{ManifestError, ManifestResult};

/// Configuration files looked up, in order, when none is given
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    ".k8s-manifests.yaml",
    ".k8s-manifests.yml",
    "k8s-manifests.yaml",
    "k8s-manifests.yml",
];

const SUPPORTED_VERSION: &str = "1.0";

fn default_provider_name() -> String {
    DEFAULT_PROVIDER_NAME.to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Provider name used to derive data source type names
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// CRD sources to generate data sources from
    #[serde(default)]
    pub sources: Vec<CrdSource>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION.to_string(),
            provider_name: default_provider_name(),
            sources: Vec::new(),
            output: OutputConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> ManifestResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> ManifestResult<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(ManifestError::Config(format!(
                "Unsupported configuration version: {}",
                self.version
            )));
        }

        if self.provider_name.is_empty() {
            return Err(ManifestError::Config(
                "Provider name cannot be empty".to_string(),
            ));
        }

        if self.sources.is_empty() {
            return Err(ManifestError::Config(
                "At least one source must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            source.validate()?;
            if !names.insert(source.name.as_str()) {
                return Err(ManifestError::Config(format!(
                    "Duplicate source name: {}",
                    source.name
                )));
            }
        }

        self.output
            .validate()
            .map_err(|e| ManifestError::Config(e.to_string()))
    }
}
