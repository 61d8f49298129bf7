//! Source configuration definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use manifest_schema::naming::snake_case;

use crate::{ManifestError, ManifestResult};

/// A local directory of CRD files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrdSource {
    /// Name of the source
    pub name: String,

    /// Directory searched recursively for CRD YAML files
    pub path: PathBuf,

    /// Glob patterns on `group/version`; empty keeps everything
    #[serde(default)]
    pub filters: Vec<String>,

    /// Output directory relative to `output.base_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl CrdSource {
    pub fn validate(&self) -> ManifestResult<()> {
        if self.name.is_empty() {
            return Err(ManifestError::Config(
                "CRD source name cannot be empty".to_string(),
            ));
        }

        if self.path.as_os_str().is_empty() {
            return Err(ManifestError::Config(format!(
                "CRD source {} has an empty path",
                self.name
            )));
        }

        for filter in &self.filters {
            if let Err(e) = glob::Pattern::new(filter) {
                return Err(ManifestError::Config(format!(
                    "Invalid filter pattern in source {}: {}: {}",
                    self.name, filter, e
                )));
            }
        }

        Ok(())
    }

    /// Output directory for this source, defaulting to its snake_cased name
    pub fn output_dir(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(snake_case(&self.name)))
    }
}
