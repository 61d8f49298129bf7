//! Kubernetes manifest data sources
//!
//! Read-only data sources that take a configuration block shaped like a
//! custom resource, stamp in its `apiVersion` and `kind`, and render the
//! resulting manifest as YAML. The built-in data sources cover the
//! OpenShift machine configuration types and the Knative operator types;
//! more can be generated from CRD files with [`ManifestGen`].

pub mod cli;
pub mod config;
pub mod datasources;
pub mod manifest;
pub mod provider;
pub mod utils;

pub use config::{Config, CrdSource, GenerationConfig};
pub use manifest::Manifest;
pub use provider::{
    DataSource, MetadataRequest, MetadataResponse, Provider, ReadRequest, ReadResponse,
};

pub use manifest_crd::{CrdParser, CrdSchema};
pub use manifest_generator::{GenerationResult, ManifestGenerator, SourceResult};
pub use manifest_schema::{Diagnostic, Diagnostics, Schema};

use anyhow::Result;
use tracing::{debug, error, info, warn};

/// Runs data source generation for every configured CRD source
pub struct ManifestGen {
    config: Config,
    crd_parser: CrdParser,
    generator: ManifestGenerator,
}

impl ManifestGen {
    pub fn new(config: Config) -> Self {
        let generator = ManifestGenerator::new(config.output.clone());
        Self {
            config,
            crd_parser: CrdParser::new(),
            generator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate data source modules from all configured sources
    pub async fn generate(&self, dry_run: bool) -> Result<GenerationResult> {
        info!(
            "Generating manifest data sources for {} sources",
            self.config.sources.len()
        );

        let mut results = Vec::new();

        for source in &self.config.sources {
            match self.process_source(source, dry_run).await {
                Ok(result) => {
                    if !result.is_success() && self.config.generation.fail_fast {
                        error!("Source {} failed, stopping", source.name);
                        results.push(result);
                        break;
                    }
                    results.push(result);
                }
                Err(e) => {
                    error!("Failed to process source {}: {:#}", source.name, e);
                    if self.config.generation.fail_fast {
                        return Err(e);
                    }
                    let mut result =
                        SourceResult::new(&source.name, self.source_output_path(source));
                    result.errors.push(format!("{e:#}"));
                    results.push(result);
                }
            }
        }

        Ok(GenerationResult::from_results(
            self.config.sources.len(),
            results,
        ))
    }

    async fn process_source(&self, source: &CrdSource, dry_run: bool) -> Result<SourceResult> {
        let path = utils::expand_path(&source.path)?;
        let parsed = self
            .crd_parser
            .parse_from_directory(&path, &source.filters)?;
        let schemas = parsed.schemas;

        if schemas.is_empty() {
            warn!("Source {} matched no CRD versions", source.name);
        }
        for schema in &schemas {
            debug!(
                "{} {} -> {}",
                schema.api_version,
                schema.kind,
                schema.type_name(&self.config.provider_name)
            );
        }

        let mut result = self
            .generator
            .generate(
                &source.name,
                &schemas,
                &self.source_output_path(source),
                dry_run,
            )
            .await?;

        // Malformed CRDs fail the source; the valid ones are still generated
        let mut errors = parsed.errors;
        errors.append(&mut result.errors);
        result.errors = errors;
        Ok(result)
    }

    fn source_output_path(&self, source: &CrdSource) -> std::path::PathBuf {
        self.config.output.base_path.join(source.output_dir())
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    #[error("Duplicate data source type name: {0}")]
    DuplicateDataSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// Result type for the main application
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;
