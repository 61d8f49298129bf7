//! Main data source generator implementation

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use manifest_crd::{CrdSchema, ResourceModel};
use manifest_schema::naming::{pascal_case, snake_case};

use crate::config::{OrganizationStrategy, OutputConfig};
use crate::emit::{self, ModuleEntry, SourceInfo};
use crate::result::SourceResult;

pub struct ManifestGenerator {
    output_config: OutputConfig,
}

impl ManifestGenerator {
    pub fn new(output_config: OutputConfig) -> Self {
        Self { output_config }
    }

    pub fn output_config(&self) -> &OutputConfig {
        &self.output_config
    }

    /// Generate data source modules for CRD schemas.
    ///
    /// With `dry_run` set nothing is written; the result lists the files that
    /// would have been generated.
    pub async fn generate(
        &self,
        source_name: &str,
        schemas: &[CrdSchema],
        output_path: &Path,
        dry_run: bool,
    ) -> Result<SourceResult> {
        info!(
            "Generating data sources for {} CRD schemas from {}",
            schemas.len(),
            source_name
        );

        let start = Instant::now();
        let mut result = SourceResult::new(source_name, output_path.to_path_buf());

        if !dry_run {
            std::fs::create_dir_all(output_path)
                .with_context(|| format!("Failed to create {}", output_path.display()))?;
        }

        let mut modules: BTreeMap<String, Vec<ModuleEntry>> = BTreeMap::new();

        for schema in schemas {
            let file_path = self.module_path(output_path, schema);

            let content = match self.render_module(schema) {
                Ok((content, warnings)) => {
                    result.warnings.extend(warnings);
                    content
                }
                Err(e) => {
                    result
                        .errors
                        .push(format!("Failed to generate {}: {e:#}", schema.api_version));
                    continue;
                }
            };

            if !dry_run {
                if let Err(e) = write_file(&file_path, &content) {
                    result.errors.push(format!("{e:#}"));
                    continue;
                }
            }
            debug!("Generated data source module: {:?}", file_path);

            result.generated_files.push(file_path);
            modules
                .entry(schema.group.clone())
                .or_default()
                .push(ModuleEntry {
                    module_name: self.module_name(schema),
                    data_source: format!(
                        "{}{}ManifestDataSource",
                        schema.kind,
                        pascal_case(&schema.version)
                    ),
                });
        }

        for (path, content) in self.index_modules(output_path, &modules) {
            if !dry_run {
                if let Err(e) = write_file(&path, &content) {
                    result.errors.push(format!("{e:#}"));
                    continue;
                }
            }
            result.generated_files.push(path);
        }

        result.files_generated = result.generated_files.len();
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Generated {} files for {} ({} errors)",
            result.files_generated,
            source_name,
            result.errors.len()
        );
        Ok(result)
    }

    /// Render the module for one CRD version, with any generation warnings
    pub fn render_module(&self, schema: &CrdSchema) -> Result<(String, Vec<String>)> {
        let model = ResourceModel::from_crd(schema)?;
        let mut warnings = Vec::new();

        if model.spec.is_none() && schema.spec_schema().is_some() {
            warnings.push(format!(
                "{} {} declares an untyped spec; the data source only renders metadata",
                schema.api_version, schema.kind
            ));
        }

        let source = SourceInfo {
            file_name: schema
                .source_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| schema.source_path.display().to_string()),
            sha256: calculate_file_hash(&schema.source_path)?,
        };

        Ok((emit::resource_module(&model, &source), warnings))
    }

    fn module_name(&self, schema: &CrdSchema) -> String {
        match self.output_config.organization {
            OrganizationStrategy::ApiGroup => schema.module_name(),
            OrganizationStrategy::Flat => {
                format!("{}_{}", snake_case(&schema.group), schema.module_name())
            }
        }
    }

    fn module_path(&self, output_path: &Path, schema: &CrdSchema) -> PathBuf {
        let file_name = format!("{}.rs", self.module_name(schema));
        match self.output_config.organization {
            OrganizationStrategy::ApiGroup => {
                output_path.join(snake_case(&schema.group)).join(file_name)
            }
            OrganizationStrategy::Flat => output_path.join(file_name),
        }
    }

    /// `mod.rs` files tying the generated modules together
    fn index_modules(
        &self,
        output_path: &Path,
        modules: &BTreeMap<String, Vec<ModuleEntry>>,
    ) -> Vec<(PathBuf, String)> {
        if modules.is_empty() {
            return Vec::new();
        }

        match self.output_config.organization {
            OrganizationStrategy::ApiGroup => {
                let mut files: Vec<(PathBuf, String)> = modules
                    .iter()
                    .map(|(group, entries)| {
                        (
                            output_path.join(snake_case(group)).join("mod.rs"),
                            emit::group_module(group, entries),
                        )
                    })
                    .collect();
                let groups: Vec<String> = modules.keys().cloned().collect();
                files.push((output_path.join("mod.rs"), emit::root_module(&groups)));
                files
            }
            OrganizationStrategy::Flat => {
                let entries: Vec<ModuleEntry> = modules.values().flatten().cloned().collect();
                vec![(
                    output_path.join("mod.rs"),
                    emit::group_module("generated manifests", &entries),
                )]
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Calculate SHA256 hash of a file
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let content = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}
