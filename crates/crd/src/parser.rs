//! CRD parser implementation

use anyhow::{anyhow, Context, Result};
use glob::Pattern;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::schema::{CrdSchema, Scope};

pub struct CrdParser;

/// CRD schemas found under a directory, plus the documents that could not be parsed
#[derive(Debug, Default)]
pub struct ParsedCrds {
    pub schemas: Vec<CrdSchema>,

    /// One entry per malformed file or document, prefixed with its location
    pub errors: Vec<String>,
}

impl ParsedCrds {
    fn merge(&mut self, other: ParsedCrds) {
        self.schemas.extend(other.schemas);
        self.errors.extend(other.errors);
    }
}

impl Default for CrdParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CrdParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse CRDs from a directory, applying filters.
    ///
    /// Only a missing directory fails the whole call. A malformed document is
    /// reported in [`ParsedCrds::errors`] and the rest of its file is still used.
    pub fn parse_from_directory(&self, dir_path: &Path, filters: &[String]) -> Result<ParsedCrds> {
        info!("Parsing CRDs from directory: {:?}", dir_path);

        if !dir_path.is_dir() {
            return Err(anyhow!("CRD source is not a directory: {:?}", dir_path));
        }

        let mut parsed = ParsedCrds::default();

        for entry in WalkDir::new(dir_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();

            match path.extension() {
                Some(ext) if ext == "yaml" || ext == "yml" => {}
                _ => continue,
            }

            match self.parse_file(path) {
                Ok(mut file) => {
                    file.schemas
                        .retain(|schema| self.matches_filters(schema, filters));
                    parsed.merge(file);
                }
                Err(e) => {
                    warn!("Failed to read {}: {:#}", path.display(), e);
                    parsed.errors.push(format!("{}: {:#}", path.display(), e));
                }
            }
        }

        info!(
            "Found {} CRD schemas after filtering ({} errors)",
            parsed.schemas.len(),
            parsed.errors.len()
        );
        Ok(parsed)
    }

    /// Parse every CRD document in a single (possibly multi-document) file.
    ///
    /// Fails only when the file cannot be read; each bad document is recorded
    /// and skipped.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedCrds> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut parsed = ParsedCrds::default();

        for (index, document) in serde_yaml::Deserializer::from_str(&content).enumerate() {
            let location = format!("{} (document {})", path.display(), index + 1);

            let doc = match serde_yaml::Value::deserialize(document) {
                Ok(doc) => doc,
                Err(e) => {
                    // The stream cannot be resynchronized after a syntax error
                    warn!("Invalid YAML in {}: {}", location, e);
                    parsed.errors.push(format!("{location}: {e}"));
                    break;
                }
            };

            match self.extract_crd_from_document(&doc, path) {
                Ok(schemas) => parsed.schemas.extend(schemas),
                Err(e) => {
                    warn!("Skipping malformed CRD in {}: {:#}", location, e);
                    parsed.errors.push(format!("{location}: {e:#}"));
                }
            }
        }

        if parsed.schemas.is_empty() && parsed.errors.is_empty() {
            debug!("No CRDs in {}", path.display());
        }

        Ok(parsed)
    }

    /// Extract one schema per served version from a YAML document
    pub fn extract_crd_from_document(
        &self,
        doc: &serde_yaml::Value,
        source_path: &Path,
    ) -> Result<Vec<CrdSchema>> {
        match doc.get("kind").and_then(|k| k.as_str()) {
            Some("CustomResourceDefinition") => {}
            _ => return Ok(Vec::new()),
        }

        let name = doc
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| anyhow!("CRD missing metadata.name"))?;

        let spec = doc.get("spec").ok_or_else(|| anyhow!("CRD missing spec"))?;

        let group = spec
            .get("group")
            .and_then(|g| g.as_str())
            .ok_or_else(|| anyhow!("CRD {name} missing group"))?;

        let names = spec
            .get("names")
            .ok_or_else(|| anyhow!("CRD {name} missing names"))?;

        let kind = names
            .get("kind")
            .and_then(|k| k.as_str())
            .ok_or_else(|| anyhow!("CRD {name} missing names.kind"))?;

        let plural = names
            .get("plural")
            .and_then(|p| p.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}s", kind.to_lowercase()));

        let scope = match spec.get("scope").and_then(|s| s.as_str()) {
            Some("Cluster") => Scope::Cluster,
            _ => Scope::Namespaced,
        };

        let versions = spec
            .get("versions")
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| anyhow!("CRD {name} missing versions"))?;

        let mut crd_schemas = Vec::new();

        for version_doc in versions {
            let version_name = version_doc
                .get("name")
                .and_then(|n| n.as_str())
                .ok_or_else(|| anyhow!("CRD {name} version missing name"))?;

            let served = version_doc
                .get("served")
                .and_then(|s| s.as_bool())
                .unwrap_or(true);
            if !served {
                debug!("Skipping unserved version {version_name} of {name}");
                continue;
            }

            let schema = version_doc
                .get("schema")
                .and_then(|s| s.get("openAPIV3Schema"))
                .ok_or_else(|| anyhow!("CRD {name} version {version_name} missing openAPIV3Schema"))?;

            crd_schemas.push(CrdSchema {
                name: name.to_string(),
                group: group.to_string(),
                version: version_name.to_string(),
                api_version: format!("{group}/{version_name}"),
                kind: kind.to_string(),
                plural: plural.clone(),
                scope,
                schema: schema.clone(),
                source_path: source_path.to_path_buf(),
            });
        }

        Ok(crd_schemas)
    }

    /// Check if a CRD schema matches the given filters
    pub fn matches_filters(&self, schema: &CrdSchema, filters: &[String]) -> bool {
        if filters.is_empty() {
            return true;
        }

        filters
            .iter()
            .any(|filter| self.matches_filter(schema, filter))
    }

    /// Check if a CRD schema matches a glob pattern on its API version
    fn matches_filter(&self, schema: &CrdSchema, filter: &str) -> bool {
        match Pattern::new(filter) {
            Ok(pattern) => pattern.matches(&schema.api_version),
            Err(_) => false,
        }
    }
}
