//! Provider: a named registry of data sources

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use manifest_schema::{Diagnostics, Schema};

use crate::{ManifestError, ManifestResult};

mod datasource;


pub use datasource::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

/// Provider name of the built-in data sources
pub const DEFAULT_PROVIDER_NAME: &str = "k8s";

/// Data sources keyed by type name
pub struct Provider {
    name: String,
    data_sources: BTreeMap<String, Arc<dyn DataSource>>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_sources: BTreeMap::new(),
        }
    }

    /// The `k8s` provider with every built-in manifest data source
    pub fn with_builtin_data_sources() -> ManifestResult<Self> {
        let mut provider = Self::new(DEFAULT_PROVIDER_NAME);
        for data_source in crate::datasources::all() {
            provider.register(data_source)?;
        }
        Ok(provider)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a data source under the type name it reports for this provider
    pub fn register(&mut self, data_source: Arc<dyn DataSource>) -> ManifestResult<String> {
        let type_name = data_source
            .metadata(&MetadataRequest::new(&self.name))
            .type_name;

        if self.data_sources.contains_key(&type_name) {
            return Err(ManifestError::DuplicateDataSource(type_name));
        }

        debug!("Registered data source {}", type_name);
        self.data_sources.insert(type_name.clone(), data_source);
        Ok(type_name)
    }

    /// Registered type names, sorted
    pub fn data_source_names(&self) -> Vec<&str> {
        self.data_sources.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.data_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty()
    }

    pub fn data_source(&self, type_name: &str) -> ManifestResult<&Arc<dyn DataSource>> {
        self.data_sources
            .get(type_name)
            .ok_or_else(|| ManifestError::UnknownDataSource(type_name.to_string()))
    }

    pub fn schema(&self, type_name: &str) -> ManifestResult<Schema> {
        Ok(self.data_source(type_name)?.schema())
    }

    /// Schema self-checks of every data source; only those with findings are returned
    pub fn validate_implementation(&self) -> BTreeMap<String, Diagnostics> {
        self.data_sources
            .iter()
            .filter_map(|(type_name, data_source)| {
                let diagnostics = data_source.schema().validate_implementation();
                (!diagnostics.is_empty()).then(|| (type_name.clone(), diagnostics))
            })
            .collect()
    }

    /// Validate `config` against the data source schema, then read it.
    ///
    /// An invalid configuration never reaches the data source; the response
    /// carries the validation diagnostics and no state.
    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: Value,
    ) -> ManifestResult<ReadResponse> {
        let data_source = self.data_source(type_name)?;

        let mut diagnostics = data_source.schema().validate_config(&config);
        if diagnostics.has_error() {
            debug!(
                "Configuration for {} rejected with {} diagnostics",
                type_name,
                diagnostics.len()
            );
            return Ok(ReadResponse::failed(diagnostics));
        }

        let mut response = data_source.read(ReadRequest::new(config)).await;
        debug!("Read {} (errors: {})", type_name, response.has_error());

        diagnostics.extend(response.diagnostics);
        response.diagnostics = diagnostics;
        Ok(response)
    }
}
