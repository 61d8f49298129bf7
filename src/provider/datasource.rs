//! Data source contract

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use manifest_schema::naming::manifest_type_name;
use manifest_schema::{Diagnostic, Diagnostics, Schema};

/// A read-only data source
///
/// Implementations hold no state; every read is an independent transform
/// of its configuration.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Type name under the requesting provider
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse;

    fn schema(&self) -> Schema;

    /// Render the configuration. The caller validates it against
    /// [`DataSource::schema`] first.
    async fn read(&self, request: ReadRequest) -> ReadResponse;
}

#[derive(Debug, Clone)]
pub struct MetadataRequest {
    pub provider_type_name: String,
}

impl MetadataRequest {
    pub fn new(provider_type_name: impl Into<String>) -> Self {
        Self {
            provider_type_name: provider_type_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataResponse {
    pub type_name: String,
}

impl MetadataResponse {
    /// Type name of a manifest data source, e.g.
    /// `k8s_operator_knative_dev_knative_serving_v1beta1_manifest`
    pub fn manifest(request: &MetadataRequest, group: &str, kind: &str, version: &str) -> Self {
        Self {
            type_name: manifest_type_name(&request.provider_type_name, group, kind, version),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Configuration keyed by attribute name
    pub config: Value,
}

impl ReadRequest {
    pub fn new(config: Value) -> Self {
        Self { config }
    }

    /// Decode the configuration into a model
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Diagnostics> {
        serde_json::from_value(self.config.clone()).map_err(|e| {
            Diagnostics::from(Diagnostic::error(
                "Unable to decode configuration",
                e.to_string(),
            ))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadResponse {
    /// Configuration plus computed attributes; `None` when the read failed
    pub state: Option<Value>,

    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    /// State holding the configuration and the rendered `yaml`
    pub fn rendered(config: Value, yaml: String) -> Self {
        let mut state = match config {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        state.insert("yaml".to_string(), Value::String(yaml));

        Self {
            state: Some(Value::Object(state)),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Set the computed `id`
    pub fn with_id(mut self, id: String) -> Self {
        if let Some(Value::Object(state)) = &mut self.state {
            state.insert("id".to_string(), Value::String(id));
        }
        self
    }

    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::failed(Diagnostic::error(summary, detail).into())
    }

    pub fn yaml(&self) -> Option<&str> {
        self.state.as_ref()?.get("yaml")?.as_str()
    }

    pub fn id(&self) -> Option<&str> {
        self.state.as_ref()?.get("id")?.as_str()
    }

    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}
