//! Data source schema

use serde::Serialize;
use serde_json::Value;

use crate::attribute::{Attribute, Attributes};
use crate::diagnostics::Diagnostics;
use crate::validate;

/// Top-level schema of a data source
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schema {
    pub description: String,

    pub markdown_description: String,

    pub attributes: Attributes,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            markdown_description: description.clone(),
            description,
            attributes: Attributes::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Check the schema for internal consistency
    pub fn validate_implementation(&self) -> Diagnostics {
        validate::validate_implementation(self)
    }

    /// Check a configuration value against the schema
    pub fn validate_config(&self, config: &Value) -> Diagnostics {
        validate::validate_config(self, config)
    }
}
