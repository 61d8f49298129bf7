//! CRD types and data structures

use serde::{Deserialize, Serialize};

/// Validation rules extracted from an OpenAPI schema node
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ValidationRules {
    /// Minimum length for strings
    pub min_length: Option<usize>,

    /// Maximum length for strings
    pub max_length: Option<usize>,

    /// Pattern for strings (regex)
    pub pattern: Option<String>,

    /// Minimum value for numbers
    pub minimum: Option<f64>,

    /// Maximum value for numbers
    pub maximum: Option<f64>,

    /// Minimum number of array items
    pub min_items: Option<usize>,

    /// Maximum number of array items
    pub max_items: Option<usize>,

    /// Enum values
    pub enum_values: Vec<String>,

    /// Description
    pub description: Option<String>,

    /// Required child properties
    pub required: Vec<String>,
}

impl ValidationRules {
    /// Extract validation rules from an OpenAPI schema node
    pub fn from_schema(schema: &serde_yaml::Value) -> Self {
        let usize_of = |key: &str| schema.get(key).and_then(|v| v.as_u64()).map(|v| v as usize);
        let f64_of = |key: &str| schema.get(key).and_then(|v| v.as_f64());
        let string_of = |key: &str| schema.get(key).and_then(|v| v.as_str()).map(str::to_string);
        let strings_of = |key: &str| {
            schema
                .get(key)
                .and_then(|v| v.as_sequence())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            min_length: usize_of("minLength"),
            max_length: usize_of("maxLength"),
            pattern: string_of("pattern"),
            minimum: f64_of("minimum"),
            maximum: f64_of("maximum"),
            min_items: usize_of("minItems"),
            max_items: usize_of("maxItems"),
            enum_values: strings_of("enum"),
            description: string_of("description"),
            required: strings_of("required"),
        }
    }
}
