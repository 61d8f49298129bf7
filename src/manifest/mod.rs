//! Manifest rendering and the attributes shared by every manifest data source

use serde::Serialize;

use manifest_schema::Attribute;

pub mod metadata;
pub mod selector;

/// A resource body stamped with its `apiVersion` and `kind`.
///
/// Serializes with `apiVersion` and `kind` first, followed by the body's own
/// fields (`metadata`, `spec`).
#[derive(Debug, Serialize)]
pub struct Manifest<'a, T> {
    #[serde(rename = "apiVersion")]
    api_version: &'a str,

    kind: &'a str,

    #[serde(flatten)]
    body: &'a T,
}

impl<'a, T: Serialize> Manifest<'a, T> {
    pub fn new(api_version: &'a str, kind: &'a str, body: &'a T) -> Self {
        Self {
            api_version,
            kind,
            body,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Computed `id`, copied from `metadata.name`
pub fn id_attribute() -> Attribute {
    Attribute::string()
        .description("Contains the value `metadata.name`.")
        .computed()
}

/// Computed `yaml`, the rendered manifest
pub fn yaml_attribute() -> Attribute {
    Attribute::string()
        .description("The generated manifest in YAML format.")
        .computed()
}
