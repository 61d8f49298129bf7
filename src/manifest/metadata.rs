//! Object metadata for cluster scoped and namespaced resources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use manifest_schema::{attributes, Attribute, ElementType, Validator};

/// DNS-1123 subdomain
pub const DNS_SUBDOMAIN_PATTERN: &str =
    r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

/// DNS-1123 label
pub const DNS_LABEL_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

/// Label and annotation keys: an optional DNS subdomain prefix and a name
pub const QUALIFIED_NAME_PATTERN: &str =
    r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/)?[A-Za-z0-9]([-A-Za-z0-9_.]{0,61}[A-Za-z0-9])?$";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterObjectMeta {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespacedObjectMeta {
    pub name: String,

    pub namespace: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

fn name_attribute() -> Attribute {
    Attribute::string()
        .description("Unique identifier for this object. See https://kubernetes.io/docs/concepts/overview/working-with-objects/names#names")
        .required()
        .validator(Validator::length_between(1, 253))
        .validator(Validator::regex_matches(
            DNS_SUBDOMAIN_PATTERN,
            "must be a lowercase RFC 1123 subdomain",
        ))
}

fn namespace_attribute() -> Attribute {
    Attribute::string()
        .description("Namespace defines the space within which each name must be unique. See https://kubernetes.io/docs/concepts/overview/working-with-objects/namespaces/")
        .required()
        .validator(Validator::length_between(1, 63))
        .validator(Validator::regex_matches(
            DNS_LABEL_PATTERN,
            "must be a lowercase RFC 1123 label",
        ))
}

fn labels_attribute() -> Attribute {
    Attribute::map(ElementType::String)
        .description("Map of string keys and values that can be used to organize and categorize (scope and select) objects. See https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/")
        .optional()
        .validator(Validator::keys_match(
            QUALIFIED_NAME_PATTERN,
            "label keys must be qualified names",
        ))
}

fn annotations_attribute() -> Attribute {
    Attribute::map(ElementType::String)
        .description("Unstructured key value map stored with a resource that may be set by external tools. See https://kubernetes.io/docs/concepts/overview/working-with-objects/annotations/")
        .optional()
        .validator(Validator::keys_match(
            QUALIFIED_NAME_PATTERN,
            "annotation keys must be qualified names",
        ))
}

const METADATA_DESCRIPTION: &str =
    "Data that helps uniquely identify the object, including a name string and optional labels and annotations.";

/// `metadata` of a cluster scoped resource
pub fn cluster_metadata_attribute() -> Attribute {
    Attribute::single_nested(attributes([
        ("name", name_attribute()),
        ("labels", labels_attribute()),
        ("annotations", annotations_attribute()),
    ]))
    .description(METADATA_DESCRIPTION)
    .required()
}

/// `metadata` of a namespaced resource
pub fn namespaced_metadata_attribute() -> Attribute {
    Attribute::single_nested(attributes([
        ("name", name_attribute()),
        ("namespace", namespace_attribute()),
        ("labels", labels_attribute()),
        ("annotations", annotations_attribute()),
    ]))
    .description(METADATA_DESCRIPTION)
    .required()
}
