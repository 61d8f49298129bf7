//! Spec fields shared by the Knative operator resources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use manifest_schema::{attributes, Attribute, Attributes, ElementType, Validator};

/// Spec fields common to `KnativeServing` and `KnativeEventing`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonSpec {
    /// ConfigMap name to key/value overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, BTreeMap<String, String>>>,

    #[serde(
        rename(serialize = "high-availability", deserialize = "high_availability"),
        skip_serializing_if = "Option::is_none"
    )]
    pub high_availability: Option<HighAvailability>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workloads: Option<Vec<WorkloadOverride>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighAvailability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(
        rename(serialize = "imagePullSecrets", deserialize = "image_pull_secrets"),
        skip_serializing_if = "Option::is_none"
    )]
    pub image_pull_secrets: Option<Vec<ImagePullSecret>>,

    /// Container name to image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#override: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePullSecret {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadOverride {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(
        rename(serialize = "nodeSelector", deserialize = "node_selector"),
        skip_serializing_if = "Option::is_none"
    )]
    pub node_selector: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,
}

/// Toggle for an optional component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enabled {
    pub enabled: bool,
}

pub fn enabled_attribute(description: &str) -> Attribute {
    Attribute::single_nested(attributes([(
        "enabled",
        Attribute::bool()
            .description("Whether the component is enabled.")
            .required(),
    )]))
    .description(description)
    .optional()
}

/// Attributes of [`CommonSpec`]
pub fn common_spec_attributes() -> Attributes {
    attributes([
        (
            "config",
            Attribute::map(ElementType::map_of(ElementType::String))
                .description("A means to override the corresponding entries in the upstream configmaps")
                .optional(),
        ),
        (
            "high_availability",
            Attribute::single_nested(attributes([(
                "replicas",
                Attribute::int64()
                    .description("Replicas is the number of replicas that HA parts of the control plane will be scaled to.")
                    .optional()
                    .validator(Validator::int64_at_least(0)),
            )]))
            .description("Allows specification of HA control plane.")
            .optional(),
        ),
        (
            "registry",
            Attribute::single_nested(attributes([
                (
                    "default",
                    Attribute::string()
                        .description("The default image reference template to use for all knative images.")
                        .optional(),
                ),
                (
                    "image_pull_secrets",
                    Attribute::list_nested(attributes([(
                        "name",
                        Attribute::string()
                            .description("The name of the secret.")
                            .optional(),
                    )]))
                    .description("A list of secrets to be used when pulling the knative images.")
                    .optional(),
                ),
                (
                    "override",
                    Attribute::map(ElementType::String)
                        .description("A map of a container name or image name to the full image location of the individual knative image.")
                        .optional(),
                ),
            ]))
            .description("A means to override the image references of the Knative images.")
            .optional(),
        ),
        (
            "version",
            Attribute::string()
                .description("The version of Knative to be installed")
                .optional(),
        ),
        (
            "workloads",
            Attribute::list_nested(attributes([
                (
                    "name",
                    Attribute::string()
                        .description("Name is the name of the deployment or statefulset to override.")
                        .required()
                        .validator(Validator::length_at_least(1)),
                ),
                (
                    "annotations",
                    Attribute::map(ElementType::String)
                        .description("Annotations overrides labels for the deployment and its template.")
                        .optional(),
                ),
                (
                    "labels",
                    Attribute::map(ElementType::String)
                        .description("Labels overrides labels for the deployment and its template.")
                        .optional(),
                ),
                (
                    "node_selector",
                    Attribute::map(ElementType::String)
                        .description("NodeSelector overrides nodeSelector for the deployment.")
                        .optional(),
                ),
                (
                    "replicas",
                    Attribute::int64()
                        .description("The number of replicas that HA parts of the control plane will be scaled to.")
                        .optional()
                        .validator(Validator::int64_at_least(0)),
                ),
            ]))
            .description("A mapping of deployment or statefulset name to override")
            .optional(),
        ),
    ])
}
