//! `KnativeEventing` manifests (`operator.knative.dev/v1beta1`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use manifest_schema::{attributes, Attribute, Schema, Validator};

use super::common::{common_spec_attributes, enabled_attribute, CommonSpec, Enabled};
use crate::manifest::metadata::{namespaced_metadata_attribute, NamespacedObjectMeta};
use crate::manifest::{yaml_attribute, Manifest};
use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

pub const GROUP: &str = "operator.knative.dev";
pub const VERSION: &str = "v1beta1";
pub const API_VERSION: &str = "operator.knative.dev/v1beta1";
pub const KIND: &str = "KnativeEventing";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeEventingV1beta1Manifest {
    pub metadata: NamespacedObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<KnativeEventingV1beta1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeEventingV1beta1Spec {
    #[serde(flatten)]
    pub common: CommonSpec,

    #[serde(
        rename(serialize = "defaultBrokerClass", deserialize = "default_broker_class"),
        skip_serializing_if = "Option::is_none"
    )]
    pub default_broker_class: Option<String>,

    #[serde(
        rename(
            serialize = "sinkBindingSelectionMode",
            deserialize = "sink_binding_selection_mode"
        ),
        skip_serializing_if = "Option::is_none"
    )]
    pub sink_binding_selection_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<KnativeEventingV1beta1SpecSource>,
}

/// Optional event sources to install
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeEventingV1beta1SpecSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceph: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rabbitmq: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<Enabled>,
}

#[derive(Debug, Default)]
pub struct KnativeEventingV1beta1ManifestDataSource;

#[async_trait]
impl DataSource for KnativeEventingV1beta1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        let mut spec = common_spec_attributes();
        spec.extend(attributes([
            (
                "default_broker_class",
                Attribute::string()
                    .description("The default broker type to use for the brokers Knative creates.")
                    .optional(),
            ),
            (
                "sink_binding_selection_mode",
                Attribute::string()
                    .description("Specifies the selection mode for the sinkbinding webhook.")
                    .optional()
                    .validator(Validator::one_of(["inclusion", "exclusion"])),
            ),
            (
                "source",
                Attribute::single_nested(attributes([
                    ("ceph", enabled_attribute("Ceph settings")),
                    ("github", enabled_attribute("GitHub settings")),
                    ("gitlab", enabled_attribute("GitLab settings")),
                    ("kafka", enabled_attribute("Apache Kafka settings")),
                    ("rabbitmq", enabled_attribute("RabbitMQ settings")),
                    ("redis", enabled_attribute("Redis settings")),
                ]))
                .description("The source configuration for Knative Eventing")
                .optional(),
            ),
        ]));

        Schema::new("KnativeEventing is the Schema for the eventings API")
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", namespaced_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(spec)
                    .description("Spec defines the desired state of KnativeEventing")
                    .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: KnativeEventingV1beta1Manifest = match request.decode() {
            Ok(model) => model,
            Err(diagnostics) => return ReadResponse::failed(diagnostics),
        };

        match Manifest::new(API_VERSION, KIND, &model).to_yaml() {
            Ok(yaml) => ReadResponse::rendered(request.config, yaml),
            Err(e) => ReadResponse::error("Unable to marshal YAML", e.to_string()),
        }
    }
}
