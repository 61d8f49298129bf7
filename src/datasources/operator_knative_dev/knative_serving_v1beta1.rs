//! `KnativeServing` manifests (`operator.knative.dev/v1beta1`)

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
pub const KIND: &str = "KnativeServing";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1Manifest {
    pub metadata: NamespacedObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<KnativeServingV1beta1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1Spec {
    #[serde(flatten)]
    pub common: CommonSpec,

    #[serde(
        rename(
            serialize = "controller-custom-certs",
            deserialize = "controller_custom_certs"
        ),
        skip_serializing_if = "Option::is_none"
    )]
    pub controller_custom_certs: Option<KnativeServingV1beta1SpecControllerCustomCerts>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<KnativeServingV1beta1SpecIngress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<KnativeServingV1beta1SpecSecurity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1SpecControllerCustomCerts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1SpecIngress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contour: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub istio: Option<Enabled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kourier: Option<KnativeServingV1beta1SpecIngressKourier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1SpecIngressKourier {
    pub enabled: bool,

    #[serde(
        rename(serialize = "service-type", deserialize = "service_type"),
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnativeServingV1beta1SpecSecurity {
    #[serde(
        rename(serialize = "securityGuard", deserialize = "security_guard"),
        skip_serializing_if = "Option::is_none"
    )]
    pub security_guard: Option<Enabled>,
}

#[derive(Debug, Default)]
pub struct KnativeServingV1beta1ManifestDataSource;

#[async_trait]
impl DataSource for KnativeServingV1beta1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        let mut spec = common_spec_attributes();
        spec.extend(attributes([
            (
                "controller_custom_certs",
                Attribute::single_nested(attributes([
                    (
                        "name",
                        Attribute::string()
                            .description("The name of the ConfigMap or Secret")
                            .optional(),
                    ),
                    (
                        "type",
                        Attribute::string()
                            .description("One of ConfigMap or Secret")
                            .optional()
                            .validator(Validator::one_of(["ConfigMap", "Secret", ""])),
                    ),
                ]))
                .description("Enabling the controller to trust registries with self-signed certificates")
                .optional(),
            ),
            (
                "ingress",
                Attribute::single_nested(attributes([
                    ("contour", enabled_attribute("Contour settings")),
                    ("istio", enabled_attribute("Istio settings")),
                    (
                        "kourier",
                        Attribute::single_nested(attributes([
                            (
                                "enabled",
                                Attribute::bool()
                                    .description("Whether Kourier is enabled.")
                                    .required(),
                            ),
                            (
                                "service_type",
                                Attribute::string()
                                    .description("Service type for the Kourier gateway.")
                                    .optional()
                                    .validator(Validator::one_of([
                                        "ClusterIP",
                                        "NodePort",
                                        "LoadBalancer",
                                    ])),
                            ),
                        ]))
                        .description("Kourier settings")
                        .optional(),
                    ),
                ]))
                .description("The ingress configuration for Knative Serving")
                .optional(),
            ),
            (
                "security",
                Attribute::single_nested(attributes([(
                    "security_guard",
                    enabled_attribute("Security Guard settings"),
                )]))
                .description("The security configuration for Knative Serving")
                .optional(),
            ),
        ]));

        Schema::new("KnativeServing is the Schema for the knativeservings API")
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", namespaced_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(spec)
                    .description("Spec defines the desired state of KnativeServing")
                    .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: KnativeServingV1beta1Manifest = match request.decode() {
            Ok(model) => model,
            Err(diagnostics) => return ReadResponse::failed(diagnostics),
        };

        match Manifest::new(API_VERSION, KIND, &model).to_yaml() {
            Ok(yaml) => ReadResponse::rendered(request.config, yaml),
            Err(e) => ReadResponse::error("Unable to marshal YAML", e.to_string()),
        }
    }
}
