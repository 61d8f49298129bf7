//! `KubeletConfig` manifests (`machineconfiguration.openshift.io/v1`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use manifest_schema::{attributes, Attribute, ElementType, Schema, Validator};

use crate::manifest::metadata::{cluster_metadata_attribute, ClusterObjectMeta};
use crate::manifest::selector::{label_selector_attribute, LabelSelector};
use crate::manifest::{id_attribute, yaml_attribute, Manifest};
use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

pub const GROUP: &str = "machineconfiguration.openshift.io";
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = "machineconfiguration.openshift.io/v1";
pub const KIND: &str = "KubeletConfig";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeletConfigV1Manifest {
    pub metadata: ClusterObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<KubeletConfigV1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeletConfigV1Spec {
    #[serde(
        rename(serialize = "autoSizingReserved", deserialize = "auto_sizing_reserved"),
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_sizing_reserved: Option<bool>,

    #[serde(
        rename(serialize = "kubeletConfig", deserialize = "kubelet_config"),
        skip_serializing_if = "Option::is_none"
    )]
    pub kubelet_config: Option<serde_json::Value>,

    #[serde(
        rename(serialize = "logLevel", deserialize = "log_level"),
        skip_serializing_if = "Option::is_none"
    )]
    pub log_level: Option<i64>,

    #[serde(
        rename(
            serialize = "machineConfigPoolSelector",
            deserialize = "machine_config_pool_selector"
        ),
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_config_pool_selector: Option<LabelSelector>,

    #[serde(
        rename(serialize = "tlsSecurityProfile", deserialize = "tls_security_profile"),
        skip_serializing_if = "Option::is_none"
    )]
    pub tls_security_profile: Option<KubeletConfigV1SpecTlsSecurityProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeletConfigV1SpecTlsSecurityProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<KubeletConfigV1SpecTlsSecurityProfileCustom>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modern: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeletConfigV1SpecTlsSecurityProfileCustom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphers: Option<Vec<String>>,

    #[serde(
        rename(serialize = "minTLSVersion", deserialize = "min_tls_version"),
        skip_serializing_if = "Option::is_none"
    )]
    pub min_tls_version: Option<String>,
}

const TLS_VERSIONS: [&str; 4] = ["VersionTLS10", "VersionTLS11", "VersionTLS12", "VersionTLS13"];

#[derive(Debug, Default)]
pub struct KubeletConfigV1ManifestDataSource;

#[async_trait]
impl DataSource for KubeletConfigV1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        Schema::new("KubeletConfig describes a customized Kubelet configuration.")
            .attribute("id", id_attribute())
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", cluster_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "auto_sizing_reserved",
                        Attribute::bool()
                            .description("Automatically size the system reserved resources of the node.")
                            .optional(),
                    ),
                    (
                        "kubelet_config",
                        Attribute::dynamic()
                            .description("kubeletConfig fields are defined in kubernetes upstream.")
                            .optional(),
                    ),
                    (
                        "log_level",
                        Attribute::int64()
                            .description("Kubelet log verbosity.")
                            .optional()
                            .validator(Validator::int64_between(0, 10)),
                    ),
                    (
                        "machine_config_pool_selector",
                        label_selector_attribute(
                            "MachineConfigPoolSelector selects which pools the KubeletConfig shoud apply to.",
                        ),
                    ),
                    (
                        "tls_security_profile",
                        Attribute::single_nested(attributes([
                            (
                                "custom",
                                Attribute::single_nested(attributes([
                                    (
                                        "ciphers",
                                        Attribute::list(ElementType::String)
                                            .description("ciphers is used to specify the cipher algorithms that are negotiated during the TLS handshake.")
                                            .optional(),
                                    ),
                                    (
                                        "min_tls_version",
                                        Attribute::string()
                                            .description("minTLSVersion is used to specify the minimal version of the TLS protocol that is negotiated during the TLS handshake.")
                                            .optional()
                                            .validator(Validator::one_of(TLS_VERSIONS)),
                                    ),
                                ]))
                                .description("custom is a user-defined TLS security profile.")
                                .optional(),
                            ),
                            (
                                "intermediate",
                                Attribute::dynamic()
                                    .description("intermediate is a TLS security profile based on the Mozilla intermediate configuration.")
                                    .optional(),
                            ),
                            (
                                "modern",
                                Attribute::dynamic()
                                    .description("modern is a TLS security profile based on the Mozilla modern configuration.")
                                    .optional(),
                            ),
                            (
                                "old",
                                Attribute::dynamic()
                                    .description("old is a TLS security profile based on the Mozilla old configuration.")
                                    .optional(),
                            ),
                            (
                                "type",
                                Attribute::string()
                                    .description("type is one of Old, Intermediate, Modern or Custom.")
                                    .optional()
                                    .validator(Validator::one_of(["Old", "Intermediate", "Modern", "Custom"])),
                            ),
                        ]))
                        .description("If unset, the default is based on the apiservers.config.openshift.io/cluster resource.")
                        .optional(),
                    ),
                ]))
                .description("KubeletConfigSpec defines the desired state of KubeletConfig")
                .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: KubeletConfigV1Manifest = match request.decode() {
            Ok(model) => model,
            Err(diagnostics) => return ReadResponse::failed(diagnostics),
        };

        match Manifest::new(API_VERSION, KIND, &model).to_yaml() {
            Ok(yaml) => ReadResponse::rendered(request.config, yaml)
                .with_id(model.metadata.name.clone()),
            Err(e) => ReadResponse::error("Unable to marshal YAML", e.to_string()),
        }
    }
}
