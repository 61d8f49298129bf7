//! `ContainerRuntimeConfig` manifests (`machineconfiguration.openshift.io/v1`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use manifest_schema::{attributes, Attribute, Schema, Validator};

use crate::manifest::metadata::{cluster_metadata_attribute, ClusterObjectMeta};
use crate::manifest::selector::{label_selector_attribute, LabelSelector};
use crate::manifest::{id_attribute, yaml_attribute, Manifest};
use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

pub const GROUP: &str = "machineconfiguration.openshift.io";
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = "machineconfiguration.openshift.io/v1";
pub const KIND: &str = "ContainerRuntimeConfig";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRuntimeConfigV1Manifest {
    pub metadata: ClusterObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<ContainerRuntimeConfigV1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRuntimeConfigV1Spec {
    #[serde(rename(
        serialize = "containerRuntimeConfig",
        deserialize = "container_runtime_config"
    ))]
    pub container_runtime_config: ContainerRuntimeConfigV1SpecContainerRuntimeConfig,

    #[serde(
        rename(
            serialize = "machineConfigPoolSelector",
            deserialize = "machine_config_pool_selector"
        ),
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_config_pool_selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRuntimeConfigV1SpecContainerRuntimeConfig {
    #[serde(
        rename(serialize = "defaultRuntime", deserialize = "default_runtime"),
        skip_serializing_if = "Option::is_none"
    )]
    pub default_runtime: Option<String>,

    #[serde(
        rename(serialize = "logLevel", deserialize = "log_level"),
        skip_serializing_if = "Option::is_none"
    )]
    pub log_level: Option<String>,

    /// Resource quantity, e.g. `-1` or `64Ki`
    #[serde(
        rename(serialize = "logSizeMax", deserialize = "log_size_max"),
        skip_serializing_if = "Option::is_none"
    )]
    pub log_size_max: Option<String>,

    #[serde(
        rename(serialize = "overlaySize", deserialize = "overlay_size"),
        skip_serializing_if = "Option::is_none"
    )]
    pub overlay_size: Option<String>,

    #[serde(
        rename(serialize = "pidsLimit", deserialize = "pids_limit"),
        skip_serializing_if = "Option::is_none"
    )]
    pub pids_limit: Option<i64>,
}

#[derive(Debug, Default)]
pub struct ContainerRuntimeConfigV1ManifestDataSource;

#[async_trait]
impl DataSource for ContainerRuntimeConfigV1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        Schema::new("ContainerRuntimeConfig describes a customized Container Runtime configuration.")
            .attribute("id", id_attribute())
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", cluster_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "container_runtime_config",
                        Attribute::single_nested(attributes([
                            (
                                "default_runtime",
                                Attribute::string()
                                    .description("defaultRuntime is the name of the OCI runtime to be used as the default.")
                                    .optional()
                                    .validator(Validator::one_of(["runc", "crun"])),
                            ),
                            (
                                "log_level",
                                Attribute::string()
                                    .description("logLevel specifies the verbosity of the logs based on the level it is set to.")
                                    .optional()
                                    .validator(Validator::one_of([
                                        "fatal", "panic", "error", "warn", "info", "debug",
                                    ])),
                            ),
                            (
                                "log_size_max",
                                Attribute::string()
                                    .description("logSizeMax specifies the Maximum size allowed for the container log file.")
                                    .optional(),
                            ),
                            (
                                "overlay_size",
                                Attribute::string()
                                    .description("overlaySize specifies the maximum size of a container image.")
                                    .optional(),
                            ),
                            (
                                "pids_limit",
                                Attribute::int64()
                                    .description("pidsLimit specifies the maximum number of processes allowed in a container")
                                    .optional()
                                    .validator(Validator::int64_at_least(-1)),
                            ),
                        ]))
                        .description("ContainerRuntimeConfiguration defines the tuneables of the container runtime")
                        .required(),
                    ),
                    (
                        "machine_config_pool_selector",
                        label_selector_attribute(
                            "MachineConfigPoolSelector selects which pools the ContainerRuntimeConfig shoud apply to.",
                        ),
                    ),
                ]))
                .description("ContainerRuntimeConfigSpec defines the desired state of ContainerRuntimeConfig")
                .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: ContainerRuntimeConfigV1Manifest = match request.decode() {
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
