//! `MachineConfig` manifests (`machineconfiguration.openshift.io/v1`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use manifest_schema::{attributes, Attribute, ElementType, Schema, Validator};

use crate::manifest::metadata::{cluster_metadata_attribute, ClusterObjectMeta};
use crate::manifest::{id_attribute, yaml_attribute, Manifest};
use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

pub const GROUP: &str = "machineconfiguration.openshift.io";
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = "machineconfiguration.openshift.io/v1";
pub const KIND: &str = "MachineConfig";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigV1Manifest {
    pub metadata: ClusterObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<MachineConfigV1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigV1Spec {
    #[serde(
        rename(
            serialize = "baseOSExtensionsContainerImage",
            deserialize = "base_os_extensions_container_image"
        ),
        skip_serializing_if = "Option::is_none"
    )]
    pub base_os_extensions_container_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fips: Option<bool>,

    #[serde(
        rename(serialize = "kernelArguments", deserialize = "kernel_arguments"),
        skip_serializing_if = "Option::is_none"
    )]
    pub kernel_arguments: Option<Vec<String>>,

    #[serde(
        rename(serialize = "kernelType", deserialize = "kernel_type"),
        skip_serializing_if = "Option::is_none"
    )]
    pub kernel_type: Option<String>,

    #[serde(
        rename(serialize = "osImageURL", deserialize = "os_image_url"),
        skip_serializing_if = "Option::is_none"
    )]
    pub os_image_url: Option<String>,
}

#[derive(Debug, Default)]
pub struct MachineConfigV1ManifestDataSource;

#[async_trait]
impl DataSource for MachineConfigV1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        Schema::new("MachineConfig defines the configuration for a machine")
            .attribute("id", id_attribute())
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", cluster_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "base_os_extensions_container_image",
                        Attribute::string()
                            .description("BaseOSExtensionsContainerImage specifies the remote location that will be used to fetch the extensions container matching a new-format OS image")
                            .optional(),
                    ),
                    (
                        "config",
                        Attribute::dynamic()
                            .description("Config is a Ignition Config object.")
                            .optional(),
                    ),
                    (
                        "extensions",
                        Attribute::list(ElementType::String)
                            .description("extensions contains a list of additional features that can be enabled on host")
                            .optional(),
                    ),
                    (
                        "fips",
                        Attribute::bool()
                            .description("fips controls FIPS mode")
                            .optional(),
                    ),
                    (
                        "kernel_arguments",
                        Attribute::list(ElementType::String)
                            .description("kernelArguments contains a list of kernel arguments to be added")
                            .optional(),
                    ),
                    (
                        "kernel_type",
                        Attribute::string()
                            .description("kernelType contains which kernel we want to be running like default (traditional), realtime, 64k-pages (aarch64 only).")
                            .optional()
                            .validator(Validator::one_of(["default", "realtime", "64k-pages"])),
                    ),
                    (
                        "os_image_url",
                        Attribute::string()
                            .description("OSImageURL specifies the remote location that will be used to fetch the OS.")
                            .optional(),
                    ),
                ]))
                .description("MachineConfigSpec is the spec for MachineConfig")
                .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: MachineConfigV1Manifest = match request.decode() {
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
