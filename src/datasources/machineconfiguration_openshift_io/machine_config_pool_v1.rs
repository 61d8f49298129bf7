//! `MachineConfigPool` manifests (`machineconfiguration.openshift.io/v1`)

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
pub const KIND: &str = "MachineConfigPool";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigPoolV1Manifest {
    pub metadata: ClusterObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<MachineConfigPoolV1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigPoolV1Spec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MachineConfigPoolV1SpecConfiguration>,

    #[serde(
        rename(serialize = "machineConfigSelector", deserialize = "machine_config_selector"),
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_config_selector: Option<LabelSelector>,

    /// Integer or percentage, kept as written
    #[serde(
        rename(serialize = "maxUnavailable", deserialize = "max_unavailable"),
        skip_serializing_if = "Option::is_none"
    )]
    pub max_unavailable: Option<String>,

    #[serde(
        rename(serialize = "nodeSelector", deserialize = "node_selector"),
        skip_serializing_if = "Option::is_none"
    )]
    pub node_selector: Option<LabelSelector>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigPoolV1SpecConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<MachineConfigPoolV1SpecConfigurationSource>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfigPoolV1SpecConfigurationSource {
    #[serde(
        rename(serialize = "apiVersion", deserialize = "api_version"),
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct MachineConfigPoolV1ManifestDataSource;

#[async_trait]
impl DataSource for MachineConfigPoolV1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        Schema::new("MachineConfigPool describes a pool of MachineConfigs.")
            .attribute("id", id_attribute())
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", cluster_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "configuration",
                        Attribute::single_nested(attributes([
                            (
                                "name",
                                Attribute::string()
                                    .description("name is the name of the rendered MachineConfig object.")
                                    .optional()
                                    .validator(Validator::length_at_most(253)),
                            ),
                            (
                                "source",
                                Attribute::list_nested(attributes([
                                    (
                                        "api_version",
                                        Attribute::string()
                                            .description("API version of the referent.")
                                            .optional(),
                                    ),
                                    (
                                        "kind",
                                        Attribute::string()
                                            .description("Kind of the referent.")
                                            .optional(),
                                    ),
                                    (
                                        "name",
                                        Attribute::string()
                                            .description("Name of the referent.")
                                            .optional(),
                                    ),
                                ]))
                                .description("source is the list of MachineConfigs that were used to generate the single MachineConfig object specified in content.")
                                .optional(),
                            ),
                        ]))
                        .description("The targeted MachineConfig object for the machine config pool.")
                        .optional(),
                    ),
                    (
                        "machine_config_selector",
                        label_selector_attribute(
                            "machineConfigSelector specifies a label selector for MachineConfigs.",
                        ),
                    ),
                    (
                        "max_unavailable",
                        Attribute::string()
                            .description("maxUnavailable defines either an integer number or percentage of nodes in the pool that can go Unavailable during an update.")
                            .optional(),
                    ),
                    (
                        "node_selector",
                        label_selector_attribute(
                            "nodeSelector specifies a label selector for Machines",
                        ),
                    ),
                    (
                        "paused",
                        Attribute::bool()
                            .description("paused specifies whether or not changes to this machine config pool should be stopped.")
                            .optional(),
                    ),
                ]))
                .description("MachineConfigPoolSpec is the spec for MachineConfigPool resource.")
                .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: MachineConfigPoolV1Manifest = match request.decode() {
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
