// Code generated by k8s-manifests from gadgets.yaml. DO NOT EDIT.
// Source SHA-256: 449178b15104b2eb132697d8a3772076d4dd92aaf66bcebe4652f6788e7dab7e

//! `Gadget` manifests (`example.com/v1`)

#![allow(unused_imports)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use manifest_schema::{attributes, Attribute, ElementType, Schema, Validator};

use crate::manifest::metadata::{cluster_metadata_attribute, ClusterObjectMeta};
use crate::manifest::{id_attribute, yaml_attribute, Manifest};
use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};

pub const GROUP: &str = "example.com";
pub const VERSION: &str = "v1";
pub const API_VERSION: &str = "example.com/v1";
pub const KIND: &str = "Gadget";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GadgetV1Manifest {
    pub metadata: ClusterObjectMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<GadgetV1Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GadgetV1Spec {
    #[serde(rename = "crate", skip_serializing_if = "Option::is_none")]
    pub crate_: Option<String>,

    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i64>,

    #[serde(
        rename(serialize = "wheelSizes", deserialize = "wheel_sizes"),
        skip_serializing_if = "Option::is_none"
    )]
    pub wheel_sizes: Option<Vec<i64>>,
}

#[derive(Debug, Default)]
pub struct GadgetV1ManifestDataSource;

#[async_trait]
impl DataSource for GadgetV1ManifestDataSource {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse::manifest(request, GROUP, KIND, VERSION)
    }

    fn schema(&self) -> Schema {
        Schema::new("Gadget is a test resource.")
            .attribute("id", id_attribute())
            .attribute("yaml", yaml_attribute())
            .attribute("metadata", cluster_metadata_attribute())
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "crate",
                        Attribute::string()
                            .description("Crate label.")
                            .optional(),
                    ),
                    (
                        "mode",
                        Attribute::string()
                            .description("Operating mode.")
                            .required()
                            .validator(Validator::one_of(["fast", "slow"])),
                    ),
                    (
                        "replicas",
                        Attribute::int64()
                            .description("Replica count.")
                            .optional()
                            .validator(Validator::int64_between(1, 9)),
                    ),
                    (
                        "wheel_sizes",
                        Attribute::list(ElementType::Int64)
                            .description("Wheel sizes.")
                            .optional(),
                    ),
                ]))
                    .description("GadgetSpec is the desired state.")
                    .optional(),
            )
    }

    async fn read(&self, request: ReadRequest) -> ReadResponse {
        let model: GadgetV1Manifest = match request.decode() {
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
