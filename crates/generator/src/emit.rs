//! Rust source emission for resource models
//!
//! Emitted modules target the root crate layout: they use
//! `crate::manifest` and `crate::provider` and expose one
//! `*ManifestDataSource` per CRD version.

use manifest_crd::{FieldModel, FieldType, ObjectModel, ResourceModel};
use manifest_schema::naming::{pascal_case, rust_field_name, snake_case};
use manifest_schema::{Attribute, AttributeType, Attributes, ElementType, Validator};

const INDENT: &str = "    ";

/// Provenance recorded in the header of a generated file
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub file_name: String,
    pub sha256: String,
}

/// One emitted resource module, as listed by its parent `mod.rs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub module_name: String,
    pub data_source: String,
}

/// Type name prefix for a resource, e.g. `KubeletConfigV1`
pub fn type_prefix(model: &ResourceModel) -> String {
    format!("{}{}", model.kind, pascal_case(&model.version))
}

/// Name of the emitted data source type
pub fn data_source_name(model: &ResourceModel) -> String {
    format!("{}ManifestDataSource", type_prefix(model))
}

fn generated_header(source: Option<&SourceInfo>) -> String {
    match source {
        Some(source) => format!(
            "// Code generated by k8s-manifests from {}. DO NOT EDIT.\n// Source SHA-256: {}\n\n",
            source.file_name, source.sha256
        ),
        None => "// Code generated by k8s-manifests. DO NOT EDIT.\n\n".to_string(),
    }
}

/// Emit the complete module for one CRD version
pub fn resource_module(model: &ResourceModel, source: &SourceInfo) -> String {
    let prefix = type_prefix(model);
    let mut content = generated_header(Some(source));

    content.push_str(&format!(
        "//! `{}` manifests (`{}`)\n\n#![allow(unused_imports)]\n\n",
        model.kind, model.api_version
    ));

    content.push_str("use async_trait::async_trait;\n");
    content.push_str("use serde::{Deserialize, Serialize};\n");
    content.push_str("use std::collections::BTreeMap;\n\n");
    content.push_str("use manifest_schema::{attributes, Attribute, ElementType, Schema, Validator};\n\n");

    let (meta_type, meta_attribute) = metadata_names(model);
    content.push_str(&format!(
        "use crate::manifest::metadata::{{{meta_attribute}, {meta_type}}};\n"
    ));
    content.push_str("use crate::manifest::{id_attribute, yaml_attribute, Manifest};\n");
    content.push_str(
        "use crate::provider::{DataSource, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse};\n\n",
    );

    content.push_str(&format!("pub const GROUP: &str = {:?};\n", model.group));
    content.push_str(&format!("pub const VERSION: &str = {:?};\n", model.version));
    content.push_str(&format!(
        "pub const API_VERSION: &str = {:?};\n",
        model.api_version
    ));
    content.push_str(&format!("pub const KIND: &str = {:?};\n\n", model.kind));

    content.push_str(&manifest_struct(model, &prefix, meta_type));

    if let Some(spec) = &model.spec {
        let mut structs = Vec::new();
        object_structs(&format!("{prefix}Spec"), spec, &mut structs);
        for s in structs {
            content.push('\n');
            content.push_str(&s);
        }
    }

    content.push('\n');
    content.push_str(&data_source_impl(model, &prefix, meta_attribute));

    content
}

fn metadata_names(model: &ResourceModel) -> (&'static str, &'static str) {
    if model.namespaced {
        ("NamespacedObjectMeta", "namespaced_metadata_attribute")
    } else {
        ("ClusterObjectMeta", "cluster_metadata_attribute")
    }
}

fn manifest_struct(model: &ResourceModel, prefix: &str, meta_type: &str) -> String {
    let mut s = String::new();
    s.push_str("#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n");
    s.push_str(&format!("pub struct {prefix}Manifest {{\n"));
    s.push_str(&format!("{INDENT}pub metadata: {meta_type},\n"));
    if model.spec.is_some() {
        s.push('\n');
        s.push_str(&format!(
            "{INDENT}#[serde(skip_serializing_if = \"Option::is_none\")]\n{INDENT}pub spec: Option<{prefix}Spec>,\n"
        ));
    }
    s.push_str("}\n");
    s
}

/// Emit the struct for an object and, depth first, for its nested objects
fn object_structs(name: &str, object: &ObjectModel, out: &mut Vec<String>) {
    let mut s = String::new();
    let mut children = Vec::new();

    s.push_str("#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n");
    s.push_str(&format!("pub struct {name} {{\n"));

    for (index, field) in object.fields.iter().enumerate() {
        if index > 0 {
            s.push('\n');
        }
        s.push_str(&serde_attribute(field));

        let child_name = format!("{name}{}", pascal_case(&field.json_name));
        let base = match &field.field_type {
            FieldType::String | FieldType::IntOrString => "String".to_string(),
            FieldType::Bool => "bool".to_string(),
            FieldType::Int64 => "i64".to_string(),
            FieldType::Float64 => "f64".to_string(),
            FieldType::Dynamic => "serde_json::Value".to_string(),
            FieldType::Object(child) => {
                children.push((child_name.clone(), child));
                child_name
            }
            FieldType::ObjectList(child) => {
                children.push((child_name.clone(), child));
                format!("Vec<{child_name}>")
            }
            FieldType::List(element_type) => format!("Vec<{}>", element_rust_type(element_type)),
            FieldType::Map(element_type) => {
                format!("BTreeMap<String, {}>", element_rust_type(element_type))
            }
        };
        let rust_type = if field.required {
            base
        } else {
            format!("Option<{base}>")
        };

        s.push_str(&format!(
            "{INDENT}pub {}: {rust_type},\n",
            rust_field_name(&field.attribute_name)
        ));
    }

    s.push_str("}\n");
    out.push(s);

    for (child_name, child) in children {
        object_structs(&child_name, child, out);
    }
}

fn serde_attribute(field: &FieldModel) -> String {
    let ident = rust_field_name(&field.attribute_name);
    let skip = !field.required;

    if field.json_name == field.attribute_name
        && ident.trim_start_matches("r#") != field.attribute_name
    {
        return if skip {
            format!(
                "{INDENT}#[serde(rename = {:?}, skip_serializing_if = \"Option::is_none\")]\n",
                field.json_name
            )
        } else {
            format!("{INDENT}#[serde(rename = {:?})]\n", field.json_name)
        };
    }

    let rename = field.json_name != field.attribute_name;
    match (rename, skip) {
        (true, true) => format!(
            "{INDENT}#[serde(\n{INDENT}{INDENT}rename(serialize = {:?}, deserialize = {:?}),\n{INDENT}{INDENT}skip_serializing_if = \"Option::is_none\"\n{INDENT})]\n",
            field.json_name, field.attribute_name
        ),
        (true, false) => format!(
            "{INDENT}#[serde(rename(serialize = {:?}, deserialize = {:?}))]\n",
            field.json_name, field.attribute_name
        ),
        (false, true) => format!("{INDENT}#[serde(skip_serializing_if = \"Option::is_none\")]\n"),
        (false, false) => String::new(),
    }
}

fn element_rust_type(element_type: &ElementType) -> String {
    match element_type {
        ElementType::String => "String".to_string(),
        ElementType::Bool => "bool".to_string(),
        ElementType::Int64 => "i64".to_string(),
        ElementType::Float64 => "f64".to_string(),
        ElementType::List(inner) => format!("Vec<{}>", element_rust_type(inner)),
        ElementType::Map(inner) => format!("BTreeMap<String, {}>", element_rust_type(inner)),
    }
}

fn data_source_impl(model: &ResourceModel, prefix: &str, meta_attribute: &str) -> String {
    let name = format!("{prefix}ManifestDataSource");
    let pad = INDENT.repeat(3);
    let mut s = String::new();

    s.push_str("#[derive(Debug, Default)]\n");
    s.push_str(&format!("pub struct {name};\n\n"));
    s.push_str("#[async_trait]\n");
    s.push_str(&format!("impl DataSource for {name} {{\n"));

    s.push_str(&format!(
        "{INDENT}fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {{\n"
    ));
    s.push_str(&format!(
        "{INDENT}{INDENT}MetadataResponse::manifest(request, GROUP, KIND, VERSION)\n{INDENT}}}\n\n"
    ));

    s.push_str(&format!("{INDENT}fn schema(&self) -> Schema {{\n"));
    s.push_str(&format!(
        "{INDENT}{INDENT}Schema::new({:?})\n",
        model.description
    ));
    if !model.namespaced {
        s.push_str(&format!("{pad}.attribute(\"id\", id_attribute())\n"));
    }
    s.push_str(&format!("{pad}.attribute(\"yaml\", yaml_attribute())\n"));
    s.push_str(&format!(
        "{pad}.attribute(\"metadata\", {meta_attribute}())\n"
    ));
    if let Some(spec) = &model.spec {
        let spec_attribute = Attribute::single_nested(spec.attributes())
            .description(model.spec_description.clone())
            .optional();
        s.push_str(&format!(
            "{pad}.attribute(\n{pad}{INDENT}\"spec\",\n{pad}{INDENT}{},\n{pad})\n",
            attribute_code(&spec_attribute, 4)
        ));
    }
    s.push_str(&format!("{INDENT}}}\n\n"));

    s.push_str(&format!(
        "{INDENT}async fn read(&self, request: ReadRequest) -> ReadResponse {{\n"
    ));
    s.push_str(&format!(
        "{INDENT}{INDENT}let model: {prefix}Manifest = match request.decode() {{\n"
    ));
    s.push_str(&format!("{pad}Ok(model) => model,\n"));
    s.push_str(&format!(
        "{pad}Err(diagnostics) => return ReadResponse::failed(diagnostics),\n"
    ));
    s.push_str(&format!("{INDENT}{INDENT}}};\n\n"));
    s.push_str(&format!(
        "{INDENT}{INDENT}match Manifest::new(API_VERSION, KIND, &model).to_yaml() {{\n"
    ));
    if model.namespaced {
        s.push_str(&format!(
            "{pad}Ok(yaml) => ReadResponse::rendered(request.config, yaml),\n"
        ));
    } else {
        s.push_str(&format!(
            "{pad}Ok(yaml) => ReadResponse::rendered(request.config, yaml)\n{pad}{INDENT}.with_id(model.metadata.name.clone()),\n"
        ));
    }
    s.push_str(&format!(
        "{pad}Err(e) => ReadResponse::error(\"Unable to marshal YAML\", e.to_string()),\n"
    ));
    s.push_str(&format!("{INDENT}{INDENT}}}\n{INDENT}}}\n}}\n"));

    s
}

/// Builder expression for an attribute
pub fn attribute_code(attribute: &Attribute, depth: usize) -> String {
    let pad = INDENT.repeat(depth);

    let mut code = match &attribute.attribute_type {
        AttributeType::String => "Attribute::string()".to_string(),
        AttributeType::Bool => "Attribute::bool()".to_string(),
        AttributeType::Int64 => "Attribute::int64()".to_string(),
        AttributeType::Float64 => "Attribute::float64()".to_string(),
        AttributeType::Dynamic => "Attribute::dynamic()".to_string(),
        AttributeType::List { element_type } => {
            format!("Attribute::list({})", element_type_code(element_type))
        }
        AttributeType::Map { element_type } => {
            format!("Attribute::map({})", element_type_code(element_type))
        }
        AttributeType::SingleNested { attributes } => {
            format!("Attribute::single_nested({})", attributes_code(attributes, depth))
        }
        AttributeType::ListNested { attributes } => {
            format!("Attribute::list_nested({})", attributes_code(attributes, depth))
        }
    };

    code.push_str(&format!(
        "\n{pad}{INDENT}.description({:?})",
        attribute.description
    ));
    if attribute.required {
        code.push_str(&format!("\n{pad}{INDENT}.required()"));
    }
    if attribute.optional {
        code.push_str(&format!("\n{pad}{INDENT}.optional()"));
    }
    if attribute.computed {
        code.push_str(&format!("\n{pad}{INDENT}.computed()"));
    }
    for validator in &attribute.validators {
        code.push_str(&format!(
            "\n{pad}{INDENT}.validator({})",
            validator_code(validator)
        ));
    }

    code
}

fn attributes_code(attributes: &Attributes, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut code = "attributes([\n".to_string();

    for (name, attribute) in attributes {
        code.push_str(&format!(
            "{pad}{INDENT}(\n{pad}{INDENT}{INDENT}{name:?},\n{pad}{INDENT}{INDENT}{},\n{pad}{INDENT}),\n",
            attribute_code(attribute, depth + 2)
        ));
    }

    code.push_str(&format!("{pad}])"));
    code
}

fn element_type_code(element_type: &ElementType) -> String {
    match element_type {
        ElementType::String => "ElementType::String".to_string(),
        ElementType::Bool => "ElementType::Bool".to_string(),
        ElementType::Int64 => "ElementType::Int64".to_string(),
        ElementType::Float64 => "ElementType::Float64".to_string(),
        ElementType::List(inner) => format!("ElementType::list_of({})", element_type_code(inner)),
        ElementType::Map(inner) => format!("ElementType::map_of({})", element_type_code(inner)),
    }
}

/// Constructor expression for a validator
pub fn validator_code(validator: &Validator) -> String {
    match validator {
        Validator::LengthAtLeast { min } => format!("Validator::length_at_least({min})"),
        Validator::LengthAtMost { max } => format!("Validator::length_at_most({max})"),
        Validator::LengthBetween { min, max } => {
            format!("Validator::length_between({min}, {max})")
        }
        Validator::RegexMatches { pattern, message } => {
            format!("Validator::regex_matches({pattern:?}, {message:?})")
        }
        Validator::OneOf { values } => format!(
            "Validator::one_of([{}])",
            values
                .iter()
                .map(|v| format!("{v:?}"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Validator::Int64AtLeast { min } => format!("Validator::int64_at_least({min})"),
        Validator::Int64AtMost { max } => format!("Validator::int64_at_most({max})"),
        Validator::Int64Between { min, max } => format!("Validator::int64_between({min}, {max})"),
        Validator::Float64AtLeast { min } => format!("Validator::float64_at_least({min:?})"),
        Validator::Float64AtMost { max } => format!("Validator::float64_at_most({max:?})"),
        Validator::SizeAtLeast { min } => format!("Validator::size_at_least({min})"),
        Validator::SizeAtMost { max } => format!("Validator::size_at_most({max})"),
        Validator::KeysMatch { pattern, message } => {
            format!("Validator::keys_match({pattern:?}, {message:?})")
        }
    }
}

/// `mod.rs` declaring resource modules and collecting their data sources
pub fn group_module(title: &str, entries: &[ModuleEntry]) -> String {
    let mut content = generated_header(None);

    content.push_str(&format!("//! Data sources for `{title}`\n\n"));
    content.push_str("use std::sync::Arc;\n\nuse crate::provider::DataSource;\n\n");

    for entry in entries {
        content.push_str(&format!("pub mod {};\n", entry.module_name));
    }

    content.push_str("\n/// All data sources of this module\n");
    content.push_str("pub fn data_sources() -> Vec<Arc<dyn DataSource>> {\n");
    content.push_str(&format!("{INDENT}vec![\n"));
    for entry in entries {
        content.push_str(&format!(
            "{INDENT}{INDENT}Arc::new({}::{}),\n",
            entry.module_name, entry.data_source
        ));
    }
    content.push_str(&format!("{INDENT}]\n}}\n"));

    content
}

/// Top-level `mod.rs` declaring one module per API group
pub fn root_module(groups: &[String]) -> String {
    let mut content = generated_header(None);

    content.push_str("//! Generated manifest data sources\n\n");
    content.push_str("use std::sync::Arc;\n\nuse crate::provider::DataSource;\n\n");

    let modules: Vec<String> = groups.iter().map(|group| snake_case(group)).collect();
    for module in &modules {
        content.push_str(&format!("pub mod {module};\n"));
    }

    content.push_str("\n/// All generated data sources\n");
    content.push_str("pub fn data_sources() -> Vec<Arc<dyn DataSource>> {\n");
    content.push_str(&format!("{INDENT}let mut data_sources = Vec::new();\n"));
    for module in &modules {
        content.push_str(&format!(
            "{INDENT}data_sources.extend({module}::data_sources());\n"
        ));
    }
    content.push_str(&format!("{INDENT}data_sources\n}}\n"));

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn field(json_name: &str, required: bool, field_type: FieldType) -> FieldModel {
        FieldModel {
            json_name: json_name.to_string(),
            attribute_name: snake_case(json_name),
            description: format!("The {json_name} field."),
            required,
            field_type,
            rules: Default::default(),
        }
    }

    fn model(namespaced: bool) -> ResourceModel {
        ResourceModel {
            group: "example.com".to_string(),
            version: "v1alpha1".to_string(),
            kind: "Widget".to_string(),
            api_version: "example.com/v1alpha1".to_string(),
            namespaced,
            description: "Widget is the Schema for the widgets API".to_string(),
            spec_description: "WidgetSpec defines the desired state".to_string(),
            spec: Some(ObjectModel {
                fields: vec![
                    field(
                        "gearSettings",
                        false,
                        FieldType::Object(ObjectModel {
                            fields: vec![field("type", true, FieldType::String)],
                        }),
                    ),
                    field("replicas", false, FieldType::Int64),
                    field("crate", false, FieldType::String),
                ],
            }),
            source_path: PathBuf::from("widgets.yaml"),
        }
    }

    fn source() -> SourceInfo {
        SourceInfo {
            file_name: "widgets.yaml".to_string(),
            sha256: "abc123".to_string(),
        }
    }

    #[test]
    fn test_resource_module_structs() {
        let content = resource_module(&model(true), &source());

        assert!(content.starts_with("// Code generated by k8s-manifests from widgets.yaml. DO NOT EDIT."));
        assert!(content.contains("pub const API_VERSION: &str = \"example.com/v1alpha1\";"));
        assert!(content.contains("pub struct WidgetV1alpha1Manifest {"));
        assert!(content.contains("pub metadata: NamespacedObjectMeta,"));
        assert!(content.contains("pub spec: Option<WidgetV1alpha1Spec>,"));
        assert!(content.contains("pub gear_settings: Option<WidgetV1alpha1SpecGearSettings>,"));
        assert!(content.contains(
            "rename(serialize = \"gearSettings\", deserialize = \"gear_settings\"),"
        ));
        assert!(content.contains("pub r#type: String,"));
        assert!(content.contains("pub replicas: Option<i64>,"));
        assert!(content.contains(
            "    #[serde(rename = \"crate\", skip_serializing_if = \"Option::is_none\")]\n    pub crate_: Option<String>,"
        ));
    }

    #[test]
    fn test_resource_module_data_source() {
        let namespaced = resource_module(&model(true), &source());
        assert!(namespaced.contains("impl DataSource for WidgetV1alpha1ManifestDataSource {"));
        assert!(namespaced.contains(".attribute(\"metadata\", namespaced_metadata_attribute())"));
        assert!(!namespaced.contains(".attribute(\"id\""));
        assert!(!namespaced.contains(".with_id("));

        let cluster = resource_module(&model(false), &source());
        assert!(cluster.contains(".attribute(\"id\", id_attribute())"));
        assert!(cluster.contains(".with_id(model.metadata.name.clone())"));
        assert!(cluster.contains("pub metadata: ClusterObjectMeta,"));
    }

    #[test]
    fn test_attribute_code() {
        let attribute = Attribute::string()
            .description("Kernel type.")
            .optional()
            .validator(Validator::one_of(["default", "realtime"]));

        assert_eq!(
            attribute_code(&attribute, 0),
            "Attribute::string()\n    .description(\"Kernel type.\")\n    .optional()\n    .validator(Validator::one_of([\"default\", \"realtime\"]))"
        );
    }

    #[test]
    fn test_validator_code_escapes_patterns() {
        let validator = Validator::regex_matches(r"^\d+$", "");
        assert_eq!(
            validator_code(&validator),
            r#"Validator::regex_matches("^\\d+$", "")"#
        );
        assert_eq!(
            validator_code(&Validator::float64_at_least(0.0)),
            "Validator::float64_at_least(0.0)"
        );
    }

    #[test]
    fn test_group_and_root_modules() {
        let entries = vec![ModuleEntry {
            module_name: "widget_v1alpha1".to_string(),
            data_source: "WidgetV1alpha1ManifestDataSource".to_string(),
        }];
        let group = group_module("example.com", &entries);
        assert!(group.contains("pub mod widget_v1alpha1;"));
        assert!(group.contains("Arc::new(widget_v1alpha1::WidgetV1alpha1ManifestDataSource),"));

        let root = root_module(&["example.com".to_string()]);
        assert!(root.contains("pub mod example_com;"));
        assert!(root.contains("data_sources.extend(example_com::data_sources());"));
    }
}
