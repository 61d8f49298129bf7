//! Typed resource models built from CRD OpenAPI schemas

use anyhow::Result;
use regex::Regex;
use serde_yaml::Value;
use std::path::PathBuf;
use tracing::warn;

use manifest_schema::naming;
use manifest_schema::{Attribute, Attributes, ElementType, Validator};

use crate::schema::CrdSchema;
use crate::types::ValidationRules;

/// Type of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Bool,
    Int64,
    Float64,

    /// `x-kubernetes-int-or-string`, carried as a string
    IntOrString,

    /// Free-form JSON (`x-kubernetes-preserve-unknown-fields` or untyped objects)
    Dynamic,

    Object(ObjectModel),
    ObjectList(ObjectModel),
    List(ElementType),
    Map(ElementType),
}

/// A field of an object
#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    /// Serialized key, e.g. `osImageURL`
    pub json_name: String,

    /// Configuration attribute name, e.g. `os_image_url`
    pub attribute_name: String,

    pub description: String,

    pub required: bool,

    pub field_type: FieldType,

    pub rules: ValidationRules,
}

/// Fields of an object, sorted by attribute name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectModel {
    pub fields: Vec<FieldModel>,
}

/// The typed model of one CRD version
#[derive(Debug, Clone)]
pub struct ResourceModel {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub api_version: String,
    pub namespaced: bool,
    pub description: String,
    pub spec_description: String,
    pub spec: Option<ObjectModel>,
    pub source_path: PathBuf,
}

impl ResourceModel {
    pub fn from_crd(crd: &CrdSchema) -> Result<Self> {
        let spec = match crd.spec_schema() {
            Some(spec_schema) => match object_model(spec_schema) {
                Some(model) => Some(model),
                None => {
                    warn!(
                        "{} declares a spec without typed properties, skipping it",
                        crd.api_version
                    );
                    None
                }
            },
            None => None,
        };

        let description = crd
            .schema
            .get("description")
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} is the Schema for the {} API", crd.kind, crd.plural));

        let spec_description = crd
            .spec_schema()
            .and_then(|s| s.get("description"))
            .and_then(|d| d.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Desired state of the {}.", crd.kind));

        Ok(Self {
            group: crd.group.clone(),
            version: crd.version.clone(),
            kind: crd.kind.clone(),
            api_version: crd.api_version.clone(),
            namespaced: crd.is_namespaced(),
            description,
            spec_description,
            spec,
            source_path: crd.source_path.clone(),
        })
    }
}

impl ObjectModel {
    /// Schema attributes for the object's fields
    pub fn attributes(&self) -> Attributes {
        self.fields
            .iter()
            .map(|field| (field.attribute_name.clone(), field.attribute()))
            .collect()
    }
}

impl FieldModel {
    /// Schema attribute for the field, including validators derived from its rules
    pub fn attribute(&self) -> Attribute {
        let attribute = match &self.field_type {
            FieldType::String | FieldType::IntOrString => Attribute::string(),
            FieldType::Bool => Attribute::bool(),
            FieldType::Int64 => Attribute::int64(),
            FieldType::Float64 => Attribute::float64(),
            FieldType::Dynamic => Attribute::dynamic(),
            FieldType::Object(object) => Attribute::single_nested(object.attributes()),
            FieldType::ObjectList(object) => Attribute::list_nested(object.attributes()),
            FieldType::List(element_type) => Attribute::list(element_type.clone()),
            FieldType::Map(element_type) => Attribute::map(element_type.clone()),
        };

        let attribute = attribute.description(self.description.clone());
        let attribute = if self.required {
            attribute.required()
        } else {
            attribute.optional()
        };

        self.validators()
            .into_iter()
            .fold(attribute, |attribute, validator| attribute.validator(validator))
    }

    /// Validators implied by the OpenAPI rules
    pub fn validators(&self) -> Vec<Validator> {
        let rules = &self.rules;
        let mut validators = Vec::new();

        match &self.field_type {
            FieldType::String => {
                match (rules.min_length, rules.max_length) {
                    (Some(min), Some(max)) => validators.push(Validator::length_between(min, max)),
                    (Some(min), None) => validators.push(Validator::length_at_least(min)),
                    (None, Some(max)) => validators.push(Validator::length_at_most(max)),
                    (None, None) => {}
                }
                if let Some(pattern) = &rules.pattern {
                    if Regex::new(pattern).is_ok() {
                        validators.push(Validator::regex_matches(pattern.clone(), ""));
                    } else {
                        warn!(
                            "Pattern of {} is not supported by the regex engine, skipping: {}",
                            self.json_name, pattern
                        );
                    }
                }
                if !rules.enum_values.is_empty() {
                    validators.push(Validator::one_of(rules.enum_values.clone()));
                }
            }
            // Fractional bounds round inward so no out-of-range integer passes
            FieldType::Int64 => match (
                rules.minimum.map(|min| min.ceil() as i64),
                rules.maximum.map(|max| max.floor() as i64),
            ) {
                (Some(min), Some(max)) => validators.push(Validator::int64_between(min, max)),
                (Some(min), None) => validators.push(Validator::int64_at_least(min)),
                (None, Some(max)) => validators.push(Validator::int64_at_most(max)),
                (None, None) => {}
            },
            FieldType::Float64 => {
                if let Some(min) = rules.minimum {
                    validators.push(Validator::float64_at_least(min));
                }
                if let Some(max) = rules.maximum {
                    validators.push(Validator::float64_at_most(max));
                }
            }
            FieldType::List(_) | FieldType::ObjectList(_) => {
                if let Some(min) = rules.min_items {
                    validators.push(Validator::size_at_least(min));
                }
                if let Some(max) = rules.max_items {
                    validators.push(Validator::size_at_most(max));
                }
            }
            _ => {}
        }

        validators
    }
}

/// Build an object model from a schema node with typed properties
fn object_model(schema: &Value) -> Option<ObjectModel> {
    let properties = schema.get("properties")?.as_mapping()?;
    if properties.is_empty() {
        return None;
    }

    let required = ValidationRules::from_schema(schema).required;

    let mut fields: Vec<FieldModel> = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        let Some(json_name) = key.as_str() else {
            continue;
        };

        let attribute_name = naming::snake_case(json_name);
        if !naming::is_valid_attribute_name(&attribute_name) {
            warn!("Skipping field {json_name:?}: no valid attribute name");
            continue;
        }
        if fields.iter().any(|f| f.attribute_name == attribute_name) {
            warn!("Skipping field {json_name:?}: attribute name {attribute_name} is already taken");
            continue;
        }

        let rules = ValidationRules::from_schema(value);
        fields.push(FieldModel {
            json_name: json_name.to_string(),
            attribute_name,
            description: rules.description.clone().unwrap_or_default(),
            required: required.iter().any(|r| r == json_name),
            field_type: field_type(value),
            rules,
        });
    }

    fields.sort_by(|a, b| a.attribute_name.cmp(&b.attribute_name));
    Some(ObjectModel { fields })
}

fn is_flag_set(schema: &Value, flag: &str) -> bool {
    schema.get(flag).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn field_type(schema: &Value) -> FieldType {
    if is_flag_set(schema, "x-kubernetes-int-or-string") {
        return FieldType::IntOrString;
    }

    match schema.get("type").and_then(|t| t.as_str()) {
        Some("string") => FieldType::String,
        Some("boolean") => FieldType::Bool,
        Some("integer") => FieldType::Int64,
        Some("number") => FieldType::Float64,
        Some("array") => {
            let Some(items) = schema.get("items") else {
                return FieldType::Dynamic;
            };
            if let Some(object) = object_model(items) {
                return FieldType::ObjectList(object);
            }
            element_type(items)
                .map(FieldType::List)
                .unwrap_or(FieldType::Dynamic)
        }
        Some("object") => {
            if let Some(object) = object_model(schema) {
                return FieldType::Object(object);
            }
            if is_flag_set(schema, "x-kubernetes-preserve-unknown-fields") {
                return FieldType::Dynamic;
            }
            schema
                .get("additionalProperties")
                .and_then(element_type)
                .map(FieldType::Map)
                .unwrap_or(FieldType::Dynamic)
        }
        _ => FieldType::Dynamic,
    }
}

fn element_type(schema: &Value) -> Option<ElementType> {
    if is_flag_set(schema, "x-kubernetes-int-or-string") {
        return Some(ElementType::String);
    }
    match schema.get("type").and_then(|t| t.as_str())? {
        "string" => Some(ElementType::String),
        "boolean" => Some(ElementType::Bool),
        "integer" => Some(ElementType::Int64),
        "number" => Some(ElementType::Float64),
        "array" => schema
            .get("items")
            .and_then(element_type)
            .map(ElementType::list_of),
        "object" if schema.get("properties").is_none() => schema
            .get("additionalProperties")
            .and_then(element_type)
            .map(ElementType::map_of),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Scope;
    use manifest_schema::{AttributeType, Schema};

    fn crd_with_spec(spec: &str) -> CrdSchema {
        let schema: Value = serde_yaml::from_str(&format!(
            "type: object\nproperties:\n  spec:\n{}",
            spec.lines()
                .map(|line| format!("    {line}\n"))
                .collect::<String>()
        ))
        .unwrap();

        CrdSchema {
            name: "kubeletconfigs.machineconfiguration.openshift.io".to_string(),
            group: "machineconfiguration.openshift.io".to_string(),
            version: "v1".to_string(),
            api_version: "machineconfiguration.openshift.io/v1".to_string(),
            kind: "KubeletConfig".to_string(),
            plural: "kubeletconfigs".to_string(),
            scope: Scope::Cluster,
            schema,
            source_path: PathBuf::from("kubeletconfig.yaml"),
        }
    }

    const SPEC: &str = r#"type: object
properties:
  autoSizingReserved:
    type: boolean
  logLevel:
    type: integer
    format: int32
    minimum: 0
    maximum: 10
  kubeletConfig:
    type: object
    x-kubernetes-preserve-unknown-fields: true
  maxUnavailable:
    x-kubernetes-int-or-string: true
  tlsSecurityProfile:
    type: object
    properties:
      type:
        type: string
        enum: [Old, Intermediate, Modern, Custom]
  machineConfigPoolSelector:
    type: object
    properties:
      matchExpressions:
        type: array
        items:
          type: object
          required: [key, operator]
          properties:
            key:
              type: string
            operator:
              type: string
            values:
              type: array
              items:
                type: string
      matchLabels:
        type: object
        additionalProperties:
          type: string
  config:
    type: object
    additionalProperties:
      type: object
      additionalProperties:
        type: string
"#;

    #[test]
    fn test_field_types() {
        let model = ResourceModel::from_crd(&crd_with_spec(SPEC)).unwrap();
        let spec = model.spec.unwrap();
        let names: Vec<&str> = spec.fields.iter().map(|f| f.attribute_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "auto_sizing_reserved",
                "config",
                "kubelet_config",
                "log_level",
                "machine_config_pool_selector",
                "max_unavailable",
                "tls_security_profile",
            ]
        );

        let by_name = |name: &str| spec.fields.iter().find(|f| f.attribute_name == name).unwrap();
        assert_eq!(by_name("auto_sizing_reserved").field_type, FieldType::Bool);
        assert_eq!(by_name("kubelet_config").field_type, FieldType::Dynamic);
        assert_eq!(by_name("max_unavailable").field_type, FieldType::IntOrString);
        assert_eq!(
            by_name("config").field_type,
            FieldType::Map(ElementType::map_of(ElementType::String))
        );

        let FieldType::Object(selector) = &by_name("machine_config_pool_selector").field_type else {
            panic!("selector should be an object");
        };
        let FieldType::ObjectList(requirement) = &selector.fields[0].field_type else {
            panic!("matchExpressions should be a list of objects");
        };
        assert!(requirement.fields.iter().any(|f| f.attribute_name == "key" && f.required));
        assert!(requirement
            .fields
            .iter()
            .any(|f| f.attribute_name == "values" && !f.required));
    }

    #[test]
    fn test_validators_from_rules() {
        let model = ResourceModel::from_crd(&crd_with_spec(SPEC)).unwrap();
        let spec = model.spec.unwrap();

        let log_level = spec.fields.iter().find(|f| f.json_name == "logLevel").unwrap();
        assert_eq!(log_level.validators(), vec![Validator::int64_between(0, 10)]);

        let attribute = log_level.attribute();
        assert!(attribute.optional);
        assert!(matches!(attribute.attribute_type, AttributeType::Int64));
    }

    #[test]
    fn test_fractional_integer_bounds_round_inward() {
        let field = |minimum, maximum| FieldModel {
            json_name: "pidsLimit".to_string(),
            attribute_name: "pids_limit".to_string(),
            description: String::new(),
            required: false,
            field_type: FieldType::Int64,
            rules: ValidationRules {
                minimum,
                maximum,
                ..Default::default()
            },
        };

        assert_eq!(
            field(Some(0.5), Some(9.5)).validators(),
            vec![Validator::int64_between(1, 9)]
        );
        assert_eq!(
            field(Some(-1.5), None).validators(),
            vec![Validator::int64_at_least(-1)]
        );
        assert_eq!(
            field(None, Some(-0.5)).validators(),
            vec![Validator::int64_at_most(-1)]
        );
        assert!(field(Some(0.5), None).validators()[0]
            .validate(&serde_json::json!(0))
            .is_err());
    }

    #[test]
    fn test_unsupported_patterns_are_skipped() {
        let field = FieldModel {
            json_name: "name".to_string(),
            attribute_name: "name".to_string(),
            description: String::new(),
            required: false,
            field_type: FieldType::String,
            rules: ValidationRules {
                pattern: Some("^(?!kube-).*$".to_string()),
                ..Default::default()
            },
        };
        assert!(field.validators().is_empty());
    }

    #[test]
    fn test_derived_attributes_are_consistent() {
        let model = ResourceModel::from_crd(&crd_with_spec(SPEC)).unwrap();
        let schema = Schema::new(model.description.clone()).attribute(
            "spec",
            Attribute::single_nested(model.spec.unwrap().attributes()).optional(),
        );
        let diagnostics = schema.validate_implementation();
        assert!(diagnostics.is_empty(), "{diagnostics}");
    }
}
