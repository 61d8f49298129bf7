//! Schema implementation checks and configuration validation

use serde_json::{Map, Value};
use tracing::debug;

use crate::attribute::{Attribute, AttributeType, Attributes, ElementType};
use crate::diagnostics::{join_path, Diagnostics};
use crate::naming::{is_valid_attribute_name, RESERVED_ROOT_NAMES};
use crate::schema::Schema;

/// Check a schema for internal consistency
pub fn validate_implementation(schema: &Schema) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if schema.attributes.is_empty() {
        diagnostics.add_error(
            "Invalid schema implementation",
            "The schema does not declare any attributes.",
        );
    }

    for (name, attribute) in &schema.attributes {
        if RESERVED_ROOT_NAMES.contains(&name.as_str()) {
            diagnostics.add_attribute_error(
                name.as_str(),
                "Invalid schema implementation",
                format!("The root attribute name {name:?} is reserved for use by the host."),
            );
        }
        check_attribute(name, name, attribute, &mut diagnostics);
    }

    diagnostics
}

fn check_attribute(path: &str, name: &str, attribute: &Attribute, diagnostics: &mut Diagnostics) {
    if !is_valid_attribute_name(name) {
        diagnostics.add_attribute_error(
            path,
            "Invalid attribute name",
            format!(
                "Attribute names must only contain lowercase alphanumeric characters or underscores \
                 and must not start with a digit, got: {name:?}"
            ),
        );
    }

    if !attribute.required && !attribute.optional && !attribute.computed {
        diagnostics.add_attribute_error(
            path,
            "Invalid attribute definition",
            "Attributes must be required, optional or computed.",
        );
    }

    if attribute.required && (attribute.optional || attribute.computed) {
        diagnostics.add_attribute_error(
            path,
            "Invalid attribute definition",
            "Required attributes cannot also be optional or computed.",
        );
    }

    if let Some(children) = attribute.attribute_type.nested_attributes() {
        if children.is_empty() {
            diagnostics.add_attribute_error(
                path,
                "Invalid attribute definition",
                "Nested attributes must declare at least one child attribute.",
            );
        }
        for (child_name, child) in children {
            check_attribute(&join_path(path, child_name), child_name, child, diagnostics);
        }
    }

    for validator in &attribute.validators {
        if !validator.applies_to(&attribute.attribute_type) {
            diagnostics.add_attribute_error(
                path,
                "Invalid validator for attribute",
                format!(
                    "Validator {} cannot be used with an attribute of type {}.",
                    validator.name(),
                    attribute.attribute_type.type_name()
                ),
            );
        }
        if let Err(detail) = validator.check_definition() {
            diagnostics.add_attribute_error(path, "Invalid validator definition", detail);
        }
    }
}

/// Check a configuration value against a schema.
///
/// A null configuration is treated as an empty object.
pub fn validate_config(schema: &Schema, config: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    match config {
        Value::Object(object) => check_object(&schema.attributes, object, "", &mut diagnostics),
        Value::Null => check_object(&schema.attributes, &Map::new(), "", &mut diagnostics),
        other => diagnostics.add_error(
            "Invalid configuration",
            format!("Expected an object, got {}.", json_type_name(other)),
        ),
    }

    debug!(
        "Configuration validation finished with {} diagnostics",
        diagnostics.len()
    );
    diagnostics
}

fn check_object(
    attributes: &Attributes,
    object: &Map<String, Value>,
    path: &str,
    diagnostics: &mut Diagnostics,
) {
    for key in object.keys() {
        if !attributes.contains_key(key) {
            diagnostics.add_attribute_error(
                join_path(path, key),
                "Unsupported argument",
                format!("An argument named {key:?} is not expected here."),
            );
        }
    }

    for (name, attribute) in attributes {
        let attribute_path = join_path(path, name);
        match object.get(name) {
            None | Some(Value::Null) => {
                if attribute.required {
                    diagnostics.add_attribute_error(
                        attribute_path,
                        "Missing required argument",
                        format!("The argument {name:?} is required, but no definition was found."),
                    );
                }
            }
            Some(_) if attribute.is_computed_only() => {
                diagnostics.add_attribute_error(
                    attribute_path,
                    "Invalid configuration",
                    format!("The attribute {name:?} is computed and cannot be set."),
                );
            }
            Some(value) => check_value(attribute, value, &attribute_path, diagnostics),
        }
    }
}

fn check_value(attribute: &Attribute, value: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let type_matches = match &attribute.attribute_type {
        AttributeType::String => value.is_string(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::Int64 => value.as_i64().is_some(),
        AttributeType::Float64 => value.is_number(),
        AttributeType::Dynamic => true,
        AttributeType::List { element_type } => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !element_matches(element_type, item) {
                        type_mismatch(
                            &format!("{path}[{index}]"),
                            &element_type.type_name(),
                            item,
                            diagnostics,
                        );
                    }
                }
                true
            }
            None => false,
        },
        AttributeType::Map { element_type } => match value.as_object() {
            Some(map) => {
                for (key, item) in map {
                    if !element_matches(element_type, item) {
                        type_mismatch(
                            &format!("{path}[{key:?}]"),
                            &element_type.type_name(),
                            item,
                            diagnostics,
                        );
                    }
                }
                true
            }
            None => false,
        },
        AttributeType::SingleNested { attributes } => match value.as_object() {
            Some(object) => {
                check_object(attributes, object, path, diagnostics);
                true
            }
            None => false,
        },
        AttributeType::ListNested { attributes } => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{index}]");
                    match item.as_object() {
                        Some(object) => check_object(attributes, object, &item_path, diagnostics),
                        None => type_mismatch(&item_path, "object", item, diagnostics),
                    }
                }
                true
            }
            None => false,
        },
    };

    if !type_matches {
        type_mismatch(path, &attribute.attribute_type.type_name(), value, diagnostics);
        return;
    }

    for validator in &attribute.validators {
        if let Err(detail) = validator.validate(value) {
            diagnostics.add_attribute_error(path, "Invalid attribute value", detail);
        }
    }
}

fn element_matches(element_type: &ElementType, value: &Value) -> bool {
    match element_type {
        ElementType::String => value.is_string(),
        ElementType::Bool => value.is_boolean(),
        ElementType::Int64 => value.as_i64().is_some(),
        ElementType::Float64 => value.is_number(),
        ElementType::List(inner) => value
            .as_array()
            .map_or(false, |items| items.iter().all(|item| element_matches(inner, item))),
        ElementType::Map(inner) => value
            .as_object()
            .map_or(false, |map| map.values().all(|item| element_matches(inner, item))),
    }
}

fn type_mismatch(path: &str, expected: &str, value: &Value, diagnostics: &mut Diagnostics) {
    diagnostics.add_attribute_error(
        path,
        "Incorrect attribute value type",
        format!("Expected {expected}, got {}.", json_type_name(value)),
    );
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::attributes;
    use crate::validators::Validator;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::new("Sample")
            .attribute(
                "metadata",
                Attribute::single_nested(attributes([
                    (
                        "name",
                        Attribute::string()
                            .required()
                            .validator(Validator::length_at_least(1)),
                    ),
                    ("labels", Attribute::map(ElementType::String).optional()),
                ]))
                .required(),
            )
            .attribute(
                "spec",
                Attribute::single_nested(attributes([
                    (
                        "replicas",
                        Attribute::int64()
                            .optional()
                            .validator(Validator::int64_at_least(0)),
                    ),
                    (
                        "workloads",
                        Attribute::list_nested(attributes([(
                            "name",
                            Attribute::string().required(),
                        )]))
                        .optional(),
                    ),
                ]))
                .optional(),
            )
            .attribute("yaml", Attribute::string().computed())
    }

    fn paths(diagnostics: &Diagnostics) -> Vec<String> {
        diagnostics
            .iter()
            .filter_map(|d| d.path.clone())
            .collect()
    }

    #[test]
    fn test_valid_schema_has_no_implementation_errors() {
        assert!(sample_schema().validate_implementation().is_empty());
    }

    #[test]
    fn test_implementation_errors() {
        let schema = Schema::new("Broken")
            .attribute("count", Attribute::string().optional())
            .attribute("camelCase", Attribute::string().optional())
            .attribute("flagless", Attribute::bool())
            .attribute("both", Attribute::string().required().computed())
            .attribute("empty", Attribute::single_nested(Attributes::new()).optional())
            .attribute(
                "wrong_validator",
                Attribute::int64()
                    .optional()
                    .validator(Validator::length_at_least(1)),
            )
            .attribute(
                "bad_regex",
                Attribute::string()
                    .optional()
                    .validator(Validator::regex_matches("(", "")),
            );

        let diagnostics = schema.validate_implementation();
        let paths = paths(&diagnostics);
        for expected in [
            "count",
            "camelCase",
            "flagless",
            "both",
            "empty",
            "wrong_validator",
            "bad_regex",
        ] {
            assert!(paths.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_minimal_config_is_valid() {
        let diagnostics = sample_schema().validate_config(&json!({"metadata": {"name": "x"}}));
        assert!(diagnostics.is_empty(), "{diagnostics}");
    }

    #[test]
    fn test_missing_required_and_unknown_arguments() {
        let diagnostics =
            sample_schema().validate_config(&json!({"metadata": {}, "extra": true}));
        let paths = paths(&diagnostics);
        assert!(paths.contains(&"metadata.name".to_string()));
        assert!(paths.contains(&"extra".to_string()));
    }

    #[test]
    fn test_computed_attribute_cannot_be_set() {
        let diagnostics = sample_schema()
            .validate_config(&json!({"metadata": {"name": "x"}, "yaml": "kind: Foo"}));
        assert_eq!(paths(&diagnostics), vec!["yaml".to_string()]);

        let diagnostics = sample_schema()
            .validate_config(&json!({"metadata": {"name": "x"}, "yaml": null}));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_type_mismatches_and_validators() {
        let diagnostics = sample_schema().validate_config(&json!({
            "metadata": {"name": "", "labels": {"app": 1}},
            "spec": {"replicas": -1, "workloads": [{"name": "a"}, {}]}
        }));
        let paths = paths(&diagnostics);
        assert!(paths.contains(&"metadata.name".to_string()));
        assert!(paths.contains(&"metadata.labels[\"app\"]".to_string()));
        assert!(paths.contains(&"spec.replicas".to_string()));
        assert!(paths.contains(&"spec.workloads[1].name".to_string()));
        assert_eq!(diagnostics.len(), 4);
    }

    #[test]
    fn test_non_object_config() {
        let diagnostics = sample_schema().validate_config(&json!([1, 2]));
        assert!(diagnostics.has_error());
    }
}
