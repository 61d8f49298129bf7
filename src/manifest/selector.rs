//! Label selectors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use manifest_schema::{attributes, Attribute, ElementType, Validator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSelector {
    #[serde(
        rename(serialize = "matchExpressions", deserialize = "match_expressions"),
        skip_serializing_if = "Option::is_none"
    )]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,

    #[serde(
        rename(serialize = "matchLabels", deserialize = "match_labels"),
        skip_serializing_if = "Option::is_none"
    )]
    pub match_labels: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,

    pub operator: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Optional label selector attribute
pub fn label_selector_attribute(description: &str) -> Attribute {
    Attribute::single_nested(attributes([
        (
            "match_expressions",
            Attribute::list_nested(attributes([
                (
                    "key",
                    Attribute::string()
                        .description("key is the label key that the selector applies to.")
                        .required(),
                ),
                (
                    "operator",
                    Attribute::string()
                        .description("operator represents a key's relationship to a set of values.")
                        .required()
                        .validator(Validator::one_of([
                            "In",
                            "NotIn",
                            "Exists",
                            "DoesNotExist",
                        ])),
                ),
                (
                    "values",
                    Attribute::list(ElementType::String)
                        .description("values is an array of string values. If the operator is In or NotIn, the values array must be non-empty. If the operator is Exists or DoesNotExist, the values array must be empty.")
                        .optional(),
                ),
            ]))
            .description("matchExpressions is a list of label selector requirements. The requirements are ANDed.")
            .optional(),
        ),
        (
            "match_labels",
            Attribute::map(ElementType::String)
                .description("matchLabels is a map of {key,value} pairs. The requirements are ANDed.")
                .optional(),
        ),
    ]))
    .description(description)
    .optional()
}
