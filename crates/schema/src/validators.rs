//! Attribute value validators

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::attribute::AttributeType;

/// A declarative constraint on an attribute value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    LengthAtLeast { min: usize },
    LengthAtMost { max: usize },
    LengthBetween { min: usize, max: usize },
    RegexMatches { pattern: String, message: String },
    OneOf { values: Vec<String> },
    Int64AtLeast { min: i64 },
    Int64AtMost { max: i64 },
    Int64Between { min: i64, max: i64 },
    Float64AtLeast { min: f64 },
    Float64AtMost { max: f64 },
    SizeAtLeast { min: usize },
    SizeAtMost { max: usize },

    /// Every key of a map attribute matches the pattern
    KeysMatch { pattern: String, message: String },
}

impl Validator {
    pub fn length_at_least(min: usize) -> Self {
        Self::LengthAtLeast { min }
    }

    pub fn length_at_most(max: usize) -> Self {
        Self::LengthAtMost { max }
    }

    pub fn length_between(min: usize, max: usize) -> Self {
        Self::LengthBetween { min, max }
    }

    pub fn regex_matches(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegexMatches {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn int64_at_least(min: i64) -> Self {
        Self::Int64AtLeast { min }
    }

    pub fn int64_at_most(max: i64) -> Self {
        Self::Int64AtMost { max }
    }

    pub fn int64_between(min: i64, max: i64) -> Self {
        Self::Int64Between { min, max }
    }

    pub fn float64_at_least(min: f64) -> Self {
        Self::Float64AtLeast { min }
    }

    pub fn float64_at_most(max: f64) -> Self {
        Self::Float64AtMost { max }
    }

    pub fn size_at_least(min: usize) -> Self {
        Self::SizeAtLeast { min }
    }

    pub fn size_at_most(max: usize) -> Self {
        Self::SizeAtMost { max }
    }

    pub fn keys_match(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::KeysMatch {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LengthAtLeast { .. } => "length_at_least",
            Self::LengthAtMost { .. } => "length_at_most",
            Self::LengthBetween { .. } => "length_between",
            Self::RegexMatches { .. } => "regex_matches",
            Self::OneOf { .. } => "one_of",
            Self::Int64AtLeast { .. } => "int64_at_least",
            Self::Int64AtMost { .. } => "int64_at_most",
            Self::Int64Between { .. } => "int64_between",
            Self::Float64AtLeast { .. } => "float64_at_least",
            Self::Float64AtMost { .. } => "float64_at_most",
            Self::SizeAtLeast { .. } => "size_at_least",
            Self::SizeAtMost { .. } => "size_at_most",
            Self::KeysMatch { .. } => "keys_match",
        }
    }

    /// Whether the validator can be attached to an attribute of this type
    pub fn applies_to(&self, attribute_type: &AttributeType) -> bool {
        match self {
            Self::LengthAtLeast { .. }
            | Self::LengthAtMost { .. }
            | Self::LengthBetween { .. }
            | Self::RegexMatches { .. }
            | Self::OneOf { .. } => matches!(attribute_type, AttributeType::String),
            Self::Int64AtLeast { .. } | Self::Int64AtMost { .. } | Self::Int64Between { .. } => {
                matches!(attribute_type, AttributeType::Int64)
            }
            Self::Float64AtLeast { .. } | Self::Float64AtMost { .. } => {
                matches!(attribute_type, AttributeType::Float64)
            }
            Self::SizeAtLeast { .. } | Self::SizeAtMost { .. } => matches!(
                attribute_type,
                AttributeType::List { .. } | AttributeType::Map { .. } | AttributeType::ListNested { .. }
            ),
            Self::KeysMatch { .. } => matches!(attribute_type, AttributeType::Map { .. }),
        }
    }

    /// Check that the validator itself is well formed
    pub fn check_definition(&self) -> Result<(), String> {
        match self {
            Self::LengthBetween { min, max } if min > max => {
                Err(format!("minimum length {min} exceeds maximum length {max}"))
            }
            Self::Int64Between { min, max } if min > max => {
                Err(format!("minimum {min} exceeds maximum {max}"))
            }
            Self::RegexMatches { pattern, .. } | Self::KeysMatch { pattern, .. } => Regex::new(pattern)
                .map(|_| ())
                .map_err(|e| format!("invalid pattern {pattern:?}: {e}")),
            Self::OneOf { values } if values.is_empty() => {
                Err("one_of requires at least one value".to_string())
            }
            Self::Float64AtLeast { min } if min.is_nan() => Err("minimum is NaN".to_string()),
            Self::Float64AtMost { max } if max.is_nan() => Err("maximum is NaN".to_string()),
            _ => Ok(()),
        }
    }

    /// Validate a non-null value of the attribute's type.
    ///
    /// Returns the diagnostic detail on failure. Values of an unexpected JSON
    /// type pass; type checking happens before validators run.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::LengthAtLeast { min } => check_length(value, Some(*min), None),
            Self::LengthAtMost { max } => check_length(value, None, Some(*max)),
            Self::LengthBetween { min, max } => check_length(value, Some(*min), Some(*max)),
            Self::RegexMatches { pattern, message } => match value.as_str() {
                Some(s) => check_pattern(pattern, message, s),
                None => Ok(()),
            },
            Self::OneOf { values } => match value.as_str() {
                Some(s) if !values.iter().any(|v| v == s) => Err(format!(
                    "value must be one of: [{}], got: {s:?}",
                    values
                        .iter()
                        .map(|v| format!("{v:?}"))
                        .collect::<Vec<_>>()
                        .join(" ")
                )),
                _ => Ok(()),
            },
            Self::Int64AtLeast { min } => check_int(value, Some(*min), None),
            Self::Int64AtMost { max } => check_int(value, None, Some(*max)),
            Self::Int64Between { min, max } => check_int(value, Some(*min), Some(*max)),
            Self::Float64AtLeast { min } => match value.as_f64() {
                Some(v) if v < *min => Err(format!("value must be at least {min}, got: {v}")),
                _ => Ok(()),
            },
            Self::Float64AtMost { max } => match value.as_f64() {
                Some(v) if v > *max => Err(format!("value must be at most {max}, got: {v}")),
                _ => Ok(()),
            },
            Self::SizeAtLeast { min } => match collection_size(value) {
                Some(size) if size < *min => {
                    Err(format!("must contain at least {min} elements, got: {size}"))
                }
                _ => Ok(()),
            },
            Self::SizeAtMost { max } => match collection_size(value) {
                Some(size) if size > *max => {
                    Err(format!("must contain at most {max} elements, got: {size}"))
                }
                _ => Ok(()),
            },
            Self::KeysMatch { pattern, message } => match value.as_object() {
                Some(map) => map
                    .keys()
                    .try_for_each(|key| check_pattern(pattern, message, key)),
                None => Ok(()),
            },
        }
    }
}

fn check_length(value: &Value, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Ok(());
    };
    let length = s.chars().count();
    match (min, max) {
        (Some(min), Some(max)) if length < min || length > max => Err(format!(
            "string length must be between {min} and {max}, got: {length}"
        )),
        (Some(min), None) if length < min => Err(format!(
            "string length must be at least {min}, got: {length}"
        )),
        (None, Some(max)) if length > max => Err(format!(
            "string length must be at most {max}, got: {length}"
        )),
        _ => Ok(()),
    }
}

fn check_int(value: &Value, min: Option<i64>, max: Option<i64>) -> Result<(), String> {
    let Some(v) = value.as_i64() else {
        return Ok(());
    };
    match (min, max) {
        (Some(min), Some(max)) if v < min || v > max => {
            Err(format!("value must be between {min} and {max}, got: {v}"))
        }
        (Some(min), None) if v < min => Err(format!("value must be at least {min}, got: {v}")),
        (None, Some(max)) if v > max => Err(format!("value must be at most {max}, got: {v}")),
        _ => Ok(()),
    }
}

fn check_pattern(pattern: &str, message: &str, s: &str) -> Result<(), String> {
    let regex = Regex::new(pattern).map_err(|e| format!("invalid pattern {pattern:?}: {e}"))?;
    if regex.is_match(s) {
        return Ok(());
    }
    if message.is_empty() {
        Err(format!("value must match regular expression '{pattern}', got: {s:?}"))
    } else {
        Err(format!("{message}, got: {s:?}"))
    }
}

fn collection_size(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}
