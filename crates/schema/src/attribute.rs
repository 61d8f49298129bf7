//! Attribute definitions

use serde::Serialize;
use std::collections::BTreeMap;

use crate::validators::Validator;

/// Child attributes of a schema or nested attribute, keyed by attribute name
pub type Attributes = BTreeMap<String, Attribute>;

/// Build an attribute map from `(name, attribute)` pairs
pub fn attributes<I>(entries: I) -> Attributes
where
    I: IntoIterator<Item = (&'static str, Attribute)>,
{
    entries
        .into_iter()
        .map(|(name, attribute)| (name.to_string(), attribute))
        .collect()
}

/// Element type of list and map attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    Bool,
    Int64,
    Float64,
    List(Box<ElementType>),
    Map(Box<ElementType>),
}

impl ElementType {
    /// Map of the given element type
    pub fn map_of(element_type: ElementType) -> Self {
        Self::Map(Box::new(element_type))
    }

    /// List of the given element type
    pub fn list_of(element_type: ElementType) -> Self {
        Self::List(Box::new(element_type))
    }

    pub fn type_name(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Float64 => "float64".to_string(),
            Self::List(inner) => format!("list({})", inner.type_name()),
            Self::Map(inner) => format!("map({})", inner.type_name()),
        }
    }
}

/// Type of an attribute
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    Float64,

    /// Free-form JSON, used for fields that preserve unknown fields upstream
    Dynamic,

    List {
        element_type: ElementType,
    },

    Map {
        element_type: ElementType,
    },

    SingleNested {
        attributes: Attributes,
    },

    ListNested {
        attributes: Attributes,
    },
}

impl AttributeType {
    pub fn type_name(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Float64 => "float64".to_string(),
            Self::Dynamic => "dynamic".to_string(),
            Self::List { element_type } => format!("list({})", element_type.type_name()),
            Self::Map { element_type } => format!("map({})", element_type.type_name()),
            Self::SingleNested { .. } => "object".to_string(),
            Self::ListNested { .. } => "list(object)".to_string(),
        }
    }

    /// Child attributes of nested types
    pub fn nested_attributes(&self) -> Option<&Attributes> {
        match self {
            Self::SingleNested { attributes } | Self::ListNested { attributes } => Some(attributes),
            _ => None,
        }
    }
}

/// A single schema attribute
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub attribute_type: AttributeType,

    pub description: String,

    pub markdown_description: String,

    pub required: bool,

    pub optional: bool,

    pub computed: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn of(attribute_type: AttributeType) -> Self {
        Self {
            attribute_type,
            description: String::new(),
            markdown_description: String::new(),
            required: false,
            optional: false,
            computed: false,
            validators: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeType::String)
    }

    pub fn bool() -> Self {
        Self::of(AttributeType::Bool)
    }

    pub fn int64() -> Self {
        Self::of(AttributeType::Int64)
    }

    pub fn float64() -> Self {
        Self::of(AttributeType::Float64)
    }

    pub fn dynamic() -> Self {
        Self::of(AttributeType::Dynamic)
    }

    pub fn list(element_type: ElementType) -> Self {
        Self::of(AttributeType::List { element_type })
    }

    pub fn map(element_type: ElementType) -> Self {
        Self::of(AttributeType::Map { element_type })
    }

    pub fn single_nested(attributes: Attributes) -> Self {
        Self::of(AttributeType::SingleNested { attributes })
    }

    pub fn list_nested(attributes: Attributes) -> Self {
        Self::of(AttributeType::ListNested { attributes })
    }

    /// Set both the plain and markdown description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.markdown_description = description.clone();
        self.description = description;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Computed attributes that the caller may not set
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}
