//! Attribute schemas for manifest data sources
//!
//! A [`Schema`] is a static, declarative attribute tree: names, types,
//! descriptions, required/optional/computed flags and [`Validator`]s.
//! Schemas can check their own consistency with
//! [`Schema::validate_implementation`] and check a configuration value with
//! [`Schema::validate_config`].

pub mod attribute;
pub mod diagnostics;
pub mod naming;
pub mod schema;
pub mod validate;
pub mod validators;

pub use attribute::{attributes, Attribute, AttributeType, Attributes, ElementType};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use schema::Schema;
pub use validators::Validator;
