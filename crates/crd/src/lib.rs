//! CRD (CustomResourceDefinition) parsing and resource model extraction

pub mod model;
pub mod parser;
pub mod schema;
pub mod types;

pub use model::{FieldModel, FieldType, ObjectModel, ResourceModel};
pub use parser::{CrdParser, ParsedCrds};
pub use schema::{CrdSchema, Scope};
pub use types::ValidationRules;
