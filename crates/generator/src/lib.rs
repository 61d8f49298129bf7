//! Rust data source generation from CRD schemas

pub mod config;
pub mod emit;
pub mod generator;
pub mod result;

pub use generator::ManifestGenerator;
pub use result::{GenerationResult, GenerationStatistics, SourceResult};
