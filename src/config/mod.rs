//! Generator configuration

pub mod config;
pub mod generation;
pub mod source;

#[cfg(test)]
mod tests;

pub use config::{Config, CONFIG_FILE_NAMES};
pub use generation::GenerationConfig;
pub use manifest_generator::config::{OrganizationStrategy, OutputConfig};
pub use source::CrdSource;
