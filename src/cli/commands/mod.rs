//! CLI command modules

pub mod generate;
pub mod info;
pub mod init;
pub mod list;
pub mod render;
pub mod schema;
pub mod validate;
