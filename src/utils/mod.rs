//! Utility functions

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use manifest_schema::Diagnostics;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Per-user configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("k8s-manifests");

    Ok(config_dir)
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::full(&path_str)
        .map_err(|e| anyhow!("Failed to expand {}: {}", path_str, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Read a data source configuration from a YAML or JSON file
pub fn read_config_value(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// One line per diagnostic, indented for CLI output
pub fn format_diagnostics(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| match &diagnostic.path {
            Some(path) => format!("  {}: {} ({})", path, diagnostic.summary, diagnostic.detail),
            None => format!("  {} ({})", diagnostic.summary, diagnostic.detail),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format duration as human readable string
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs > 0 {
        format!("{secs}.{millis:03}s")
    } else {
        format!("{millis}ms")
    }
}
