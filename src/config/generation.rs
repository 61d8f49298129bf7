//! Generation settings

use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Stop at the first source that fails
    #[serde(default)]
    pub fail_fast: bool,
}
