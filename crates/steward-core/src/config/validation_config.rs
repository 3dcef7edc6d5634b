use serde::{Deserialize, Serialize};

use super::defaults;

/// Validation rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum acceptable content length (chars).
    pub min_content_length: usize,
    /// Maximum acceptable content length (chars).
    pub max_content_length: usize,
    /// Metadata keys every asset must carry.
    pub required_metadata: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_content_length: defaults::DEFAULT_MIN_CONTENT_LENGTH,
            max_content_length: defaults::DEFAULT_MAX_CONTENT_LENGTH,
            required_metadata: Vec::new(),
        }
    }
}
