use serde::{Deserialize, Serialize};

use super::defaults;

/// Which assets the semantic detector compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticScope {
    /// Singletons plus one member per distinct embedding of each exact group.
    /// Pairs inside an exact group are not scored. No pair meeting the
    /// threshold is lost.
    #[default]
    Remaining,
    /// Every asset with a usable embedding.
    All,
}

/// Deduplication subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Run the semantic detector. When false no semantic processing happens at all.
    pub semantic_enabled: bool,
    /// Cosine similarity threshold for near-duplicates.
    pub semantic_threshold: f64,
    /// Assets considered by the semantic detector.
    pub semantic_scope: SemanticScope,
    /// Worker threads for pairwise similarity (0 = rayon default).
    pub worker_threads: usize,
    /// Strip and collapse whitespace before fingerprinting.
    pub normalize_whitespace: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            semantic_enabled: defaults::DEFAULT_SEMANTIC_ENABLED,
            semantic_threshold: defaults::DEFAULT_SEMANTIC_THRESHOLD,
            semantic_scope: SemanticScope::default(),
            worker_threads: defaults::DEFAULT_WORKER_THREADS,
            normalize_whitespace: defaults::DEFAULT_NORMALIZE_WHITESPACE,
        }
    }
}
