use serde::{Deserialize, Serialize};

use super::defaults;

/// Decision engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Cool-down during which an already-proposed decision is not proposed again (seconds).
    pub suppression_window_secs: u64,
    /// Minimum number of stale assets before a review is scheduled.
    pub stale_review_min: usize,
    /// Quality score below which an asset is scheduled for review.
    pub quality_floor: f64,
    /// Target count above which a decision is HIGH severity.
    pub large_batch_threshold: usize,
    /// Target count from which a decision is at least MEDIUM severity.
    pub medium_batch_threshold: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            suppression_window_secs: defaults::DEFAULT_SUPPRESSION_WINDOW_SECS,
            stale_review_min: defaults::DEFAULT_STALE_REVIEW_MIN,
            quality_floor: defaults::DEFAULT_QUALITY_FLOOR,
            large_batch_threshold: defaults::DEFAULT_LARGE_BATCH_THRESHOLD,
            medium_batch_threshold: defaults::DEFAULT_MEDIUM_BATCH_THRESHOLD,
        }
    }
}
