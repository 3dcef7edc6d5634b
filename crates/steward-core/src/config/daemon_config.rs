use serde::{Deserialize, Serialize};

use super::defaults;

/// Governance loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Interval between run-loop wakeups (seconds).
    pub tick_interval_secs: u64,
    /// Budget for a full `tick` cycle (milliseconds).
    pub tick_timeout_ms: u64,
    /// Budget for an event-hook cycle (milliseconds).
    pub event_timeout_ms: u64,
    /// Run at least this often (seconds).
    pub min_run_interval_secs: u64,
    /// Run this often while health is degraded (seconds).
    pub degraded_run_interval_secs: u64,
    /// Health score below which the corpus counts as degraded.
    pub degraded_health_threshold: f64,
    /// Minimum quality for a search hit to pass the quality gate.
    pub search_min_quality: f64,
    /// Number of cycle records retained in governance state.
    pub history_limit: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
            tick_timeout_ms: defaults::DEFAULT_TICK_TIMEOUT_MS,
            event_timeout_ms: defaults::DEFAULT_EVENT_TIMEOUT_MS,
            min_run_interval_secs: defaults::DEFAULT_MIN_RUN_INTERVAL_SECS,
            degraded_run_interval_secs: defaults::DEFAULT_DEGRADED_RUN_INTERVAL_SECS,
            degraded_health_threshold: defaults::DEFAULT_DEGRADED_HEALTH_THRESHOLD,
            search_min_quality: defaults::DEFAULT_SEARCH_MIN_QUALITY,
            history_limit: defaults::DEFAULT_HISTORY_LIMIT,
        }
    }
}
