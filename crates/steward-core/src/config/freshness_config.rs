use serde::{Deserialize, Serialize};

use super::defaults;

/// Freshness policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    /// TTL for short-term data such as chat history and sessions (days).
    pub default_ttl_days: u32,
    /// Review interval for long-term data such as documents and memories (days).
    pub long_term_review_days: u32,
    /// TTL for web cache entries (days).
    pub web_cache_ttl_days: u32,
    /// Age after which any asset counts as stale (days).
    pub stale_threshold_days: u32,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            default_ttl_days: defaults::DEFAULT_TTL_DAYS,
            long_term_review_days: defaults::DEFAULT_LONG_TERM_REVIEW_DAYS,
            web_cache_ttl_days: defaults::DEFAULT_WEB_CACHE_TTL_DAYS,
            stale_threshold_days: defaults::DEFAULT_STALE_THRESHOLD_DAYS,
        }
    }
}
