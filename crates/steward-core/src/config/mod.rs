pub mod defaults;

mod daemon_config;
mod decision_config;
mod dedup_config;
mod freshness_config;
mod observability_config;
mod validation_config;

pub use daemon_config::DaemonConfig;
pub use decision_config::DecisionConfig;
pub use dedup_config::{DedupConfig, SemanticScope};
pub use freshness_config::FreshnessConfig;
pub use observability_config::ObservabilityConfig;
pub use validation_config::ValidationConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{StewardError, StewardResult};

/// Root configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StewardConfig {
    pub dedup: DedupConfig,
    pub decision: DecisionConfig,
    pub daemon: DaemonConfig,
    pub freshness: FreshnessConfig,
    pub validation: ValidationConfig,
    pub observability: ObservabilityConfig,
}

impl StewardConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> StewardResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| StewardError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> StewardResult<()> {
        let tau = self.dedup.semantic_threshold;
        if !(0.0..=1.0).contains(&tau) || tau.is_nan() {
            return Err(StewardError::ConfigError(format!(
                "dedup.semantic_threshold must be within [0, 1], got {tau}"
            )));
        }
        if self.decision.medium_batch_threshold > self.decision.large_batch_threshold {
            return Err(StewardError::ConfigError(format!(
                "decision.medium_batch_threshold ({}) exceeds large_batch_threshold ({})",
                self.decision.medium_batch_threshold, self.decision.large_batch_threshold
            )));
        }
        if self.daemon.tick_timeout_ms == 0 || self.daemon.event_timeout_ms == 0 {
            return Err(StewardError::ConfigError(
                "daemon timeouts must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
