//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use steward_core::config::ObservabilityConfig;
use steward_core::errors::{StewardError, StewardResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "STEWARD_LOG";

/// `STEWARD_LOG` when set and valid, otherwise the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> StewardResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| StewardError::ConfigError(format!("invalid log level {:?}: {e}", config.log_level)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> StewardResult<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| StewardError::ConfigError(format!("tracing subscriber: {e}")))
}

/// Install a subscriber with a literal filter string (tests, embedding hosts).
pub fn init_tracing_with_filter(filter: &str) -> StewardResult<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| StewardError::ConfigError(format!("invalid log filter {filter:?}: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .map_err(|e| StewardError::ConfigError(format!("tracing subscriber: {e}")))
}
