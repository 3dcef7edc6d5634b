//! Run triggers for the background loop: first run, schedule, degraded health.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use steward_core::config::DaemonConfig;

/// Reasons a full governance tick should run now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunTrigger {
    /// No full cycle has run yet.
    FirstRun,
    /// `min_run_interval_secs` elapsed since the last full cycle.
    Scheduled,
    /// Last health score is below the degraded threshold and the shorter
    /// degraded interval elapsed.
    DegradedHealth,
}

#[derive(Debug, Clone)]
pub struct TriggerSignals {
    pub last_run: Option<DateTime<Utc>>,
    pub last_health: Option<f64>,
    pub now: DateTime<Utc>,
}

/// Active trigger reasons; empty means skip this wakeup.
pub fn evaluate_triggers(signals: &TriggerSignals, config: &DaemonConfig) -> Vec<RunTrigger> {
    let Some(last_run) = signals.last_run else {
        return vec![RunTrigger::FirstRun];
    };
    let since = signals.now - last_run;
    let mut reasons = Vec::new();

    if since >= seconds(config.min_run_interval_secs) {
        reasons.push(RunTrigger::Scheduled);
    }

    let degraded = signals
        .last_health
        .is_some_and(|h| h < config.degraded_health_threshold);
    if degraded && since >= seconds(config.degraded_run_interval_secs) {
        reasons.push(RunTrigger::DegradedHealth);
    }

    reasons
}

fn seconds(secs: u64) -> Duration {
    // chrono caps durations at i64::MAX milliseconds.
    let secs = i64::try_from(secs).unwrap_or(i64::MAX).min(i64::MAX / 1_000);
    Duration::seconds(secs)
}
