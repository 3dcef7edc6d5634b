//! Background run loop: wake on an interval, evaluate run triggers, and run
//! `tick` on the blocking pool until shutdown is signalled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::governance::GovernanceLoop;
use crate::state::GovernanceState;

/// Runs until `shutdown` turns true or its sender is dropped. Returns the
/// number of cycles that completed.
pub async fn run(
    governance: Arc<GovernanceLoop>,
    state: Arc<GovernanceState>,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    let period = Duration::from_secs(governance.config().tick_interval_secs.max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut completed = 0;

    tracing::info!(interval_secs = period.as_secs(), "governance loop started");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let triggers = governance.should_run(&state);
                if triggers.is_empty() {
                    continue;
                }
                tracing::debug!(?triggers, "run triggered");
                let (g, s) = (governance.clone(), state.clone());
                match tokio::task::spawn_blocking(move || g.tick(&s)).await {
                    Ok(Ok(report)) => {
                        completed += 1;
                        tracing::info!(summary = %report.summary(), "tick completed");
                    }
                    Ok(Err(e)) => tracing::warn!(error = %e, "tick did not complete"),
                    Err(e) => tracing::error!(error = %e, "tick task panicked"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::info!(cycles = completed, "governance loop stopped");
    completed
}
