//! Remember: short-term record of proposed decisions, keyed by decision id.
//!
//! Decision ids derive from kind and target set, so the same proposal in a
//! later cycle maps to the same entry and is suppressed until the window ends.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use steward_core::models::{DecisionKind, ExecutionResult, ExecutionStatus};
use steward_core::ActionPlan;

/// Longer windows are clamped to ten years.
const MAX_WINDOW_SECS: u64 = 10 * 365 * 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionState {
    /// Executed with at least partial success, or found already done.
    Executed,
    /// Held for human approval.
    Deferred,
    /// Executed and failed. Not retried automatically.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryEntry {
    pub kind: DecisionKind,
    pub state: DecisionState,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SuppressionMemory {
    window: Duration,
    entries: HashMap<String, MemoryEntry>,
}

impl SuppressionMemory {
    pub fn new(window_secs: u64) -> Self {
        Self {
            window: Duration::seconds(window_secs.min(MAX_WINDOW_SECS) as i64),
            entries: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn get(&self, decision_id: &str) -> Option<&MemoryEntry> {
        self.entries.get(decision_id)
    }

    /// True while an entry for `decision_id` is younger than the window.
    pub fn is_suppressed(&self, decision_id: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .get(decision_id)
            .is_some_and(|e| now - e.recorded_at < self.window)
    }

    pub fn record(&mut self, decision_id: &str, kind: DecisionKind, state: DecisionState, now: DateTime<Utc>) {
        self.entries.insert(
            decision_id.to_string(),
            MemoryEntry {
                kind,
                state,
                recorded_at: now,
            },
        );
    }

    /// Record every decision in `plan`: executed ones by outcome, the rest as deferred.
    pub fn remember(&mut self, plan: &ActionPlan, results: &[ExecutionResult], now: DateTime<Utc>) {
        let outcomes: HashMap<&str, ExecutionStatus> = results
            .iter()
            .map(|r| (r.decision_id.as_str(), r.status))
            .collect();
        for decision in plan.decisions() {
            let state = match outcomes.get(decision.id()) {
                Some(ExecutionStatus::Failed) => DecisionState::Failed,
                Some(_) => DecisionState::Executed,
                None => DecisionState::Deferred,
            };
            self.record(decision.id(), decision.kind(), state, now);
        }
        self.prune(now);
    }

    /// Drop entries older than the window.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let window = self.window;
        self.entries.retain(|_, e| now - e.recorded_at < window);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
