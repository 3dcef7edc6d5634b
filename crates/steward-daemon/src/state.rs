//! Governance state passed explicitly into every cycle: the single-cycle
//! guard, suppression memory, and a bounded cycle history.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_agent::SuppressionMemory;
use steward_core::config::{DaemonConfig, DecisionConfig};
use steward_core::constants::{TREND_DELTA, TREND_WINDOW};
use steward_core::StewardConfig;

/// Direction of the corpus health score over recent full cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Degrading,
    Stable,
    /// Fewer than two full cycles recorded.
    Unknown,
}

impl HealthTrend {
    /// Compare the newest score with the oldest of the last [`TREND_WINDOW`].
    pub fn from_scores(scores: &[f64]) -> Self {
        let window = &scores[scores.len().saturating_sub(TREND_WINDOW)..];
        match (window.first(), window.last()) {
            (Some(first), Some(last)) if window.len() >= 2 => {
                let delta = last - first;
                if delta > TREND_DELTA {
                    Self::Improving
                } else if delta < -TREND_DELTA {
                    Self::Degrading
                } else {
                    Self::Stable
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// Summary of one completed cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub trigger: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// False for event cycles scoped to a subset of assets.
    pub full_corpus: bool,
    pub health_score: f64,
    pub decisions: usize,
    pub executed: usize,
    pub failed: usize,
    pub held: usize,
    pub suppressed: usize,
    pub degraded_signals: Vec<String>,
}

/// Held for the duration of a cycle; releases the guard on drop.
#[derive(Debug)]
pub struct CycleGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct GovernanceState {
    /// Guard: only one cycle can run at a time.
    running: Arc<AtomicBool>,
    memory: Mutex<SuppressionMemory>,
    history: Mutex<VecDeque<CycleRecord>>,
    history_limit: usize,
}

impl GovernanceState {
    pub fn new(decision: &DecisionConfig, daemon: &DaemonConfig) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            memory: Mutex::new(SuppressionMemory::new(decision.suppression_window_secs)),
            history: Mutex::new(VecDeque::new()),
            history_limit: daemon.history_limit.max(1),
        }
    }

    pub fn from_config(config: &StewardConfig) -> Self {
        Self::new(&config.decision, &config.daemon)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Acquire the single-cycle guard. `None` while another cycle holds it.
    pub fn try_begin(&self) -> Option<CycleGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| CycleGuard {
                running: &self.running,
            })
    }

    pub fn with_memory<R>(&self, f: impl FnOnce(&mut SuppressionMemory) -> R) -> R {
        let mut memory = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut memory)
    }

    pub fn suppression_entries(&self) -> usize {
        self.with_memory(|m| m.len())
    }

    /// Append a record, dropping the oldest past the history limit.
    pub fn record(&self, record: CycleRecord) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push_back(record);
        while history.len() > self.history_limit {
            history.pop_front();
        }
    }

    /// Oldest first.
    pub fn history(&self) -> Vec<CycleRecord> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.iter().cloned().collect()
    }

    pub fn last_cycle(&self) -> Option<CycleRecord> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.back().cloned()
    }

    pub fn last_full_cycle(&self) -> Option<CycleRecord> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.iter().rev().find(|r| r.full_corpus).cloned()
    }

    /// Trend over full-corpus cycles only; scoped cycles do not measure the corpus.
    pub fn trend(&self) -> HealthTrend {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let scores: Vec<f64> = history
            .iter()
            .filter(|r| r.full_corpus)
            .map(|r| r.health_score)
            .collect();
        HealthTrend::from_scores(&scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(health: f64, full_corpus: bool) -> CycleRecord {
        CycleRecord {
            trigger: "tick".into(),
            started_at: Utc::now(),
            elapsed_ms: 1,
            full_corpus,
            health_score: health,
            decisions: 0,
            executed: 0,
            failed: 0,
            held: 0,
            suppressed: 0,
            degraded_signals: vec![],
        }
    }

    fn state(history_limit: usize) -> GovernanceState {
        let daemon = DaemonConfig {
            history_limit,
            ..DaemonConfig::default()
        };
        GovernanceState::new(&DecisionConfig::default(), &daemon)
    }

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let state = state(10);
        let guard = state.try_begin();
        assert!(guard.is_some());
        assert!(state.is_running());
        assert!(state.try_begin().is_none());
        drop(guard);
        assert!(!state.is_running());
        assert!(state.try_begin().is_some());
    }

    #[test]
    fn history_is_bounded() {
        let state = state(3);
        for i in 0..5 {
            state.record(record(f64::from(i) / 10.0, true));
        }
        let history = state.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].health_score, 0.2);
    }

    #[test]
    fn trend_uses_last_window_of_full_cycles() {
        assert_eq!(HealthTrend::from_scores(&[]), HealthTrend::Unknown);
        assert_eq!(HealthTrend::from_scores(&[0.5]), HealthTrend::Unknown);
        assert_eq!(HealthTrend::from_scores(&[0.5, 0.6]), HealthTrend::Improving);
        assert_eq!(HealthTrend::from_scores(&[0.8, 0.7]), HealthTrend::Degrading);
        assert_eq!(HealthTrend::from_scores(&[0.8, 0.82]), HealthTrend::Stable);
        // Only the last five count: 0.1 falls out of the window.
        assert_eq!(
            HealthTrend::from_scores(&[0.1, 0.8, 0.8, 0.8, 0.8, 0.81]),
            HealthTrend::Stable
        );

        let state = state(10);
        state.record(record(0.9, true));
        state.record(record(0.1, false));
        state.record(record(0.7, true));
        assert_eq!(state.trend(), HealthTrend::Degrading);
        assert_eq!(state.last_full_cycle().map(|r| r.health_score), Some(0.7));
    }
}
