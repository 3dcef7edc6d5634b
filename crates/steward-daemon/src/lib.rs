//! # steward-daemon
//!
//! The governance loop. Owns scheduling and the single-cycle guard; every
//! cycle runs perceive → decide → gate → execute through `steward-agent`.
//! State lives in an explicit [`GovernanceState`] passed to each call.

pub mod cancellation;
pub mod deadline;
pub mod governance;
pub mod runner;
pub mod state;
pub mod triggers;

pub use cancellation::CancellationToken;
pub use governance::{
    CycleReport, FilterReason, FilteredHit, GovernanceLoop, GovernanceStatus, SearchOutcome,
};
pub use state::{CycleGuard, CycleRecord, GovernanceState, HealthTrend};
pub use triggers::{evaluate_triggers, RunTrigger, TriggerSignals};
