//! # steward-agent
//!
//! The governance agent: perceive (signal aggregation) → reason (rule table)
//! → decide (ordered plan) → remember (suppression window), plus the approval
//! gate and the action executor.

pub mod engine;
pub mod executor;
pub mod gate;
pub mod memory;
pub mod perception;
pub mod scoring;

pub use engine::DecisionEngine;
pub use executor::ActionExecutor;
pub use gate::{Admission, AdmittedDecision, ApprovalGate, ExecutionMode, HumanApproval};
pub use memory::{DecisionState, SuppressionMemory};
pub use perception::{SignalAggregator, SignalSelection};
