//! # steward-core
//!
//! Foundation crate for the Steward corpus governance system.
//! Defines the data model, collaborator traits, errors, config, and the
//! approval policy table. Every other crate in the workspace depends on this.

pub mod approval;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StewardConfig;
pub use errors::{StewardError, StewardResult};
pub use models::{
    ActionPlan, Asset, Confidence, Decision, DecisionKind, DuplicateCluster, DuplicateReport,
    ExecutionResult, ExecutionStatus, PerceptionSnapshot, Severity, SourceType,
};
