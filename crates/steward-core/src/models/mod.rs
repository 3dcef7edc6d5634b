mod asset;
mod confidence;
mod decision;
mod duplicate;
mod execution;
mod perception;
mod plan;
mod signals;

pub use asset::{Asset, SourceType};
pub use confidence::Confidence;
pub use decision::{Decision, DecisionKind, Severity};
pub use duplicate::{DedupStage, DuplicateCluster, DuplicateReport, ExcludedAsset, MatchKind};
pub use execution::{ExecutionResult, ExecutionStatus};
pub use perception::PerceptionSnapshot;
pub use plan::{plan_order, ActionPlan};
pub use signals::{
    ExpirationAction, FindingSeverity, FreshnessReport, FreshnessStatus, QualityReport,
    ValidationFinding, ValidationReport,
};
