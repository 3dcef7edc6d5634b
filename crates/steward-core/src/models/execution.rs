use serde::{Deserialize, Serialize};

use super::decision::DecisionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Every present target was handled.
    Success,
    /// Some targets handled, some failed.
    Partial,
    /// No present target could be handled.
    Failed,
    /// All targets were already gone.
    Skipped,
}

impl ExecutionStatus {
    /// Derive a status from per-target outcome counts.
    pub fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (0, 0) => Self::Skipped,
            (_, 0) => Self::Success,
            (0, _) => Self::Failed,
            _ => Self::Partial,
        }
    }
}

/// Outcome of executing one decision. Exactly one per admitted decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub decision_id: String,
    pub kind: DecisionKind,
    pub status: ExecutionStatus,
    pub affected_asset_ids: Vec<String>,
    /// Targets that were already gone.
    #[serde(default)]
    pub skipped_asset_ids: Vec<String>,
    /// Per-target failures joined into one message.
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::Success | ExecutionStatus::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_counts() {
        assert_eq!(ExecutionStatus::from_counts(0, 0), ExecutionStatus::Skipped);
        assert_eq!(ExecutionStatus::from_counts(3, 0), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::from_counts(1, 2), ExecutionStatus::Partial);
        assert_eq!(ExecutionStatus::from_counts(0, 2), ExecutionStatus::Failed);
    }
}
