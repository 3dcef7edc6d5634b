//! Static approval policy, keyed on (kind, severity).
//!
//! This table is the only place that decides whether a decision may run
//! without human sign-off.

use crate::models::{Confidence, DecisionKind, Severity};

/// What a table cell requires before a decision may run unattended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApprovalRule {
    /// Safe to auto-execute.
    Auto,
    /// Auto-execute only at or above this confidence.
    AutoAbove(f64),
    /// Always needs human approval.
    Always,
}

impl ApprovalRule {
    pub fn requires_approval(self, confidence: Confidence) -> bool {
        match self {
            Self::Auto => false,
            Self::AutoAbove(min) => !confidence.at_least(min),
            Self::Always => true,
        }
    }
}

/// Table lookup. Rows are kinds, columns are LOW / MEDIUM / HIGH.
pub fn rule_for(kind: DecisionKind, severity: Severity) -> ApprovalRule {
    use ApprovalRule::*;
    let row: [ApprovalRule; 3] = match kind {
        DecisionKind::DeleteDuplicates | DecisionKind::DeleteEmpty => [
            AutoAbove(Confidence::MEDIUM),
            AutoAbove(Confidence::HIGH),
            Always,
        ],
        DecisionKind::DeleteExpired => [Always, Always, Always],
        DecisionKind::ArchiveExpired => [Auto, Auto, Always],
        DecisionKind::ScheduleReview => [Auto, Auto, Auto],
        DecisionKind::Quarantine => [Always, Always, Always],
    };
    match severity {
        Severity::Low => row[0],
        Severity::Medium => row[1],
        Severity::High => row[2],
    }
}

pub fn requires_approval(kind: DecisionKind, severity: Severity, confidence: Confidence) -> bool {
    rule_for(kind, severity).requires_approval(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_severity_destructive_always_gated() {
        for kind in DecisionKind::ALL.into_iter().filter(|k| k.is_destructive()) {
            assert!(requires_approval(kind, Severity::High, Confidence::new(1.0)));
        }
    }

    #[test]
    fn duplicate_deletion_depends_on_confidence() {
        let k = DecisionKind::DeleteDuplicates;
        assert!(!requires_approval(k, Severity::Low, Confidence::new(0.90)));
        assert!(requires_approval(k, Severity::Low, Confidence::new(0.89)));
        assert!(!requires_approval(k, Severity::Medium, Confidence::new(0.96)));
        assert!(requires_approval(k, Severity::Medium, Confidence::new(0.94)));
    }

    #[test]
    fn reviews_never_gated() {
        for s in [Severity::Low, Severity::Medium, Severity::High] {
            assert!(!requires_approval(DecisionKind::ScheduleReview, s, Confidence::new(0.0)));
        }
    }
}
