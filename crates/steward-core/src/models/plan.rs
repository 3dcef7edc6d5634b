use std::cmp::Ordering;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::decision::{Decision, Severity};

/// Ordered decisions for one governance cycle.
///
/// Decisions are sorted on construction: severity descending, confidence
/// descending, then kind name, target list and id ascending. Identical
/// inputs always produce the same order.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPlan {
    plan_id: String,
    trigger: String,
    created_at: DateTime<Utc>,
    decisions: Vec<Decision>,
    /// Ids dropped because they were proposed within the suppression window.
    suppressed_decision_ids: Vec<String>,
}

impl ActionPlan {
    pub fn new(
        trigger: impl Into<String>,
        mut decisions: Vec<Decision>,
        mut suppressed_decision_ids: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        decisions.sort_by(plan_order);
        suppressed_decision_ids.sort();
        Self {
            plan_id: uuid::Uuid::new_v4().to_string(),
            trigger: trigger.into(),
            created_at,
            decisions,
            suppressed_decision_ids,
        }
    }

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn suppressed_decision_ids(&self) -> &[String] {
        &self.suppressed_decision_ids
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn get(&self, decision_id: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.id() == decision_id)
    }

    pub fn auto_executable_decisions(&self) -> Vec<&Decision> {
        self.decisions.iter().filter(|d| !d.requires_approval()).collect()
    }

    /// Decisions surfaced for human review.
    pub fn needs_approval_decisions(&self) -> Vec<&Decision> {
        self.decisions.iter().filter(|d| d.requires_approval()).collect()
    }

    pub fn total_targets(&self) -> usize {
        self.decisions.iter().map(|d| d.target_asset_ids().len()).sum()
    }

    /// Decision counts as (low, medium, high).
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        self.decisions
            .iter()
            .fold((0, 0, 0), |(l, m, h), d| match d.severity() {
                Severity::Low => (l + 1, m, h),
                Severity::Medium => (l, m + 1, h),
                Severity::High => (l, m, h + 1),
            })
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Plan {} ({}): {} decisions, {} targets, {} auto, {} need approval",
            self.plan_id,
            self.trigger,
            self.decisions.len(),
            self.total_targets(),
            self.auto_executable_decisions().len(),
            self.needs_approval_decisions().len()
        );
        if !self.suppressed_decision_ids.is_empty() {
            let _ = write!(out, ", {} suppressed", self.suppressed_decision_ids.len());
        }
        for d in &self.decisions {
            let _ = write!(out, "\n  {}", d.to_agent_message());
        }
        out
    }

    /// Machine-readable form for agents and audit logs.
    pub fn to_structured_output(&self) -> serde_json::Value {
        let (low, medium, high) = self.severity_counts();
        json!({
            "plan_id": self.plan_id,
            "trigger": self.trigger,
            "created_at": self.created_at.to_rfc3339(),
            "total_decisions": self.decisions.len(),
            "total_targets": self.total_targets(),
            "auto_executable": self.auto_executable_decisions().len(),
            "needs_approval": self.needs_approval_decisions().len(),
            "suppressed": self.suppressed_decision_ids,
            "decisions": self.decisions.iter().map(|d| json!({
                "id": d.id(),
                "kind": d.kind().as_str(),
                "severity": d.severity().as_str(),
                "confidence": d.confidence().value(),
                "target_count": d.target_asset_ids().len(),
                "targets": d.target_asset_ids(),
                "rationale": d.rationale(),
                "requires_approval": d.requires_approval(),
            })).collect::<Vec<_>>(),
            "summary": { "high": high, "medium": medium, "low": low },
        })
    }
}

/// Total order used to sort plan decisions.
pub fn plan_order(a: &Decision, b: &Decision) -> Ordering {
    b.severity()
        .cmp(&a.severity())
        .then_with(|| b.confidence().value().total_cmp(&a.confidence().value()))
        .then_with(|| a.kind().as_str().cmp(b.kind().as_str()))
        .then_with(|| a.target_asset_ids().cmp(b.target_asset_ids()))
        .then_with(|| a.id().cmp(b.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, DecisionKind};

    fn decision(kind: DecisionKind, target: &str, conf: f64, sev: Severity) -> Decision {
        Decision::new(kind, vec![target.to_string()], Confidence::new(conf), sev, "r")
    }

    #[test]
    fn sorts_by_severity_then_confidence_then_kind() {
        let plan = ActionPlan::new(
            "test",
            vec![
                decision(DecisionKind::ScheduleReview, "a", 0.8, Severity::Low),
                decision(DecisionKind::Quarantine, "b", 0.85, Severity::Medium),
                decision(DecisionKind::DeleteEmpty, "c", 0.99, Severity::Medium),
                decision(DecisionKind::ArchiveExpired, "d", 0.9, Severity::High),
                decision(DecisionKind::DeleteExpired, "e", 0.9, Severity::High),
            ],
            vec![],
            Utc::now(),
        );
        let kinds: Vec<_> = plan.decisions().iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DecisionKind::ArchiveExpired,
                DecisionKind::DeleteExpired,
                DecisionKind::DeleteEmpty,
                DecisionKind::Quarantine,
                DecisionKind::ScheduleReview,
            ]
        );
    }

    #[test]
    fn structured_output_counts_severities() {
        let plan = ActionPlan::new(
            "test",
            vec![
                decision(DecisionKind::ScheduleReview, "a", 0.8, Severity::Low),
                decision(DecisionKind::Quarantine, "b", 0.85, Severity::High),
            ],
            vec!["x".into()],
            Utc::now(),
        );
        let out = plan.to_structured_output();
        assert_eq!(out["summary"]["high"], 1);
        assert_eq!(out["summary"]["low"], 1);
        assert_eq!(out["needs_approval"], 1);
        assert_eq!(out["suppressed"][0], "x");
        assert_eq!(plan.total_targets(), 2);
    }
}
