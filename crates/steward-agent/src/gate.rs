//! Approval gate: the only way to obtain an [`AdmittedDecision`].
//!
//! A decision that requires approval is admitted only when a
//! [`HumanApproval`] names its id. Everything else in the plan is held.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::{ActionPlan, Decision};

/// Explicit human sign-off on a set of decision ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanApproval {
    pub approver: String,
    pub decision_ids: BTreeSet<String>,
    pub approved_at: DateTime<Utc>,
}

impl HumanApproval {
    pub fn new<I, S>(approver: impl Into<String>, decision_ids: I, approved_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            approver: approver.into(),
            decision_ids: decision_ids.into_iter().map(Into::into).collect(),
            approved_at,
        }
    }

    pub fn covers(&self, decision_id: &str) -> bool {
        self.decision_ids.contains(decision_id)
    }
}

#[derive(Debug, Clone, Default)]
pub enum ExecutionMode {
    /// Only decisions that need no approval run.
    #[default]
    AutoOnly,
    /// Auto decisions plus the approval-requiring ones the approval names.
    WithApprovals(HumanApproval),
}

/// A decision cleared for execution. Only [`ApprovalGate::admit`] builds one.
#[derive(Debug, Clone)]
pub struct AdmittedDecision {
    decision: Decision,
    approved_by: Option<String>,
}

impl AdmittedDecision {
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Set when the decision needed and received human approval.
    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn for_test(decision: Decision) -> Self {
        Self {
            decision,
            approved_by: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Admission {
    /// In plan order.
    pub admitted: Vec<AdmittedDecision>,
    /// Decisions left for a human.
    pub held: Vec<Decision>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalGate;

impl ApprovalGate {
    pub fn admit(&self, plan: &ActionPlan, mode: &ExecutionMode) -> Admission {
        let mut admission = Admission::default();
        for decision in plan.decisions() {
            let approved_by = match mode {
                _ if !decision.requires_approval() => Some(None),
                ExecutionMode::WithApprovals(approval) if approval.covers(decision.id()) => {
                    Some(Some(approval.approver.clone()))
                }
                _ => None,
            };
            match approved_by {
                Some(approved_by) => admission.admitted.push(AdmittedDecision {
                    decision: decision.clone(),
                    approved_by,
                }),
                None => admission.held.push(decision.clone()),
            }
        }
        tracing::debug!(
            admitted = admission.admitted.len(),
            held = admission.held.len(),
            "approval gate applied"
        );
        admission
    }
}
