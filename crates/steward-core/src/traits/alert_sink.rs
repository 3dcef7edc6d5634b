use crate::models::{Decision, Severity};

/// Fire-and-forget notification channel for operators.
pub trait IAlertSink: Send + Sync {
    /// Called for every HIGH-severity decision, executed or held.
    fn notify(&self, decision: &Decision, severity: Severity);

    /// Ask a human to review the decision's targets.
    fn request_review(&self, decision: &Decision) {
        tracing::info!(
            decision_id = decision.id(),
            targets = decision.target_asset_ids().len(),
            "review requested"
        );
    }
}
