//! Executes admitted decisions against the corpus.
//!
//! Decisions run serially in plan order; targets within a decision run in
//! id order. A failed target never stops the decision, and a failed
//! decision never stops the batch. Nothing is retried.

use std::sync::Arc;

use steward_core::errors::CorpusError;
use steward_core::traits::{IAlertSink, ICorpus};
use steward_core::{Decision, DecisionKind, ExecutionResult, ExecutionStatus};

use crate::gate::AdmittedDecision;

enum TargetOutcome {
    Done,
    Gone,
    Failed(String),
}

#[derive(Clone)]
pub struct ActionExecutor {
    corpus: Arc<dyn ICorpus>,
    alerts: Arc<dyn IAlertSink>,
}

impl ActionExecutor {
    pub fn new(corpus: Arc<dyn ICorpus>, alerts: Arc<dyn IAlertSink>) -> Self {
        Self { corpus, alerts }
    }

    /// One result per admitted decision, in the order given.
    pub fn execute(&self, admitted: &[AdmittedDecision]) -> Vec<ExecutionResult> {
        let _span = steward_observability::execute_span!(admitted.len()).entered();
        admitted.iter().map(|a| self.execute_one(a.decision())).collect()
    }

    fn execute_one(&self, decision: &Decision) -> ExecutionResult {
        let mut affected = Vec::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for id in decision.target_asset_ids() {
            match self.apply(decision.kind(), id) {
                TargetOutcome::Done => affected.push(id.clone()),
                TargetOutcome::Gone => skipped.push(id.clone()),
                TargetOutcome::Failed(reason) => errors.push(format!("{id}: {reason}")),
            }
        }

        // Review is requested once per decision, for the targets still present.
        if decision.kind() == DecisionKind::ScheduleReview && !affected.is_empty() {
            self.alerts.request_review(decision);
        }

        let status = ExecutionStatus::from_counts(affected.len(), errors.len());
        tracing::debug!(
            decision_id = decision.id(),
            kind = %decision.kind(),
            affected = affected.len(),
            skipped = skipped.len(),
            failed = errors.len(),
            "decision applied"
        );

        ExecutionResult {
            decision_id: decision.id().to_string(),
            kind: decision.kind(),
            status,
            affected_asset_ids: affected,
            skipped_asset_ids: skipped,
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }

    fn apply(&self, kind: DecisionKind, id: &str) -> TargetOutcome {
        let outcome: Result<bool, CorpusError> = match kind {
            DecisionKind::DeleteDuplicates | DecisionKind::DeleteEmpty | DecisionKind::DeleteExpired => {
                self.corpus.delete_asset(id)
            }
            DecisionKind::ArchiveExpired => self.corpus.archive_asset(id),
            DecisionKind::Quarantine => self.corpus.quarantine_asset(id),
            DecisionKind::ScheduleReview => self.corpus.get_asset(id).map(|a| a.is_some()),
        };
        match outcome {
            Ok(true) => TargetOutcome::Done,
            Ok(false) => TargetOutcome::Gone,
            Err(e) if e.is_gone() => TargetOutcome::Gone,
            Err(e) => TargetOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::{Confidence, Severity};
    use test_fixtures::{asset, InMemoryCorpus, RecordingAlertSink};

    fn admitted(kind: DecisionKind, targets: &[&str]) -> AdmittedDecision {
        AdmittedDecision::for_test(Decision::new(
            kind,
            targets.iter().map(|s| s.to_string()),
            Confidence::new(0.99),
            Severity::Low,
            "test",
        ))
    }

    fn setup(ids: &[&str]) -> (Arc<InMemoryCorpus>, Arc<RecordingAlertSink>, ActionExecutor) {
        let corpus = Arc::new(InMemoryCorpus::with_assets(ids.iter().map(|id| asset(id, "content"))));
        let alerts = Arc::new(RecordingAlertSink::new());
        let executor = ActionExecutor::new(corpus.clone(), alerts.clone());
        (corpus, alerts, executor)
    }

    #[test]
    fn missing_target_is_skipped_and_batch_continues() {
        let (corpus, _, executor) = setup(&["b", "c"]);
        let results = executor.execute(&[
            admitted(DecisionKind::DeleteEmpty, &["a"]),
            admitted(DecisionKind::DeleteDuplicates, &["b", "c"]),
        ]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, ExecutionStatus::Skipped);
        assert_eq!(results[0].skipped_asset_ids, vec!["a".to_string()]);
        assert_eq!(results[1].status, ExecutionStatus::Success);
        assert!(corpus.is_empty());
    }

    #[test]
    fn write_failure_makes_partial() {
        let (corpus, _, executor) = setup(&["a", "b"]);
        corpus.fail_writes_to("b");
        let results = executor.execute(&[admitted(DecisionKind::Quarantine, &["a", "b"])]);
        assert_eq!(results[0].status, ExecutionStatus::Partial);
        assert_eq!(results[0].affected_asset_ids, vec!["a".to_string()]);
        assert!(results[0].error.as_deref().is_some_and(|e| e.starts_with("b:")));
        assert_eq!(corpus.metadata_value("a", "quarantined").as_deref(), Some("true"));
    }

    #[test]
    fn unavailable_corpus_fails_decision() {
        let (corpus, _, executor) = setup(&["a"]);
        corpus.set_unavailable(true);
        let results = executor.execute(&[admitted(DecisionKind::ArchiveExpired, &["a"])]);
        assert_eq!(results[0].status, ExecutionStatus::Failed);
    }

    #[test]
    fn review_requested_once_for_present_targets() {
        let (corpus, alerts, executor) = setup(&["a", "b"]);
        let results = executor.execute(&[admitted(DecisionKind::ScheduleReview, &["a", "b", "gone"])]);
        assert_eq!(results[0].status, ExecutionStatus::Success);
        assert_eq!(results[0].skipped_asset_ids, vec!["gone".to_string()]);
        assert_eq!(alerts.reviews().len(), 1);
        assert_eq!(corpus.len(), 2);
    }
}
