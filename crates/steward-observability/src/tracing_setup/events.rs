//! Structured log events for governance activity.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use steward_core::models::{Decision, DuplicateReport, ExecutionResult, ExecutionStatus};

pub fn cycle_started(trigger: &str, scoped_assets: Option<usize>) {
    tracing::info!(
        event = "cycle_started",
        trigger = %trigger,
        scoped_assets = ?scoped_assets,
        "governance cycle started"
    );
}

pub fn cycle_completed(trigger: &str, decisions: usize, executed: usize, held: usize, health: f64, elapsed_ms: u64) {
    tracing::info!(
        event = "cycle_completed",
        trigger = %trigger,
        decisions = decisions,
        executed = executed,
        held = held,
        health = health,
        elapsed_ms = elapsed_ms,
        "governance cycle completed"
    );
}

/// A cycle stopped before `stage`; nothing from it was applied.
pub fn cycle_aborted(trigger: &str, stage: &str, reason: &str) {
    tracing::warn!(
        event = "cycle_aborted",
        trigger = %trigger,
        stage = %stage,
        reason = %reason,
        "governance cycle aborted"
    );
}

pub fn duplicates_detected(report: &DuplicateReport) {
    tracing::info!(
        event = "duplicates_detected",
        clusters = report.clusters.len(),
        duplicates = report.total_duplicate_count,
        excluded = report.excluded.len(),
        semantic = report.semantic_ran,
        "duplicates detected"
    );
}

pub fn decision_held(decision: &Decision) {
    tracing::info!(
        event = "decision_held",
        decision_id = %decision.id(),
        kind = %decision.kind(),
        severity = %decision.severity(),
        confidence = decision.confidence().value(),
        "decision held for approval"
    );
}

pub fn decision_executed(result: &ExecutionResult) {
    if matches!(result.status, ExecutionStatus::Failed | ExecutionStatus::Partial) {
        tracing::warn!(
            event = "decision_executed",
            decision_id = %result.decision_id,
            status = ?result.status,
            error = ?result.error,
            "decision executed with failures"
        );
    } else {
        tracing::info!(
            event = "decision_executed",
            decision_id = %result.decision_id,
            status = ?result.status,
            affected = result.affected_asset_ids.len(),
            "decision executed"
        );
    }
}

pub fn alert_dispatched(decision: &Decision) {
    tracing::warn!(
        event = "alert_dispatched",
        decision_id = %decision.id(),
        kind = %decision.kind(),
        targets = decision.target_asset_ids().len(),
        "high severity alert dispatched"
    );
}
