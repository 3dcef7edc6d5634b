//! DecisionEngine: reason over a [`PerceptionSnapshot`] and assemble the plan.
//!
//! Rules run in a fixed priority order. Each asset is claimed by at most one
//! decision per cycle; a later rule drops targets an earlier rule claimed.
//!
//! | Priority | Signal | Kind |
//! |---|---|---|
//! | 1 | blank content | DELETE_EMPTY |
//! | 2 | duplicate cluster (per cluster) | DELETE_DUPLICATES |
//! | 3 | error-level validation findings | QUARANTINE |
//! | 4 | expired, policy `delete` | DELETE_EXPIRED |
//! | 5 | expired, policy `archive` | ARCHIVE_EXPIRED |
//! | 6 | expired, policy `review` / `notify` | SCHEDULE_REVIEW |
//! | 7 | quality below floor | SCHEDULE_REVIEW |
//! | 8 | at least `stale_review_min` stale assets | SCHEDULE_REVIEW |

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::json;
use steward_core::config::DecisionConfig;
use steward_core::constants::SCORING_VERSION;
use steward_core::models::{Decision, DecisionKind, ExpirationAction};
use steward_core::{ActionPlan, PerceptionSnapshot};

use crate::memory::SuppressionMemory;
use crate::scoring;

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

/// Tracks assets already targeted this cycle.
#[derive(Default)]
struct Claims(BTreeSet<String>);

impl Claims {
    /// Unclaimed ids from `ids`, now claimed.
    fn take<I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        ids.into_iter()
            .filter(|id| self.0.insert(id.clone()))
            .collect()
    }
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Apply the rule table. Output is unordered; [`Self::decide`] orders it.
    pub fn reason(&self, snapshot: &PerceptionSnapshot) -> Vec<Decision> {
        let mut claims = Claims::default();
        let mut out = Vec::new();

        self.reason_empty(snapshot, &mut claims, &mut out);
        self.reason_duplicates(snapshot, &mut claims, &mut out);
        self.reason_quarantine(snapshot, &mut claims, &mut out);
        self.reason_expired(snapshot, &mut claims, &mut out);
        self.reason_low_quality(snapshot, &mut claims, &mut out);
        self.reason_stale(snapshot, &mut claims, &mut out);

        out.into_iter()
            .map(|d| d.with_evidence("scoring_version", json!(SCORING_VERSION)))
            .collect()
    }

    /// Reason, drop suppressed proposals, order the rest.
    pub fn decide(
        &self,
        snapshot: &PerceptionSnapshot,
        memory: &SuppressionMemory,
        trigger: &str,
        now: DateTime<Utc>,
    ) -> ActionPlan {
        let _span = steward_observability::decide_span!(trigger).entered();
        let (suppressed, kept): (Vec<Decision>, Vec<Decision>) = self
            .reason(snapshot)
            .into_iter()
            .partition(|d| memory.is_suppressed(d.id(), now));
        for d in &suppressed {
            tracing::debug!(decision_id = d.id(), kind = %d.kind(), "suppressed within cool-down");
        }
        let plan = ActionPlan::new(
            trigger,
            kept,
            suppressed.iter().map(|d| d.id().to_string()).collect(),
            now,
        );
        tracing::info!(
            decisions = plan.decisions().len(),
            suppressed = plan.suppressed_decision_ids().len(),
            needs_approval = plan.needs_approval_decisions().len(),
            "plan assembled"
        );
        plan
    }

    fn reason_empty(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        let targets = claims.take(snapshot.duplicates().blank_asset_ids.iter().cloned());
        if targets.is_empty() {
            return;
        }
        let n = targets.len();
        out.push(Decision::new(
            DecisionKind::DeleteEmpty,
            targets,
            scoring::empty_confidence(),
            scoring::count_severity(n, &self.config),
            format!("{n} assets have no content"),
        ));
    }

    fn reason_duplicates(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        for cluster in &snapshot.duplicates().clusters {
            let targets = claims.take(cluster.removal_ids());
            if targets.is_empty() {
                continue;
            }
            let min_similarity = targets
                .iter()
                .map(|id| cluster.similarity_scores.get(id).copied().unwrap_or(0.0))
                .fold(1.0_f64, f64::min);
            let n = targets.len();
            out.push(
                Decision::new(
                    DecisionKind::DeleteDuplicates,
                    targets,
                    scoring::duplicate_confidence(min_similarity),
                    scoring::count_severity(n, &self.config),
                    format!(
                        "{n} duplicates of {} (min similarity {min_similarity:.3})",
                        cluster.representative_id
                    ),
                )
                .with_evidence("representative_id", json!(cluster.representative_id))
                .with_evidence("cluster_size", json!(cluster.len()))
                .with_evidence("match_kind", json!(cluster.match_kind))
                .with_evidence("min_similarity", json!(min_similarity)),
            );
        }
    }

    fn reason_quarantine(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        let errors = snapshot.validation().errors_by_asset();
        let targets = claims.take(errors.keys().cloned());
        if targets.is_empty() {
            return;
        }
        let error_count: usize = targets.iter().filter_map(|id| errors.get(id)).sum();
        let rules: BTreeSet<&str> = snapshot
            .validation()
            .findings
            .iter()
            .filter(|f| targets.contains(&f.asset_id))
            .map(|f| f.rule.as_str())
            .collect();
        let n = targets.len();
        out.push(
            Decision::new(
                DecisionKind::Quarantine,
                targets,
                scoring::quarantine_confidence(error_count),
                scoring::batch_severity(n, &self.config),
                format!("{n} assets fail validation with {error_count} errors"),
            )
            .with_evidence("error_findings", json!(error_count))
            .with_evidence("rules", json!(rules)),
        );
    }

    fn reason_expired(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        let expired_with = |wanted: &[ExpirationAction]| -> Vec<String> {
            snapshot
                .freshness()
                .expired()
                .filter(|s| s.action.is_some_and(|a| wanted.contains(&a)))
                .map(|s| s.asset_id.clone())
                .collect()
        };

        let to_delete = claims.take(expired_with(&[ExpirationAction::Delete]));
        if !to_delete.is_empty() {
            let n = to_delete.len();
            out.push(Decision::new(
                DecisionKind::DeleteExpired,
                to_delete,
                scoring::expired_confidence(),
                scoring::batch_severity(n, &self.config),
                format!("{n} assets past TTL under a delete policy"),
            ));
        }

        let to_archive = claims.take(expired_with(&[ExpirationAction::Archive]));
        if !to_archive.is_empty() {
            let n = to_archive.len();
            out.push(Decision::new(
                DecisionKind::ArchiveExpired,
                to_archive,
                scoring::expired_confidence(),
                scoring::batch_severity(n, &self.config),
                format!("{n} assets past TTL under an archive policy"),
            ));
        }

        let to_review = claims.take(expired_with(&[ExpirationAction::Review, ExpirationAction::Notify]));
        if !to_review.is_empty() {
            let n = to_review.len();
            out.push(
                Decision::new(
                    DecisionKind::ScheduleReview,
                    to_review,
                    scoring::review_confidence(),
                    scoring::review_severity(),
                    format!("{n} expired assets need review"),
                )
                .with_evidence("reason", json!("expired")),
            );
        }
    }

    fn reason_low_quality(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        let targets = claims.take(snapshot.quality().below(self.config.quality_floor));
        if targets.is_empty() {
            return;
        }
        let n = targets.len();
        out.push(
            Decision::new(
                DecisionKind::ScheduleReview,
                targets,
                scoring::review_confidence(),
                scoring::review_severity(),
                format!("{n} assets score below quality floor {:.2}", self.config.quality_floor),
            )
            .with_evidence("reason", json!("low_quality")),
        );
    }

    fn reason_stale(&self, snapshot: &PerceptionSnapshot, claims: &mut Claims, out: &mut Vec<Decision>) {
        let stale: Vec<String> = snapshot.freshness().stale().map(|s| s.asset_id.clone()).collect();
        if stale.len() < self.config.stale_review_min.max(1) {
            return;
        }
        let targets = claims.take(stale);
        if targets.is_empty() {
            return;
        }
        let n = targets.len();
        out.push(
            Decision::new(
                DecisionKind::ScheduleReview,
                targets,
                scoring::review_confidence(),
                scoring::review_severity(),
                format!("{n} assets are stale"),
            )
            .with_evidence("reason", json!("stale")),
        );
    }
}
