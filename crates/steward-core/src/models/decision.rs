use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use crate::approval;

/// How urgently a decision should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remediation actions the decision engine can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
    DeleteDuplicates,
    DeleteEmpty,
    DeleteExpired,
    ArchiveExpired,
    ScheduleReview,
    Quarantine,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 6] = [
        Self::DeleteDuplicates,
        Self::DeleteEmpty,
        Self::DeleteExpired,
        Self::ArchiveExpired,
        Self::ScheduleReview,
        Self::Quarantine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteDuplicates => "DELETE_DUPLICATES",
            Self::DeleteEmpty => "DELETE_EMPTY",
            Self::DeleteExpired => "DELETE_EXPIRED",
            Self::ArchiveExpired => "ARCHIVE_EXPIRED",
            Self::ScheduleReview => "SCHEDULE_REVIEW",
            Self::Quarantine => "QUARANTINE",
        }
    }

    /// Removes assets from the corpus.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Self::DeleteDuplicates | Self::DeleteEmpty | Self::DeleteExpired
        )
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed remediation action.
///
/// `requires_approval` is derived from the approval table at construction
/// and cannot be set, and `id` is derived from kind and target set, so two
/// decisions with the same kind and targets share an id across cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    id: String,
    kind: DecisionKind,
    target_asset_ids: Vec<String>,
    confidence: Confidence,
    severity: Severity,
    rationale: String,
    requires_approval: bool,
    evidence: BTreeMap<String, serde_json::Value>,
}

impl Decision {
    /// Targets are sorted and de-duplicated before the id is derived.
    pub fn new(
        kind: DecisionKind,
        target_asset_ids: impl IntoIterator<Item = String>,
        confidence: Confidence,
        severity: Severity,
        rationale: impl Into<String>,
    ) -> Self {
        let mut targets: Vec<String> = target_asset_ids.into_iter().collect();
        targets.sort();
        targets.dedup();
        Self {
            id: Self::derive_id(kind, &targets),
            kind,
            requires_approval: approval::requires_approval(kind, severity, confidence),
            target_asset_ids: targets,
            confidence,
            severity,
            rationale: rationale.into(),
            evidence: BTreeMap::new(),
        }
    }

    /// `<kind>-<first 16 hex chars of blake3(sorted targets)>`.
    pub fn derive_id(kind: DecisionKind, sorted_targets: &[String]) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(kind.as_str().as_bytes());
        for t in sorted_targets {
            hasher.update(&[0]);
            hasher.update(t.as_bytes());
        }
        let hex = hasher.finalize().to_hex();
        format!("{}-{}", kind.as_str().to_ascii_lowercase(), &hex[..16])
    }

    pub fn with_evidence(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.evidence.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> DecisionKind {
        self.kind
    }

    pub fn target_asset_ids(&self) -> &[String] {
        &self.target_asset_ids
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    pub fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    pub fn evidence(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.evidence
    }

    /// One-line message for another agent or an operator channel.
    pub fn to_agent_message(&self) -> String {
        format!(
            "[{}] {}: {} (confidence: {:.0}%, targets: {}{})",
            self.severity.as_str().to_ascii_uppercase(),
            self.kind,
            self.rationale,
            self.confidence.value() * 100.0,
            self.target_asset_ids.len(),
            if self.requires_approval {
                ", needs approval"
            } else {
                ""
            }
        )
    }
}
