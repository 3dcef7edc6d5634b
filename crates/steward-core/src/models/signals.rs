//! Externally supplied signal reports. The core reads these; it never recomputes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSeverity {
    Info,
    Warning,
    Error,
}

/// One rule violation on one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub asset_id: String,
    pub rule: String,
    pub severity: FindingSeverity,
    pub message: String,
}

impl ValidationFinding {
    pub fn new(
        asset_id: impl Into<String>,
        rule: impl Into<String>,
        severity: FindingSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            rule: rule.into(),
            severity,
            message: message.into(),
        }
    }
}

/// Validation findings over a set of checked assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub assets_checked: usize,
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn new(assets_checked: usize, findings: Vec<ValidationFinding>) -> Self {
        Self {
            assets_checked,
            findings,
        }
    }

    /// Error-level finding count per asset.
    pub fn errors_by_asset(&self) -> BTreeMap<String, usize> {
        let mut out = BTreeMap::new();
        for f in self.findings.iter().filter(|f| f.severity == FindingSeverity::Error) {
            *out.entry(f.asset_id.clone()).or_insert(0) += 1;
        }
        out
    }

    pub fn findings_for<'a>(&'a self, asset_id: &'a str) -> impl Iterator<Item = &'a ValidationFinding> {
        self.findings.iter().filter(move |f| f.asset_id == asset_id)
    }

    /// Share of checked assets with no error-level finding. 1.0 when nothing was checked.
    pub fn pass_rate(&self) -> f64 {
        if self.assets_checked == 0 {
            return 1.0;
        }
        let failing = self.errors_by_asset().len().min(self.assets_checked);
        (self.assets_checked - failing) as f64 / self.assets_checked as f64
    }
}

/// Per-asset quality scores in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub scores: BTreeMap<String, f64>,
}

impl QualityReport {
    pub fn new(scores: BTreeMap<String, f64>) -> Self {
        Self { scores }
    }

    pub fn score_of(&self, asset_id: &str) -> Option<f64> {
        self.scores.get(asset_id).copied()
    }

    /// Mean score, 1.0 when empty.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 1.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }

    /// Asset ids scoring strictly below `floor`, in id order.
    pub fn below(&self, floor: f64) -> Vec<String> {
        self.scores
            .iter()
            .filter(|(_, s)| **s < floor)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// What a freshness policy prescribes for an expired asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationAction {
    Delete,
    Archive,
    Review,
    Notify,
}

/// Freshness of one asset under the policy that matched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessStatus {
    pub asset_id: String,
    pub policy: String,
    pub age_days: f64,
    pub expired: bool,
    pub stale: bool,
    /// Set when `expired` is true.
    pub action: Option<ExpirationAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreshnessReport {
    pub statuses: Vec<FreshnessStatus>,
}

impl FreshnessReport {
    pub fn new(statuses: Vec<FreshnessStatus>) -> Self {
        Self { statuses }
    }

    pub fn expired(&self) -> impl Iterator<Item = &FreshnessStatus> {
        self.statuses.iter().filter(|s| s.expired)
    }

    /// Stale but not expired.
    pub fn stale(&self) -> impl Iterator<Item = &FreshnessStatus> {
        self.statuses.iter().filter(|s| s.stale && !s.expired)
    }

    pub fn expired_ratio(&self) -> f64 {
        if self.statuses.is_empty() {
            return 0.0;
        }
        self.expired().count() as f64 / self.statuses.len() as f64
    }
}
