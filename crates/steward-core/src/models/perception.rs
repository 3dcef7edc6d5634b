use chrono::{DateTime, Utc};
use serde::Serialize;

use super::duplicate::DuplicateReport;
use super::signals::{FreshnessReport, QualityReport, ValidationReport};

/// Point-in-time view of corpus health for one governance cycle.
///
/// Built once by the signal aggregator and never mutated afterwards,
/// so fields are only reachable through getters.
#[derive(Debug, Clone, Serialize)]
pub struct PerceptionSnapshot {
    duplicates: DuplicateReport,
    quality: QualityReport,
    freshness: FreshnessReport,
    validation: ValidationReport,
    /// Providers that failed this cycle; their report is empty.
    degraded_signals: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl PerceptionSnapshot {
    pub fn new(
        duplicates: DuplicateReport,
        quality: QualityReport,
        freshness: FreshnessReport,
        validation: ValidationReport,
        degraded_signals: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            duplicates,
            quality,
            freshness,
            validation,
            degraded_signals,
            timestamp,
        }
    }

    pub fn duplicates(&self) -> &DuplicateReport {
        &self.duplicates
    }

    pub fn quality(&self) -> &QualityReport {
        &self.quality
    }

    pub fn freshness(&self) -> &FreshnessReport {
        &self.freshness
    }

    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    pub fn degraded_signals(&self) -> &[String] {
        &self.degraded_signals
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded_signals.is_empty()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Overall health in [0, 1]: the mean of four component scores
    /// (uniqueness, validation pass rate, freshness, mean quality).
    pub fn health_score(&self) -> f64 {
        let uniqueness = 1.0 - self.duplicates.duplicate_ratio();
        let validity = self.validation.pass_rate();
        let freshness = 1.0 - self.freshness.expired_ratio();
        let quality = self.quality.mean();
        ((uniqueness + validity + freshness + quality) / 4.0).clamp(0.0, 1.0)
    }

    pub fn summary(&self) -> String {
        format!(
            "health={:.2} duplicates={} expired={} validation_pass={:.2} quality_mean={:.2}{}",
            self.health_score(),
            self.duplicates.total_duplicate_count,
            self.freshness.expired().count(),
            self.validation.pass_rate(),
            self.quality.mean(),
            if self.is_degraded() {
                format!(" degraded={:?}", self.degraded_signals)
            } else {
                String::new()
            }
        )
    }
}
