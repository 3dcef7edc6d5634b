//! Perceive: merge the duplicate report with external signals into a snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use steward_core::models::{FreshnessReport, QualityReport, ValidationReport};
use steward_core::traits::{IFreshnessProvider, IQualityProvider, IValidationProvider};
use steward_core::{Asset, DuplicateReport, PerceptionSnapshot};

/// Which external signals a cycle pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalSelection {
    pub quality: bool,
    pub freshness: bool,
    pub validation: bool,
}

impl SignalSelection {
    pub const ALL: Self = Self {
        quality: true,
        freshness: true,
        validation: true,
    };
    /// Newly ingested content: quality and validity, not age.
    pub const INGEST: Self = Self {
        quality: true,
        freshness: false,
        validation: true,
    };
    /// Web-cache refresh: age and validity.
    pub const WEB_CACHE: Self = Self {
        quality: false,
        freshness: true,
        validation: true,
    };
    pub const VALIDATION_ONLY: Self = Self {
        quality: false,
        freshness: false,
        validation: true,
    };
}

/// Pulls external reports. A provider failure degrades the snapshot instead
/// of failing the cycle: the report is left empty and the provider is named
/// in `degraded_signals`.
#[derive(Clone)]
pub struct SignalAggregator {
    quality: Arc<dyn IQualityProvider>,
    freshness: Arc<dyn IFreshnessProvider>,
    validation: Arc<dyn IValidationProvider>,
}

impl SignalAggregator {
    pub fn new(
        quality: Arc<dyn IQualityProvider>,
        freshness: Arc<dyn IFreshnessProvider>,
        validation: Arc<dyn IValidationProvider>,
    ) -> Self {
        Self {
            quality,
            freshness,
            validation,
        }
    }

    pub fn quality_provider(&self) -> &dyn IQualityProvider {
        self.quality.as_ref()
    }

    pub fn perceive(
        &self,
        duplicates: DuplicateReport,
        assets: &[Asset],
        selection: SignalSelection,
        now: DateTime<Utc>,
    ) -> PerceptionSnapshot {
        let mut degraded = Vec::new();

        let quality = if selection.quality {
            self.quality.score(assets).unwrap_or_else(|e| {
                tracing::warn!(provider = self.quality.name(), error = %e, "quality signal degraded");
                degraded.push(self.quality.name().to_string());
                QualityReport::default()
            })
        } else {
            QualityReport::default()
        };

        let freshness = if selection.freshness {
            self.freshness.check(assets, now).unwrap_or_else(|e| {
                tracing::warn!(provider = self.freshness.name(), error = %e, "freshness signal degraded");
                degraded.push(self.freshness.name().to_string());
                FreshnessReport::default()
            })
        } else {
            FreshnessReport::default()
        };

        let validation = if selection.validation {
            self.validation.validate(assets).unwrap_or_else(|e| {
                tracing::warn!(provider = self.validation.name(), error = %e, "validation signal degraded");
                degraded.push(self.validation.name().to_string());
                ValidationReport::default()
            })
        } else {
            ValidationReport::default()
        };

        PerceptionSnapshot::new(duplicates, quality, freshness, validation, degraded, now)
    }
}
