use chrono::{DateTime, Utc};
use steward_core::errors::SignalError;
use steward_core::models::{FreshnessReport, QualityReport, ValidationReport};
use steward_core::traits::{IFreshnessProvider, IQualityProvider, IValidationProvider};
use steward_core::Asset;

/// Returns fixed scores, restricted to the assets asked about.
#[derive(Debug, Clone, Default)]
pub struct StaticQuality(pub QualityReport);

impl IQualityProvider for StaticQuality {
    fn name(&self) -> &str {
        "static-quality"
    }

    fn score(&self, assets: &[Asset]) -> Result<QualityReport, SignalError> {
        let scores = assets
            .iter()
            .filter_map(|a| self.0.score_of(&a.id).map(|s| (a.id.clone(), s)))
            .collect();
        Ok(QualityReport::new(scores))
    }
}

/// Returns fixed statuses for the assets asked about.
#[derive(Debug, Clone, Default)]
pub struct StaticFreshness(pub FreshnessReport);

impl IFreshnessProvider for StaticFreshness {
    fn name(&self) -> &str {
        "static-freshness"
    }

    fn check(&self, assets: &[Asset], _now: DateTime<Utc>) -> Result<FreshnessReport, SignalError> {
        let statuses = self
            .0
            .statuses
            .iter()
            .filter(|s| assets.iter().any(|a| a.id == s.asset_id))
            .cloned()
            .collect();
        Ok(FreshnessReport::new(statuses))
    }
}

/// Returns fixed findings for the assets asked about.
#[derive(Debug, Clone, Default)]
pub struct StaticValidation(pub ValidationReport);

impl IValidationProvider for StaticValidation {
    fn name(&self) -> &str {
        "static-validation"
    }

    fn validate(&self, assets: &[Asset]) -> Result<ValidationReport, SignalError> {
        let findings = self
            .0
            .findings
            .iter()
            .filter(|f| assets.iter().any(|a| a.id == f.asset_id))
            .cloned()
            .collect();
        Ok(ValidationReport::new(assets.len(), findings))
    }
}

/// A provider of every kind that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingProvider;

impl FailingProvider {
    fn err(&self) -> SignalError {
        SignalError::ProviderFailed {
            provider: "failing".to_string(),
            reason: "always fails".to_string(),
        }
    }
}

impl IQualityProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn score(&self, _assets: &[Asset]) -> Result<QualityReport, SignalError> {
        Err(self.err())
    }
}

impl IFreshnessProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn check(&self, _assets: &[Asset], _now: DateTime<Utc>) -> Result<FreshnessReport, SignalError> {
        Err(self.err())
    }
}

impl IValidationProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn validate(&self, _assets: &[Asset]) -> Result<ValidationReport, SignalError> {
        Err(self.err())
    }
}
