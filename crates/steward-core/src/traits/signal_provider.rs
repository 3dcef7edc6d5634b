use chrono::{DateTime, Utc};

use crate::errors::SignalError;
use crate::models::{Asset, FreshnessReport, QualityReport, ValidationReport};

/// Per-asset quality scores in [0, 1].
pub trait IQualityProvider: Send + Sync {
    fn name(&self) -> &str;
    fn score(&self, assets: &[Asset]) -> Result<QualityReport, SignalError>;
}

/// Expiry and staleness of each asset at `now`.
pub trait IFreshnessProvider: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, assets: &[Asset], now: DateTime<Utc>) -> Result<FreshnessReport, SignalError>;
}

/// Rule findings for each asset.
pub trait IValidationProvider: Send + Sync {
    fn name(&self) -> &str;
    fn validate(&self, assets: &[Asset]) -> Result<ValidationReport, SignalError>;
}
