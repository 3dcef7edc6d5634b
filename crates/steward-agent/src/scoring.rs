//! Versioned confidence and severity formulas.
//!
//! Every decision's confidence and severity comes from one of these
//! functions. Changing any of them means bumping
//! [`steward_core::constants::SCORING_VERSION`].

use steward_core::config::DecisionConfig;
use steward_core::models::{Confidence, Severity};

/// Confidence for removing near-identical content.
pub const DUPLICATE_BASE: f64 = 0.99;
pub const EMPTY_CONFIDENCE: f64 = 0.99;
pub const EXPIRED_CONFIDENCE: f64 = 0.90;
pub const REVIEW_CONFIDENCE: f64 = 0.80;
pub const QUARANTINE_BASE: f64 = 0.80;
pub const QUARANTINE_PER_ERROR: f64 = 0.02;
pub const QUARANTINE_CAP: f64 = 0.95;

/// `0.99 × weakest similarity among the removed members`.
pub fn duplicate_confidence(min_removed_similarity: f64) -> Confidence {
    Confidence::new(DUPLICATE_BASE * min_removed_similarity)
}

pub fn empty_confidence() -> Confidence {
    Confidence::new(EMPTY_CONFIDENCE)
}

/// `min(0.95, 0.80 + 0.02 × error findings)`.
pub fn quarantine_confidence(error_findings: usize) -> Confidence {
    Confidence::new((QUARANTINE_BASE + QUARANTINE_PER_ERROR * error_findings as f64).min(QUARANTINE_CAP))
}

pub fn expired_confidence() -> Confidence {
    Confidence::new(EXPIRED_CONFIDENCE)
}

pub fn review_confidence() -> Confidence {
    Confidence::new(REVIEW_CONFIDENCE)
}

/// Three bands: HIGH above the large threshold, MEDIUM from the medium
/// threshold, LOW below.
pub fn count_severity(targets: usize, config: &DecisionConfig) -> Severity {
    if targets > config.large_batch_threshold {
        Severity::High
    } else if targets >= config.medium_batch_threshold {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Two bands: HIGH above the large threshold, MEDIUM otherwise.
pub fn batch_severity(targets: usize, config: &DecisionConfig) -> Severity {
    if targets > config.large_batch_threshold {
        Severity::High
    } else {
        Severity::Medium
    }
}

pub fn review_severity() -> Severity {
    Severity::Low
}
