//! Freshness policies keyed by source type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::config::FreshnessConfig;
use steward_core::errors::SignalError;
use steward_core::models::{ExpirationAction, FreshnessReport, FreshnessStatus};
use steward_core::traits::IFreshnessProvider;
use steward_core::{Asset, SourceType};

/// TTL and staleness thresholds for a group of source types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    pub name: String,
    pub source_types: Vec<SourceType>,
    /// `None` means the content never expires.
    pub ttl_days: Option<u32>,
    pub stale_days: Option<u32>,
    pub action: ExpirationAction,
}

impl FreshnessPolicy {
    pub fn applies_to(&self, source_type: SourceType) -> bool {
        self.source_types.contains(&source_type)
    }

    pub fn is_expired(&self, age_days: f64) -> bool {
        self.ttl_days.is_some_and(|ttl| age_days > f64::from(ttl))
    }

    pub fn is_stale(&self, age_days: f64) -> bool {
        self.stale_days.is_some_and(|d| age_days > f64::from(d))
    }
}

/// Ordered policy list; the first policy matching an asset's source type wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessPolicySet {
    policies: Vec<FreshnessPolicy>,
}

impl Default for FreshnessPolicySet {
    fn default() -> Self {
        Self::from_config(&FreshnessConfig::default())
    }
}

impl FreshnessPolicySet {
    pub fn new(policies: Vec<FreshnessPolicy>) -> Self {
        Self { policies }
    }

    pub fn from_config(config: &FreshnessConfig) -> Self {
        Self::new(vec![
            FreshnessPolicy {
                name: "short_term".into(),
                source_types: vec![SourceType::Session],
                ttl_days: Some(config.default_ttl_days),
                stale_days: Some(config.default_ttl_days / 2),
                action: ExpirationAction::Archive,
            },
            FreshnessPolicy {
                name: "web_cache".into(),
                source_types: vec![SourceType::WebCache],
                ttl_days: Some(config.web_cache_ttl_days),
                stale_days: Some(config.web_cache_ttl_days / 2),
                action: ExpirationAction::Delete,
            },
            FreshnessPolicy {
                name: "long_term".into(),
                source_types: vec![SourceType::Document, SourceType::Chunk],
                ttl_days: None,
                stale_days: Some(config.long_term_review_days),
                action: ExpirationAction::Review,
            },
            FreshnessPolicy {
                name: "chat_history".into(),
                source_types: vec![SourceType::ChatHistory],
                ttl_days: Some(config.stale_threshold_days),
                stale_days: Some(config.long_term_review_days),
                action: ExpirationAction::Archive,
            },
            FreshnessPolicy {
                name: "memory".into(),
                source_types: vec![SourceType::Memory],
                ttl_days: None,
                stale_days: Some(config.stale_threshold_days),
                action: ExpirationAction::Review,
            },
        ])
    }

    pub fn policies(&self) -> &[FreshnessPolicy] {
        &self.policies
    }

    pub fn policy_for(&self, source_type: SourceType) -> Option<&FreshnessPolicy> {
        self.policies.iter().find(|p| p.applies_to(source_type))
    }

    pub fn status_of(&self, asset: &Asset, now: DateTime<Utc>) -> FreshnessStatus {
        let age_days = asset.age_days(now);
        match self.policy_for(asset.source_type) {
            Some(policy) => {
                let expired = policy.is_expired(age_days);
                FreshnessStatus {
                    asset_id: asset.id.clone(),
                    policy: policy.name.clone(),
                    age_days,
                    expired,
                    stale: expired || policy.is_stale(age_days),
                    action: expired.then_some(policy.action),
                }
            }
            None => FreshnessStatus {
                asset_id: asset.id.clone(),
                policy: "none".into(),
                age_days,
                expired: false,
                stale: false,
                action: None,
            },
        }
    }
}

impl IFreshnessProvider for FreshnessPolicySet {
    fn name(&self) -> &str {
        "freshness-policies"
    }

    fn check(&self, assets: &[Asset], now: DateTime<Utc>) -> Result<FreshnessReport, SignalError> {
        let statuses: Vec<FreshnessStatus> = assets.iter().map(|a| self.status_of(a, now)).collect();
        tracing::debug!(
            assets = assets.len(),
            expired = statuses.iter().filter(|s| s.expired).count(),
            "freshness checked"
        );
        Ok(FreshnessReport::new(statuses))
    }
}
