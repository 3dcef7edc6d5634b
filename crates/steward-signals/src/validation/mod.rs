//! RuleRegistry: a list of [`IAssetRule`] values evaluated per asset.
//! Implements [`IValidationProvider`].

pub mod builtin;

use steward_core::config::ValidationConfig;
use steward_core::errors::SignalError;
use steward_core::models::{ValidationFinding, ValidationReport};
use steward_core::traits::{IAssetRule, IValidationProvider};
use steward_core::Asset;

#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn IAssetRule>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in rule, parameterized from config.
    pub fn with_builtin(config: &ValidationConfig) -> Self {
        let mut registry = Self::new();
        registry.register(builtin::EmptyContent);
        registry.register(builtin::MinLength::new(config.min_content_length));
        registry.register(builtin::MaxLength::new(config.max_content_length));
        registry.register(builtin::ControlCharacters);
        registry.register(builtin::EncodingIntegrity);
        if !config.required_metadata.is_empty() {
            registry.register(builtin::RequiredMetadata::new(config.required_metadata.clone()));
        }
        registry
    }

    /// Add a rule. A rule with the same name replaces the earlier one.
    pub fn register<R: IAssetRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.rules.retain(|r| r.name() != rule.name());
        self.rules.push(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All findings for one asset, in registration order.
    pub fn evaluate(&self, asset: &Asset) -> Vec<ValidationFinding> {
        self.rules.iter().filter_map(|r| r.evaluate(asset)).collect()
    }
}

impl IValidationProvider for RuleRegistry {
    fn name(&self) -> &str {
        "rule-registry"
    }

    fn validate(&self, assets: &[Asset]) -> Result<ValidationReport, SignalError> {
        let findings: Vec<ValidationFinding> = assets.iter().flat_map(|a| self.evaluate(a)).collect();
        tracing::debug!(
            assets = assets.len(),
            rules = self.rules.len(),
            findings = findings.len(),
            "validation complete"
        );
        Ok(ValidationReport::new(assets.len(), findings))
    }
}
