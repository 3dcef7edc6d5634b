use crate::models::{Asset, ValidationFinding};

/// A single validation rule. Rules are registered as values, not injected code.
pub trait IAssetRule: Send + Sync {
    fn name(&self) -> &str;

    /// `None` when the asset passes.
    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding>;
}
