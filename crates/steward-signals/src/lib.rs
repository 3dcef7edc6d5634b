//! # steward-signals
//!
//! Reference signal providers: a validation rule registry and per-source-type
//! freshness policies. Deployments may swap either for their own
//! implementations of the provider traits.

pub mod freshness;
pub mod quality;
pub mod validation;

pub use freshness::{FreshnessPolicy, FreshnessPolicySet};
pub use quality::MetadataQualityProvider;
pub use validation::{builtin, RuleRegistry};
