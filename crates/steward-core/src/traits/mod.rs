mod alert_sink;
mod asset_rule;
mod corpus;
mod signal_provider;

pub use alert_sink::IAlertSink;
pub use asset_rule::IAssetRule;
pub use corpus::ICorpus;
pub use signal_provider::{IFreshnessProvider, IQualityProvider, IValidationProvider};
