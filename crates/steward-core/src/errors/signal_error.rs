/// External signal provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("signal provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },
}
