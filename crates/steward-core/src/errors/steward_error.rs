use super::{CorpusError, CycleError, DedupError, SignalError};

/// Top-level error type for the Steward system.
#[derive(Debug, thiserror::Error)]
pub enum StewardError {
    #[error(transparent)]
    Dedup(#[from] DedupError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("invalid configuration: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StewardError {
    /// Whether this error is a cycle-level failure (lock contention, timeout, cancellation).
    pub fn is_cycle_failure(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }
}

/// Convenience alias used throughout the workspace.
pub type StewardResult<T> = Result<T, StewardError>;
