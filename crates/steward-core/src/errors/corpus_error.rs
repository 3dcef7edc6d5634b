/// Errors surfaced by the corpus accessor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorpusError {
    #[error("asset not found: {id}")]
    AssetNotFound { id: String },

    #[error("asset already deleted: {id}")]
    AlreadyDeleted { id: String },

    #[error("corpus unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("write failed for asset {id}: {reason}")]
    WriteFailed { id: String, reason: String },
}

impl CorpusError {
    /// Whether the error means the target is already gone.
    /// The executor reports these as skipped rather than failed.
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::AssetNotFound { .. } | Self::AlreadyDeleted { .. })
    }
}
