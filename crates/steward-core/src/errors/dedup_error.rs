/// Deduplication errors. These never abort a pipeline run: the affected asset
/// is excluded from the stage that failed and reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DedupError {
    #[error("content of asset {asset_id} cannot be normalized: {reason}")]
    Encoding { asset_id: String, reason: String },

    #[error("embedding unavailable for asset {asset_id}: {reason}")]
    EmbeddingUnavailable { asset_id: String, reason: String },

    #[error("embedding dimension mismatch for asset {asset_id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        asset_id: String,
        expected: usize,
        actual: usize,
    },
}

impl DedupError {
    /// The asset this error refers to.
    pub fn asset_id(&self) -> &str {
        match self {
            Self::Encoding { asset_id, .. }
            | Self::EmbeddingUnavailable { asset_id, .. }
            | Self::DimensionMismatch { asset_id, .. } => asset_id,
        }
    }
}
