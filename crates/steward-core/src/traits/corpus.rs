use crate::errors::CorpusError;
use crate::models::Asset;

/// Accessor for the governed corpus. The core reads and removes through this,
/// never writing content itself.
///
/// Deleting an id that is already gone must not be an error: implementations
/// return `Ok(false)` instead.
pub trait ICorpus: Send + Sync {
    fn list_assets(&self) -> Result<Vec<Asset>, CorpusError>;
    fn get_asset(&self, id: &str) -> Result<Option<Asset>, CorpusError>;

    /// Returns whether the asset existed.
    fn delete_asset(&self, id: &str) -> Result<bool, CorpusError>;

    /// Mark an asset archived. Returns whether the asset existed.
    fn archive_asset(&self, id: &str) -> Result<bool, CorpusError>;

    /// Mark an asset quarantined so search stops serving it. Returns whether the asset existed.
    fn quarantine_asset(&self, id: &str) -> Result<bool, CorpusError>;

    /// Fetch a subset of assets, skipping ids that no longer exist.
    fn get_assets(&self, ids: &[String]) -> Result<Vec<Asset>, CorpusError> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(asset) = self.get_asset(id)? {
                out.push(asset);
            }
        }
        Ok(out)
    }
}
