use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use dashmap::{DashMap, DashSet};
use steward_core::errors::CorpusError;
use steward_core::traits::ICorpus;
use steward_core::Asset;

/// Thread-safe in-memory corpus with failure injection.
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    assets: DashMap<String, Asset>,
    failing: DashSet<String>,
    unavailable: AtomicBool,
    ops: Mutex<Vec<(String, String)>>,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        let corpus = Self::new();
        for a in assets {
            corpus.insert(a);
        }
        corpus
    }

    pub fn insert(&self, asset: Asset) {
        self.assets.insert(asset.id.clone(), asset);
    }

    /// Remove an asset without going through the trait, as a concurrent writer would.
    pub fn remove_concurrently(&self, id: &str) {
        self.assets.remove(id);
    }

    /// Make every write to `id` fail.
    pub fn fail_writes_to(&self, id: &str) {
        self.failing.insert(id.to_string());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn metadata_value(&self, id: &str, key: &str) -> Option<String> {
        self.assets.get(id).and_then(|a| a.metadata.get(key).cloned())
    }

    /// Recorded `(operation, id)` write calls, in call order.
    pub fn operations(&self) -> Vec<(String, String)> {
        self.ops.lock().map(|o| o.clone()).unwrap_or_default()
    }

    fn record(&self, op: &str, id: &str) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push((op.to_string(), id.to_string()));
        }
    }

    fn check_available(&self) -> Result<(), CorpusError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CorpusError::Unavailable {
                reason: "corpus offline".to_string(),
            });
        }
        Ok(())
    }

    fn check_writable(&self, id: &str) -> Result<(), CorpusError> {
        self.check_available()?;
        if self.failing.contains(id) {
            return Err(CorpusError::WriteFailed {
                id: id.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn mark(&self, id: &str, key: &str) -> Result<bool, CorpusError> {
        self.check_writable(id)?;
        self.record(key, id);
        match self.assets.get_mut(id) {
            Some(mut asset) => {
                asset.metadata.insert(key.to_string(), "true".to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ICorpus for InMemoryCorpus {
    fn list_assets(&self) -> Result<Vec<Asset>, CorpusError> {
        self.check_available()?;
        let mut assets: Vec<Asset> = self.assets.iter().map(|e| e.value().clone()).collect();
        assets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(assets)
    }

    fn get_asset(&self, id: &str) -> Result<Option<Asset>, CorpusError> {
        self.check_available()?;
        Ok(self.assets.get(id).map(|a| a.value().clone()))
    }

    fn delete_asset(&self, id: &str) -> Result<bool, CorpusError> {
        self.check_writable(id)?;
        self.record("delete", id);
        Ok(self.assets.remove(id).is_some())
    }

    fn archive_asset(&self, id: &str) -> Result<bool, CorpusError> {
        self.mark(id, "archived")
    }

    fn quarantine_asset(&self, id: &str) -> Result<bool, CorpusError> {
        self.mark(id, "quarantined")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset;

    #[test]
    fn delete_is_idempotent() {
        let corpus = InMemoryCorpus::with_assets([asset("a", "x")]);
        assert!(corpus.delete_asset("a").unwrap());
        assert!(!corpus.delete_asset("a").unwrap());
    }

    #[test]
    fn quarantine_sets_metadata_flag() {
        let corpus = InMemoryCorpus::with_assets([asset("a", "x")]);
        corpus.quarantine_asset("a").unwrap();
        assert!(corpus.get_asset("a").unwrap().unwrap().is_quarantined());
    }

    #[test]
    fn injected_failure_surfaces() {
        let corpus = InMemoryCorpus::with_assets([asset("a", "x")]);
        corpus.fail_writes_to("a");
        assert!(matches!(
            corpus.delete_asset("a"),
            Err(CorpusError::WriteFailed { .. })
        ));
        assert!(corpus.contains("a"));
    }
}
