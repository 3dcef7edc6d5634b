//! Exact duplicate grouping by fingerprint. Single pass, hash-map grouping.

use std::collections::HashMap;

use steward_core::models::{DedupStage, ExcludedAsset};
use steward_core::Asset;

use crate::fingerprint::{ContentFingerprinter, Fingerprint};

/// Assets sharing one fingerprint. Always two or more members, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactGroup {
    pub fingerprint: Fingerprint,
    pub member_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExactDetection {
    /// Ordered by smallest member id.
    pub groups: Vec<ExactGroup>,
    /// Assets that could not be fingerprinted.
    pub excluded: Vec<ExcludedAsset>,
}

impl ExactDetection {
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.member_ids.len() - 1).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactDuplicateDetector {
    fingerprinter: ContentFingerprinter,
}

impl ExactDuplicateDetector {
    pub fn new(fingerprinter: ContentFingerprinter) -> Self {
        Self { fingerprinter }
    }

    /// Group assets by fingerprint. Output does not depend on input order.
    pub fn detect<'a, I>(&self, assets: I) -> ExactDetection
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        let mut by_fingerprint: HashMap<Fingerprint, Vec<String>> = HashMap::new();
        let mut excluded = Vec::new();

        for asset in assets {
            match self.fingerprinter.fingerprint(asset) {
                Ok(fp) => by_fingerprint.entry(fp).or_default().push(asset.id.clone()),
                Err(e) => {
                    tracing::debug!(asset_id = %asset.id, error = %e, "excluded from exact dedup");
                    excluded.push(ExcludedAsset {
                        asset_id: asset.id.clone(),
                        stage: DedupStage::Fingerprint,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut groups: Vec<ExactGroup> = by_fingerprint
            .into_iter()
            .filter_map(|(fingerprint, mut member_ids)| {
                member_ids.sort();
                member_ids.dedup();
                (member_ids.len() >= 2).then_some(ExactGroup {
                    fingerprint,
                    member_ids,
                })
            })
            .collect();
        groups.sort_by(|a, b| a.member_ids[0].cmp(&b.member_ids[0]));
        excluded.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));

        ExactDetection { groups, excluded }
    }
}
