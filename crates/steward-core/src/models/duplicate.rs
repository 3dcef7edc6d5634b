use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// How the members of a cluster were matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Identical fingerprints only.
    Exact,
    /// Embedding similarity only.
    Semantic,
    /// Exact and semantic matches unioned into one cluster.
    Mixed,
}

/// Dedup stage an asset was excluded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupStage {
    Fingerprint,
    Semantic,
}

/// An asset a dedup stage could not consider, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedAsset {
    pub asset_id: String,
    pub stage: DedupStage,
    pub reason: String,
}

/// A maximal set of assets judged duplicates in one run.
///
/// Invariants: at least two members, the representative is a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCluster {
    pub members: BTreeSet<String>,
    pub representative_id: String,
    /// Strongest match score linking each member into the cluster (1.0 for exact).
    pub similarity_scores: BTreeMap<String, f64>,
    pub match_kind: MatchKind,
}

impl DuplicateCluster {
    /// Build a cluster, returning `None` if the invariants do not hold.
    pub fn new(
        members: BTreeSet<String>,
        representative_id: String,
        similarity_scores: BTreeMap<String, f64>,
        match_kind: MatchKind,
    ) -> Option<Self> {
        if members.len() < 2 || !members.contains(&representative_id) {
            return None;
        }
        Some(Self {
            members,
            representative_id,
            similarity_scores,
            match_kind,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.members.contains(asset_id)
    }

    /// Members marked for removal, in id order.
    pub fn removal_ids(&self) -> Vec<String> {
        self.members
            .iter()
            .filter(|id| **id != self.representative_id)
            .cloned()
            .collect()
    }

    /// Weakest link among the members marked for removal.
    pub fn min_removed_similarity(&self) -> f64 {
        self.members
            .iter()
            .filter(|id| **id != self.representative_id)
            .map(|id| self.similarity_scores.get(id).copied().unwrap_or(0.0))
            .fold(1.0_f64, f64::min)
    }
}

/// Output of one deduplication pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Disjoint clusters, ordered by their smallest member id.
    pub clusters: Vec<DuplicateCluster>,
    /// Sum over clusters of members marked for removal.
    pub total_duplicate_count: usize,
    pub assets_considered: usize,
    /// Assets excluded from a stage, ordered by stage then id.
    pub excluded: Vec<ExcludedAsset>,
    /// Whether semantic detection ran in this pipeline run.
    pub semantic_ran: bool,
    /// Assets with no non-whitespace content, sorted. Excluded from dedup.
    #[serde(default)]
    pub blank_asset_ids: Vec<String>,
}

impl DuplicateReport {
    pub fn new(
        mut clusters: Vec<DuplicateCluster>,
        assets_considered: usize,
        mut excluded: Vec<ExcludedAsset>,
        semantic_ran: bool,
    ) -> Self {
        clusters.sort_by(|a, b| a.members.first().cmp(&b.members.first()));
        excluded.sort_by(|a, b| (a.stage, &a.asset_id).cmp(&(b.stage, &b.asset_id)));
        let total_duplicate_count = clusters.iter().map(|c| c.len() - 1).sum();
        Self {
            clusters,
            total_duplicate_count,
            assets_considered,
            excluded,
            semantic_ran,
            blank_asset_ids: Vec::new(),
        }
    }

    pub fn with_blank_assets(mut self, mut ids: Vec<String>) -> Self {
        ids.sort();
        ids.dedup();
        self.blank_asset_ids = ids;
        self
    }

    /// A report with nothing in it.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, Vec::new(), false)
    }

    /// All ids marked for removal across clusters.
    pub fn removal_ids(&self) -> Vec<String> {
        self.clusters.iter().flat_map(|c| c.removal_ids()).collect()
    }

    pub fn cluster_of(&self, asset_id: &str) -> Option<&DuplicateCluster> {
        self.clusters.iter().find(|c| c.contains(asset_id))
    }

    pub fn duplicate_ratio(&self) -> f64 {
        if self.assets_considered == 0 {
            return 0.0;
        }
        self.total_duplicate_count as f64 / self.assets_considered as f64
    }

    /// Keep only clusters touching at least one of the given assets.
    pub fn restricted_to(&self, asset_ids: &BTreeSet<String>) -> Self {
        let clusters = self
            .clusters
            .iter()
            .filter(|c| c.members.iter().any(|m| asset_ids.contains(m)))
            .cloned()
            .collect();
        let excluded = self
            .excluded
            .iter()
            .filter(|e| asset_ids.contains(&e.asset_id))
            .cloned()
            .collect();
        let blank = self
            .blank_asset_ids
            .iter()
            .filter(|id| asset_ids.contains(*id))
            .cloned()
            .collect();
        Self::new(clusters, self.assets_considered, excluded, self.semantic_ran)
            .with_blank_assets(blank)
    }

    /// Human-readable summary.
    pub fn summary(&self) -> String {
        let mut out = String::from("=== Deduplication Report ===\n");
        let _ = writeln!(
            out,
            "Assets considered: {} | clusters: {} | duplicates: {} ({:.1}%)",
            self.assets_considered,
            self.clusters.len(),
            self.total_duplicate_count,
            self.duplicate_ratio() * 100.0
        );
        let _ = writeln!(
            out,
            "Semantic detection: {}",
            if self.semantic_ran { "ran" } else { "disabled" }
        );
        for cluster in &self.clusters {
            let _ = writeln!(
                out,
                "  [{:?}] keep {} remove {:?}",
                cluster.match_kind,
                cluster.representative_id,
                cluster.removal_ids()
            );
        }
        if !self.excluded.is_empty() {
            let _ = writeln!(out, "Excluded: {}", self.excluded.len());
            for e in &self.excluded {
                let _ = writeln!(out, "  {} ({:?}): {}", e.asset_id, e.stage, e.reason);
            }
        }
        out
    }
}
