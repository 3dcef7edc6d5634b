//! Near-duplicate detection over pre-computed embeddings.
//!
//! Every candidate pair is compared (exact O(n²), no pruning), so recall at
//! the threshold is complete. Pairwise scoring runs on a bounded rayon pool;
//! it only reads the immutable snapshot. Pairs at or above the threshold are
//! merged with union-find, so a chain A~B~C lands in one cluster even when
//! sim(A, C) is below the threshold.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use petgraph::unionfind::UnionFind;
use rayon::prelude::*;
use steward_core::config::DedupConfig;
use steward_core::errors::DedupError;
use steward_core::models::{DedupStage, ExcludedAsset};
use steward_core::Asset;

use crate::similarity::{cosine_similarity, norm};

/// Two assets whose embeddings meet the threshold. `a < b` by id.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarPair {
    pub a: String,
    pub b: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SemanticDetection {
    /// Ordered by (a, b).
    pub pairs: Vec<SimilarPair>,
    /// Connected components of two or more ids, each sorted, ordered by first id.
    pub clusters: Vec<Vec<String>>,
    /// Assets without a usable embedding.
    pub excluded: Vec<ExcludedAsset>,
}

#[derive(Debug, Clone)]
pub struct SemanticDuplicateDetector {
    threshold: f64,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl SemanticDuplicateDetector {
    /// `worker_threads == 0` uses the global rayon pool.
    pub fn new(threshold: f64, worker_threads: usize) -> Self {
        let pool = if worker_threads > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(worker_threads)
                .thread_name(|i| format!("steward-sim-{i}"))
                .build()
            {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    tracing::warn!(error = %e, worker_threads, "similarity pool unavailable, using global pool");
                    None
                }
            }
        } else {
            None
        };
        Self { threshold, pool }
    }

    pub fn from_config(config: &DedupConfig) -> Self {
        Self::new(config.semantic_threshold, config.worker_threads)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// All pairs at or above the threshold.
    pub fn find_pairs(&self, assets: &[&Asset]) -> (Vec<SimilarPair>, Vec<ExcludedAsset>) {
        let (usable, excluded) = prepare(assets);
        let pairs = self.score_pairs(&usable, |_, _| true);
        (pairs, excluded)
    }

    /// Pairs at or above the threshold with at least one side in `focus`.
    pub fn find_pairs_touching(
        &self,
        assets: &[&Asset],
        focus: &BTreeSet<String>,
    ) -> (Vec<SimilarPair>, Vec<ExcludedAsset>) {
        let (usable, excluded) = prepare(assets);
        let in_focus: Vec<bool> = usable.iter().map(|a| focus.contains(&a.id)).collect();
        let pairs = self.score_pairs(&usable, |i, j| in_focus[i] || in_focus[j]);
        (pairs, excluded)
    }

    /// Pairs plus their union-find clusters.
    pub fn detect(&self, assets: &[&Asset]) -> SemanticDetection {
        let (pairs, excluded) = self.find_pairs(assets);
        let clusters = components(&pairs);
        SemanticDetection {
            pairs,
            clusters,
            excluded,
        }
    }

    fn score_pairs<F>(&self, usable: &[&Asset], keep: F) -> Vec<SimilarPair>
    where
        F: Fn(usize, usize) -> bool + Sync,
    {
        let n = usable.len();
        if n < 2 {
            return Vec::new();
        }
        let vectors: Vec<&[f32]> = usable
            .iter()
            .map(|a| a.embedding.as_deref().unwrap_or(&[]))
            .collect();
        let threshold = self.threshold;

        let run = || {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| {
                    let vectors = &vectors;
                    let keep = &keep;
                    (i + 1..n).filter_map(move |j| {
                        if !keep(i, j) {
                            return None;
                        }
                        let sim = cosine_similarity(vectors[i], vectors[j]);
                        (sim >= threshold).then_some((i, j, sim))
                    })
                })
                .collect::<Vec<_>>()
        };
        let mut scored = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };
        scored.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));

        tracing::debug!(candidates = n, pairs = scored.len(), threshold, "semantic pairs scored");

        scored
            .into_iter()
            .map(|(i, j, similarity)| SimilarPair {
                a: usable[i].id.clone(),
                b: usable[j].id.clone(),
                similarity,
            })
            .collect()
    }
}

/// Keep assets with a usable embedding, sorted by id. The expected dimension
/// is the most common one (smallest on ties); others are excluded.
fn prepare<'a>(assets: &[&'a Asset]) -> (Vec<&'a Asset>, Vec<ExcludedAsset>) {
    let mut sorted: Vec<&Asset> = assets.to_vec();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted.dedup_by(|a, b| a.id == b.id);

    let mut excluded = Vec::new();
    let mut with_vectors = Vec::with_capacity(sorted.len());
    for asset in sorted {
        let reason = match asset.embedding.as_deref() {
            None => Some("no embedding"),
            Some([]) => Some("empty embedding"),
            Some(v) if v.iter().any(|x| !x.is_finite()) => Some("non-finite component"),
            Some(v) if norm(v) < f64::EPSILON => Some("zero-magnitude embedding"),
            Some(_) => None,
        };
        match reason {
            Some(reason) => excluded.push(exclusion(DedupError::EmbeddingUnavailable {
                asset_id: asset.id.clone(),
                reason: reason.to_string(),
            })),
            None => with_vectors.push(asset),
        }
    }

    let mut dims: HashMap<usize, usize> = HashMap::new();
    for asset in &with_vectors {
        *dims.entry(embedding_len(asset)).or_insert(0) += 1;
    }
    let expected = dims
        .into_iter()
        .max_by_key(|(dim, count)| (*count, Reverse(*dim)))
        .map(|(dim, _)| dim);

    let mut usable = Vec::with_capacity(with_vectors.len());
    for asset in with_vectors {
        let actual = embedding_len(asset);
        match expected {
            Some(expected) if expected != actual => {
                excluded.push(exclusion(DedupError::DimensionMismatch {
                    asset_id: asset.id.clone(),
                    expected,
                    actual,
                }))
            }
            _ => usable.push(asset),
        }
    }
    excluded.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
    (usable, excluded)
}

fn embedding_len(asset: &Asset) -> usize {
    asset.embedding.as_ref().map_or(0, Vec::len)
}

fn exclusion(err: DedupError) -> ExcludedAsset {
    tracing::debug!(asset_id = err.asset_id(), error = %err, "excluded from semantic dedup");
    ExcludedAsset {
        asset_id: err.asset_id().to_string(),
        stage: DedupStage::Semantic,
        reason: err.to_string(),
    }
}

/// Union-find components over the pair graph, two or more members each.
pub fn components(pairs: &[SimilarPair]) -> Vec<Vec<String>> {
    let ids: BTreeSet<&str> = pairs
        .iter()
        .flat_map(|p| [p.a.as_str(), p.b.as_str()])
        .collect();
    let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let ids: Vec<&str> = ids.into_iter().collect();

    let mut uf = UnionFind::<usize>::new(ids.len());
    for p in pairs {
        uf.union(index[p.a.as_str()], index[p.b.as_str()]);
    }

    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (i, root) in uf.into_labeling().into_iter().enumerate() {
        groups.entry(root).or_default().push(ids[i].to_string());
    }
    let mut clusters: Vec<Vec<String>> = groups.into_values().filter(|g| g.len() >= 2).collect();
    clusters.sort_by(|a, b| a[0].cmp(&b[0]));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use steward_core::SourceType;

    fn emb(id: &str, v: Vec<f32>) -> Asset {
        Asset::new(id, id, SourceType::Chunk, Utc::now()).with_embedding(v)
    }

    #[test]
    fn transitive_chain_forms_one_cluster() {
        // a~b and b~c above 0.95, a~c below.
        let a = emb("a", vec![1.0, 0.0]);
        let b = emb("b", vec![0.98, 0.2]);
        let c = emb("c", vec![0.92, 0.39]);
        let det = SemanticDuplicateDetector::new(0.95, 0);
        let out = det.detect(&[&c, &a, &b]);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.92, 0.39]) < 0.95);
        assert_eq!(out.clusters, vec![vec!["a".to_string(), "b".into(), "c".into()]]);
        assert_eq!(out.pairs.len(), 2);
    }

    #[test]
    fn assets_without_embeddings_are_excluded_not_merged() {
        let a = emb("a", vec![1.0, 0.0]);
        let b = Asset::new("b", "b", SourceType::Chunk, Utc::now());
        let z = emb("z", vec![0.0, 0.0]);
        let out = SemanticDuplicateDetector::new(0.5, 0).detect(&[&a, &b, &z]);
        assert!(out.clusters.is_empty());
        let ids: Vec<_> = out.excluded.iter().map(|e| e.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "z"]);
        assert!(out.excluded.iter().all(|e| e.stage == DedupStage::Semantic));
    }

    #[test]
    fn minority_dimension_is_excluded() {
        let a = emb("a", vec![1.0, 0.0]);
        let b = emb("b", vec![1.0, 0.0]);
        let c = emb("c", vec![1.0, 0.0, 0.0]);
        let out = SemanticDuplicateDetector::new(0.9, 0).detect(&[&a, &b, &c]);
        assert_eq!(out.clusters.len(), 1);
        assert!(out.excluded[0].reason.contains("dimension mismatch"));
    }

    #[test]
    fn focus_limits_compared_pairs() {
        let a = emb("a", vec![1.0, 0.0]);
        let b = emb("b", vec![1.0, 0.0]);
        let c = emb("c", vec![0.0, 1.0]);
        let d = emb("d", vec![0.0, 1.0]);
        let focus: BTreeSet<String> = ["c".to_string()].into();
        let (pairs, _) =
            SemanticDuplicateDetector::new(0.95, 0).find_pairs_touching(&[&a, &b, &c, &d], &focus);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("c", "d"));
    }

    #[test]
    fn dedicated_pool_matches_global_pool() {
        let assets: Vec<Asset> = (0..30)
            .map(|i| emb(&format!("n{i:02}"), vec![1.0, (i % 3) as f32 * 0.01]))
            .collect();
        let refs: Vec<&Asset> = assets.iter().collect();
        let global = SemanticDuplicateDetector::new(0.99, 0).detect(&refs);
        let pooled = SemanticDuplicateDetector::new(0.99, 2).detect(&refs);
        assert_eq!(global.pairs, pooled.pairs);
        assert_eq!(global.clusters, pooled.clusters);
    }
}
