//! Deduplication pipeline: exact → semantic → union → retention.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use petgraph::unionfind::UnionFind;
use steward_core::config::{DedupConfig, SemanticScope};
use steward_core::constants::EXACT_MATCH_SIMILARITY;
use steward_core::models::{DedupStage, DuplicateCluster, DuplicateReport, ExcludedAsset, MatchKind};
use steward_core::Asset;

use crate::exact::ExactDuplicateDetector;
use crate::fingerprint::ContentFingerprinter;
use crate::retention::RetentionResolver;
use crate::semantic::SemanticDuplicateDetector;

/// An edge between two live assets, by index.
#[derive(Debug, Clone, Copy)]
struct Link {
    a: usize,
    b: usize,
    similarity: f64,
    exact: bool,
}

/// Runs both detectors over one corpus snapshot and resolves retention.
///
/// Re-running on the same snapshot yields the same report: assets are
/// processed in id order and every stage is order-independent.
#[derive(Debug, Clone)]
pub struct DeduplicationPipeline {
    exact: ExactDuplicateDetector,
    /// `None` when semantic detection is disabled.
    semantic: Option<SemanticDuplicateDetector>,
    scope: SemanticScope,
    resolver: RetentionResolver,
}

impl DeduplicationPipeline {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            exact: ExactDuplicateDetector::new(ContentFingerprinter::from_config(config)),
            semantic: config
                .semantic_enabled
                .then(|| SemanticDuplicateDetector::from_config(config)),
            scope: config.semantic_scope,
            resolver: RetentionResolver,
        }
    }

    pub fn semantic_enabled(&self) -> bool {
        self.semantic.is_some()
    }

    /// Full run over the snapshot.
    pub fn run(&self, assets: &[Asset]) -> DuplicateReport {
        self.run_inner(assets, None)
    }

    /// Targeted run: only clusters containing at least one `focus` asset are
    /// reported, and semantic comparison is limited to pairs touching them.
    pub fn run_for(&self, assets: &[Asset], focus: &BTreeSet<String>) -> DuplicateReport {
        self.run_inner(assets, Some(focus))
    }

    fn run_inner(&self, assets: &[Asset], focus: Option<&BTreeSet<String>>) -> DuplicateReport {
        let _span =
            steward_observability::dedup_span!(assets.len(), focused = focus.map(BTreeSet::len)).entered();

        let mut snapshot: Vec<&Asset> = assets.iter().collect();
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));
        snapshot.dedup_by(|a, b| a.id == b.id);

        let mut excluded = Vec::new();
        let mut blank = Vec::new();
        let mut live: Vec<&Asset> = Vec::with_capacity(snapshot.len());
        for asset in snapshot {
            if asset.is_blank() {
                excluded.push(ExcludedAsset {
                    asset_id: asset.id.clone(),
                    stage: DedupStage::Fingerprint,
                    reason: "blank content".to_string(),
                });
                blank.push(asset.id.clone());
            } else {
                live.push(asset);
            }
        }
        let index: HashMap<&str, usize> =
            live.iter().enumerate().map(|(i, a)| (a.id.as_str(), i)).collect();

        // Exact stage.
        let exact = self.exact.detect(live.iter().copied());
        excluded.extend(exact.excluded.iter().cloned());
        let mut links = Vec::new();
        for group in &exact.groups {
            let first = index[group.member_ids[0].as_str()];
            for id in &group.member_ids[1..] {
                links.push(Link {
                    a: first,
                    b: index[id.as_str()],
                    similarity: EXACT_MATCH_SIMILARITY,
                    exact: true,
                });
            }
        }

        // Semantic stage.
        if let Some(semantic) = &self.semantic {
            let group_of: HashMap<&str, usize> = exact
                .groups
                .iter()
                .enumerate()
                .flat_map(|(g, group)| group.member_ids.iter().map(move |id| (id.as_str(), g)))
                .collect();

            let candidates: Vec<&Asset> = match self.scope {
                SemanticScope::All => live.clone(),
                SemanticScope::Remaining => {
                    // Exact mates with the same embedding score identically against
                    // every other asset, so one of them stands in for the rest.
                    let mut seen: HashSet<(usize, Option<Vec<u32>>)> = HashSet::new();
                    live.iter()
                        .copied()
                        .filter(|a| match group_of.get(a.id.as_str()) {
                            None => true,
                            Some(&g) => seen.insert((g, embedding_bits(a))),
                        })
                        .collect()
                }
            };

            let (mut pairs, semantic_excluded) = match focus {
                None => semantic.find_pairs(&candidates),
                Some(focus) => {
                    // An exact-group mate of a focus asset may stand in for it.
                    let mut widened = focus.clone();
                    for group in &exact.groups {
                        if group.member_ids.iter().any(|id| focus.contains(id)) {
                            widened.extend(group.member_ids.iter().cloned());
                        }
                    }
                    semantic.find_pairs_touching(&candidates, &widened)
                }
            };
            if self.scope == SemanticScope::Remaining {
                pairs.retain(|p| match (group_of.get(p.a.as_str()), group_of.get(p.b.as_str())) {
                    (Some(x), Some(y)) => x != y,
                    _ => true,
                });
            }
            excluded.extend(semantic_excluded);
            links.extend(pairs.iter().map(|p| Link {
                a: index[p.a.as_str()],
                b: index[p.b.as_str()],
                similarity: p.similarity,
                exact: false,
            }));
        }

        // Union.
        let mut uf = UnionFind::<usize>::new(live.len());
        for link in &links {
            uf.union(link.a, link.b);
        }
        let labels = uf.into_labeling();

        let mut best: HashMap<usize, f64> = HashMap::new();
        let mut kinds: HashMap<usize, (bool, bool)> = HashMap::new();
        for link in &links {
            for end in [link.a, link.b] {
                let score = best.entry(end).or_insert(0.0);
                *score = score.max(link.similarity);
            }
            let entry = kinds.entry(labels[link.a]).or_insert((false, false));
            if link.exact {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }

        let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, root) in labels.iter().enumerate() {
            components.entry(*root).or_default().push(i);
        }

        // Retention.
        let mut clusters = Vec::new();
        for (root, members) in components {
            if members.len() < 2 {
                continue;
            }
            let member_assets: Vec<&Asset> = members.iter().map(|i| live[*i]).collect();
            let Some(rep) = self.resolver.select(&member_assets) else {
                continue;
            };
            let match_kind = match kinds.get(&root).copied().unwrap_or((false, false)) {
                (true, true) => MatchKind::Mixed,
                (false, true) => MatchKind::Semantic,
                _ => MatchKind::Exact,
            };
            let similarity_scores = members
                .iter()
                .map(|i| (live[*i].id.clone(), best.get(i).copied().unwrap_or(0.0)))
                .collect();
            let ids = member_assets.iter().map(|a| a.id.clone()).collect();
            if let Some(cluster) =
                DuplicateCluster::new(ids, rep.id.clone(), similarity_scores, match_kind)
            {
                clusters.push(cluster);
            }
        }

        let mut report = DuplicateReport::new(clusters, live.len(), excluded, self.semantic.is_some())
            .with_blank_assets(blank);
        if let Some(focus) = focus {
            report = report.restricted_to(focus);
        }
        tracing::info!(
            clusters = report.clusters.len(),
            duplicates = report.total_duplicate_count,
            excluded = report.excluded.len(),
            semantic = report.semantic_ran,
            "deduplication complete"
        );
        report
    }
}

fn embedding_bits(asset: &Asset) -> Option<Vec<u32>> {
    asset
        .embedding
        .as_ref()
        .map(|e| e.iter().map(|x| x.to_bits()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use steward_core::SourceType;

    fn asset(id: &str, content: &str) -> Asset {
        Asset::new(id, content, SourceType::Document, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    }

    fn config(semantic: bool) -> DedupConfig {
        DedupConfig {
            semantic_enabled: semantic,
            ..DedupConfig::default()
        }
    }

    #[test]
    fn blank_assets_are_excluded() {
        let assets = vec![asset("a", "   "), asset("b", "\n"), asset("c", "text")];
        let report = DeduplicationPipeline::new(&config(false)).run(&assets);
        assert!(report.clusters.is_empty());
        assert_eq!(report.assets_considered, 1);
        assert_eq!(report.excluded.len(), 2);
        assert_eq!(report.blank_asset_ids, vec!["a", "b"]);
    }

    #[test]
    fn semantic_disabled_leaves_near_duplicates_alone() {
        let assets = vec![
            asset("a", "one").with_embedding(vec![1.0, 0.0]),
            asset("b", "two").with_embedding(vec![1.0, 0.0]),
        ];
        let report = DeduplicationPipeline::new(&config(false)).run(&assets);
        assert!(report.clusters.is_empty());
        assert!(!report.semantic_ran);

        let report = DeduplicationPipeline::new(&config(true)).run(&assets);
        assert_eq!(report.clusters.len(), 1);
        assert_eq!(report.clusters[0].match_kind, MatchKind::Semantic);
    }

    #[test]
    fn exact_and_semantic_matches_are_unioned() {
        let assets = vec![
            asset("a", "hello world").with_embedding(vec![1.0, 0.0]),
            asset("b", "hello world").with_embedding(vec![1.0, 0.0]).with_metadata("k", "v"),
            asset("c", "Hello World!").with_embedding(vec![0.97, 0.243_1]),
        ];
        let report = DeduplicationPipeline::new(&config(true)).run(&assets);
        assert_eq!(report.clusters.len(), 1);
        let cluster = &report.clusters[0];
        assert_eq!(cluster.len(), 3);
        assert_eq!(cluster.representative_id, "b");
        assert_eq!(cluster.match_kind, MatchKind::Mixed);
        assert_eq!(report.total_duplicate_count, 2);
    }

    #[test]
    fn run_for_reports_only_focused_clusters() {
        let assets = vec![
            asset("a", "x"),
            asset("b", "x"),
            asset("c", "y"),
            asset("d", "y"),
        ];
        let focus: BTreeSet<String> = ["d".to_string()].into();
        let report = DeduplicationPipeline::new(&config(false)).run_for(&assets, &focus);
        assert_eq!(report.clusters.len(), 1);
        assert!(report.clusters[0].contains("c"));
    }
}
