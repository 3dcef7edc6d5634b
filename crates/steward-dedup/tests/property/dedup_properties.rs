//! Property tests for steward-dedup: idempotence, exact soundness,
//! threshold monotonicity, retention determinism.

use std::collections::BTreeSet;

use proptest::prelude::*;

use steward_core::config::{DedupConfig, SemanticScope};
use steward_core::Asset;
use steward_dedup::{
    ContentFingerprinter, DeduplicationPipeline, ExactDuplicateDetector, RetentionResolver,
    SemanticDuplicateDetector,
};

fn arb_asset(id: usize) -> impl Strategy<Value = Asset> {
    (
        prop::sample::select(vec!["alpha", "beta", " alpha", "gamma  delta", "gamma delta", ""]),
        prop::option::of(prop::collection::vec(-1.0f32..1.0, 3)),
        0usize..3,
        0i64..5,
    )
        .prop_map(move |(content, embedding, meta, day)| {
            let mut asset = Asset::new(
                format!("asset-{id:03}"),
                content,
                steward_core::SourceType::Chunk,
                test_fixtures::t0() + chrono::Duration::days(day),
            );
            asset.embedding = embedding;
            for k in 0..meta {
                asset.metadata.insert(format!("k{k}"), "v".into());
            }
            asset
        })
}

fn arb_corpus() -> impl Strategy<Value = Vec<Asset>> {
    (1usize..14).prop_flat_map(|n| (0..n).map(arb_asset).collect::<Vec<_>>())
}

fn pairs_at(assets: &[Asset], tau: f64) -> BTreeSet<(String, String)> {
    let refs: Vec<&Asset> = assets.iter().collect();
    SemanticDuplicateDetector::new(tau, 0)
        .find_pairs(&refs)
        .0
        .into_iter()
        .map(|p| (p.a, p.b))
        .collect()
}

proptest! {
    #[test]
    fn pipeline_is_idempotent(assets in arb_corpus(), all in any::<bool>()) {
        let config = DedupConfig {
            semantic_threshold: 0.9,
            semantic_scope: if all { SemanticScope::All } else { SemanticScope::Remaining },
            ..DedupConfig::default()
        };
        let pipeline = DeduplicationPipeline::new(&config);
        let first = pipeline.run(&assets);
        let second = pipeline.run(&assets);
        prop_assert_eq!(&first, &second);

        let mut reversed = assets.clone();
        reversed.reverse();
        prop_assert_eq!(&first, &pipeline.run(&reversed));
    }

    #[test]
    fn clusters_are_disjoint_and_valid(assets in arb_corpus()) {
        let report = DeduplicationPipeline::new(&DedupConfig::default()).run(&assets);
        let mut seen = BTreeSet::new();
        for cluster in &report.clusters {
            prop_assert!(cluster.len() >= 2);
            prop_assert!(cluster.contains(&cluster.representative_id));
            for m in &cluster.members {
                prop_assert!(seen.insert(m.clone()), "asset {} in two clusters", m);
            }
        }
    }

    #[test]
    fn exact_groups_never_mix_fingerprints(assets in arb_corpus()) {
        let fp = ContentFingerprinter::default();
        let detection = ExactDuplicateDetector::new(fp).detect(&assets);
        for group in &detection.groups {
            for id in &group.member_ids {
                let asset = assets.iter().find(|a| &a.id == id).unwrap();
                prop_assert_eq!(fp.fingerprint(asset).unwrap(), group.fingerprint);
            }
        }
    }

    #[test]
    fn lower_threshold_finds_superset(assets in arb_corpus(), t1 in 0.0f64..1.0, t2 in 0.0f64..1.0) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let at_hi = pairs_at(&assets, hi);
        let at_lo = pairs_at(&assets, lo);
        prop_assert!(at_hi.is_subset(&at_lo));
    }

    #[test]
    fn retention_ignores_member_order(assets in arb_corpus()) {
        let mut refs: Vec<&Asset> = assets.iter().collect();
        let first = RetentionResolver.select(&refs).map(|a| a.id.clone());
        refs.reverse();
        let second = RetentionResolver.select(&refs).map(|a| a.id.clone());
        prop_assert_eq!(first, second);
    }
}
