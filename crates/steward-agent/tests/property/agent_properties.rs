//! Property tests for steward-agent: approval boundary, single claim per
//! target, plan order by severity then confidence.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use steward_agent::{ApprovalGate, DecisionEngine, ExecutionMode, HumanApproval, SuppressionMemory};
use steward_core::models::{
    DuplicateCluster, ExpirationAction, FindingSeverity, FreshnessReport, FreshnessStatus, MatchKind,
    QualityReport, ValidationFinding, ValidationReport,
};
use steward_core::{DuplicateReport, PerceptionSnapshot};

const IDS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

fn arb_action() -> impl Strategy<Value = ExpirationAction> {
    prop::sample::select(vec![
        ExpirationAction::Delete,
        ExpirationAction::Archive,
        ExpirationAction::Review,
        ExpirationAction::Notify,
    ])
}

/// A snapshot whose signals overlap freely on a small id space.
fn arb_snapshot() -> impl Strategy<Value = PerceptionSnapshot> {
    (
        prop::collection::btree_set(prop::sample::select(IDS.to_vec()), 0..4),
        prop::collection::btree_set(prop::sample::select(IDS.to_vec()), 0..5),
        0.80f64..1.0,
        prop::collection::vec((prop::sample::select(IDS.to_vec()), any::<bool>()), 0..8),
        prop::collection::vec((prop::sample::select(IDS.to_vec()), any::<bool>(), arb_action()), 0..8),
        prop::collection::btree_map(prop::sample::select(IDS.to_vec()), 0.0f64..1.0, 0..8),
    )
        .prop_map(|(blank, cluster_ids, sim, findings, fresh, quality)| {
            let clusters = if cluster_ids.len() >= 2 {
                let members: BTreeSet<String> = cluster_ids.iter().map(|s| s.to_string()).collect();
                let representative = members.iter().next().cloned().unwrap_or_default();
                let scores: BTreeMap<String, f64> = members
                    .iter()
                    .map(|m| (m.clone(), if *m == representative { 1.0 } else { sim }))
                    .collect();
                DuplicateCluster::new(members, representative, scores, MatchKind::Semantic)
                    .into_iter()
                    .collect()
            } else {
                vec![]
            };
            let duplicates = DuplicateReport::new(clusters, IDS.len(), vec![], true)
                .with_blank_assets(blank.iter().map(|s| s.to_string()).collect());
            let validation = ValidationReport::new(
                IDS.len(),
                findings
                    .into_iter()
                    .map(|(id, error)| {
                        let severity = if error { FindingSeverity::Error } else { FindingSeverity::Warning };
                        ValidationFinding::new(id, "rule", severity, "finding")
                    })
                    .collect(),
            );
            let freshness = FreshnessReport::new(
                fresh
                    .into_iter()
                    .map(|(id, expired, action)| FreshnessStatus {
                        asset_id: id.to_string(),
                        policy: "p".into(),
                        age_days: 365.0,
                        expired,
                        stale: true,
                        action: expired.then_some(action),
                    })
                    .collect(),
            );
            let quality = QualityReport::new(quality.into_iter().map(|(k, v)| (k.to_string(), v)).collect());
            PerceptionSnapshot::new(duplicates, quality, freshness, validation, vec![], test_fixtures::t0())
        })
}

proptest! {
    #[test]
    fn auto_only_never_admits_approval_decisions(snapshot in arb_snapshot()) {
        let plan = DecisionEngine::default().decide(&snapshot, &SuppressionMemory::new(0), "prop", test_fixtures::t0());
        let admission = ApprovalGate.admit(&plan, &ExecutionMode::AutoOnly);
        for admitted in &admission.admitted {
            prop_assert!(!admitted.decision().requires_approval());
        }
        prop_assert_eq!(admission.admitted.len() + admission.held.len(), plan.decisions().len());
    }

    #[test]
    fn approval_admits_exactly_the_named_decisions(snapshot in arb_snapshot(), pick in any::<prop::sample::Index>()) {
        let plan = DecisionEngine::default().decide(&snapshot, &SuppressionMemory::new(0), "prop", test_fixtures::t0());
        let gated = plan.needs_approval_decisions();
        prop_assume!(!gated.is_empty());
        let chosen = gated[pick.index(gated.len())].id().to_string();
        let approval = HumanApproval::new("prop", [chosen.clone()], test_fixtures::t0());
        let admission = ApprovalGate.admit(&plan, &ExecutionMode::WithApprovals(approval));
        let admitted_gated: Vec<&str> = admission
            .admitted
            .iter()
            .filter(|a| a.decision().requires_approval())
            .map(|a| a.decision().id())
            .collect();
        prop_assert_eq!(admitted_gated, vec![chosen.as_str()]);
    }

    #[test]
    fn each_target_is_claimed_at_most_once(snapshot in arb_snapshot()) {
        let decisions = DecisionEngine::default().reason(&snapshot);
        let mut seen = BTreeSet::new();
        for d in &decisions {
            prop_assert!(!d.target_asset_ids().is_empty());
            for t in d.target_asset_ids() {
                prop_assert!(seen.insert(t.clone()), "{} targeted twice", t);
            }
        }
    }

    #[test]
    fn plan_order_is_deterministic(snapshot in arb_snapshot()) {
        let engine = DecisionEngine::default();
        let memory = SuppressionMemory::new(0);
        let first = engine.decide(&snapshot, &memory, "prop", test_fixtures::t0());
        let second = engine.decide(&snapshot, &memory, "prop", test_fixtures::t0());
        let ids = |p: &steward_core::ActionPlan| p.decisions().iter().map(|d| d.id().to_string()).collect::<Vec<_>>();
        prop_assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn plan_is_ordered_by_severity_then_confidence(snapshot in arb_snapshot()) {
        let plan = DecisionEngine::default().decide(&snapshot, &SuppressionMemory::new(0), "prop", test_fixtures::t0());
        for pair in plan.decisions().windows(2) {
            let (first, next) = (&pair[0], &pair[1]);
            prop_assert!(first.severity() >= next.severity(), "{} before {}", first.id(), next.id());
            if first.severity() == next.severity() {
                prop_assert!(first.confidence().value() >= next.confidence().value(), "{} before {}", first.id(), next.id());
            }
        }
    }
}
