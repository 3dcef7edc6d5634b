use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use steward_core::models::*;

fn ts(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap()
}

#[test]
fn asset_roundtrips_through_json() {
    let asset = Asset::new("a", "hello world", SourceType::Document, ts(1))
        .with_embedding(vec![0.1, 0.2])
        .with_metadata("source", "wiki");
    let json = serde_json::to_string(&asset).unwrap();
    let back: Asset = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, "a");
    assert_eq!(back.embedding, Some(vec![0.1, 0.2]));
    assert_eq!(back.metadata.get("source").map(String::as_str), Some("wiki"));
}

#[test]
fn asset_json_without_optional_fields_parses() {
    let json = r#"{
        "id": "x", "content": "c", "content_hash": "h", "source_type": "chat_history",
        "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-02T00:00:00Z"
    }"#;
    let asset: Asset = serde_json::from_str(json).unwrap();
    assert!(asset.embedding.is_none());
    assert!(asset.source_type.is_short_term());
}

#[test]
fn decision_kind_serializes_screaming() {
    let s = serde_json::to_string(&DecisionKind::DeleteDuplicates).unwrap();
    assert_eq!(s, "\"DELETE_DUPLICATES\"");
}

#[test]
fn execution_status_serializes_screaming() {
    let s = serde_json::to_string(&ExecutionStatus::Skipped).unwrap();
    assert_eq!(s, "\"SKIPPED\"");
}

#[test]
fn health_score_drops_with_duplicates() {
    let members: BTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let cluster =
        DuplicateCluster::new(members, "a".into(), BTreeMap::new(), MatchKind::Exact).unwrap();
    let report = DuplicateReport::new(vec![cluster], 2, vec![], false);
    let snap = PerceptionSnapshot::new(
        report,
        QualityReport::default(),
        FreshnessReport::default(),
        ValidationReport::default(),
        vec![],
        ts(1),
    );
    assert!((snap.health_score() - 0.875).abs() < 1e-9);
}

fn arb_decision() -> impl Strategy<Value = Decision> {
    (
        prop::sample::select(DecisionKind::ALL.to_vec()),
        prop::sample::select(vec![Severity::Low, Severity::Medium, Severity::High]),
        0.0f64..=1.0,
        prop::collection::vec("[a-e]", 1..4),
    )
        .prop_map(|(kind, sev, conf, targets)| {
            Decision::new(kind, targets, Confidence::new(conf), sev, "generated")
        })
}

proptest! {
    #[test]
    fn plan_is_non_increasing_in_severity_and_confidence(
        decisions in prop::collection::vec(arb_decision(), 0..20)
    ) {
        let plan = ActionPlan::new("prop", decisions, vec![], ts(1));
        for pair in plan.decisions().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.severity() >= b.severity());
            if a.severity() == b.severity() {
                prop_assert!(a.confidence().value() >= b.confidence().value());
            }
        }
    }

    #[test]
    fn plan_order_ignores_input_order(
        decisions in prop::collection::vec(arb_decision(), 0..12)
    ) {
        let mut reversed = decisions.clone();
        reversed.reverse();
        let a = ActionPlan::new("prop", decisions, vec![], ts(1));
        let b = ActionPlan::new("prop", reversed, vec![], ts(1));
        let ids_a: Vec<_> = a.decisions().iter().map(|d| d.id().to_string()).collect();
        let ids_b: Vec<_> = b.decisions().iter().map(|d| d.id().to_string()).collect();
        prop_assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn confidence_always_in_unit_interval(v in proptest::num::f64::ANY) {
        let c = Confidence::new(v).value();
        prop_assert!((0.0..=1.0).contains(&c));
    }
}
