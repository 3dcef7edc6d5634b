use steward_core::config::{FreshnessConfig, ValidationConfig};
use steward_core::models::{ExpirationAction, FindingSeverity};
use steward_core::traits::{IFreshnessProvider, IValidationProvider};
use steward_signals::{FreshnessPolicySet, RuleRegistry};

#[test]
fn builtin_rules_over_fixture_corpus() {
    let assets = test_fixtures::load_corpus("mixed");
    let config = ValidationConfig {
        required_metadata: vec!["source".into()],
        ..ValidationConfig::default()
    };
    let report = RuleRegistry::with_builtin(&config).validate(&assets).unwrap();

    assert_eq!(report.assets_checked, assets.len());
    let empty: Vec<_> = report.findings_for("chunk-empty").map(|f| f.rule.as_str()).collect();
    assert!(empty.contains(&"empty_content"));
    assert!(report
        .findings_for("mem-fresh")
        .any(|f| f.rule == "required_metadata" && f.severity == FindingSeverity::Error));
    assert!(report.findings_for("doc-001").next().is_none());
    assert!(report.pass_rate() < 1.0);
}

#[test]
fn freshness_over_fixture_corpus() {
    let assets = test_fixtures::load_corpus("mixed");
    let report = FreshnessPolicySet::from_config(&FreshnessConfig::default())
        .check(&assets, test_fixtures::t0())
        .unwrap();

    let expired: Vec<_> = report.expired().map(|s| (s.asset_id.as_str(), s.action)).collect();
    assert_eq!(expired, vec![("web-stale", Some(ExpirationAction::Delete))]);
    assert!(report.stale().any(|s| s.asset_id == "chat-old"));
    assert!(!report.statuses.iter().any(|s| s.asset_id == "mem-fresh" && s.stale));
}
