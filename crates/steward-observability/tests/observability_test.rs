use steward_core::config::ObservabilityConfig;
use steward_core::models::{Confidence, Decision, DecisionKind, DuplicateReport, Severity};
use steward_observability::tracing_setup::{events, spans::names};
use steward_observability::{build_filter, init_tracing, init_tracing_with_filter};

#[test]
fn invalid_filter_is_a_config_error() {
    let err = init_tracing_with_filter("steward=[[").unwrap_err();
    assert!(err.to_string().contains("invalid log filter"));
}

#[test]
fn configured_level_builds_a_filter() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json_logs: true,
    };
    assert!(build_filter(&config).is_ok());
}

#[test]
fn second_install_fails_instead_of_panicking() {
    let config = ObservabilityConfig::default();
    let _ = init_tracing(&config);
    assert!(init_tracing(&config).is_err());
}

#[test]
fn span_macros_use_stage_names() {
    let cycle = steward_observability::cycle_span!("tick");
    let dedup = steward_observability::dedup_span!(3usize);
    let decide = steward_observability::decide_span!("tick");
    let execute = steward_observability::execute_span!(0usize);
    for (span, name) in [
        (cycle, names::CYCLE),
        (dedup, names::DEDUP),
        (decide, names::DECIDE),
        (execute, names::EXECUTE),
    ] {
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), name);
        }
    }
}

#[test]
fn stage_spans_accept_extra_fields() {
    let dedup = steward_observability::dedup_span!(3usize, focused = Some(1usize));
    let execute = steward_observability::execute_span!(2usize, trigger = "tick");
    for (span, name, field) in [(dedup, names::DEDUP, "focused"), (execute, names::EXECUTE, "trigger")] {
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), name);
            assert!(meta.fields().field(field).is_some());
        }
    }
}

#[test]
fn events_accept_domain_records() {
    let decision = Decision::new(
        DecisionKind::DeleteEmpty,
        vec!["a".to_string()],
        Confidence::new(0.99),
        Severity::High,
        "empty",
    );
    events::cycle_started("tick", None);
    events::duplicates_detected(&DuplicateReport::empty());
    events::decision_held(&decision);
    events::alert_dispatched(&decision);
    events::cycle_aborted("tick", "dedup", "timeout");
    events::cycle_completed("tick", 1, 0, 1, 0.9, 3);
}
