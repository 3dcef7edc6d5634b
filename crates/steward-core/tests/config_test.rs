use steward_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = StewardConfig::from_toml("").unwrap();

    // Dedup defaults
    assert!(config.dedup.semantic_enabled);
    assert_eq!(config.dedup.semantic_threshold, 0.95);
    assert_eq!(config.dedup.semantic_scope, SemanticScope::Remaining);
    assert_eq!(config.dedup.worker_threads, 0);
    assert!(config.dedup.normalize_whitespace);

    // Decision defaults
    assert_eq!(config.decision.suppression_window_secs, 3600);
    assert_eq!(config.decision.stale_review_min, 5);
    assert_eq!(config.decision.large_batch_threshold, 10);
    assert_eq!(config.decision.medium_batch_threshold, 3);

    // Daemon defaults
    assert_eq!(config.daemon.min_run_interval_secs, 21_600);
    assert_eq!(config.daemon.degraded_run_interval_secs, 3600);
    assert_eq!(config.daemon.degraded_health_threshold, 0.6);
    assert_eq!(config.daemon.history_limit, 100);

    // Freshness defaults
    assert_eq!(config.freshness.default_ttl_days, 30);
    assert_eq!(config.freshness.long_term_review_days, 90);
    assert_eq!(config.freshness.web_cache_ttl_days, 7);
    assert_eq!(config.freshness.stale_threshold_days, 180);

    // Validation defaults
    assert_eq!(config.validation.min_content_length, 20);
    assert_eq!(config.validation.max_content_length, 5_000);
    assert!(config.validation.required_metadata.is_empty());

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[dedup]
semantic_threshold = 0.9
semantic_scope = "all"

[validation]
required_metadata = ["source", "author"]
"#;
    let config = StewardConfig::from_toml(toml).unwrap();
    assert_eq!(config.dedup.semantic_threshold, 0.9);
    assert_eq!(config.dedup.semantic_scope, SemanticScope::All);
    assert!(config.dedup.semantic_enabled);
    assert_eq!(config.validation.required_metadata, vec!["source", "author"]);
    assert_eq!(config.daemon.tick_timeout_ms, 30_000);
}

#[test]
fn config_rejects_threshold_out_of_range() {
    let err = StewardConfig::from_toml("[dedup]\nsemantic_threshold = 1.5\n").unwrap_err();
    assert!(err.to_string().contains("semantic_threshold"));
}

#[test]
fn config_rejects_inverted_batch_bands() {
    let toml = "[decision]\nmedium_batch_threshold = 20\nlarge_batch_threshold = 10\n";
    assert!(StewardConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_zero_timeout() {
    assert!(StewardConfig::from_toml("[daemon]\ntick_timeout_ms = 0\n").is_err());
}

#[test]
fn config_rejects_malformed_toml() {
    let err = StewardConfig::from_toml("[dedup\n").unwrap_err();
    assert!(matches!(err, steward_core::StewardError::ConfigError(_)));
}
