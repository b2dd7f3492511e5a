//! Unit tests for configuration loading, precedence, and mode selection.

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::{FollowSweepConfig, OperationMode};

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

#[rstest]
#[case::file_overrides_defaults(
    vec![
        ("defaults", json!({"capture": "default.jsonl"})),
        ("file", json!({"capture": "file.jsonl"})),
    ],
    "capture",
    "file.jsonl",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![
        ("file", json!({"database_url": "file.sqlite"})),
        ("environment", json!({"database_url": "env.sqlite"})),
    ],
    "database_url",
    "env.sqlite",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![
        ("environment", json!({"capture": "env.jsonl"})),
        ("cli", json!({"capture": "cli.jsonl"})),
    ],
    "capture",
    "cli.jsonl",
    "CLI should override environment"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config =
        FollowSweepConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "capture" => config.capture.as_deref(),
        "database_url" => Some(config.database_url.as_str()),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({
        "capture": "default.jsonl",
        "database_url": "default.sqlite",
    }));
    composer.push_cli(json!({"capture": "cli.jsonl"}));

    let config =
        FollowSweepConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(
        config.capture.as_deref(),
        Some("cli.jsonl"),
        "CLI should override capture"
    );
    assert_eq!(
        config.database_url, "default.sqlite",
        "default database_url should be preserved"
    );
}

#[rstest]
fn defaults_match_documented_values() {
    let config = FollowSweepConfig::default();

    assert!(config.capture.is_none(), "no capture by default");
    assert_eq!(config.database_url, "followsweep.sqlite");
    assert_eq!(config.host, "x.com");
    assert_eq!(config.max_accounts, 200);
    assert_eq!(config.scan_timeout_ms, 60_000);
    assert_eq!(config.scroll_delay_ms, 1_000);
    assert!(config.log_file.is_none(), "no log file by default");
}

#[rstest]
fn operation_mode_defaults_to_review_tui() {
    let config = FollowSweepConfig::default();

    assert_eq!(
        config.operation_mode(),
        OperationMode::ReviewTui,
        "should be ReviewTui when no fields are set"
    );
}

#[rstest]
fn operation_mode_scan_when_capture_without_tui() {
    let config = FollowSweepConfig {
        capture: Some("following.jsonl".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.operation_mode(),
        OperationMode::Scan,
        "should be Scan when a capture is given headless"
    );
}

#[rstest]
fn operation_mode_review_tui_when_capture_with_tui() {
    let config = FollowSweepConfig {
        capture: Some("following.jsonl".to_owned()),
        tui: true,
        ..Default::default()
    };

    assert_eq!(
        config.operation_mode(),
        OperationMode::ReviewTui,
        "TUI flag should keep a capture session interactive"
    );
}

#[rstest]
#[case::export(
    FollowSweepConfig { export: true, ..Default::default() },
    OperationMode::Export
)]
#[case::clear(
    FollowSweepConfig { clear: true, ..Default::default() },
    OperationMode::Clear
)]
#[case::migrate(
    FollowSweepConfig { migrate_db: true, ..Default::default() },
    OperationMode::MigrateDb
)]
fn operation_mode_honours_exclusive_flags(
    #[case] config: FollowSweepConfig,
    #[case] expected: OperationMode,
) {
    assert_eq!(config.operation_mode(), expected);
}

#[rstest]
fn migrate_db_takes_precedence_over_other_flags() {
    let config = FollowSweepConfig {
        migrate_db: true,
        clear: true,
        export: true,
        capture: Some("following.jsonl".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.operation_mode(),
        OperationMode::MigrateDb,
        "migrate-db should win over every other mode flag"
    );
}

#[rstest]
fn clear_takes_precedence_over_export() {
    let config = FollowSweepConfig {
        clear: true,
        export: true,
        ..Default::default()
    };

    assert_eq!(config.operation_mode(), OperationMode::Clear);
}

#[rstest]
fn scan_limits_reflect_configured_knobs() {
    let config = FollowSweepConfig {
        max_accounts: 50,
        scan_timeout_ms: 5_000,
        scroll_delay_ms: 250,
        ..Default::default()
    };

    let limits = config.scan_limits();

    assert_eq!(limits.max_accounts, 50);
    assert_eq!(limits.timeout.as_millis(), 5_000);
    assert_eq!(limits.scroll_delay.as_millis(), 250);
}

#[rstest]
fn capture_path_wraps_configured_value() {
    let config = FollowSweepConfig {
        capture: Some("captures/following.jsonl".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.capture_path().map(camino::Utf8Path::as_str),
        Some("captures/following.jsonl")
    );
    assert!(FollowSweepConfig::default().capture_path().is_none());
}

#[rstest]
fn source_host_validates_configured_host() {
    let valid = FollowSweepConfig::default();
    assert!(valid.source_host().is_ok(), "default host should validate");

    let invalid = FollowSweepConfig {
        host: "not a host".to_owned(),
        ..Default::default()
    };
    assert!(
        invalid.source_host().is_err(),
        "hosts with spaces should be rejected"
    );
}
