use std::collections::HashMap;
use std::io::Write;

use ahoy_core::config::defaults;
use ahoy_core::errors::ConfigError;
use ahoy_core::{AhoyConfig, ApplicationEnvironment};

fn valid_config() -> AhoyConfig {
    AhoyConfig::new(
        "https://ahoy.example.com",
        ApplicationEnvironment::new("iOS", "9.9.99", "16.0.2"),
    )
}

#[test]
fn defaults_match_collector_conventions() {
    let config = AhoyConfig::default();
    assert_eq!(config.ahoy_path, "ahoy");
    assert_eq!(config.events_path, "events");
    assert_eq!(config.visits_path, "visits");
    assert_eq!(config.visit_duration_secs, None);
    assert_eq!(config.visit_duration(), chrono::Duration::minutes(30));
    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.http.timeout_secs, defaults::DEFAULT_HTTP_TIMEOUT_SECS);
    assert!(config.storage.path.is_none());
}

#[test]
fn visit_duration_override_is_honoured() {
    let mut config = valid_config();
    config.visit_duration_secs = Some(3_600);
    assert_eq!(config.visit_duration(), chrono::Duration::hours(1));
}

#[test]
fn huge_visit_duration_does_not_panic() {
    let mut config = valid_config();
    config.visit_duration_secs = Some(u64::MAX);
    assert!(config.visit_duration() > chrono::Duration::days(365));
}

#[test]
fn from_toml_fills_missing_fields_with_defaults() {
    let config = AhoyConfig::from_toml(
        r#"
        base_url = "https://ahoy.com"
        ahoy_path = "test-ahoy"
        visit_duration_secs = 3600

        [environment]
        platform = "iOS"
        app_version = "9.9.99"
        os_version = "16.0.2"
        "#,
    )
    .unwrap();

    assert_eq!(config.base_url, "https://ahoy.com");
    assert_eq!(config.ahoy_path, "test-ahoy");
    assert_eq!(config.events_path, "events");
    assert_eq!(config.visit_duration_secs, Some(3_600));
    assert_eq!(config.environment.platform, "iOS");
    assert_eq!(config.retry.initial_backoff_ms, defaults::DEFAULT_INITIAL_BACKOFF_MS);
    config.validate().unwrap();
}

#[test]
fn from_toml_rejects_invalid_toml() {
    let err = AhoyConfig::from_toml("base_url = [").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn toml_round_trip_preserves_values() {
    let mut config = valid_config();
    config.visits_path = "my-visits".to_string();
    config.storage.path = Some("/tmp/ahoy.db".to_string());

    let text = config.to_toml().unwrap();
    let parsed = AhoyConfig::from_toml(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn validation_rejects_missing_base_url() {
    let err = AhoyConfig::default().validate().unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "base_url"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn validation_rejects_non_http_base_url() {
    let mut config = valid_config();
    config.base_url = "ftp://ahoy.example.com".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn validation_rejects_empty_path_segments() {
    let mut config = valid_config();
    config.events_path = "/".to_string();
    match config.validate().unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "events_path"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn validation_rejects_zero_duration_and_timeout() {
    let mut config = valid_config();
    config.visit_duration_secs = Some(0);
    assert!(config.validate().is_err());

    let mut config = valid_config();
    config.http.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn env_overrides_take_priority_over_file_values() {
    let mut config = AhoyConfig::from_toml(
        r#"
        base_url = "https://file.example.com"
        visit_duration_secs = 60
        "#,
    )
    .unwrap();

    let env: HashMap<&str, &str> = HashMap::from([
        ("AHOY_BASE_URL", "https://env.example.com"),
        ("AHOY_VISIT_DURATION_SECS", "120"),
        ("AHOY_PLATFORM", "Linux"),
        ("AHOY_STORAGE_PATH", "/var/lib/ahoy/tokens.db"),
        ("AHOY_MAX_RETRIES", "not-a-number"),
    ]);
    config.apply_env_overrides_from(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.base_url, "https://env.example.com");
    assert_eq!(config.visit_duration_secs, Some(120));
    assert_eq!(config.environment.platform, "Linux");
    assert_eq!(config.storage.path.as_deref(), Some("/var/lib/ahoy/tokens.db"));
    // Unparseable values leave the previous setting in place.
    assert_eq!(config.retry.max_retries, defaults::DEFAULT_MAX_RETRIES);
}

#[test]
fn from_file_reads_toml_and_reports_missing_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "base_url = \"https://ahoy.com\"\nvisits_path = \"my-visits\"").unwrap();

    let config = AhoyConfig::from_file(file.path()).unwrap();
    assert_eq!(config.visits_path, "my-visits");

    let missing = AhoyConfig::from_file(std::path::Path::new("/nonexistent/ahoy.toml"));
    assert!(matches!(missing, Err(ConfigError::FileNotFound { .. })));
}
