use std::collections::HashMap;
use std::io::Write;

use orgwalk_core::config::*;
use orgwalk_core::OrgWalkError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = OrgWalkConfig::from_toml("").unwrap();

    // Transport defaults
    assert_eq!(config.transport.timeout_ms, 30_000);
    assert_eq!(config.transport.max_attempts, 3);
    assert_eq!(config.transport.backoff_base_ms, 250);
    assert!(config.transport.api_token.is_none());

    // Pagination defaults
    assert_eq!(config.pagination.page_size, 100);

    // Cache defaults
    assert_eq!(config.cache.schema_ttl_secs, 600);

    // Traversal defaults
    assert_eq!(config.traversal.max_depth, 10);
    assert_eq!(config.traversal.max_nodes, 5_000);
    assert!(!config.traversal.include_manager);

    // Media defaults
    assert!(config.media.media_token.is_none());
}

#[test]
fn partial_toml_overrides_only_named_keys() {
    let config = OrgWalkConfig::from_toml(
        r#"
        [transport]
        base_url = "https://directory.example.com/"
        max_attempts = 5

        [traversal]
        max_nodes = 50
        "#,
    )
    .unwrap();

    assert_eq!(config.transport.max_attempts, 5);
    assert_eq!(config.transport.timeout_ms, 30_000);
    assert_eq!(config.traversal.max_nodes, 50);
    assert_eq!(config.traversal.max_depth, 10);
    assert_eq!(config.base_url(), "https://directory.example.com");
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = OrgWalkConfig::from_toml("[transport\nbase_url = 1").unwrap_err();
    assert!(matches!(err, OrgWalkError::Config(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[cache]\nschema_ttl_secs = 5").unwrap();

    let config = OrgWalkConfig::load(file.path()).unwrap();
    assert_eq!(config.cache.schema_ttl_secs, 5);
    assert_eq!(config.cache.schema_ttl().as_secs(), 5);
}

#[test]
fn load_missing_file_reports_path() {
    let err = OrgWalkConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}

#[test]
fn overrides_replace_credentials_and_ignore_blanks() {
    let env: HashMap<&str, &str> = [
        (ENV_BASE_URL, "https://override.example.com"),
        (ENV_API_TOKEN, "api-secret"),
        (ENV_MEDIA_TOKEN, "  "),
    ]
    .into_iter()
    .collect();

    let mut config = OrgWalkConfig::default();
    config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

    assert_eq!(config.transport.base_url, "https://override.example.com");
    assert_eq!(config.transport.api_token.as_deref(), Some("api-secret"));
    assert!(config.media.media_token.is_none());
}

#[test]
fn validate_rejects_zero_attempts_and_empty_base() {
    let mut config = OrgWalkConfig::default();
    assert!(config.validate().is_ok());

    config.transport.max_attempts = 0;
    assert!(config.validate().is_err());

    let mut config = OrgWalkConfig::default();
    config.transport.base_url = " ".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("transport.base_url"));
}

#[test]
fn validate_bounds_the_schema_ttl() {
    let mut config = OrgWalkConfig::default();
    config.cache.schema_ttl_secs = defaults::MAX_SCHEMA_TTL_SECS;
    assert!(config.validate().is_ok());

    let config =
        OrgWalkConfig::from_toml("[cache]\nschema_ttl_secs = 9223372036854775807").unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, OrgWalkError::Config(_)));
    assert!(err.to_string().contains("cache.schema_ttl_secs"));
}

#[test]
fn media_base_falls_back_to_api_base() {
    let mut config = OrgWalkConfig::default();
    config.transport.base_url = "https://api.example.com/".into();
    assert_eq!(config.media_base_url(), "https://api.example.com");

    config.media.base_url = Some("https://cdn.example.com".into());
    assert_eq!(config.media_base_url(), "https://cdn.example.com");
}

#[test]
fn page_size_is_clamped_not_rejected() {
    assert_eq!(clamp_page_size(0), 1);
    assert_eq!(clamp_page_size(50), 50);
    assert_eq!(clamp_page_size(1_000), 100);

    let config = PaginationConfig { page_size: 250 };
    assert_eq!(config.effective_page_size(), 100);
}
