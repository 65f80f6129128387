//! Test fixtures for orgwalk: org-chart builders, an in-process fake of the
//! directory service, and a loader for JSON fixture files.
//!
//! The fake speaks the same wire format as the real service and is plugged in
//! through `IHttpSender`, so the whole client stack runs unchanged in tests.

pub mod fake_directory;
pub mod org_tree;

use std::path::PathBuf;

use orgwalk_core::config::OrgWalkConfig;
use serde::de::DeserializeOwned;

pub use fake_directory::{FakeDirectory, RecordedRequest, Scripted, FAKE_BASE_URL};
pub use org_tree::{OrgFixture, OrgTree};

pub const TEST_API_TOKEN: &str = "test-api-token";
pub const TEST_MEDIA_TOKEN: &str = "test-media-token";

/// Root directory of the test-fixtures folder.
pub fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Walk up from whichever crate is running the test.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Config pointed at the fake, with millisecond backoff and no jitter.
pub fn test_config() -> OrgWalkConfig {
    let mut config = OrgWalkConfig::default();
    config.transport.base_url = FAKE_BASE_URL.to_string();
    config.transport.api_token = Some(TEST_API_TOKEN.to_string());
    config.transport.timeout_ms = 1_000;
    config.transport.backoff_base_ms = 1;
    config.transport.max_jitter_ms = 0;
    config.transport.max_backoff_ms = 20;
    config.media.media_token = Some(TEST_MEDIA_TOKEN.to_string());
    config
}
