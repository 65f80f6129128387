//! Layered configuration: TOML file, then environment overrides.

pub mod cache_config;
pub mod defaults;
pub mod media_config;
pub mod pagination_config;
pub mod transport_config;
pub mod traversal_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use media_config::MediaConfig;
pub use pagination_config::{clamp_page_size, PaginationConfig};
pub use transport_config::TransportConfig;
pub use traversal_config::TraversalConfig;

use crate::errors::{ConfigError, OrgWalkResult};

pub const ENV_BASE_URL: &str = "ORGWALK_BASE_URL";
pub const ENV_API_TOKEN: &str = "ORGWALK_API_TOKEN";
pub const ENV_MEDIA_TOKEN: &str = "ORGWALK_MEDIA_TOKEN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgWalkConfig {
    pub transport: TransportConfig,
    pub pagination: PaginationConfig,
    pub cache: CacheConfig,
    pub traversal: TraversalConfig,
    pub media: MediaConfig,
}

impl OrgWalkConfig {
    /// Parse from a TOML string. Missing sections and keys take defaults.
    pub fn from_toml(s: &str) -> OrgWalkResult<Self> {
        toml::from_str(s).map_err(|e| {
            ConfigError::ParseFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> OrgWalkResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Apply `ORGWALK_*` environment variables on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_BASE_URL) {
            self.transport.base_url = url;
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.transport.api_token = Some(token);
        }
        if let Some(token) = get(ENV_MEDIA_TOKEN) {
            self.media.media_token = Some(token);
        }
    }

    /// Reject values the client cannot run with.
    pub fn validate(&self) -> OrgWalkResult<()> {
        if self.transport.base_url.trim().is_empty() {
            return Err(invalid("transport.base_url", "must not be empty"));
        }
        if self.transport.max_attempts == 0 {
            return Err(invalid("transport.max_attempts", "must be at least 1"));
        }
        if self.transport.timeout_ms == 0 {
            return Err(invalid("transport.timeout_ms", "must be greater than 0"));
        }
        if self.traversal.max_nodes == 0 {
            return Err(invalid("traversal.max_nodes", "must be at least 1"));
        }
        if self.cache.schema_ttl_secs > defaults::MAX_SCHEMA_TTL_SECS {
            return Err(invalid("cache.schema_ttl_secs", "must be at most one year"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.transport.base_url.trim_end_matches('/')
    }

    /// Media host, defaulting to the API host.
    pub fn media_base_url(&self) -> &str {
        self.media
            .base_url
            .as_deref()
            .unwrap_or(&self.transport.base_url)
            .trim_end_matches('/')
    }
}

fn invalid(key: &str, reason: &str) -> crate::errors::OrgWalkError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
