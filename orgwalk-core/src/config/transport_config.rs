use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Directory service base URL, without trailing slash.
    pub base_url: String,
    /// Bearer credential sent on every API request.
    pub api_token: Option<String>,
    /// Per-attempt timeout (milliseconds).
    pub timeout_ms: u64,
    /// Total attempts per logical request, including the first.
    pub max_attempts: u32,
    /// Base unit for exponential backoff (milliseconds).
    pub backoff_base_ms: u64,
    /// Upper bound of the random jitter added to each backoff (milliseconds).
    pub max_jitter_ms: u64,
    /// Ceiling for any single backoff, including server-supplied retry-after.
    pub max_backoff_ms: u64,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            backoff_base_ms: defaults::DEFAULT_BACKOFF_BASE_MS,
            max_jitter_ms: defaults::DEFAULT_MAX_JITTER_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
        }
    }
}
