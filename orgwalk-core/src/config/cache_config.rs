use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Schema cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a fetched schema stays fresh (seconds).
    pub schema_ttl_secs: u64,
    /// Number of tenants whose schemas are held at once.
    pub max_tenants: u64,
}

impl CacheConfig {
    pub fn schema_ttl(&self) -> Duration {
        Duration::from_secs(self.schema_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            schema_ttl_secs: defaults::DEFAULT_SCHEMA_TTL_SECS,
            max_tenants: defaults::DEFAULT_SCHEMA_CACHE_CAPACITY,
        }
    }
}
