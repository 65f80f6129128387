//! Org schema cache with a fixed TTL.
//!
//! Uses `moka::sync::Cache` keyed by tenant. Each entry is an immutable
//! `Arc<SchemaSnapshot>` that is swapped as a whole on refresh, so readers
//! never see a half-updated schema. Concurrent refreshes are allowed and the
//! last one wins. Tracks hits/misses/refreshes.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use orgwalk_core::config::CacheConfig;
use orgwalk_core::errors::OrgWalkResult;
use orgwalk_core::models::{Schema, SchemaSnapshot};
use orgwalk_observability::events;

/// Per-tenant schema snapshots.
pub struct SchemaCache {
    cache: Cache<String, Arc<SchemaSnapshot>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    refreshes: AtomicU64,
}

impl SchemaCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::build(config.schema_ttl(), config.max_tenants)
    }

    /// A cache with the given TTL and default capacity.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::build(ttl, CacheConfig::default().max_tenants)
    }

    fn build(ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity.max(1))
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The fresh snapshot for `tenant`, if any.
    pub fn cached(&self, tenant: &str) -> Option<Arc<SchemaSnapshot>> {
        match self.cache.get(tenant) {
            Some(snapshot) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(snapshot)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Serve from cache unless stale or `force_refresh`; otherwise run `fetch`
    /// and swap in the result.
    ///
    /// A failed fetch leaves the previous snapshot untouched.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        tenant: &str,
        force_refresh: bool,
        fetch: F,
    ) -> OrgWalkResult<Arc<SchemaSnapshot>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = OrgWalkResult<Schema>>,
    {
        if !force_refresh {
            if let Some(snapshot) = self.cached(tenant) {
                return Ok(snapshot);
            }
        }
        let schema = fetch().await?;
        let fields = schema.len();
        let snapshot = self.replace(tenant, schema);
        events::schema_refreshed(tenant, fields, force_refresh);
        Ok(snapshot)
    }

    /// Install a new snapshot for `tenant`, replacing any existing one.
    pub fn replace(&self, tenant: &str, schema: Schema) -> Arc<SchemaSnapshot> {
        let snapshot = Arc::new(SchemaSnapshot::new(schema));
        self.cache.insert(tenant.to_string(), Arc::clone(&snapshot));
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        snapshot
    }

    /// Drop the snapshot for one tenant.
    pub fn invalidate(&self, tenant: &str) {
        self.cache.invalidate(tenant);
    }

    /// Drop every snapshot.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of snapshots installed so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
