// Single source of truth for all default values.

// --- Transport ---
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 250;
pub const DEFAULT_MAX_JITTER_MS: u64 = 250;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 30_000;
pub const DEFAULT_USER_AGENT: &str = concat!("orgwalk/", env!("CARGO_PKG_VERSION"));

// --- Pagination ---
pub const DEFAULT_PAGE_SIZE: u32 = 100;

// --- Cache ---
pub const DEFAULT_SCHEMA_TTL_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_SCHEMA_CACHE_CAPACITY: u64 = 64;
pub const MAX_SCHEMA_TTL_SECS: u64 = 365 * 24 * 60 * 60; // 1 year

// --- Traversal ---
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_MAX_NODES: usize = 5_000;
pub const DEFAULT_INCLUDE_MANAGER: bool = false;

// --- Media ---
pub const DEFAULT_MEDIA_WIDTH: u32 = 256;
pub const DEFAULT_MEDIA_HEIGHT: u32 = 256;
