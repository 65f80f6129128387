/// orgwalk version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest page size the directory service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Smallest meaningful page size.
pub const MIN_PAGE_SIZE: u32 = 1;

/// API prefix shared by every directory endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Header carrying the per-attempt correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Wire key of the superior identifier, used when building subordinate filters.
pub const MANAGER_ID_FIELD: &str = "managerId";
