//! Caches for slow-changing directory metadata.

pub mod schema_cache;

pub use schema_cache::SchemaCache;
