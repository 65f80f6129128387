//! IOrgDirectory: the interface presentation and routing layers call into.

use std::sync::Arc;

use crate::errors::OrgWalkResult;
use crate::models::{
    Entity, MediaRequest, SchemaSnapshot, SearchPage, SimpleSearch, StructuredSearch,
    SubtreeResult, WalkOptions,
};

/// Read-only access to a remote organizational directory.
#[allow(async_fn_in_trait)]
pub trait IOrgDirectory: Send + Sync {
    /// Fetch one entity by id or email-like key.
    async fn get_entity(&self, key: &str) -> OrgWalkResult<Entity>;

    /// The org field schema, served from cache unless stale or `force_refresh`.
    async fn get_schema(&self, force_refresh: bool) -> OrgWalkResult<Arc<SchemaSnapshot>>;

    /// One page of a query-parameter search.
    async fn search_simple(&self, search: &SimpleSearch) -> OrgWalkResult<SearchPage>;

    /// One page of a structured-body search.
    async fn search_structured(&self, search: &StructuredSearch) -> OrgWalkResult<SearchPage>;

    /// All immediate subordinates of `entity_id`, deduplicated.
    async fn get_direct_subordinates(
        &self,
        entity_id: &str,
        page_size: u32,
    ) -> OrgWalkResult<Vec<Entity>>;

    /// Bounded breadth-first walk of the reporting tree under `root_key`.
    async fn get_subtree(&self, root_key: &str, options: &WalkOptions)
        -> OrgWalkResult<SubtreeResult>;

    /// Superiors of `key` from the org root down, optionally followed by the entity.
    async fn get_chain(&self, key: &str, include_self: bool) -> OrgWalkResult<Vec<Entity>>;

    /// Build a media asset URL. Performs no I/O.
    fn media_url(&self, request: &MediaRequest) -> OrgWalkResult<String>;
}
