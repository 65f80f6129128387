use crate::errors::OrgWalkResult;
use crate::models::Entity;

/// Single-entity and one-hop lookups. The subtree walker and chain resolver
/// are written against this seam.
#[allow(async_fn_in_trait)]
pub trait IRecordSource: Send + Sync {
    /// Fetch one entity by id or alternate key.
    async fn get_entity(&self, key: &str) -> OrgWalkResult<Entity>;

    /// Immediate subordinates of `entity_id`, all pages, deduplicated by id.
    async fn get_direct_subordinates(
        &self,
        entity_id: &str,
        page_size: u32,
    ) -> OrgWalkResult<Vec<Entity>>;
}
