//! Reporting-chain reconstruction from the precomputed path attribute.
//!
//! No traversal: the entity's `reporting_path` already lists its superiors
//! root-first. All superiors are fetched at once and slotted back into path
//! order, so completion order never leaks into the result.

use std::collections::HashSet;

use futures::stream::{FuturesUnordered, StreamExt};
use orgwalk_core::errors::OrgWalkResult;
use orgwalk_core::models::Entity;
use orgwalk_core::traits::IRecordSource;
use orgwalk_observability::events;

pub struct ChainResolver<'a, R> {
    records: &'a R,
}

impl<'a, R: IRecordSource> ChainResolver<'a, R> {
    pub fn new(records: &'a R) -> Self {
        Self { records }
    }

    /// Superiors of `key`, root first; the entity itself last when `include_self`.
    ///
    /// Any failed superior fetch fails the whole chain.
    pub async fn resolve(&self, key: &str, include_self: bool) -> OrgWalkResult<Vec<Entity>> {
        let entity = self.records.get_entity(key).await?;
        let path = superior_ids(&entity);

        let mut chain = self.fetch_in_path_order(&path).await?;
        events::chain_resolved(key, chain.len(), include_self);
        if include_self {
            chain.push(entity);
        }
        Ok(chain)
    }

    /// Fan out one fetch per id, join, then reorder by index.
    async fn fetch_in_path_order(&self, ids: &[String]) -> OrgWalkResult<Vec<Entity>> {
        let mut in_flight: FuturesUnordered<_> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| async move { (index, self.records.get_entity(id).await) })
            .collect();

        let mut slots: Vec<Option<Entity>> = vec![None; ids.len()];
        while let Some((index, result)) = in_flight.next().await {
            slots[index] = Some(result?);
        }
        Ok(slots.into_iter().flatten().collect())
    }
}

/// Path ids in order, with blanks, repeats, and the entity's own id removed.
pub fn superior_ids(entity: &Entity) -> Vec<String> {
    let mut seen = HashSet::new();
    entity
        .reporting_path
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty() && *id != entity.id)
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}
