//! Single-entity and one-hop subordinate lookups.

use orgwalk_core::constants::MANAGER_ID_FIELD;
use orgwalk_core::errors::{OrgWalkError, OrgWalkResult, TransportError};
use orgwalk_core::models::{Entity, FilterExpr, StructuredSearch};
use orgwalk_core::traits::{IHttpSender, IRecordSource};

use crate::endpoints::Endpoints;
use crate::search::SearchClient;
use crate::transport::{DataEnvelope, HttpClient};

/// Resolves entities over HTTP.
pub struct RecordResolver<'a, S> {
    http: &'a HttpClient<S>,
    endpoints: &'a Endpoints,
}

impl<'a, S: IHttpSender> RecordResolver<'a, S> {
    pub fn new(http: &'a HttpClient<S>, endpoints: &'a Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Fetch exactly one entity. 404 and 204 both mean not found.
    pub async fn fetch_entity(&self, key: &str) -> OrgWalkResult<Entity> {
        let key = require_key("key", key)?;
        let url = self.endpoints.entity(key);
        match self.http.get_json::<DataEnvelope<Entity>>(&url).await {
            Ok(Some(envelope)) => Ok(envelope.into_inner()),
            Ok(None) | Err(OrgWalkError::Transport(TransportError::Status { status: 404, .. })) => {
                Err(OrgWalkError::NotFound {
                    resource: "entity".to_string(),
                    key: key.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// One structured search on `managerId == entity_id`, all pages, first occurrence wins.
    ///
    /// One hop only; does not recurse.
    pub async fn fetch_direct_subordinates(
        &self,
        entity_id: &str,
        page_size: u32,
    ) -> OrgWalkResult<Vec<Entity>> {
        let entity_id = require_key("entity_id", entity_id)?;
        let search = StructuredSearch::new()
            .with_filter(FilterExpr::eq(MANAGER_ID_FIELD, entity_id))
            .with_page_size(page_size);
        let collected = SearchClient::new(self.http, self.endpoints)
            .structured_all(&search)
            .await?;
        if collected.duplicates > 0 {
            tracing::debug!(
                entity_id,
                duplicates = collected.duplicates,
                "dropped repeated subordinates across pages"
            );
        }
        Ok(collected.items)
    }
}

impl<S: IHttpSender> IRecordSource for RecordResolver<'_, S> {
    async fn get_entity(&self, key: &str) -> OrgWalkResult<Entity> {
        self.fetch_entity(key).await
    }

    async fn get_direct_subordinates(
        &self,
        entity_id: &str,
        page_size: u32,
    ) -> OrgWalkResult<Vec<Entity>> {
        self.fetch_direct_subordinates(entity_id, page_size).await
    }
}

/// Reject blank keys before any network call.
pub(crate) fn require_key<'k>(field: &str, key: &'k str) -> OrgWalkResult<&'k str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(OrgWalkError::invalid_input(field, "must not be empty"));
    }
    Ok(trimmed)
}
