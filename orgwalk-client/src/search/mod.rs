//! Entity search in both wire shapes.

use orgwalk_core::errors::OrgWalkResult;
use orgwalk_core::models::{SearchPage, SimpleSearch, StructuredSearch};
use orgwalk_core::traits::IHttpSender;

use crate::endpoints::Endpoints;
use crate::pagination::{PageCollection, Paginator};
use crate::transport::HttpClient;

/// Issues search calls. A 204 reads as an empty last page.
pub struct SearchClient<'a, S> {
    http: &'a HttpClient<S>,
    endpoints: &'a Endpoints,
}

impl<'a, S: IHttpSender> SearchClient<'a, S> {
    pub fn new(http: &'a HttpClient<S>, endpoints: &'a Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// First page of a query-parameter search.
    pub async fn simple(&self, search: &SimpleSearch) -> OrgWalkResult<SearchPage> {
        let url = self.endpoints.search_with_query(&search.to_query_pairs());
        Ok(self.http.get_json::<SearchPage>(&url).await?.unwrap_or_default())
    }

    /// First page of a structured-body search. Filter shape is checked before sending.
    pub async fn structured(&self, search: &StructuredSearch) -> OrgWalkResult<SearchPage> {
        search.validate()?;
        let body = search.normalized();
        Ok(self
            .http
            .post_json::<_, SearchPage>(&self.endpoints.search(), &body)
            .await?
            .unwrap_or_default())
    }

    /// Every page of a structured search, deduplicated by id.
    pub async fn structured_all(&self, search: &StructuredSearch) -> OrgWalkResult<PageCollection> {
        let first = self.structured(search).await?;
        Paginator::new(self.http).collect_unique(first).await
    }

    /// Every page of a query-parameter search, deduplicated by id.
    pub async fn simple_all(&self, search: &SimpleSearch) -> OrgWalkResult<PageCollection> {
        let first = self.simple(search).await?;
        Paginator::new(self.http).collect_unique(first).await
    }
}
