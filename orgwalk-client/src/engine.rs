//! `OrgDirectoryClient`, the `IOrgDirectory` implementation.
//!
//! Owns the transport, endpoint table, schema cache and media builder.
//! Resolvers and walkers are cheap borrowing views created per call.

use std::sync::Arc;

use orgwalk_core::config::OrgWalkConfig;
use orgwalk_core::errors::OrgWalkResult;
use orgwalk_core::models::{
    Entity, MediaRequest, Schema, SchemaSnapshot, SearchPage, SimpleSearch, StructuredSearch,
    SubtreeResult, WalkOptions,
};
use orgwalk_core::traits::{IHttpSender, IOrgDirectory};

use crate::cache::SchemaCache;
use crate::endpoints::Endpoints;
use crate::media::MediaUrlBuilder;
use crate::pagination::PageCollection;
use crate::resolver::{ChainResolver, RecordResolver};
use crate::search::SearchClient;
use crate::transport::{DataEnvelope, HttpClient, ReqwestSender, TransportStats};
use crate::traversal::SubtreeWalker;

/// Directory client over an [`IHttpSender`], `reqwest` by default.
pub struct OrgDirectoryClient<S = ReqwestSender> {
    config: OrgWalkConfig,
    http: HttpClient<S>,
    endpoints: Endpoints,
    schema_cache: Arc<SchemaCache>,
    media: MediaUrlBuilder,
}

impl OrgDirectoryClient<ReqwestSender> {
    /// Validate `config` and build a client over a real HTTP connection pool.
    pub fn from_config(config: OrgWalkConfig) -> OrgWalkResult<Self> {
        config.validate()?;
        let sender = ReqwestSender::new(&config.transport)?;
        Self::with_sender(config, sender)
    }
}

impl<S: IHttpSender> OrgDirectoryClient<S> {
    /// Build a client over any sender. Used by tests to inject a fake server.
    pub fn with_sender(config: OrgWalkConfig, sender: S) -> OrgWalkResult<Self> {
        config.validate()?;
        let endpoints = Endpoints::new(config.base_url())?;
        let media = MediaUrlBuilder::from_config(&config)?;
        let schema_cache = Arc::new(SchemaCache::new(&config.cache));
        let http = HttpClient::new(sender, config.transport.clone());
        Ok(Self {
            config,
            http,
            endpoints,
            schema_cache,
            media,
        })
    }

    /// Share one schema cache between several clients.
    pub fn with_schema_cache(mut self, cache: Arc<SchemaCache>) -> Self {
        self.schema_cache = cache;
        self
    }

    pub fn config(&self) -> &OrgWalkConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn schema_cache(&self) -> &Arc<SchemaCache> {
        &self.schema_cache
    }

    pub fn transport_stats(&self) -> TransportStats {
        self.http.stats()
    }

    pub fn records(&self) -> RecordResolver<'_, S> {
        RecordResolver::new(&self.http, &self.endpoints)
    }

    pub fn search(&self) -> SearchClient<'_, S> {
        SearchClient::new(&self.http, &self.endpoints)
    }

    /// Walk options from the `[traversal]` and `[pagination]` config sections.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::from_config(
            &self.config.traversal,
            self.config.pagination.effective_page_size(),
        )
    }

    /// Every page of a structured search, deduplicated by id.
    pub async fn search_all_structured(
        &self,
        search: &StructuredSearch,
    ) -> OrgWalkResult<PageCollection> {
        self.search().structured_all(search).await
    }

    async fn fetch_schema(&self) -> OrgWalkResult<Schema> {
        let envelope = self
            .http
            .get_json::<DataEnvelope<Schema>>(&self.endpoints.fields())
            .await?;
        Ok(envelope.map(DataEnvelope::into_inner).unwrap_or_default())
    }
}

impl<S: IHttpSender> IOrgDirectory for OrgDirectoryClient<S> {
    async fn get_entity(&self, key: &str) -> OrgWalkResult<Entity> {
        self.records().fetch_entity(key).await
    }

    async fn get_schema(&self, force_refresh: bool) -> OrgWalkResult<Arc<SchemaSnapshot>> {
        let tenant = self.endpoints.base().to_string();
        self.schema_cache
            .get_or_refresh(&tenant, force_refresh, || self.fetch_schema())
            .await
    }

    async fn search_simple(&self, search: &SimpleSearch) -> OrgWalkResult<SearchPage> {
        self.search().simple(search).await
    }

    async fn search_structured(&self, search: &StructuredSearch) -> OrgWalkResult<SearchPage> {
        self.search().structured(search).await
    }

    async fn get_direct_subordinates(
        &self,
        entity_id: &str,
        page_size: u32,
    ) -> OrgWalkResult<Vec<Entity>> {
        self.records()
            .fetch_direct_subordinates(entity_id, page_size)
            .await
    }

    async fn get_subtree(
        &self,
        root_key: &str,
        options: &WalkOptions,
    ) -> OrgWalkResult<SubtreeResult> {
        let records = self.records();
        SubtreeWalker::new(&records, *options)
            .walk(root_key)
            .await
    }

    async fn get_chain(&self, key: &str, include_self: bool) -> OrgWalkResult<Vec<Entity>> {
        let records = self.records();
        ChainResolver::new(&records).resolve(key, include_self).await
    }

    fn media_url(&self, request: &MediaRequest) -> OrgWalkResult<String> {
        self.media.build(request)
    }
}
