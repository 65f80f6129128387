//! In-process fake of the directory service.
//!
//! Serves entity lookups, the field schema, and both search shapes with the
//! `{data, links, meta}` envelope and opaque `next` cursors. Faults are
//! injected per request (scripted responses, stalls, network errors) or per
//! key (failure statuses, latency).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use orgwalk_core::models::{
    Comparator, Condition, Entity, FieldDescriptor, FilterExpr, HttpMethod, HttpRequest,
    HttpResponse, SendError, StructuredSearch,
};
use orgwalk_core::traits::IHttpSender;
use reqwest::Url;
use serde_json::{json, Value};

/// Base URL the fake answers on.
pub const FAKE_BASE_URL: &str = "http://directory.test";

const DEFAULT_REQUESTED_PAGE_SIZE: usize = 100;

/// A canned outcome consumed by the next request, ahead of normal routing.
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(HttpResponse),
    Fail(SendError),
    /// Never answer.
    Stall,
}

/// One request as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
    pub request_id: String,
}

impl RecordedRequest {
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct State {
    entities: Vec<Entity>,
    fields: Vec<FieldDescriptor>,
    server_page_size: Option<usize>,
    script: VecDeque<Scripted>,
    latency: HashMap<String, Duration>,
    failures: HashMap<String, u16>,
    repeat_across_pages: bool,
    cyclic_links: bool,
    empty_as_no_content: bool,
    result_sets: Vec<Vec<Entity>>,
    log: Vec<RecordedRequest>,
}

/// Cloneable handle; clones share state, so a test keeps one handle while the
/// client owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    state: Arc<Mutex<State>>,
}

impl FakeDirectory {
    pub fn new(entities: Vec<Entity>) -> Self {
        let fake = Self::default();
        fake.lock().entities = entities;
        fake
    }

    pub fn with_fields(self, fields: Vec<FieldDescriptor>) -> Self {
        self.set_fields(fields);
        self
    }

    /// Cap every page at `size` items regardless of what the client asks for.
    pub fn with_page_size(self, size: usize) -> Self {
        self.lock().server_page_size = Some(size.max(1));
        self
    }

    /// Re-send the last item of the previous page at the start of each later page.
    pub fn repeat_across_pages(self) -> Self {
        self.lock().repeat_across_pages = true;
        self
    }

    /// Point the last page's `next` back at the first page.
    pub fn cyclic_links(self) -> Self {
        self.lock().cyclic_links = true;
        self
    }

    /// Answer empty searches with 204 instead of an empty page.
    pub fn empty_as_no_content(self) -> Self {
        self.lock().empty_as_no_content = true;
        self
    }

    /// Delay answers about `key` (entity lookups and subordinate searches).
    pub fn with_latency(self, key: &str, delay: Duration) -> Self {
        self.lock().latency.insert(key.to_string(), delay);
        self
    }

    /// Answer every request about `key` with `status`.
    pub fn fail_key(self, key: &str, status: u16) -> Self {
        self.lock().failures.insert(key.to_string(), status);
        self
    }

    /// Queue outcomes for the next requests, in order.
    pub fn script(&self, outcomes: impl IntoIterator<Item = Scripted>) {
        self.lock().script.extend(outcomes);
    }

    pub fn set_fields(&self, fields: Vec<FieldDescriptor>) {
        self.lock().fields = fields;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().log.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().log.len()
    }

    /// Requests whose path ends with `suffix`.
    pub fn count_path(&self, suffix: &str) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|r| r.path().ends_with(suffix))
            .count()
    }

    /// Subordinate searches issued for `manager_id`.
    pub fn subordinate_searches_for(&self, manager_id: &str) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|r| manager_filter(r.body.as_ref()).as_deref() == Some(manager_id))
            .count()
    }

    pub fn clear_log(&self) {
        self.lock().log.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IHttpSender for FakeDirectory {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, SendError> {
        let (scripted, delay) = {
            let mut state = self.lock();
            state.log.push(RecordedRequest {
                method: request.method,
                url: request.url.clone(),
                body: request.body.clone(),
                bearer_token: request.bearer_token.clone(),
                request_id: request.request_id.clone(),
            });
            let scripted = state.script.pop_front();
            let delay = subject(request).and_then(|key| state.latency.get(&key).copied());
            (scripted, delay)
        };

        match scripted {
            Some(Scripted::Respond(response)) => return Ok(response),
            Some(Scripted::Fail(error)) => return Err(error),
            Some(Scripted::Stall) => return std::future::pending().await,
            None => {}
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.lock().route(request))
    }
}

impl State {
    fn route(&mut self, request: &HttpRequest) -> HttpResponse {
        let Ok(url) = Url::parse(&request.url) else {
            return error_response(400, "unparseable url");
        };
        if let Some(status) = subject(request).and_then(|key| self.failures.get(&key).copied()) {
            return error_response(status, "injected failure");
        }

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.map(percent_decode).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["api", "v1", "fields"]) => {
                json_response(200, &json!({ "data": self.fields }))
            }
            (HttpMethod::Get, ["api", "v1", "people", "search"]) => self.get_search(&url),
            (HttpMethod::Post, ["api", "v1", "people", "search"]) => {
                self.post_search(request.body.as_ref())
            }
            (HttpMethod::Get, ["api", "v1", "people", key]) => {
                match self
                    .entities
                    .iter()
                    .find(|e| e.id == *key || e.email.as_deref() == Some(*key))
                {
                    Some(entity) => json_response(200, &json!({ "data": entity })),
                    None => error_response(404, "person not found"),
                }
            }
            _ => error_response(404, "no such route"),
        }
    }

    fn get_search(&mut self, url: &Url) -> HttpResponse {
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let param = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        if let Some(set) = param("cursor").and_then(|v| v.parse::<usize>().ok()) {
            let offset = param("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
            let size = param("size")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUESTED_PAGE_SIZE);
            return self.page(set, offset, size);
        }

        let query = param("q").map(str::to_lowercase);
        let filters: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(k, v)| {
                let field = k.strip_prefix("filter[")?.strip_suffix(']')?;
                Some((field, v.as_str()))
            })
            .collect();
        let requested = param("page_size")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUESTED_PAGE_SIZE);

        let matches: Vec<Entity> = self
            .entities
            .iter()
            .filter(|e| query.as_deref().map_or(true, |q| text_matches(e, q)))
            .filter(|e| {
                let doc = entity_doc(e);
                filters
                    .iter()
                    .all(|(field, value)| doc.get(*field).and_then(Value::as_str) == Some(*value))
            })
            .cloned()
            .collect();
        self.start_result_set(matches, requested)
    }

    fn post_search(&mut self, body: Option<&Value>) -> HttpResponse {
        let Some(search) = body
            .cloned()
            .and_then(|b| serde_json::from_value::<StructuredSearch>(b).ok())
        else {
            return error_response(400, "malformed search body");
        };
        let query = search.query.as_deref().map(str::to_lowercase);
        let matches: Vec<Entity> = self
            .entities
            .iter()
            .filter(|e| query.as_deref().map_or(true, |q| text_matches(e, q)))
            .filter(|e| {
                search
                    .filter
                    .as_ref()
                    .map_or(true, |f| evaluate(f, &entity_doc(e)))
            })
            .cloned()
            .collect();
        self.start_result_set(matches, search.page_size as usize)
    }

    fn start_result_set(&mut self, items: Vec<Entity>, requested: usize) -> HttpResponse {
        if items.is_empty() && self.empty_as_no_content {
            return HttpResponse::new(204, "");
        }
        let size = match self.server_page_size {
            Some(cap) => requested.clamp(1, cap),
            None => requested.max(1),
        };
        self.result_sets.push(items);
        self.page(self.result_sets.len() - 1, 0, size)
    }

    fn page(&self, set: usize, offset: usize, size: usize) -> HttpResponse {
        let Some(all) = self.result_sets.get(set) else {
            return error_response(404, "unknown cursor");
        };
        let size = size.max(1);
        let start = offset.min(all.len());
        let end = (start + size).min(all.len());

        let mut items: Vec<Entity> = all[start..end].to_vec();
        if self.repeat_across_pages && start > 0 {
            items.insert(0, all[start - 1].clone());
        }

        let next = if end < all.len() {
            Some(cursor_link(set, end, size))
        } else if self.cyclic_links && start > 0 {
            Some(cursor_link(set, 0, size))
        } else {
            None
        };
        let total_pages = all.len().div_ceil(size).max(1);

        json_response(
            200,
            &json!({
                "data": items,
                "links": {
                    "self": cursor_link(set, start, size),
                    "next": next,
                },
                "meta": {
                    "page": start / size + 1,
                    "totalPages": total_pages,
                    "pageSize": size,
                    "length": end - start,
                    "totalLength": all.len(),
                }
            }),
        )
    }
}

fn cursor_link(set: usize, offset: usize, size: usize) -> String {
    format!("{FAKE_BASE_URL}/api/v1/people/search?cursor={set}&offset={offset}&size={size}")
}

fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string())
}

fn error_response(status: u16, message: &str) -> HttpResponse {
    json_response(status, &json!({ "error": message }))
}

/// The entity a request is about: the lookup key, or the manager of a
/// subordinate search.
fn subject(request: &HttpRequest) -> Option<String> {
    if let Some(manager) = manager_filter(request.body.as_ref()) {
        return Some(manager);
    }
    let url = Url::parse(&request.url).ok()?;
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        ["api", "v1", "people", key] if *key != "search" => Some(percent_decode(key)),
        _ => None,
    }
}

fn manager_filter(body: Option<&Value>) -> Option<String> {
    let filter = body?.get("filter")?;
    let condition: Condition = serde_json::from_value(filter.clone()).ok()?;
    (condition.field == "managerId" && condition.comparator == Comparator::Eq)
        .then(|| condition.value.as_str().map(str::to_string))
        .flatten()
}

fn entity_doc(entity: &Entity) -> Value {
    serde_json::to_value(entity).unwrap_or(Value::Null)
}

fn text_matches(entity: &Entity, needle: &str) -> bool {
    entity.name.to_lowercase().contains(needle)
        || entity.id.to_lowercase().contains(needle)
        || entity
            .email
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(needle))
}

fn evaluate(expr: &FilterExpr, doc: &Value) -> bool {
    match expr {
        FilterExpr::And { and } => and.iter().all(|e| evaluate(e, doc)),
        FilterExpr::Or { or } => or.iter().any(|e| evaluate(e, doc)),
        FilterExpr::Not { not } => !evaluate(not, doc),
        FilterExpr::Condition(c) => {
            let actual = doc.get(&c.field).filter(|v| !v.is_null());
            match c.comparator {
                Comparator::Exists => actual.is_some(),
                Comparator::Eq => actual == Some(&c.value),
                Comparator::Ne => actual != Some(&c.value),
                Comparator::In => c
                    .value
                    .as_array()
                    .is_some_and(|vs| actual.is_some_and(|a| vs.contains(a))),
                Comparator::Contains => match (actual.and_then(Value::as_str), c.value.as_str()) {
                    (Some(a), Some(n)) => a.contains(n),
                    _ => false,
                },
                Comparator::Gt | Comparator::Gte | Comparator::Lt | Comparator::Lte => {
                    match (actual.and_then(Value::as_f64), c.value.as_f64()) {
                        (Some(a), Some(b)) => match c.comparator {
                            Comparator::Gt => a > b,
                            Comparator::Gte => a >= b,
                            Comparator::Lt => a < b,
                            _ => a <= b,
                        },
                        _ => false,
                    }
                }
            }
        }
    }
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let byte = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = byte {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
