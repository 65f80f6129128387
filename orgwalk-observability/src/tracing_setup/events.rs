//! Structured log events for key client operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// Log a retry scheduled after a transient failure.
pub fn request_retry(
    method: &str,
    url: &str,
    attempt: u32,
    max_attempts: u32,
    delay: Duration,
    reason: &str,
) {
    tracing::warn!(
        event = "request_retry",
        method = %method,
        url = %url,
        attempt = attempt,
        max_attempts = max_attempts,
        delay_ms = delay.as_millis() as u64,
        reason = %reason,
        "transient failure, retrying"
    );
}

/// Log a request that failed for good.
pub fn request_failed(method: &str, url: &str, attempts: u32, error: &str) {
    tracing::warn!(
        event = "request_failed",
        method = %method,
        url = %url,
        attempts = attempts,
        error = %error,
        "request failed"
    );
}

/// Log a schema fetch replacing the cached snapshot.
pub fn schema_refreshed(tenant: &str, fields: usize, forced: bool) {
    tracing::info!(
        event = "schema_refreshed",
        tenant = %tenant,
        fields = fields,
        forced = forced,
        "schema refreshed"
    );
}

/// Log the end of a cursor-following page sequence.
pub fn pagination_finished(pages: usize, items: usize, duplicates: usize) {
    tracing::debug!(
        event = "pagination_finished",
        pages = pages,
        items = items,
        duplicates = duplicates,
        "pagination finished"
    );
}

/// Log a subtree walk that drained its queue.
pub fn walk_completed(root_id: &str, nodes: usize, edges: usize, api_calls: usize, depth: usize) {
    tracing::info!(
        event = "walk_completed",
        root_id = %root_id,
        nodes = nodes,
        edges = edges,
        api_calls = api_calls,
        max_depth_reached = depth,
        "subtree walk completed"
    );
}

/// Log a subtree walk stopped by the node cap.
pub fn walk_truncated(root_id: &str, nodes: usize, queued: usize) {
    tracing::warn!(
        event = "walk_truncated",
        root_id = %root_id,
        nodes = nodes,
        still_queued = queued,
        "subtree walk truncated at node cap"
    );
}

/// Log a resolved reporting chain.
pub fn chain_resolved(key: &str, superiors: usize, include_self: bool) {
    tracing::debug!(
        event = "chain_resolved",
        key = %key,
        superiors = superiors,
        include_self = include_self,
        "reporting chain resolved"
    );
}
