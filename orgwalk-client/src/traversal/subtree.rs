//! Breadth-first subtree walk: "who rolls up to this person?"
//!
//! The dominant cost is API round trips, so a subordinate is only queued for
//! expansion when it reports at least one direct report. The node cap is
//! checked on every insertion; the walk stops at the insertion that fills the
//! set, dropping the rest of that batch. A walk that fills the set exactly,
//! with nothing left to admit or expand, is complete rather than truncated.

use std::collections::{HashSet, VecDeque};

use orgwalk_core::config::clamp_page_size;
use orgwalk_core::errors::{OrgWalkError, OrgWalkResult};
use orgwalk_core::models::{Entity, ReportingEdge, SubtreeResult, TraversalStats, WalkOptions};
use orgwalk_core::traits::IRecordSource;
use orgwalk_observability::events;

use super::accumulator::{Admission, NodeAccumulator};

/// Walks the reporting tree under a root entity.
pub struct SubtreeWalker<'a, R> {
    records: &'a R,
    options: WalkOptions,
}

impl<'a, R: IRecordSource> SubtreeWalker<'a, R> {
    pub fn new(records: &'a R, options: WalkOptions) -> Self {
        Self { records, options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walk from `root_key` (id or alternate key).
    ///
    /// Root lookup is best-effort: on failure the key itself is expanded.
    /// Any failed expansion fails the whole walk.
    pub async fn walk(&self, root_key: &str) -> OrgWalkResult<SubtreeResult> {
        let root_key = root_key.trim();
        if root_key.is_empty() {
            return Err(OrgWalkError::invalid_input("root_key", "must not be empty"));
        }
        if self.options.max_nodes == 0 {
            return Err(OrgWalkError::invalid_input("max_nodes", "must be at least 1"));
        }
        let page_size = clamp_page_size(self.options.page_size);

        let mut stats = TraversalStats::default();
        stats.api_calls += 1;
        let root = match self.records.get_entity(root_key).await {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(
                    root_key,
                    error = %e,
                    "root lookup failed, expanding from the given key"
                );
                None
            }
        };
        let root_id = root
            .as_ref()
            .map(|r| r.id.clone())
            .unwrap_or_else(|| root_key.to_string());

        let mut nodes = NodeAccumulator::new(self.options.max_nodes);
        let mut edges: Vec<ReportingEdge> = Vec::new();
        let mut expanded_or_queued: HashSet<String> = HashSet::from([root_id.clone()]);
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();

        queue.push_back((root_id.clone(), 0));
        stats.nodes_enqueued += 1;

        if self.options.include_manager {
            if let Some(root) = &root {
                if nodes.insert(root.clone()).must_stop()
                    && has_pending_expansion(&queue, self.options.max_depth)
                {
                    stats.truncated = true;
                    events::walk_truncated(&root_id, nodes.len(), queue.len());
                    return Ok(finish(root_id, Some(root.clone()), nodes, edges, stats));
                }
            }
        }

        while let Some((id, depth)) = queue.pop_front() {
            stats.max_depth_reached = stats.max_depth_reached.max(depth);
            if depth >= self.options.max_depth {
                continue;
            }

            let subordinates = self.records.get_direct_subordinates(&id, page_size).await?;
            stats.api_calls += 1;
            stats.nodes_expanded += 1;

            let child_depth = depth + 1;
            for (i, sub) in subordinates.iter().enumerate() {
                let superior = sub
                    .manager_id
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| id.clone());
                edges.push(ReportingEdge::new(superior, sub.id.clone()));

                let sub_id = sub.id.clone();
                let expandable = sub.has_direct_reports();
                let admission = nodes.insert(sub.clone());
                if admission.is_new() {
                    stats.max_depth_reached = stats.max_depth_reached.max(child_depth);
                }
                let cut_off = match admission {
                    Admission::Rejected => true,
                    Admission::AdmittedAtCapacity => {
                        subordinates[i + 1..].iter().any(|s| !nodes.contains(&s.id))
                            || (expandable && child_depth < self.options.max_depth)
                            || has_pending_expansion(&queue, self.options.max_depth)
                    }
                    Admission::Duplicate | Admission::Admitted => false,
                };
                if cut_off {
                    stats.truncated = true;
                    events::walk_truncated(&root_id, nodes.len(), queue.len());
                    return Ok(finish(root_id, root, nodes, edges, stats));
                }
                if admission.is_new() && expandable && expanded_or_queued.insert(sub_id.clone()) {
                    queue.push_back((sub_id, child_depth));
                    stats.nodes_enqueued += 1;
                }
            }
        }

        events::walk_completed(
            &root_id,
            nodes.len(),
            edges.len(),
            stats.api_calls,
            stats.max_depth_reached,
        );
        Ok(finish(root_id, root, nodes, edges, stats))
    }
}

/// Whether any queued entry would still be expanded.
fn has_pending_expansion(queue: &VecDeque<(String, usize)>, max_depth: usize) -> bool {
    queue.iter().any(|(_, depth)| *depth < max_depth)
}

fn finish(
    root_id: String,
    root: Option<Entity>,
    nodes: NodeAccumulator,
    edges: Vec<ReportingEdge>,
    stats: TraversalStats,
) -> SubtreeResult {
    SubtreeResult {
        root_id,
        root,
        nodes: nodes.into_nodes(),
        edges,
        stats,
    }
}
