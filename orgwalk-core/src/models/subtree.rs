//! Subtree walk options and results.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::config::{clamp_page_size, TraversalConfig};
use crate::constants::MAX_PAGE_SIZE;

/// Caps and flags for a single walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Nodes dequeued at this depth are recorded but not expanded.
    pub max_depth: usize,
    /// Node set capacity. Reaching it stops the walk with `truncated = true`.
    pub max_nodes: usize,
    /// Seed the node set with the root entity.
    pub include_manager: bool,
    pub page_size: u32,
}

impl WalkOptions {
    pub fn new(max_depth: usize, max_nodes: usize) -> Self {
        Self {
            max_depth,
            max_nodes,
            ..Self::default()
        }
    }

    pub fn from_config(config: &TraversalConfig, page_size: u32) -> Self {
        Self {
            max_depth: config.max_depth,
            max_nodes: config.max_nodes,
            include_manager: config.include_manager,
            page_size: clamp_page_size(page_size),
        }
    }

    pub fn include_manager(mut self, include: bool) -> Self {
        self.include_manager = include;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::from_config(&TraversalConfig::default(), MAX_PAGE_SIZE)
    }
}

/// A (superior, subordinate) pair observed during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportingEdge {
    pub superior_id: String,
    pub subordinate_id: String,
}

impl ReportingEdge {
    pub fn new(superior_id: impl Into<String>, subordinate_id: impl Into<String>) -> Self {
        Self {
            superior_id: superior_id.into(),
            subordinate_id: subordinate_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_expanded: usize,
    pub nodes_enqueued: usize,
    /// Record Resolver calls, including the root lookup.
    pub api_calls: usize,
    pub max_depth_reached: usize,
    /// The node cap stopped the walk before the queue drained.
    pub truncated: bool,
}

/// Bounded set of descendants of a root entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtreeResult {
    /// Id the walk expanded from. The caller's key when root lookup failed.
    pub root_id: String,
    pub root: Option<Entity>,
    /// Discovered entities, in breadth-first discovery order.
    pub nodes: Vec<Entity>,
    pub edges: Vec<ReportingEdge>,
    pub stats: TraversalStats,
}

impl SubtreeResult {
    pub fn truncated(&self) -> bool {
        self.stats.truncated
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn edge_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|e| (e.superior_id.as_str(), e.subordinate_id.as_str()))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}
