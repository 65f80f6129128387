use serde::{Deserialize, Serialize};

use super::defaults;

/// Default caps for subtree walks. Callers may override per walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub max_depth: usize,
    pub max_nodes: usize,
    /// Whether the root entity is seeded into the node set.
    pub include_manager: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::DEFAULT_MAX_DEPTH,
            max_nodes: defaults::DEFAULT_MAX_NODES,
            include_manager: defaults::DEFAULT_INCLUDE_MANAGER,
        }
    }
}
