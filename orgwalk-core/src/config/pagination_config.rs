use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Pagination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size requested from the service. Clamped to [1, 100] on use.
    pub page_size: u32,
}

impl PaginationConfig {
    /// The configured page size, clamped to the service limits.
    pub fn effective_page_size(&self) -> u32 {
        clamp_page_size(self.page_size)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Clamp a requested page size into the range the service accepts.
pub fn clamp_page_size(requested: u32) -> u32 {
    requested.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}
