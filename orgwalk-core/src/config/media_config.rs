use serde::{Deserialize, Serialize};

use super::defaults;

/// Media URL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Media host. Falls back to the transport base URL when unset.
    pub base_url: Option<String>,
    /// Secondary credential, only ever embedded as a query parameter.
    pub media_token: Option<String>,
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            media_token: None,
            default_width: defaults::DEFAULT_MEDIA_WIDTH,
            default_height: defaults::DEFAULT_MEDIA_HEIGHT,
        }
    }
}
