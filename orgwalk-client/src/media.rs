//! Media asset URL construction. Pure: builds references, never fetches.
//!
//! The media credential is a separate trust domain from the API bearer token.
//! It only ever appears as a `token` query parameter, and only on request.

use orgwalk_core::config::OrgWalkConfig;
use orgwalk_core::constants::API_PREFIX;
use orgwalk_core::errors::{ConfigError, OrgWalkError, OrgWalkResult};
use orgwalk_core::models::MediaRequest;
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct MediaUrlBuilder {
    base: Url,
    media_token: Option<String>,
    default_width: u32,
    default_height: u32,
}

impl MediaUrlBuilder {
    pub fn from_config(config: &OrgWalkConfig) -> OrgWalkResult<Self> {
        let raw = config.media_base_url();
        let base = Url::parse(raw)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "media.base_url".to_string(),
                reason: format!("'{raw}' is not a usable base URL"),
            })?;
        Ok(Self {
            base,
            media_token: config.media.media_token.clone(),
            default_width: config.media.default_width,
            default_height: config.media.default_height,
        })
    }

    /// `{base}/api/v1/media/{kind}/{entity_id}?variant=..&w=..&h=..[&token=..]`
    pub fn build(&self, request: &MediaRequest) -> OrgWalkResult<String> {
        let entity_id = request.entity_id.trim();
        if entity_id.is_empty() {
            return Err(OrgWalkError::invalid_input("entity_id", "must not be empty"));
        }
        let width = request.width.unwrap_or(self.default_width);
        let height = request.height.unwrap_or(self.default_height);
        if width == 0 || height == 0 {
            return Err(OrgWalkError::invalid_input(
                "dimensions",
                format!("{width}x{height} must be non-zero"),
            ));
        }

        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(API_PREFIX.split('/').filter(|s| !s.is_empty()));
            path.extend(["media", request.kind.as_str(), entity_id]);
        }
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("variant", request.variant.as_str())
                .append_pair("w", &width.to_string())
                .append_pair("h", &height.to_string());
            if request.embed_credential {
                if let Some(token) = &self.media_token {
                    query.append_pair("token", token);
                }
            }
        }
        Ok(url.into())
    }
}
