//! URL construction for the directory API.

use orgwalk_core::constants::API_PREFIX;
use orgwalk_core::errors::{ConfigError, OrgWalkResult};
use reqwest::Url;

/// Absolute endpoint URLs under one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> OrgWalkResult<Self> {
        let base = Url::parse(base_url.trim()).map_err(|e| ConfigError::InvalidValue {
            key: "transport.base_url".to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "transport.base_url".to_string(),
                reason: format!("'{base_url}' cannot carry a path"),
            }
            .into());
        }
        Ok(Self { base })
    }

    /// The base URL as configured, without trailing slash. Also the cache tenant key.
    pub fn base(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// `GET {base}/api/v1/people/{key}`; the key is percent-encoded as one segment.
    pub fn entity(&self, key: &str) -> String {
        self.join(&["people", key]).into()
    }

    /// `GET {base}/api/v1/fields`
    pub fn fields(&self) -> String {
        self.join(&["fields"]).into()
    }

    /// `POST {base}/api/v1/people/search`
    pub fn search(&self) -> String {
        self.join(&["people", "search"]).into()
    }

    /// `GET {base}/api/v1/people/search?...`
    pub fn search_with_query(&self, pairs: &[(String, String)]) -> String {
        let mut url = self.join(&["people", "search"]);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url.into()
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(API_PREFIX.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paths_under_prefix() {
        let e = Endpoints::new("https://dir.example.com/").unwrap();
        assert_eq!(e.base(), "https://dir.example.com");
        assert_eq!(e.fields(), "https://dir.example.com/api/v1/fields");
        assert_eq!(e.search(), "https://dir.example.com/api/v1/people/search");
        assert_eq!(e.entity("u-1"), "https://dir.example.com/api/v1/people/u-1");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let e = Endpoints::new("https://gw.example.com/tenant-a").unwrap();
        assert_eq!(e.fields(), "https://gw.example.com/tenant-a/api/v1/fields");
    }

    #[test]
    fn entity_key_is_one_segment() {
        let e = Endpoints::new("http://d.test").unwrap();
        let url = e.entity("a/b c");
        assert_eq!(url, "http://d.test/api/v1/people/a%2Fb%20c");
    }

    #[test]
    fn query_pairs_are_encoded() {
        let e = Endpoints::new("http://d.test").unwrap();
        let url = e.search_with_query(&[("q".into(), "ada lovelace".into())]);
        assert_eq!(url, "http://d.test/api/v1/people/search?q=ada+lovelace");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(Endpoints::new("mailto:hr@example.com").is_err());
        assert!(Endpoints::new("not a url").is_err());
    }
}
