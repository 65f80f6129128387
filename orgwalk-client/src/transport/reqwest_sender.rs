//! Production `IHttpSender` on reqwest.

use std::time::Duration;

use chrono::{DateTime, Utc};
use orgwalk_core::config::TransportConfig;
use orgwalk_core::constants::REQUEST_ID_HEADER;
use orgwalk_core::errors::{OrgWalkResult, TransportError};
use orgwalk_core::models::{HttpMethod, HttpRequest, HttpResponse, SendError};
use orgwalk_core::traits::IHttpSender;
use reqwest::header::{ACCEPT, RETRY_AFTER};

/// Sends single attempts with a pooled reqwest client. Timeouts are enforced
/// by `HttpClient`, not here.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    http: reqwest::Client,
}

impl ReqwestSender {
    pub fn new(config: &TransportConfig) -> OrgWalkResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Network {
                reason: format!("failed to build HTTP client: {e}"),
                attempts: 0,
            })?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl IHttpSender for ReqwestSender {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, SendError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
        };
        builder = builder
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request.request_id);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_retry_after(v, Utc::now()));
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}

fn classify(error: reqwest::Error) -> SendError {
    if error.is_timeout() {
        SendError::Aborted(error.to_string())
    } else {
        SendError::Network(error.to_string())
    }
}

/// Parse a `Retry-After` value: delta-seconds or an HTTP-date.
///
/// Dates in the past yield zero. Unparseable values yield `None`.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    if let Ok(secs) = value.parse::<f64>() {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        // Out-of-range hints saturate; the retry ceiling bounds the real wait.
        return Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}
