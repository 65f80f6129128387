//! HTTP client with retry, exponential backoff, and per-attempt timeout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use orgwalk_core::config::TransportConfig;
use orgwalk_core::errors::{OrgWalkResult, TransportError};
use orgwalk_core::models::{HttpMethod, HttpRequest, HttpResponse};
use orgwalk_core::traits::IHttpSender;
use orgwalk_observability::events;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Snapshot of transport counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Attempts put on the wire.
    pub requests: u64,
    /// Attempts that were followed by another attempt.
    pub retries: u64,
    /// Logical calls that ended in an error.
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    retries: AtomicU64,
    failures: AtomicU64,
}

/// Retrying transport over any `IHttpSender`.
///
/// Classifies responses: 2xx is success (204 yields an empty result), 429 and
/// 5xx plus network failures and timeouts are retried, anything else fails
/// on the first attempt with status and body attached.
#[derive(Debug)]
pub struct HttpClient<S> {
    sender: S,
    config: TransportConfig,
    policy: super::RetryPolicy,
    counters: Counters,
}

impl<S: IHttpSender> HttpClient<S> {
    pub fn new(sender: S, config: TransportConfig) -> Self {
        let policy = super::RetryPolicy::from_config(&config);
        Self {
            sender,
            config,
            policy,
            counters: Counters::default(),
        }
    }

    /// Replace the retry policy derived from config.
    pub fn with_policy(mut self, policy: super::RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn stats(&self) -> TransportStats {
        TransportStats {
            requests: self.counters.requests.load(Ordering::Relaxed),
            retries: self.counters.retries.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// GET and decode JSON. `None` on 204.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> OrgWalkResult<Option<T>> {
        let response = self.execute(HttpMethod::Get, url, None).await?;
        decode(url, response)
    }

    /// POST a JSON body and decode JSON. `None` on 204.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> OrgWalkResult<Option<T>> {
        let body = serde_json::to_value(body)?;
        let response = self.execute(HttpMethod::Post, url, Some(body)).await?;
        decode(url, response)
    }

    /// Unified retry loop for any method. Returns the first 2xx response.
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, TransportError> {
        let timeout = self.config.timeout();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let request = HttpRequest {
                method,
                url: url.to_string(),
                body: body.clone(),
                bearer_token: self.config.api_token.clone(),
                request_id: uuid::Uuid::new_v4().to_string(),
            };

            self.counters.requests.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                method = method.as_str(),
                url = %url,
                attempt,
                request_id = %request.request_id,
                "sending request"
            );

            let outcome = tokio::time::timeout(timeout, self.sender.send(&request)).await;
            let (error, retry_after) = match outcome {
                Ok(Ok(response)) if response.is_success() => return Ok(response),
                Ok(Ok(response)) => {
                    let retry_after = response.retry_after;
                    (
                        TransportError::Status {
                            status: response.status,
                            body: response.body,
                            attempts: attempt,
                        },
                        retry_after,
                    )
                }
                Ok(Err(send_error)) => (
                    TransportError::Network {
                        reason: send_error.to_string(),
                        attempts: attempt,
                    },
                    None,
                ),
                Err(_elapsed) => (
                    TransportError::Timeout {
                        url: url.to_string(),
                        timeout_ms: duration_ms(timeout),
                        attempts: attempt,
                    },
                    None,
                ),
            };

            if !error.is_transient() || !self.policy.can_retry(attempt) {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                events::request_failed(method.as_str(), url, attempt, &error.to_string());
                return Err(error);
            }

            let delay = self.policy.delay_for(attempt, retry_after);
            self.counters.retries.fetch_add(1, Ordering::Relaxed);
            events::request_retry(
                method.as_str(),
                url,
                attempt,
                self.policy.max_attempts,
                delay,
                &error.to_string(),
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: HttpResponse) -> OrgWalkResult<Option<T>> {
    if response.is_no_content() || response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| {
            TransportError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
