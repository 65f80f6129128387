use crate::models::{HttpRequest, HttpResponse, SendError};

/// Sends exactly one HTTP attempt.
///
/// Implementations do not retry and do not classify statuses; every HTTP
/// response, including 4xx/5xx, is returned as `Ok`.
#[allow(async_fn_in_trait)]
pub trait IHttpSender: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, SendError>;
}
