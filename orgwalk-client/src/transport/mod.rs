//! Transport layer: one authenticated round trip with timeout and retry.

pub mod backoff;
pub mod http_client;
pub mod protocol;
pub mod reqwest_sender;

pub use backoff::RetryPolicy;
pub use http_client::{HttpClient, TransportStats};
pub use protocol::DataEnvelope;
pub use reqwest_sender::{parse_retry_after, ReqwestSender};
