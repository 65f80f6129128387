/// Transport-layer errors, raised once the retry budget is spent or a
/// non-retryable response is received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status} after {attempts} attempt(s): {body}")]
    Status {
        status: u16,
        body: String,
        attempts: u32,
    },

    #[error("request to {url} timed out after {timeout_ms}ms ({attempts} attempt(s))")]
    Timeout {
        url: String,
        timeout_ms: u64,
        attempts: u32,
    },

    #[error("network error after {attempts} attempt(s): {reason}")]
    Network { reason: String, attempts: u32 },

    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl TransportError {
    /// 429 and 5xx responses are worth retrying; everything else is final.
    pub fn is_transient_status(status: u16) -> bool {
        status == 429 || (500..=599).contains(&status)
    }

    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => Self::is_transient_status(*status),
            Self::Timeout { .. } | Self::Network { .. } => true,
            Self::Decode { .. } => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Number of attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Status { attempts, .. }
            | Self::Timeout { attempts, .. }
            | Self::Network { attempts, .. } => *attempts,
            Self::Decode { .. } => 1,
        }
    }
}
