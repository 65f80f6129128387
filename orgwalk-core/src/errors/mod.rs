//! Error taxonomy for the directory client.
//!
//! `OrgWalkError` is the only error that crosses a crate boundary. Subsystem
//! errors live in their own files and convert into it via `#[from]`.

mod config_error;
mod transport_error;

pub use config_error::ConfigError;
pub use transport_error::TransportError;

/// Top-level error for every orgwalk operation.
#[derive(Debug, thiserror::Error)]
pub enum OrgWalkError {
    /// Invalid input supplied by the caller. Raised before any network call.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The directory service reported that the resource does not exist.
    #[error("{resource} not found: {key}")]
    NotFound { resource: String, key: String },

    /// The round trip failed after retries, or with a non-retryable status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service returned structurally invalid paging or payload data.
    #[error("protocol violation: {reason}")]
    Protocol { reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrgWalkError {
    /// Shorthand for a caller-error on `field`.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a not-found report from the service.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status embedded in the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type OrgWalkResult<T> = Result<T, OrgWalkError>;
