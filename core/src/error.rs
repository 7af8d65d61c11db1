//! Error types for the devops API client.
//!
//! # Design
//! The executor does not special-case any status code: every response other
//! than 200/201 becomes `RemoteRejected` with the raw status and body, so the
//! caller can inspect server-provided detail. `is_not_found` is a view over
//! that variant for callers that want to treat a vanished entity differently.
//! A successful delete whose body lacks the confirmation marker is a separate
//! `DeletionUnconfirmed` failure, distinct from transport-level rejection.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by client, executor and codec operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a status other than 200 or 201.
    #[error("HTTP {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    /// The response body is not JSON or does not fit the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encode failed: {0}")]
    Encode(String),

    /// HTTP success, but the body did not confirm the deletion.
    #[error("resource deletion not confirmed: {body}")]
    DeletionUnconfirmed { body: String },

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the server rejected the request with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::RemoteRejected { status: 404, .. })
    }

    /// True for failures that happened before any response arrived.
    ///
    /// The core never retries; this only informs the caller's policy.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout)
    }

    /// HTTP status carried by a rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
