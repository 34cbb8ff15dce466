//! Error types for the socionet API client.
//!
//! # Design
//! Every non-2xx response collapses into `Http` with the status and a
//! human-readable message. Callers branch on `status` (401 means "show the
//! login prompt") and display `message` otherwise. Transport and decode
//! failures keep their own variants so they are never confused with server
//! answers.

use thiserror::Error;

/// Message used when a failed response carries no `message` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (offline, DNS, TLS, ...). The
    /// underlying error is kept as the source.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// HTTP status for errors that came from a server answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 and 403, i.e. the caller has no usable session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
