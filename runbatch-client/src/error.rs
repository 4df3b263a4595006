//! Error types for the runbatch client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the runs API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Transport failure: connect, timeout, or reading the body
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Base URL cannot be used to build request URLs
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Run id cannot be addressed as a single path segment
    #[error("Invalid run id: {0:?}")]
    InvalidRunId(String),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an unexpected-status error from status code and body
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if *status >= 500)
    }
}
