//! Error types for the Genflow client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the generation service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived (network, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Service returned a non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body text from the service
        message: String,
    },

    /// Failed to parse response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Could not read a local file for upload
    #[error("Failed to read upload file: {0}")]
    FileError(String),
}

impl ClientError {
    /// Create an API error from status code and response body
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
