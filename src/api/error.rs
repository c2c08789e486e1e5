//! Transport-level errors.
//!
//! An `ApiError` means no usable response was obtained. HTTP error
//! statuses are not errors at this layer; they come back as a `Reply`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Route could not be turned into a URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Failed to connect or send
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// HTTP client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Multipart part could not be built
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl ApiError {
    /// Get error type string for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::Connection { .. } => "connection_error",
            ApiError::Timeout { .. } => "request_timeout",
            ApiError::Body(_) => "body_error",
            ApiError::Build(_) => "build_error",
            ApiError::InvalidUpload(_) => "invalid_upload",
        }
    }
}
