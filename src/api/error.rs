//! api::error
//!
//! Errors from modeling API calls.

use thiserror::Error;

/// Errors from API operations.
///
/// Transport failures are split so callers can tell "nothing is listening"
/// ([`ApiError::Unreachable`]) apart from a server that answered too slowly or
/// dropped the connection ([`ApiError::Network`]).
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The base URL could not be parsed.
    #[error("invalid server URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// No connection could be established.
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The connection failed after being established (timeout, reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or the status reason
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ApiError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
