//! Error types for the venue booking API client

use thiserror::Error;

/// Errors that can occur when interacting with the venue booking API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// API base URL is not configured
    #[error("API base URL is not defined; check your environment variables")]
    MissingBaseUrl,

    /// API key is not configured
    #[error("API key is not defined; check your environment variables")]
    MissingApiKey,

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - missing or invalid credential
    #[error("Unauthorized - missing or invalid credential")]
    Unauthorized,

    /// Rate limited - too many requests
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API, or the raw body when unparseable
        message: String,
    },
}

impl ApiError {
    /// Whether the error indicates a missing or rejected credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Pull a human-readable message out of an API error body.
///
/// The API reports errors as `{"message": ...}` or `{"errors": [{"message":
/// ...}]}`; anything else falls back to the raw body.
#[must_use]
pub(crate) fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorEntry {
        message: String,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        errors: Option<Vec<ErrorEntry>>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
        if let Some(first) = parsed.errors.and_then(|mut e| {
            if e.is_empty() {
                None
            } else {
                Some(e.remove(0))
            }
        }) {
            return first.message;
        }
    }

    body.to_string()
}
