//! API client configuration.
//!
//! Configuration values are provided by the application or read from the
//! environment; nothing is hardcoded.

use crate::error::ApiError;

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "VENUEBOOK_API_BASE_URL";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "VENUEBOOK_API_KEY";

/// Venue booking API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., `https://api.example.com/v2`).
    ///
    /// Stored without a trailing slash; endpoint paths are appended as-is.
    pub base_url: String,

    /// API key sent as the `X-API-Key` header on every request.
    pub api_key: String,
}

impl ApiConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingBaseUrl`] / [`ApiError::MissingApiKey`] if
    /// the corresponding environment variable is unset or empty.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::MissingBaseUrl)?;
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ApiError::MissingApiKey)?;

        Ok(Self::new(base_url, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ApiConfig::new("https://api.example.com/v2///", "key");
        assert_eq!(config.base_url, "https://api.example.com/v2");
    }
}
