//! Search provider error types.

use std::sync::Arc;

/// Errors from a live search provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// API key or engine id not configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid start parameter.
    #[error("invalid start: must be 1-91")]
    InvalidStart,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Provider quota or rate limit exhausted.
    #[error("rate limited: quota exhausted")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::MissingCredentials("google_api_key");
        assert!(err.to_string().contains("google_api_key"));

        let err = ProviderError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
