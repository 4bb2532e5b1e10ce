//! Custom error types for translation operations

use thiserror::Error;

/// Message surfaced when the upstream answers with HTTP 429
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, your IP has been blocked by DeepL temporarily, please don't request it frequently in a short time.";

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Upstream answered 429
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Human readable explanation
        message: String,
    },

    /// Upstream answered with a status other than 200 or 429
    #[error("Upstream error: HTTP {status}")]
    UpstreamError {
        /// HTTP status code
        status: u16,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport error text
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Parse error text
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong with the configuration
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Build the rate limit error with the standard message
    pub fn rate_limited() -> Self {
        TranslationError::RateLimited {
            message: RATE_LIMIT_MESSAGE.to_string(),
        }
    }

    /// Whether the caller should back off before trying again
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TranslationError::RateLimited { .. })
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
