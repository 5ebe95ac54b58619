//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("AI service not available: {0}")]
    ServiceUnavailable(String),

    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl LlmError {
    /// Whether the client should try the same request again
    ///
    /// Rate limits are handed back to the caller rather than retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => matches!(status, 408 | 500 | 502 | 503 | 504),
            LlmError::Network(_) | LlmError::Timeout(_) => true,
            LlmError::RateLimited { .. } | LlmError::ServiceUnavailable(_) | LlmError::InvalidResponse(_) => false,
        }
    }

    /// Whether the gateway has no client configured at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LlmError::ServiceUnavailable(_))
    }
}
