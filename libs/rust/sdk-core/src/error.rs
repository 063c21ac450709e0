//! Centralized error type for the transport layer.
//!
//! Every failure that can happen between handing a request to the service
//! handle and receiving its bytes back is expressed as a [`CoreError`], with
//! built-in retryability classification used by the retry policy.

use crate::response::DetailedResponse;
use thiserror::Error;

/// Common error type for transport operations.
///
/// All errors are classified as either retryable or non-retryable,
/// which helps the retry policy decide whether to resend a request.
#[derive(Error, Debug)]
pub enum CoreError {
    /// HTTP request could not be built or sent
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Service is temporarily unreachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Rate limit exceeded
    #[error("Rate limited")]
    RateLimited,

    /// Timeout occurred
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status
    #[error("HTTP status {status_code}: {message}")]
    Status {
        /// Status code returned by the server
        status_code: u16,
        /// Message extracted from the error body, or the canonical reason
        message: String,
        /// The full response, kept for diagnostics
        response: Box<DetailedResponse>,
    },

    /// The caller's context fired before the exchange completed
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for transport operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Check if this error is retryable.
    ///
    /// Retryable errors are transient failures that may succeed on retry,
    /// such as network issues, rate limiting, or gateway errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdk_core::CoreError;
    ///
    /// let err = CoreError::RateLimited;
    /// assert!(err.is_retryable());
    ///
    /// let err = CoreError::InvalidInput("id".to_string());
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::RateLimited | Self::Timeout(_) => true,
            Self::Status { status_code, .. } => {
                matches!(*status_code, 429 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an unavailable error with the given message.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an authentication failed error.
    #[must_use]
    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthFailed(msg.into())
    }

    /// Build a status error from a non-2xx response.
    #[must_use]
    pub fn status(response: DetailedResponse) -> Self {
        let message = response.error_message();
        Self::Status {
            status_code: response.status_code,
            message,
            response: Box::new(response),
        }
    }

    /// The response that accompanied this error, if the server answered.
    #[must_use]
    pub fn response(&self) -> Option<&DetailedResponse> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
