//! Secrets Manager error types using thiserror 2.0.
//!
//! Every operation reports failure through [`SecretsManagerError`]. When the
//! server did answer, the raw response travels with the error so callers can
//! inspect status and body.

use sdk_core::{CoreError, DetailedResponse};
use thiserror::Error;

/// Errors surfaced by the SDK.
#[derive(Error, Debug)]
pub enum SecretsManagerError {
    /// A required option was empty, or a value failed a client-side check
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A JSON document did not match the expected schema
    #[error("Schema mismatch at '{path}': {message}")]
    SchemaMismatch {
        /// JSON pointer to the offending value
        path: String,
        /// What was wrong with it
        message: String,
        /// The response whose body failed to decode, if any
        response: Option<Box<DetailedResponse>>,
    },

    /// The transport failed or the server answered with a non-2xx status
    #[error(transparent)]
    Transport(CoreError),

    /// The caller's context fired before the exchange completed
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

/// Result type for Secrets Manager operations.
pub type SecretsManagerResult<T> = Result<T, SecretsManagerError>;

impl SecretsManagerError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a schema mismatch error for the value at `path`.
    #[must_use]
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            message: message.into(),
            response: None,
        }
    }

    /// Attach the response whose body produced this error.
    #[must_use]
    pub fn with_response(self, response: DetailedResponse) -> Self {
        match self {
            Self::SchemaMismatch { path, message, .. } => Self::SchemaMismatch {
                path,
                message,
                response: Some(Box::new(response)),
            },
            other => other,
        }
    }

    /// The server's response, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&DetailedResponse> {
        match self {
            Self::SchemaMismatch { response, .. } => response.as_deref(),
            Self::Transport(err) => err.response(),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }

    /// Check if the failed operation may succeed when retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl From<CoreError> for SecretsManagerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => Self::InvalidArgument(msg),
            CoreError::Cancelled(msg) => Self::Cancelled(msg),
            other => Self::Transport(other),
        }
    }
}
