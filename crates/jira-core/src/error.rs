//! Centralized error types for Jira operations.

use thiserror::Error;

/// Main error type for Jira operations.
#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx response from the tracker. `detail` is the `errorMessages`
    /// list when the body parses as JSON, otherwise the raw body text.
    #[error("Jira HTTP Error: {status}")]
    Http {
        status: u16,
        detail: serde_json::Value,
    },

    /// The request never produced an HTTP status (DNS, timeout, refused).
    #[error("Jira connection error: {0}")]
    Transport(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Result type for Jira operations.
pub type JiraResult<T> = Result<T, JiraError>;

impl JiraError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unexpected error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}
