//! Errors shared by every oracle port.

use crate::domain::dialogue::DialogueErrorKind;

/// Failure modes of an external inference service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Service is unavailable (5xx, model loading, ...).
    #[error("oracle unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or token was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response parsed but violates the oracle contract.
    #[error("malformed output: {0}")]
    MalformedOutput(String),

    /// The request was rejected as invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl OracleError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a malformed output error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(timeout: std::time::Duration) -> Self {
        Self::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OracleError::RateLimited { .. }
                | OracleError::Unavailable { .. }
                | OracleError::Network(_)
                | OracleError::Timeout { .. }
        )
    }

    /// Returns true if the oracle answered, but not in the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, OracleError::Parse(_) | OracleError::MalformedOutput(_))
    }
}

impl From<&OracleError> for DialogueErrorKind {
    fn from(err: &OracleError) -> Self {
        if err.is_malformed() {
            DialogueErrorKind::OracleMalformedOutput
        } else {
            DialogueErrorKind::OracleUnavailable
        }
    }
}
