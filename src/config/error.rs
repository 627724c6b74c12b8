//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Oracle timeout must be between 1 and 300 seconds")]
    InvalidOracleTimeout,

    #[error("Max retries must be at most {max}, got {actual}")]
    TooManyRetries { max: u32, actual: u32 },

    #[error("Turn timeout ({turn_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    TurnTimeoutExceedsRequest { turn_secs: u64, request_secs: u64 },

    #[error("Reply token limit must be positive")]
    InvalidTokenLimit,

    #[error("Context exchanges must be between 1 and 10, got {0}")]
    InvalidContextExchanges(usize),

    #[error("Unrecognized speech language: {0}")]
    UnknownLanguage(String),

    #[error("Fallback provider must differ from the primary provider")]
    FallbackSameAsPrimary,
}
