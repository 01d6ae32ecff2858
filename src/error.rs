//! Error types for the Kudos scoring and payout pipeline
//!
//! This module provides comprehensive error handling using thiserror for
//! structured error definitions and anyhow for error propagation.

use thiserror::Error;

/// Main error type for Kudos operations
#[derive(Error, Debug)]
pub enum KudosError {
    /// Part-of-speech tagging backend could not produce tags
    #[error("Tagging unavailable: {0}")]
    TaggingUnavailable(String),

    /// Incentive input outside the accepted score range
    #[error("Invalid score: {0} (must be between 1 and 100)")]
    InvalidScore(f64),

    /// Payout could not be written or settled
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Relayer transaction was not confirmed in time
    #[error("Confirmation timeout: transaction {transaction_id} not confirmed after {waited_secs}s")]
    ConfirmationTimeout {
        transaction_id: String,
        waited_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// MCP protocol error
    #[error("MCP protocol error: {0}")]
    McpProtocol(String),

    /// Input failed validation (empty fields, malformed amounts)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl KudosError {
    /// Whether the error was caused by the caller's input rather than a backend
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KudosError::InvalidScore(_) | KudosError::ValidationError(_)
        )
    }
}

/// Result type alias for Kudos operations
pub type Result<T> = std::result::Result<T, KudosError>;

/// Convert anyhow::Error to KudosError
impl From<anyhow::Error> for KudosError {
    fn from(err: anyhow::Error) -> Self {
        KudosError::Other(err.to_string())
    }
}
