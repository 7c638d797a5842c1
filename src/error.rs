//! Error types for the broker response core.
//!
//! Protocol-level validation failures are not represented here: the wire
//! contract for those is a human-readable reason carried inside a
//! `BadRequest` status code, so validation routines return
//! `Result<(), String>` instead. `BrokerError` covers the operational
//! surface of the crate (configuration and logging setup).

use thiserror::Error;

/// Operational errors for embedding services
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging setup error: {0}")]
    LoggingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
