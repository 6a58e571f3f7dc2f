//! Error types for radiomap
//!
//! Defines the service error type using thiserror for clear error propagation.
//! HTTP handlers carry their own response error enums; this type covers the
//! database, configuration, and startup paths.

use thiserror::Error;

/// Service result type
pub type Result<T> = std::result::Result<T, Error>;

/// Service error type
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
