//! Common error types for Pathway Composer

use thiserror::Error;

/// Common result type for Pathway Composer infrastructure operations
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure error types shared by all Pathway Composer crates
///
/// User-input problems are never reported through this type; they are
/// validation outcomes owned by the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
