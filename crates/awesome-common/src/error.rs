//! Common error types used throughout awesome.
//!
//! This module provides a unified error type that covers common failure cases
//! such as not found, database errors, invalid model definitions, and I/O
//! failures.

/// Common error type for awesome.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A model declaration is inconsistent (no primary key, duplicates, ...).
    #[error("Model error: {0}")]
    Model(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code that best describes this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Database(_) | Self::Model(_) | Self::Io(_) | Self::Internal(_) => 500,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
