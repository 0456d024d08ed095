//! Error types for the storage layer.

use jobtrack_core::{JobId, JobStatusParseError, UserId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver error (connection, query, deserialization).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Job not found.
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A user with this username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUser(String),

    /// Stored job status string could not be parsed.
    #[error("invalid stored status: {0}")]
    InvalidStatus(#[from] JobStatusParseError),

    /// BSON serialization error.
    #[error("bson serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
