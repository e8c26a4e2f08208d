//! Error types for the store module.

use contactd_core::ValidationError;
use thiserror::Error;

/// Errors that can occur during store and snapshot operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The contact violates a store invariant.
    #[error("invalid contact: {0}")]
    Validation(#[from] ValidationError),

    /// Every id up to `u64::MAX` has been issued.
    #[error("contact id space exhausted")]
    IdSpaceExhausted,

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Snapshot serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A blocking snapshot task failed to complete.
    #[error("background task failed: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
