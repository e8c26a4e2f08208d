//! Error types for contactd.
//!
//! Request outcomes such as 404 or 412 are not errors: they are ordinary
//! [`Outcome`](crate::Outcome)s. These variants cover failures of the
//! machinery underneath.

use contactd_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactdError {
    /// The contact store failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Loading or writing the snapshot failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[source] StoreError),
}

/// Result type for contactd operations.
pub type Result<T> = std::result::Result<T, ContactdError>;
