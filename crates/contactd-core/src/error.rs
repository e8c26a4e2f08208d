//! Error types for contactd core.

use thiserror::Error;

use crate::types::ContactId;

/// Errors raised while decoding protocol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid entity tag: {0:?}")]
    InvalidEntityTag(String),

    #[error("malformed precondition header: {0}")]
    MalformedPrecondition(String),
}

/// Contact invariants rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be blank")]
    BlankTitle,

    #[error("update for contact {got} applied to contact {expected}")]
    IdMismatch { expected: ContactId, got: ContactId },
}
