//! # contactd core
//!
//! Pure primitives for the contact directory: the [`Contact`] record, the
//! entity-tag derivation, and the conditional-request rules that decide how
//! `If-Match` / `If-None-Match` interact with reads and writes.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`Contact`] - A directory entry, equal to another contact iff the ids match
//! - [`ContactId`] - Store-assigned identifier (0 means unassigned)
//! - [`ContactBody`] - A decoded request body, every field optional
//! - [`EntityTag`] - Opaque version token derived from a contact's fields
//! - [`Preconditions`] - Parsed `If-Match` / `If-None-Match` headers
//!
//! ## Entity tags
//!
//! Tags are never stored. They are recomputed from the current field values
//! on every read and after every mutation; see [`etag`].

pub mod contact;
pub mod error;
pub mod etag;
pub mod precondition;
pub mod types;
pub mod validation;

pub use contact::{Contact, ContactBody};
pub use error::{CoreError, ValidationError};
pub use etag::EntityTag;
pub use precondition::{Preconditions, ReadDecision, TagMatch, WriteDecision};
pub use types::ContactId;
pub use validation::{is_blank, validate_contact};
