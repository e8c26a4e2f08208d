//! # contactd store
//!
//! The contact store and the snapshot backends used at process boundaries.
//!
//! ## Overview
//!
//! [`ContactStore`] is the interface the request handler talks to. The only
//! implementation is [`MemoryStore`]: the directory lives in memory for the
//! life of the process. A [`Snapshot`] is read once before the first request
//! and written once after the last one.
//!
//! ## Key Types
//!
//! - [`ContactStore`] - Store operations: save, find, find by title, update, delete
//! - [`MemoryStore`] - In-memory store behind a single `RwLock`
//! - [`Snapshot`] - Async load/save of the whole collection
//! - [`JsonSnapshot`] - A JSON document on disk
//! - [`SqliteSnapshot`] - A SQLite table with a versioned schema
//! - [`MemorySnapshot`] - In-process snapshot for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contactd_core::Contact;
//! use contactd_store::{ContactStore, InsertResult, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut contact = Contact::new("Joe", "Joe Contact", "joe@example.com", "0888");
//! match store.save(&mut contact).unwrap() {
//!     InsertResult::Inserted(id) => assert_eq!(contact.id, id),
//!     InsertResult::Conflict { existing } => panic!("id {existing} taken"),
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Ids are never reused**: auto-assigned ids come from a counter that
//!   only moves forward, past every id the store has ever held.
//! - **Guarded writes**: `update_if` / `delete_if` check a caller predicate
//!   and mutate under the same lock, so conditional requests are
//!   linearizable per contact.
//! - **Copies out**: reads return clones taken under the lock; callers never
//!   observe a half-applied update.

pub mod error;
pub mod memory;
pub mod migration;
pub mod snapshot;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{JsonSnapshot, MemorySnapshot};
pub use sqlite::SqliteSnapshot;
pub use traits::{ContactStore, Guarded, InsertResult, Snapshot};
