//! # contactd
//!
//! A contact directory with create/read/update/delete semantics and
//! optimistic concurrency through entity tags.
//!
//! ## Overview
//!
//! - [`ContactHandler`] turns a decoded request (verb, id, precondition
//!   headers, body) into an [`Outcome`]: status, optional ETag, optional
//!   Location, optional body.
//! - [`lifecycle`] fills a store from a [`Snapshot`](store::Snapshot) before
//!   the first request and writes it back after the last.
//!
//! The transport (routing, JSON, headers) lives in `contactd-http`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use contactd::{ContactHandler, HandlerConfig, Status};
//! use contactd::core::{ContactBody, Preconditions};
//! use contactd::store::MemoryStore;
//!
//! let handler = ContactHandler::new(Arc::new(MemoryStore::new()), HandlerConfig::default());
//!
//! let body = ContactBody {
//!     title: Some("Joe".into()),
//!     ..ContactBody::default()
//! };
//! let created = handler.create(body).unwrap();
//! assert_eq!(created.status, Status::Created);
//!
//! let location = created.location.unwrap();
//! let id = location.rsplit('/').next().unwrap().parse().unwrap();
//! let fetched = handler.get(id, &Preconditions::none()).unwrap();
//! assert_eq!(fetched.etag, created.etag);
//! ```
//!
//! ## Re-exports
//!
//! - `contactd::core` - Contact, EntityTag, Preconditions
//! - `contactd::store` - ContactStore, MemoryStore, snapshot backends

pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod outcome;

pub use contactd_core as core;
pub use contactd_store as store;

pub use error::{ContactdError, Result};
pub use handler::{ContactHandler, HandlerConfig};
pub use lifecycle::{drain, populate, PopulateReport};
pub use outcome::{Body, Outcome, Status};

pub use contactd_core::{Contact, ContactBody, ContactId, EntityTag, Preconditions};
