//! # contactd-http
//!
//! HTTP transport for the contact directory.
//!
//! - [`routes::app`] builds the axum router over a
//!   [`ContactHandler`](contactd::ContactHandler).
//! - [`config::Args`] is the `contactd` binary's command line.
//!
//! ## Routes
//!
//! | Method | Path | Statuses |
//! |--------|------|----------|
//! | GET | `/contacts[?title=substr]` | 200 |
//! | POST | `/contacts` | 201, 400, 409 |
//! | GET | `/contacts/{id}` | 200, 304, 404 |
//! | PUT | `/contacts/{id}` | 201, 304, 400, 404, 412 |
//! | DELETE | `/contacts/{id}` | 200, 404, 412 |

pub mod config;
pub mod routes;

pub use config::{open_snapshot, Args, SnapshotFormat};
pub use routes::{app, ApiFailure, AppState};
