//! # contactd testkit
//!
//! Testing utilities for contactd.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: Proptest strategies for contacts and request bodies
//! - **Fixtures**: A handler over a fresh store, with helpers for the common
//!   create/tag/precondition steps
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use contactd_testkit::generators::ContactParams;
//! use contactd::EntityTag;
//!
//! proptest! {
//!     #[test]
//!     fn tag_is_stable(params: ContactParams) {
//!         let contact = params.to_contact();
//!         prop_assert_eq!(EntityTag::of(&contact), EntityTag::of(&contact));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use contactd_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let joe = fixture.create("contact1");
//! assert!(fixture.find(joe).is_some());
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_contacts, TestFixture};
pub use generators::{contact_body, ContactParams};
