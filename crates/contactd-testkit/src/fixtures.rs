//! Test fixtures and helpers.
//!
//! Common setup code for handler and integration tests.

use std::sync::Arc;

use contactd::{ContactHandler, HandlerConfig, Status};
use contactd_core::{Contact, ContactBody, ContactId, EntityTag, Preconditions, TagMatch};
use contactd_store::{ContactStore, MemoryStore};

/// A handler over a fresh in-memory store.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub handler: ContactHandler<MemoryStore>,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_config(HandlerConfig::default())
    }

    pub fn with_config(config: HandlerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let handler = ContactHandler::new(Arc::clone(&store), config);
        Self { store, handler }
    }

    /// A fixture whose store already holds `contacts`.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let fixture = Self::new();
        for mut contact in contacts {
            fixture
                .store
                .save(&mut contact)
                .expect("fixture contact rejected");
        }
        fixture
    }

    /// POST a contact with the given title and return its assigned id.
    pub fn create(&self, title: &str) -> ContactId {
        let outcome = self
            .handler
            .create(body(title))
            .expect("create failed");
        assert_eq!(outcome.status, Status::Created);
        outcome
            .location
            .as_deref()
            .and_then(|location| location.rsplit('/').next())
            .and_then(|id| id.parse().ok())
            .expect("created outcome without a usable Location")
    }

    /// Read a contact straight from the store.
    pub fn find(&self, id: ContactId) -> Option<Contact> {
        self.store.find(id).expect("store read failed")
    }

    /// Current tag of a stored contact.
    pub fn tag(&self, id: ContactId) -> EntityTag {
        let contact = self.find(id).expect("no such contact");
        EntityTag::of(&contact)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A request body with only a title.
pub fn body(title: &str) -> ContactBody {
    ContactBody {
        title: Some(title.to_string()),
        ..ContactBody::default()
    }
}

/// `If-Match: <tag>`.
pub fn if_match(tag: &EntityTag) -> Preconditions {
    Preconditions::none().with_if_match(TagMatch::tag(tag.clone()))
}

/// `If-None-Match: <tag>`.
pub fn if_none_match(tag: &EntityTag) -> Preconditions {
    Preconditions::none().with_if_none_match(TagMatch::tag(tag.clone()))
}

/// A tag no stored contact will ever carry.
pub fn stale_tag() -> EntityTag {
    EntityTag::strong("stale").expect("valid tag")
}

/// The directory used across the scenario tests.
pub fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("contact1", "Joe Contact", "joe@microsoft.com", "088888888").with_id(1_000_001),
        Contact::new("Acme", "Wile E. Coyote", "wile@acme.example", "555-0100").with_id(2),
        Contact::new("Globex", "Hank Scorpio", "hank@globex.example", "").with_id(3),
    ]
}
