//! Contact: the single resource held by the directory.
//!
//! `title` is the text shown for a contact in a list (a nickname or a
//! company name) and is the field searched by title queries.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;
use crate::types::ContactId;
use crate::validation::is_blank;

/// A directory entry.
///
/// Equality and hashing consider only the id: two contacts with the same id
/// are the same resource even if their other fields differ.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: ContactId,
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

impl Contact {
    /// Create an unassigned contact.
    pub fn new(
        title: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: ContactId::UNASSIGNED,
            title: title.into(),
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Builder-style id override.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ContactId::new(id);
        self
    }

    /// Apply an update in place.
    ///
    /// The title is kept when the update's title is blank, since an entry
    /// without a title cannot be displayed. Every other field is overwritten,
    /// so an empty string clears it.
    pub fn apply_update(&mut self, update: &Contact) -> Result<(), ValidationError> {
        if update.id.is_assigned() && update.id != self.id {
            return Err(ValidationError::IdMismatch {
                expected: self.id,
                got: update.id,
            });
        }
        if !is_blank(&update.title) {
            self.title.clone_from(&update.title);
        }
        self.name.clone_from(&update.name);
        self.email.clone_from(&update.email);
        self.phone_number.clone_from(&update.phone_number);
        Ok(())
    }

    /// Whether every field (not only the id) matches.
    pub fn same_fields(&self, other: &Contact) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.name == other.name
            && self.email == other.email
            && self.phone_number == other.phone_number
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A decoded request body.
///
/// Every field may be missing or `null`; the handler decides how missing
/// values are defaulted for each verb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    #[serde(default)]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phone")]
    pub phone_number: Option<String>,
}

impl ContactBody {
    /// Build a contact, defaulting every missing field to the empty string
    /// and a missing id to unassigned.
    pub fn into_contact(self) -> Contact {
        Contact {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
        }
    }
}

impl From<Contact> for ContactBody {
    fn from(contact: Contact) -> Self {
        Self {
            id: Some(contact.id),
            title: Some(contact.title),
            name: Some(contact.name),
            email: Some(contact.email),
            phone_number: Some(contact.phone_number),
        }
    }
}
