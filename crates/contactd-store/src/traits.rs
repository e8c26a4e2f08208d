//! Store and snapshot traits.
//!
//! [`ContactStore`] is synchronous: every operation is a short critical
//! section over in-memory state. [`Snapshot`] is async because it touches
//! the filesystem or a database.

use async_trait::async_trait;
use contactd_core::{Contact, ContactId};

use crate::error::Result;

/// Result of saving a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The contact was stored under this id.
    Inserted(ContactId),
    /// A contact with the requested id already exists; nothing changed.
    Conflict {
        /// The id that is already taken.
        existing: ContactId,
    },
}

/// Result of a guarded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded {
    /// No contact with that id.
    Missing,
    /// The guard rejected the current contact; nothing changed.
    Refused,
    /// The write was applied. Carries the contact as updated, or as it was
    /// just before removal.
    Applied(Contact),
}

impl Guarded {
    pub fn is_applied(&self) -> bool {
        matches!(self, Guarded::Applied(_))
    }
}

/// The ContactStore trait: the directory as seen by the request handler.
///
/// Every method behaves as if it ran inside one mutual-exclusion region.
/// Implementations must be shareable across request tasks.
pub trait ContactStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Store a new contact.
    ///
    /// An unassigned id is replaced by a fresh id, strictly greater than any
    /// id this store has issued or held, and written back into `contact`.
    /// An assigned id that is already present yields `Conflict`, even when
    /// the contact would also fail validation.
    ///
    /// Fails with a validation error when the title is blank.
    fn save(&self, contact: &mut Contact) -> Result<InsertResult>;

    /// Update an existing contact, if `guard` accepts its current state.
    ///
    /// `guard` runs under the same lock as the write, so no other operation
    /// on the contact can slip in between the check and the update. The
    /// title is replaced only when the update's title is not blank; the
    /// other fields are always replaced.
    fn update_if(
        &self,
        update: &Contact,
        guard: &mut dyn FnMut(&Contact) -> bool,
    ) -> Result<Guarded>;

    /// Delete a contact, if `guard` accepts its current state.
    fn delete_if(&self, id: ContactId, guard: &mut dyn FnMut(&Contact) -> bool)
        -> Result<Guarded>;

    /// Update unconditionally. Returns `false` if the id is absent.
    fn update(&self, update: &Contact) -> Result<bool> {
        Ok(self.update_if(update, &mut |_| true)?.is_applied())
    }

    /// Delete unconditionally. Returns `false` if the id is absent.
    fn delete(&self, id: ContactId) -> Result<bool> {
        Ok(self.delete_if(id, &mut |_| true)?.is_applied())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a contact by id.
    fn find(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Every contact, in insertion order.
    fn find_all(&self) -> Result<Vec<Contact>>;

    /// Contacts whose title contains `query` (case-sensitive), in insertion
    /// order. An empty result is not an error.
    fn find_by_title(&self, query: &str) -> Result<Vec<Contact>>;

    /// Number of stored contacts.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// The Snapshot trait: bulk load and save of the whole directory.
///
/// `load` runs before the first request is served and `save` after the last
/// one completes; neither ever overlaps live traffic.
#[async_trait]
pub trait Snapshot: Send + Sync {
    /// Read every stored contact in order. A snapshot that does not exist
    /// yet loads as empty.
    async fn load(&self) -> Result<Vec<Contact>>;

    /// Replace the stored snapshot with `contacts`.
    async fn save(&self, contacts: &[Contact]) -> Result<()>;
}
