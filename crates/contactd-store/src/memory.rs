//! In-memory implementation of the ContactStore trait.
//!
//! All contacts live behind one `RwLock`. Reads share the lock; every write
//! holds it exclusively for the whole check-then-mutate sequence.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use contactd_core::{validate_contact, Contact, ContactId};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::{ContactStore, Guarded, InsertResult};

/// In-memory contact store.
///
/// Thread-safe via RwLock. All data is lost when the store is dropped;
/// use a [`Snapshot`](crate::Snapshot) to carry it across restarts.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Contacts indexed by id.
    contacts: HashMap<ContactId, StoredContact>,

    /// Insertion index: insertion sequence -> contact id.
    order: BTreeMap<u64, ContactId>,

    /// Next insertion sequence number.
    next_seq: u64,

    /// Largest id ever issued or accepted. Never decreases.
    high_water: u64,
}

struct StoredContact {
    contact: Contact,
    seq: u64,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                contacts: HashMap::new(),
                order: BTreeMap::new(),
                next_seq: 0,
                high_water: 0,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn in_order(&self) -> impl Iterator<Item = &Contact> {
        self.order
            .values()
            .filter_map(|id| self.contacts.get(id).map(|stored| &stored.contact))
    }
}

impl ContactStore for MemoryStore {
    fn save(&self, contact: &mut Contact) -> Result<InsertResult> {
        let mut inner = self.write()?;

        // A taken id is a conflict whatever else the contact carries.
        if contact.id.is_assigned() && inner.contacts.contains_key(&contact.id) {
            return Ok(InsertResult::Conflict {
                existing: contact.id,
            });
        }
        validate_contact(contact)?;

        if !contact.id.is_assigned() {
            let next = inner
                .high_water
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted)?;
            contact.id = ContactId::new(next);
        }

        let id = contact.id;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.high_water = inner.high_water.max(id.get());
        inner.order.insert(seq, id);
        inner.contacts.insert(
            id,
            StoredContact {
                contact: contact.clone(),
                seq,
            },
        );

        debug!(%id, "contact saved");
        Ok(InsertResult::Inserted(id))
    }

    fn update_if(
        &self,
        update: &Contact,
        guard: &mut dyn FnMut(&Contact) -> bool,
    ) -> Result<Guarded> {
        let mut inner = self.write()?;

        let Some(stored) = inner.contacts.get_mut(&update.id) else {
            return Ok(Guarded::Missing);
        };
        if !guard(&stored.contact) {
            return Ok(Guarded::Refused);
        }

        // Apply to a copy so a rejected update leaves the stored contact intact.
        let mut updated = stored.contact.clone();
        updated.apply_update(update)?;
        stored.contact = updated.clone();

        debug!(id = %update.id, "contact updated");
        Ok(Guarded::Applied(updated))
    }

    fn delete_if(
        &self,
        id: ContactId,
        guard: &mut dyn FnMut(&Contact) -> bool,
    ) -> Result<Guarded> {
        let mut inner = self.write()?;

        let Some(stored) = inner.contacts.get(&id) else {
            return Ok(Guarded::Missing);
        };
        if !guard(&stored.contact) {
            return Ok(Guarded::Refused);
        }

        let seq = stored.seq;
        inner.order.remove(&seq);
        let removed = inner.contacts.remove(&id).map(|stored| stored.contact);

        debug!(%id, "contact deleted");
        Ok(removed.map_or(Guarded::Missing, Guarded::Applied))
    }

    fn find(&self, id: ContactId) -> Result<Option<Contact>> {
        let inner = self.read()?;
        Ok(inner.contacts.get(&id).map(|stored| stored.contact.clone()))
    }

    fn find_all(&self) -> Result<Vec<Contact>> {
        let inner = self.read()?;
        Ok(inner.in_order().cloned().collect())
    }

    fn find_by_title(&self, query: &str) -> Result<Vec<Contact>> {
        let inner = self.read()?;
        Ok(inner
            .in_order()
            .filter(|contact| contact.title.contains(query))
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<usize> {
        let inner = self.read()?;
        Ok(inner.contacts.len())
    }
}
