//! File and in-memory snapshot backends.
//!
//! The JSON document is a single object holding the ordered contact list:
//!
//! ```json
//! { "contacts": [ { "id": 1, "title": "Joe", "name": "", "email": "", "phoneNumber": "" } ] }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use contactd_core::{Contact, ContactBody};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::Snapshot;

/// On-disk document layout. Records are read leniently: any field may be
/// missing and defaults to empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ContactList {
    #[serde(default)]
    contacts: Vec<ContactBody>,
}

/// A snapshot stored as one JSON document.
///
/// Saves go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot in place.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl Snapshot for JsonSnapshot {
    async fn load(&self) -> Result<Vec<Contact>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let list: ContactList = serde_json::from_slice(&bytes)?;
        Ok(list
            .contacts
            .into_iter()
            .map(ContactBody::into_contact)
            .collect())
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        let list = ContactList {
            contacts: contacts.iter().cloned().map(ContactBody::from).collect(),
        };
        let bytes = serde_json::to_vec_pretty(&list)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

/// An in-process snapshot, for tests.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    contacts: Mutex<Vec<Contact>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot pre-filled with `contacts`.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Mutex::new(contacts),
        }
    }

    /// What the last `save` wrote.
    pub fn contents(&self) -> Result<Vec<Contact>> {
        let contacts = self.contacts.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(contacts.clone())
    }
}

#[async_trait]
impl Snapshot for MemorySnapshot {
    async fn load(&self) -> Result<Vec<Contact>> {
        self.contents()
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        let mut stored = self.contacts.lock().map_err(|_| StoreError::Poisoned)?;
        *stored = contacts.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("contact1", "Joe Contact", "joe@example.com", "088888888").with_id(1_000_001),
            Contact::new("Acme", "", "", "").with_id(3),
        ]
    }

    #[tokio::test]
    async fn test_json_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = JsonSnapshot::new(dir.path().join("absent.json"));
        assert!(snapshot.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_save_then_load_keeps_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = JsonSnapshot::new(dir.path().join("nested/data.json"));

        snapshot.save(&sample()).await.unwrap();
        let loaded = snapshot.load().await.unwrap();

        assert_eq!(loaded.len(), 2);
        for (a, b) in loaded.iter().zip(sample().iter()) {
            assert!(a.same_fields(b));
        }
        assert!(!snapshot.temp_path().exists());
    }

    #[tokio::test]
    async fn test_json_save_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = JsonSnapshot::new(dir.path().join("data.json"));

        snapshot.save(&sample()).await.unwrap();
        snapshot.save(&sample()[1..]).await.unwrap();
        let loaded = snapshot.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Acme");
    }

    #[tokio::test]
    async fn test_json_lenient_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, br#"{"contacts":[{"id":4,"title":"T","email":null}]}"#)
            .await
            .unwrap();

        let loaded = JsonSnapshot::new(&path).load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.get(), 4);
        assert_eq!(loaded[0].email, "");
        assert_eq!(loaded[0].phone_number, "");
    }

    #[tokio::test]
    async fn test_json_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, b"<contacts/>").await.unwrap();

        let err = JsonSnapshot::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_memory_snapshot() {
        let snapshot = MemorySnapshot::with_contacts(sample());
        assert_eq!(snapshot.load().await.unwrap().len(), 2);

        snapshot.save(&[]).await.unwrap();
        assert!(snapshot.contents().unwrap().is_empty());
    }
}
