//! SQLite implementation of the Snapshot trait.
//!
//! Uses rusqlite with bundled SQLite, wrapped in async via
//! tokio::spawn_blocking. The whole table is replaced in one transaction on
//! every save.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use contactd_core::{Contact, ContactId};
use rusqlite::{params, Connection};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::Snapshot;

/// SQLite-backed snapshot.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteSnapshot {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshot {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist, so a
    /// missing database loads as an empty directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database. Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| StoreError::Poisoned)
}

/// Run a blocking database closure off the async runtime.
async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {}", e)))?
}

// Ids are u64 on the wire; SQLite integers are i64. The cast is a bit-for-bit
// reinterpretation in both directions, so every id survives the round trip.
fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    let id: i64 = row.get("id")?;
    Ok(Contact {
        id: ContactId::new(id as u64),
        title: row.get("title")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
    })
}

#[async_trait]
impl Snapshot for SqliteSnapshot {
    async fn load(&self) -> Result<Vec<Contact>> {
        let conn = Arc::clone(&self.conn);

        run_blocking(move || {
            let conn = lock(&conn)?;
            let mut stmt = conn.prepare(
                "SELECT id, title, name, email, phone_number
                 FROM contacts ORDER BY position",
            )?;
            let contacts = stmt
                .query_map([], row_to_contact)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(contacts)
        })
        .await
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        let contacts = contacts.to_vec();
        let conn = Arc::clone(&self.conn);

        run_blocking(move || {
            let mut conn = lock(&conn)?;
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM contacts", [])?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO contacts (position, id, title, name, email, phone_number)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )?;
                for (position, contact) in contacts.iter().enumerate() {
                    stmt.execute(params![
                        position as i64,
                        contact.id.get() as i64,
                        contact.title,
                        contact.name,
                        contact.email,
                        contact.phone_number,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("zeta", "Z", "z@example.com", "9").with_id(42),
            Contact::new("alpha", "A", "", "").with_id(7),
            Contact::new("max", "", "", "").with_id(u64::MAX),
        ]
    }

    #[tokio::test]
    async fn test_sqlite_empty_on_open() {
        let snapshot = SqliteSnapshot::open_memory().unwrap();
        assert!(snapshot.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_save_then_load_keeps_order() {
        let snapshot = SqliteSnapshot::open_memory().unwrap();
        snapshot.save(&sample()).await.unwrap();

        let loaded = snapshot.load().await.unwrap();
        assert_eq!(loaded.len(), 3);
        for (a, b) in loaded.iter().zip(sample().iter()) {
            assert!(a.same_fields(b));
        }
    }

    #[tokio::test]
    async fn test_sqlite_save_replaces_rows() {
        let snapshot = SqliteSnapshot::open_memory().unwrap();
        snapshot.save(&sample()).await.unwrap();
        snapshot.save(&sample()[..1]).await.unwrap();

        let loaded = snapshot.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "zeta");
    }

    #[tokio::test]
    async fn test_sqlite_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");

        SqliteSnapshot::open(&path)
            .unwrap()
            .save(&sample())
            .await
            .unwrap();

        let reopened = SqliteSnapshot::open(&path).unwrap();
        let loaded = reopened.load().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2].id, ContactId::new(u64::MAX));
    }

    #[tokio::test]
    async fn test_sqlite_duplicate_ids_rejected_atomically() {
        let snapshot = SqliteSnapshot::open_memory().unwrap();
        snapshot.save(&sample()).await.unwrap();

        let dup = vec![
            Contact::new("a", "", "", "").with_id(1),
            Contact::new("b", "", "", "").with_id(1),
        ];
        assert!(matches!(
            snapshot.save(&dup).await,
            Err(StoreError::Database(_))
        ));
        assert_eq!(snapshot.load().await.unwrap().len(), 3);
    }
}
