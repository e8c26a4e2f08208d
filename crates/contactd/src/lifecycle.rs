//! Startup and shutdown: moving the directory between a store and a snapshot.
//!
//! [`populate`] runs before the first request is served; [`drain`] runs after
//! the last one has completed.

use contactd_store::{ContactStore, InsertResult, Snapshot, StoreError};
use tracing::{info, warn};

use crate::error::{ContactdError, Result};

/// What [`populate`] did with the snapshot's records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Records saved into the store.
    pub loaded: usize,
    /// Records rejected by the store (duplicate id or blank title).
    pub skipped: usize,
}

/// Fill `store` from `snapshot`.
///
/// Records go through the same `save` path as created contacts, in snapshot
/// order. A record the store rejects is logged and skipped; one bad record
/// does not keep the service from starting.
pub async fn populate<S, P>(store: &S, snapshot: &P) -> Result<PopulateReport>
where
    S: ContactStore + ?Sized,
    P: Snapshot + ?Sized,
{
    let contacts = snapshot.load().await.map_err(ContactdError::Snapshot)?;
    let mut report = PopulateReport::default();

    for mut contact in contacts {
        match store.save(&mut contact) {
            Ok(InsertResult::Inserted(_)) => report.loaded += 1,
            Ok(InsertResult::Conflict { existing }) => {
                warn!(id = %existing, "skipping duplicate contact in snapshot");
                report.skipped += 1;
            }
            Err(StoreError::Validation(e)) => {
                warn!(id = %contact.id, error = %e, "skipping invalid contact in snapshot");
                report.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        loaded = report.loaded,
        skipped = report.skipped,
        "directory populated"
    );
    Ok(report)
}

/// Write every contact in `store` to `snapshot`, in store order.
///
/// Returns the number of contacts written.
pub async fn drain<S, P>(store: &S, snapshot: &P) -> Result<usize>
where
    S: ContactStore + ?Sized,
    P: Snapshot + ?Sized,
{
    let contacts = store.find_all()?;
    snapshot
        .save(&contacts)
        .await
        .map_err(ContactdError::Snapshot)?;

    info!(count = contacts.len(), "directory drained");
    Ok(contacts.len())
}
