//! Snapshot storage traits and implementations.

use crate::types::{NewSnapshot, Snapshot};
use async_trait::async_trait;
use common::{Error, InstrumentId, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Trait for snapshot storage.
///
/// The store never reads configuration itself: the caller hands over the
/// payload to capture.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Open an empty shelf for an instrument. Idempotent.
    async fn register(&self, instrument_id: &InstrumentId) -> Result<()>;

    /// Create a snapshot.
    ///
    /// Fails with `NotFound` for an unknown instrument, `Validation` for a
    /// bad name and `Conflict` if the name is already taken.
    async fn create(&self, instrument_id: &InstrumentId, new: NewSnapshot) -> Result<Snapshot>;

    /// All snapshots of an instrument in creation order.
    async fn list(&self, instrument_id: &InstrumentId) -> Result<Vec<Snapshot>>;

    /// A snapshot by name.
    async fn get(&self, instrument_id: &InstrumentId, name: &str) -> Result<Snapshot>;
}

#[derive(Debug, Default)]
struct Shelf {
    snapshots: Vec<Snapshot>,
    by_name: HashMap<String, usize>,
}

/// In-memory implementation of SnapshotStore.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    shelves: Arc<RwLock<HashMap<InstrumentId, Arc<Mutex<Shelf>>>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shelf(&self, instrument_id: &InstrumentId) -> Result<Arc<Mutex<Shelf>>> {
        self.shelves
            .read()
            .get(instrument_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Instrument", instrument_id))
    }
}

impl Clone for InMemorySnapshotStore {
    fn clone(&self) -> Self {
        Self {
            shelves: Arc::clone(&self.shelves),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn register(&self, instrument_id: &InstrumentId) -> Result<()> {
        self.shelves
            .write()
            .entry(instrument_id.clone())
            .or_default();
        Ok(())
    }

    async fn create(&self, instrument_id: &InstrumentId, new: NewSnapshot) -> Result<Snapshot> {
        let shelf = self.shelf(instrument_id)?;
        new.validate()?;

        let mut guard = shelf.lock();
        let shelf = &mut *guard;
        let next_index = shelf.snapshots.len();
        match shelf.by_name.entry(new.name.clone()) {
            Entry::Occupied(_) => Err(Error::conflict(format!(
                "Snapshot '{}' already exists for instrument {}",
                new.name, instrument_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(next_index);
                let snapshot = new.into_snapshot(instrument_id);
                shelf.snapshots.push(snapshot.clone());
                debug!(
                    instrument_id = %instrument_id,
                    snapshot = %snapshot.name,
                    "Snapshot created"
                );
                Ok(snapshot)
            }
        }
    }

    async fn list(&self, instrument_id: &InstrumentId) -> Result<Vec<Snapshot>> {
        let shelf = self.shelf(instrument_id)?;
        let snapshots = shelf.lock().snapshots.clone();
        Ok(snapshots)
    }

    async fn get(&self, instrument_id: &InstrumentId, name: &str) -> Result<Snapshot> {
        let shelf = self.shelf(instrument_id)?;
        let guard = shelf.lock();
        guard
            .by_name
            .get(name)
            .and_then(|&idx| guard.snapshots.get(idx))
            .cloned()
            .ok_or_else(|| Error::not_found("Snapshot", format!("{}/{}", instrument_id, name)))
    }
}
