//! Instrument storage traits and implementations.
//!
//! This module defines the `InstrumentStore` trait that abstracts away storage details.
//! Adapters (Postgres, Redis, etc.) implement this trait externally.

use crate::types::{Instrument, NewInstrument};
use async_trait::async_trait;
use common::{Error, InstrumentId, Result};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Trait for instrument storage.
///
/// This trait defines the interface for registering and looking up instruments.
/// Implementations can use any storage backend (Postgres, Redis, in-memory, etc.).
///
/// # Example
///
/// ```ignore
/// use instrument::{InstrumentStore, NewInstrument};
///
/// async fn example(store: &dyn InstrumentStore) -> common::Result<()> {
///     let instrument = store.create(NewInstrument::new("Spectrometer-A")).await?;
///     println!("Registered: {}", instrument.id);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait InstrumentStore: Send + Sync {
    /// Register a new instrument.
    ///
    /// Fails with `Validation` for a blank name or malformed id and with
    /// `Conflict` if the requested id is already taken.
    async fn create(&self, new: NewInstrument) -> Result<Instrument>;

    /// All instruments in creation order.
    async fn get_all(&self) -> Result<Vec<Instrument>>;

    /// Get an instrument by id, failing with `NotFound` if absent.
    async fn get_by_id(&self, id: &InstrumentId) -> Result<Instrument>;

    /// Number of registered instruments.
    async fn count(&self) -> Result<usize>;

    /// Check if an instrument exists.
    async fn exists(&self, id: &InstrumentId) -> Result<bool> {
        match self.get_by_id(id).await {
            Ok(_) => Ok(true),
            Err(Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    by_id: HashMap<InstrumentId, Instrument>,
    order: Vec<InstrumentId>,
}

/// In-memory implementation of InstrumentStore.
///
/// A single lock covers both the index and the creation order, so the
/// duplicate-id check and the insert happen atomically.
#[derive(Debug)]
pub struct InMemoryInstrumentStore {
    registry: Arc<RwLock<Registry>>,
}

impl InMemoryInstrumentStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    /// Get the number of instruments in the store.
    pub fn len(&self) -> usize {
        self.registry.read().order.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.registry.read().order.is_empty()
    }
}

impl Default for InMemoryInstrumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryInstrumentStore {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

#[async_trait]
impl InstrumentStore for InMemoryInstrumentStore {
    async fn create(&self, new: NewInstrument) -> Result<Instrument> {
        new.validate()?;
        let instrument = new.into_instrument();

        let mut guard = self.registry.write();
        let registry = &mut *guard;
        match registry.by_id.entry(instrument.id.clone()) {
            Entry::Occupied(_) => Err(Error::conflict(format!(
                "Instrument ID already exists: {}",
                instrument.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(instrument.clone());
                registry.order.push(instrument.id.clone());
                debug!(instrument_id = %instrument.id, "Instrument registered");
                Ok(instrument)
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Instrument>> {
        let registry = self.registry.read();
        Ok(registry
            .order
            .iter()
            .filter_map(|id| registry.by_id.get(id).cloned())
            .collect())
    }

    async fn get_by_id(&self, id: &InstrumentId) -> Result<Instrument> {
        self.registry
            .read()
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("Instrument", id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_inmemory_store_create_and_get() {
        let store = InMemoryInstrumentStore::new();
        let created = store
            .create(NewInstrument::new("Spectrometer-A").with_type("spectrometer"))
            .await
            .unwrap();

        let retrieved = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(retrieved, created);
        assert_eq!(retrieved.name, "Spectrometer-A");
        assert!(store.exists(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_inmemory_store_unknown_id() {
        let store = InMemoryInstrumentStore::new();
        let missing = InstrumentId::new("nope");

        assert_matches!(
            store.get_by_id(&missing).await,
            Err(Error::NotFound { entity: "Instrument", .. })
        );
        assert!(!store.exists(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn test_inmemory_store_creation_order() {
        let store = InMemoryInstrumentStore::new();
        for name in ["zeta", "alpha", "mid"] {
            store.create(NewInstrument::new(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_inmemory_store_empty_name() {
        let store = InMemoryInstrumentStore::new();
        let result = store.create(NewInstrument::new("")).await;

        assert_matches!(result, Err(Error::Validation(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_inmemory_store_duplicate_id() {
        let store = InMemoryInstrumentStore::new();
        store
            .create(NewInstrument::new("first").with_id("spec-a"))
            .await
            .unwrap();
        let result = store
            .create(NewInstrument::new("second").with_id("spec-a"))
            .await;

        assert_matches!(result, Err(Error::Conflict(_)));
        let kept = store.get_by_id(&InstrumentId::new("spec-a")).await.unwrap();
        assert_eq!(kept.name, "first");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_id_single_winner() {
        let store = InMemoryInstrumentStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(NewInstrument::new(format!("contender-{}", i)).with_id("shared"))
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
