//! In-memory implementation of ConfigStore
//!
//! Each instrument owns its own history behind a mutex. Updates to one
//! instrument are serialized, updates to different instruments run in
//! parallel. The outer map lock is only held long enough to find the history.

use async_trait::async_trait;
use chrono::Utc;
use common::{Error, InstrumentId, Result, VersionId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::diff::diff;
use crate::traits::ConfigStore;
use crate::types::{ConfigUpdate, ConfigVersion};

#[derive(Debug, Default)]
struct History {
    versions: Vec<ConfigVersion>,
}

/// In-memory configuration store
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    histories: Arc<RwLock<HashMap<InstrumentId, Arc<Mutex<History>>>>>,
}

impl InMemoryConfigStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instruments known to the store
    pub fn instrument_count(&self) -> usize {
        self.histories.read().len()
    }

    fn history(&self, instrument_id: &InstrumentId) -> Result<Arc<Mutex<History>>> {
        self.histories
            .read()
            .get(instrument_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Instrument", instrument_id))
    }
}

impl Clone for InMemoryConfigStore {
    fn clone(&self) -> Self {
        Self {
            histories: Arc::clone(&self.histories),
        }
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn register(&self, instrument_id: &InstrumentId) -> Result<()> {
        self.histories
            .write()
            .entry(instrument_id.clone())
            .or_default();
        Ok(())
    }

    async fn try_current(&self, instrument_id: &InstrumentId) -> Result<Option<ConfigVersion>> {
        let history = self.history(instrument_id)?;
        let guard = history.lock();
        Ok(guard.versions.last().cloned())
    }

    async fn update(
        &self,
        instrument_id: &InstrumentId,
        update: ConfigUpdate,
    ) -> Result<ConfigVersion> {
        let history = self.history(instrument_id)?;
        let mut guard = history.lock();

        let changes = diff(guard.versions.last().map(|v| &v.data), &update.data);
        let version = ConfigVersion {
            version_id: guard.versions.len() as VersionId + 1,
            instrument_id: instrument_id.clone(),
            data: update.data,
            comment: update.comment,
            user: update.user,
            changes,
            created_at: Utc::now(),
        };
        guard.versions.push(version.clone());

        debug!(
            instrument_id = %instrument_id,
            version_id = version.version_id,
            changed_keys = version.changes.len(),
            "Configuration version appended"
        );
        Ok(version)
    }

    async fn list_versions(&self, instrument_id: &InstrumentId) -> Result<Vec<ConfigVersion>> {
        let history = self.history(instrument_id)?;
        let guard = history.lock();
        Ok(guard.versions.iter().rev().cloned().collect())
    }

    async fn get_version(
        &self,
        instrument_id: &InstrumentId,
        version_id: VersionId,
    ) -> Result<ConfigVersion> {
        let history = self.history(instrument_id)?;
        let guard = history.lock();
        version_id
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| guard.versions.get(idx))
            .cloned()
            .ok_or_else(|| Error::not_found("Version", format!("{}@{}", instrument_id, version_id)))
    }

    async fn version_count(&self, instrument_id: &InstrumentId) -> Result<usize> {
        let history = self.history(instrument_id)?;
        let count = history.lock().versions.len();
        Ok(count)
    }
}
