//! ConfigStore trait definition

use async_trait::async_trait;
use common::{Error, InstrumentId, Result, VersionId};

use crate::types::{ConfigUpdate, ConfigVersion};

/// ConfigStore trait - defines the interface for versioned configuration storage
///
/// This trait allows different storage implementations (in-memory, PostgreSQL, etc.)
/// to be swapped without changing the business logic.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Open an empty history for a newly registered instrument
    ///
    /// Idempotent: registering twice keeps the existing history.
    async fn register(&self, instrument_id: &InstrumentId) -> Result<()>;

    /// Latest version, or `None` if the instrument was never configured
    ///
    /// # Errors
    /// `NotFound` if the instrument is unknown to this store
    async fn try_current(&self, instrument_id: &InstrumentId) -> Result<Option<ConfigVersion>>;

    /// Append a new version that atomically becomes current
    ///
    /// Concurrent calls for the same instrument produce distinct,
    /// consecutive version ids. Not idempotent: every call appends.
    ///
    /// # Errors
    /// `NotFound` if the instrument is unknown to this store
    async fn update(
        &self,
        instrument_id: &InstrumentId,
        update: ConfigUpdate,
    ) -> Result<ConfigVersion>;

    /// All versions, newest first
    ///
    /// # Errors
    /// `NotFound` if the instrument is unknown to this store
    async fn list_versions(&self, instrument_id: &InstrumentId) -> Result<Vec<ConfigVersion>>;

    /// A specific version
    ///
    /// # Errors
    /// `NotFound` if the instrument or the version does not exist
    async fn get_version(
        &self,
        instrument_id: &InstrumentId,
        version_id: VersionId,
    ) -> Result<ConfigVersion>;

    /// Latest version
    ///
    /// # Errors
    /// `NotFound` if the instrument is unknown or was never configured
    async fn get_current(&self, instrument_id: &InstrumentId) -> Result<ConfigVersion> {
        self.try_current(instrument_id)
            .await?
            .ok_or_else(|| Error::not_found("Configuration", instrument_id))
    }

    /// Number of versions recorded for an instrument
    async fn version_count(&self, instrument_id: &InstrumentId) -> Result<usize> {
        Ok(self.list_versions(instrument_id).await?.len())
    }
}
