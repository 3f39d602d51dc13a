//! Snapshot domain types.

use chrono::Utc;
use common::{validate_name, InstrumentId, Payload, Result, Timestamp, VersionId};
use serde::{Deserialize, Serialize};

/// A named, immutable capture of configuration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unique within the owning instrument
    pub name: String,
    pub instrument_id: InstrumentId,
    #[serde(default)]
    pub description: String,
    pub user: String,
    /// Version that was current at capture time, informational only
    #[serde(default)]
    pub version_id: Option<VersionId>,
    /// Owned copy of the captured payload
    pub data: Payload,
    pub created_at: Timestamp,
}

/// Input for creating a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSnapshot {
    pub name: String,
    pub description: String,
    pub user: String,
    pub version_id: Option<VersionId>,
    pub data: Payload,
}

impl NewSnapshot {
    pub fn new(name: impl Into<String>, data: Payload) -> Self {
        Self {
            name: name.into(),
            data,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_version(mut self, version_id: VersionId) -> Self {
        self.version_id = Some(version_id);
        self
    }

    /// Names end up as URL path segments.
    pub fn validate(&self) -> Result<()> {
        validate_name("Snapshot name", &self.name)
    }

    pub(crate) fn into_snapshot(self, instrument_id: &InstrumentId) -> Snapshot {
        Snapshot {
            name: self.name,
            instrument_id: instrument_id.clone(),
            description: self.description,
            user: self.user,
            version_id: self.version_id,
            data: self.data,
            created_at: Utc::now(),
        }
    }
}
