//! Configuration version types

use common::{InstrumentId, Payload, Timestamp, VersionId};
use serde::{Deserialize, Serialize};

use crate::diff::ChangeSet;

/// One immutable entry in an instrument's configuration history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigVersion {
    /// Position in the history, starting at 1
    pub version_id: VersionId,
    pub instrument_id: InstrumentId,
    /// Full configuration payload as of this version
    pub data: Payload,
    pub comment: String,
    /// Who made the change
    pub user: String,
    /// Per-key difference against the previous version
    pub changes: ChangeSet,
    pub created_at: Timestamp,
}

/// Input for appending a version
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub data: Payload,
    pub comment: String,
    pub user: String,
}

impl ConfigUpdate {
    /// Create an update with a payload and comment
    pub fn new(data: Payload, comment: impl Into<String>) -> Self {
        Self {
            data,
            comment: comment.into(),
            user: String::new(),
        }
    }

    /// Attribute the update to a user
    pub fn by(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}
