//! Instrument domain types.

use chrono::Utc;
use common::{validate_name, Error, InstrumentId, Payload, Result, Timestamp};
use serde::{Deserialize, Serialize};

/// A managed instrument (e.g. a physical device).
///
/// Immutable once created: there is no update path in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique identifier
    pub id: InstrumentId,
    /// Human-readable name
    pub name: String,
    /// Instrument type (e.g. "spectrometer")
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
    /// Physical location
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: Payload,
    /// Creation timestamp
    pub created_at: Timestamp,
}

/// Input for registering an instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInstrument {
    /// Caller-chosen id. A fresh UUID is allocated when absent.
    #[serde(default)]
    pub id: Option<InstrumentId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub metadata: Payload,
}

impl NewInstrument {
    /// Create a request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Request a specific id.
    pub fn with_id(mut self, id: impl Into<InstrumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the instrument type.
    pub fn with_type(mut self, instrument_type: impl Into<String>) -> Self {
        self.instrument_type = Some(instrument_type.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the metadata object.
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check the request before it reaches a store.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Instrument name must not be empty"));
        }
        if let Some(ref id) = self.id {
            validate_name("Instrument id", id.as_str())?;
        }
        Ok(())
    }

    /// Build the stored instrument, allocating an id if none was requested.
    pub fn into_instrument(self) -> Instrument {
        Instrument {
            id: self.id.unwrap_or_else(InstrumentId::generate),
            name: self.name.trim().to_string(),
            instrument_type: self.instrument_type,
            location: self.location,
            metadata: self.metadata,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_validate_rejects_blank_name() {
        assert_matches!(NewInstrument::new("").validate(), Err(Error::Validation(_)));
        assert_matches!(NewInstrument::new("  ").validate(), Err(Error::Validation(_)));
    }

    #[test]
    fn test_name_may_contain_slash() {
        // Names are display text; only ids become path segments.
        assert!(NewInstrument::new("Laser 1/2").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_id() {
        let req = NewInstrument::new("Spectrometer-A").with_id("a/b");
        assert_matches!(req.validate(), Err(Error::Validation(_)));
    }

    #[test]
    fn test_into_instrument_allocates_id() {
        let a = NewInstrument::new("A").into_instrument();
        let b = NewInstrument::new("B").into_instrument();
        assert_ne!(a.id, b.id);

        let c = NewInstrument::new("C").with_id("spec-c").into_instrument();
        assert_eq!(c.id.as_str(), "spec-c");
    }

    #[test]
    fn test_deserialize_request() {
        let req: NewInstrument = serde_json::from_value(json!({
            "name": "Spectrometer-A",
            "type": "spectrometer",
            "location": "Lab 3",
            "metadata": {"vendor": "acme"}
        }))
        .unwrap();

        assert_eq!(req.instrument_type.as_deref(), Some("spectrometer"));
        assert_eq!(req.metadata.get("vendor"), Some(&json!("acme")));
        assert!(req.id.is_none());
    }
}
