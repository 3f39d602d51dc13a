//! Common types used across the configuration manager

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Structured configuration payload: a JSON object.
pub type Payload = serde_json::Map<String, Value>;

/// Per-instrument configuration version number, starting at 1.
pub type VersionId = u64;

/// Wall-clock timestamp used for `created_at` fields.
pub type Timestamp = DateTime<Utc>;

/// Unique identifier for instruments
///
/// Serialized as a bare string so it round-trips through URLs unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create an instrument ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new unique instrument ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for InstrumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a user-supplied name or key that ends up as a URL path segment.
///
/// Rejects blank values and values containing `/`.
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }
    if value.contains('/') {
        return Err(Error::validation(format!(
            "{} must not contain '/': {}",
            field, value
        )));
    }
    Ok(())
}

/// Convert an arbitrary JSON value into a [`Payload`], rejecting non-objects.
pub fn payload_from_value(field: &str, value: Value) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(Error::validation(format!("{} is required", field))),
        other => Err(Error::validation(format!(
            "{} must be a JSON object, got {}",
            field,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
