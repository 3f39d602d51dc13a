//! Common error types for the configuration manager

use thiserror::Error;

/// Error taxonomy shared by every store.
///
/// Stores raise the specific kind; the HTTP façade maps each kind to a fixed
/// status code. `NotFound` and `Conflict` are safe for a caller to retry,
/// `Validation` is terminal until the input changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A referenced instrument, version or snapshot does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The entity already exists (duplicate snapshot name, duplicate instrument id)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using the common Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether repeating the same call could succeed later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Conflict(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}
