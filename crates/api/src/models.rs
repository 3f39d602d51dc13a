//! Request/response types for the REST API.

use axum::extract::FromRequest;
use common::{Error, Timestamp, VersionId};
use config_store::ConfigVersion;
use instrument::Instrument;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Instrument as returned to clients.
///
/// `last_updated` is the creation time of the current configuration
/// version, or null if the instrument was never configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentResponse {
    #[serde(flatten)]
    pub instrument: Instrument,
    pub last_updated: Option<Timestamp>,
}

/// GET /instruments
#[derive(Debug, Serialize, Deserialize)]
pub struct InstrumentListResponse {
    pub instruments: Vec<InstrumentResponse>,
}

/// PUT /configs/{instrument_id}
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    /// Must be a JSON object; checked by the handler so a wrong shape
    /// reports VALIDATION_ERROR instead of an extractor rejection
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateConfigResponse {
    pub message: String,
    pub version_id: VersionId,
    pub config: ConfigVersion,
}

/// POST /snapshots/{instrument_id}
///
/// Without `data` the instrument's current configuration is captured.
#[derive(Debug, Deserialize)]
pub struct CreateSnapshotRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Error payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: err.code().to_string(),
                message: err.to_string(),
            },
        }
    }
}
