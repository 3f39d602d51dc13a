//! HTTP request handlers.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use common::{payload_from_value, Error, InstrumentId, Payload, Result, VersionId};
use config_store::{ConfigUpdate, ConfigVersion};
use instrument::{Instrument, NewInstrument};
use observability::AUDIT_TARGET;
use snapshot::{NewSnapshot, Snapshot};
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::models::*;
use crate::state::AppState;

/// Write one audit line for a mutating call and count failures.
fn audit<T>(
    state: &AppState,
    action: &'static str,
    instrument_id: &str,
    user: &str,
    subject: &str,
    outcome: &Result<T>,
) {
    match outcome {
        Ok(_) => info!(
            target: AUDIT_TARGET,
            action,
            instrument_id,
            user,
            subject,
            outcome = "ok",
            "Mutation applied"
        ),
        Err(e) => {
            state.metrics.store_error(e.code());
            warn!(
                target: AUDIT_TARGET,
                action,
                instrument_id,
                user,
                subject,
                outcome = e.code(),
                error = %e,
                "Mutation rejected"
            );
        }
    }
}

fn parse_version_id(raw: &str) -> Result<VersionId> {
    raw.parse::<VersionId>()
        .map_err(|_| Error::validation(format!("Invalid version id: {}", raw)))
}

async fn to_response(state: &AppState, instrument: Instrument) -> Result<InstrumentResponse> {
    let last_updated = state.last_updated(&instrument.id).await?;
    Ok(InstrumentResponse {
        instrument,
        last_updated,
    })
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

/// GET /instruments
pub async fn list_instruments(
    State(state): State<AppState>,
) -> ApiResult<Json<InstrumentListResponse>> {
    let instruments = state.instruments.get_all().await?;

    let mut responses = Vec::with_capacity(instruments.len());
    for instrument in instruments {
        responses.push(to_response(&state, instrument).await?);
    }

    Ok(Json(InstrumentListResponse {
        instruments: responses,
    }))
}

/// GET /instruments/{id}
pub async fn get_instrument(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InstrumentResponse>> {
    let instrument = state.instruments.get_by_id(&InstrumentId::new(id)).await?;
    Ok(Json(to_response(&state, instrument).await?))
}

/// POST /instruments
///
/// The configuration history and snapshot shelf are opened before the
/// instrument is inserted, so an instrument listed by the registry always
/// accepts config and snapshot calls. Both registrations are idempotent; a
/// duplicate id leaves the existing history untouched.
pub async fn create_instrument(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(mut request): ApiJson<NewInstrument>,
) -> ApiResult<(StatusCode, Json<InstrumentResponse>)> {
    let user = state.acting_user(&headers);
    let name = request.name.clone();
    let id = request
        .id
        .get_or_insert_with(InstrumentId::generate)
        .clone();

    let outcome: Result<Instrument> = async {
        request.validate()?;
        state.configs.register(&id).await?;
        state.snapshots.register(&id).await?;
        state.instruments.create(request).await
    }
    .await;
    audit(&state, "create_instrument", id.as_str(), &user, &name, &outcome);

    let instrument = outcome?;
    state.metrics.instrument_created();
    Ok((
        StatusCode::CREATED,
        Json(InstrumentResponse {
            instrument,
            last_updated: None,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Configurations
// ---------------------------------------------------------------------------

/// GET /configs/{instrument_id}
pub async fn get_config(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> ApiResult<Json<ConfigVersion>> {
    let version = state
        .configs
        .get_current(&InstrumentId::new(instrument_id))
        .await?;
    Ok(Json(version))
}

/// PUT /configs/{instrument_id}
pub async fn update_config(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<UpdateConfigRequest>,
) -> ApiResult<Json<UpdateConfigResponse>> {
    let user = state.acting_user(&headers);
    let id = InstrumentId::new(instrument_id);
    let comment = request.comment.unwrap_or_default();

    let outcome = match payload_from_value("data", request.data) {
        Ok(data) => {
            let update = ConfigUpdate::new(data, comment.clone()).by(user.clone());
            state.configs.update(&id, update).await
        }
        Err(e) => Err(e),
    };
    audit(&state, "update_config", id.as_str(), &user, &comment, &outcome);

    let version = outcome?;
    state.metrics.config_updated();
    Ok(Json(UpdateConfigResponse {
        message: "Configuration updated".to_string(),
        version_id: version.version_id,
        config: version,
    }))
}

/// GET /configs/{instrument_id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> ApiResult<Json<Vec<ConfigVersion>>> {
    let versions = state
        .configs
        .list_versions(&InstrumentId::new(instrument_id))
        .await?;
    Ok(Json(versions))
}

/// GET /configs/{instrument_id}/versions/{version_id}
pub async fn get_version(
    State(state): State<AppState>,
    Path((instrument_id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<ConfigVersion>> {
    let version_id = parse_version_id(&version_id)?;
    let version = state
        .configs
        .get_version(&InstrumentId::new(instrument_id), version_id)
        .await?;
    Ok(Json(version))
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// GET /snapshots/{instrument_id}
pub async fn list_snapshots(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> ApiResult<Json<Vec<Snapshot>>> {
    let snapshots = state
        .snapshots
        .list(&InstrumentId::new(instrument_id))
        .await?;
    Ok(Json(snapshots))
}

/// GET /snapshots/{instrument_id}/{name}
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path((instrument_id, name)): Path<(String, String)>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state
        .snapshots
        .get(&InstrumentId::new(instrument_id), &name)
        .await?;
    Ok(Json(snapshot))
}

/// Payload and version to capture: the request body's `data` if given,
/// otherwise the current configuration (empty if never configured).
async fn snapshot_source(
    state: &AppState,
    id: &InstrumentId,
    data: Option<serde_json::Value>,
) -> Result<(Payload, Option<VersionId>)> {
    match data {
        Some(value) => Ok((payload_from_value("data", value)?, None)),
        None => Ok(match state.configs.try_current(id).await? {
            Some(current) => (current.data, Some(current.version_id)),
            None => (Payload::new(), None),
        }),
    }
}

/// POST /snapshots/{instrument_id}
pub async fn create_snapshot(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<CreateSnapshotRequest>,
) -> ApiResult<(StatusCode, Json<Snapshot>)> {
    let user = state.acting_user(&headers);
    let id = InstrumentId::new(instrument_id);
    let CreateSnapshotRequest {
        name,
        description,
        data,
    } = request;

    let outcome: Result<Snapshot> = async {
        let (data, version_id) = snapshot_source(&state, &id, data).await?;
        let mut new = NewSnapshot::new(name.clone(), data)
            .with_description(description.unwrap_or_default())
            .with_user(user.clone());
        new.version_id = version_id;
        state.snapshots.create(&id, new).await
    }
    .await;
    audit(&state, "create_snapshot", id.as_str(), &user, &name, &outcome);

    let snapshot = outcome?;
    state.metrics.snapshot_created();
    Ok((StatusCode::CREATED, Json(snapshot)))
}
