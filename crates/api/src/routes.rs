//! Axum route definitions.

use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use observability::ServerMetrics;
use server::{health_routes, HealthState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::middleware::track_metrics;
use crate::state::AppState;

/// Create the resource routes, relative to the API prefix.
///
/// # Routes
///
/// - `GET  /instruments` - List instruments
/// - `POST /instruments` - Create an instrument
/// - `GET  /instruments/:id` - Get an instrument
/// - `GET  /configs/:instrument_id` - Current configuration
/// - `PUT  /configs/:instrument_id` - Append a configuration version
/// - `GET  /configs/:instrument_id/versions` - Versions, newest first
/// - `GET  /configs/:instrument_id/versions/:version_id` - One version
/// - `GET  /snapshots/:instrument_id` - Snapshots in creation order
/// - `POST /snapshots/:instrument_id` - Create a snapshot
/// - `GET  /snapshots/:instrument_id/:name` - One snapshot
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/instruments",
            get(handlers::list_instruments).post(handlers::create_instrument),
        )
        .route("/instruments/:id", get(handlers::get_instrument))
        .route(
            "/configs/:instrument_id",
            get(handlers::get_config).put(handlers::update_config),
        )
        .route(
            "/configs/:instrument_id/versions",
            get(handlers::list_versions),
        )
        .route(
            "/configs/:instrument_id/versions/:version_id",
            get(handlers::get_version),
        )
        .route(
            "/snapshots/:instrument_id",
            get(handlers::list_snapshots).post(handlers::create_snapshot),
        )
        .route(
            "/snapshots/:instrument_id/:name",
            get(handlers::get_snapshot),
        )
        .with_state(state)
}

/// Settings for the full HTTP application.
#[derive(Clone)]
pub struct RouterOptions {
    /// Mount point for every route, e.g. `/api`
    pub api_prefix: String,
    pub request_timeout: Duration,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    pub health: Arc<HealthState>,
    pub metrics: ServerMetrics,
}

impl RouterOptions {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            api_prefix: "/api".to_string(),
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            health: Arc::new(HealthState::new(service_name, env!("CARGO_PKG_VERSION"))),
            metrics: ServerMetrics::new("http"),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Build the application: resource routes and `/health` under the API
/// prefix, wrapped in request-id, tracing, CORS, timeout and metrics layers.
pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let routes = api_routes(state).merge(health_routes(options.health));

    let prefix = options.api_prefix.trim_end_matches('/');
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer(&options.cors_origins))
            .layer(TimeoutLayer::new(options.request_timeout)),
    )
    .layer(from_fn_with_state(options.metrics, track_metrics))
}
