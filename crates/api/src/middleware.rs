//! Request metrics middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use observability::{RequestMetricsGuard, ServerMetrics};

/// Records count, status and latency of every request passing through.
pub async fn track_metrics(
    State(metrics): State<ServerMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let mut guard = RequestMetricsGuard::new(&metrics);
    let response = next.run(request).await;
    guard.set_status(response.status().as_u16());
    response
}
