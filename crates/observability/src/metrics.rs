//! Prometheus metrics infrastructure
//!
//! HTTP traffic is measured per request by [`ServerMetrics`]; successful
//! mutations are counted by [`StoreMetrics`].

use metrics::{counter, gauge, histogram, Counter, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Start the Prometheus exporter on `0.0.0.0:<port>/metrics`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// HTTP request metrics
///
/// # Metrics
///
/// * `server_requests_total` - Requests processed
/// * `server_requests_by_status` - Requests per status code
/// * `server_request_duration_seconds` - Request duration histogram
/// * `server_requests_in_flight` - Requests currently being handled
#[derive(Clone)]
pub struct ServerMetrics {
    requests_total: Counter,
    request_duration: Histogram,
    in_flight: Gauge,
    server_name: String,
}

impl ServerMetrics {
    pub fn new(server_name: &str) -> Self {
        let name = server_name.to_string();

        Self {
            requests_total: counter!("server_requests_total", "server" => name.clone()),
            request_duration: histogram!("server_request_duration_seconds", "server" => name.clone()),
            in_flight: gauge!("server_requests_in_flight", "server" => name.clone()),
            server_name: name,
        }
    }

    /// Record a completed request
    pub fn record_request(&self, duration: Duration, status_code: u16) {
        self.requests_total.increment(1);
        counter!(
            "server_requests_by_status",
            "server" => self.server_name.clone(),
            "status" => status_code.to_string()
        )
        .increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

/// Records one request's duration and status when dropped.
///
/// The status defaults to 500 so a request that never reaches
/// [`set_status`](Self::set_status) is counted as a failure.
///
/// ```ignore
/// let mut guard = RequestMetricsGuard::new(&metrics);
/// let response = next.run(request).await;
/// guard.set_status(response.status().as_u16());
/// ```
pub struct RequestMetricsGuard<'a> {
    metrics: &'a ServerMetrics,
    start: Instant,
    status_code: u16,
}

impl<'a> RequestMetricsGuard<'a> {
    pub fn new(metrics: &'a ServerMetrics) -> Self {
        metrics.in_flight.increment(1.0);
        Self {
            metrics,
            start: Instant::now(),
            status_code: 500,
        }
    }

    pub fn set_status(&mut self, code: u16) {
        self.status_code = code;
    }
}

impl Drop for RequestMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.decrement(1.0);
        self.metrics
            .record_request(self.start.elapsed(), self.status_code);
    }
}

/// Counters for successful store mutations
///
/// * `instruments_created_total`
/// * `config_updates_total`
/// * `snapshots_created_total`
/// * `store_errors_total` labelled by error code
#[derive(Clone)]
pub struct StoreMetrics {
    instruments_created: Counter,
    config_updates: Counter,
    snapshots_created: Counter,
}

impl StoreMetrics {
    pub fn new() -> Self {
        Self {
            instruments_created: counter!("instruments_created_total"),
            config_updates: counter!("config_updates_total"),
            snapshots_created: counter!("snapshots_created_total"),
        }
    }

    pub fn instrument_created(&self) {
        self.instruments_created.increment(1);
    }

    pub fn config_updated(&self) {
        self.config_updates.increment(1);
    }

    pub fn snapshot_created(&self) {
        self.snapshots_created.increment(1);
    }

    /// Count a failed operation by its error code (e.g. `CONFLICT`)
    pub fn store_error(&self, code: &'static str) {
        counter!("store_errors_total", "code" => code).increment(1);
    }
}

impl Default for StoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}
