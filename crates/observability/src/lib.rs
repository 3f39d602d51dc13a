//! Observability infrastructure for the configuration manager
//!
//! - Structured logging via tracing
//! - Prometheus metrics for HTTP traffic and store mutations
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("confman", LogFormat::Pretty, false)?;
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{default_directive, init_logging, LogFormat, AUDIT_TARGET};
pub use metrics::{init_metrics, RequestMetricsGuard, ServerMetrics, StoreMetrics};
