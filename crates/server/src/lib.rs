//! Server infrastructure for the configuration manager
//!
//! This crate owns the HTTP listener lifecycle: binding, serving an Axum
//! router, health reporting and graceful shutdown. It knows nothing about
//! instruments or configurations; the router it serves is built elsewhere.
//!
//! # Architecture
//!
//! Servers implement the [`Server`] trait, which provides a consistent
//! interface for running and monitoring them. The [`ServerExt`] trait
//! provides convenience methods like `spawn()` and `run_with_ctrl_c()`.
//!
//! Shutdown is signalled through a `CancellationToken` from `tokio_util`.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::new("0.0.0.0", 8000);
//!     let server = HttpServer::new(config, router);
//!     server.run_with_ctrl_c().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind address and default ports
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Health check endpoint
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

// Re-exports for convenience
pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::{validate_port_available, validate_port_range};
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
