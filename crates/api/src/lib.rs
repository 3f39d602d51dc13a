//! # API Crate
//!
//! The REST surface of the configuration manager. Handlers are thin: they
//! parse and validate arguments, call into the instrument, configuration
//! and snapshot stores, map error kinds to status codes and write an audit
//! line for every mutating call.
//!
//! ## Modules
//!
//! - `state` - Shared store handles injected into every handler
//! - `models` - Request/response types
//! - `handlers` - One function per endpoint
//! - `routes` - Router assembly and middleware stack
//! - `error` - Error-to-response mapping
//! - `middleware` - Per-request metrics

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;


pub use error::{ApiError, ApiResult};
pub use routes::{api_routes, build_router, RouterOptions};
pub use state::AppState;
