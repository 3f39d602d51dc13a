//! Common types and utilities for the configuration manager
//!
//! This crate provides the identifiers, payload type and error taxonomy
//! shared by the instrument registry, the configuration store, the snapshot
//! store and the HTTP façade.
//!
//! # Modules
//!
//! - [`error`] - The error taxonomy (`NotFound`, `Conflict`, `Validation`)
//! - [`types`] - Shared domain types (`InstrumentId`, `Payload`, `VersionId`)

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
