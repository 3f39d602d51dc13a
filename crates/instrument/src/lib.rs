//! # Instrument Crate
//!
//! The instrument registry: the root entity of the configuration manager.
//! Configuration histories and snapshot shelves are keyed under an
//! instrument id, so every other store depends on the ids handed out here.
//!
//! ## Key Components
//!
//! - **Domain Types**: `Instrument`, `NewInstrument`
//! - **Traits**: `InstrumentStore` for storage abstraction
//! - **In-Memory Store**: Default implementation, kept in creation order
//!
//! Instruments are created once and never mutated or deleted.

pub mod store;
pub mod types;

// Re-export main types for convenience
pub use common::InstrumentId;
pub use store::{InMemoryInstrumentStore, InstrumentStore};
pub use types::{Instrument, NewInstrument};
