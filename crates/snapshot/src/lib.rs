//! # Snapshot Crate
//!
//! Named point-in-time captures of an instrument's configuration.
//!
//! A snapshot holds a full copy of the payload it was created with, so
//! later configuration updates never affect it. Names are unique per
//! instrument and the existence check plus insert is a single step.

pub mod store;
pub mod types;

pub use store::{InMemorySnapshotStore, SnapshotStore};
pub use types::{NewSnapshot, Snapshot};
