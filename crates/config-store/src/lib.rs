//! Configuration store
//!
//! Holds, per instrument, the current configuration and an append-only
//! version history.
//!
//! # Guarantees
//!
//! - Version ids start at 1 and grow by exactly one per update
//! - Versions are never overwritten or renumbered
//! - The current configuration is always the payload of the latest version
//! - Updates to one instrument serialize; different instruments never contend

pub mod diff;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use diff::{diff, ChangeSet, FieldChange};
pub use memory::InMemoryConfigStore;
pub use traits::ConfigStore;
pub use types::{ConfigUpdate, ConfigVersion};
