//! Persisted key-value state
//!
//! The descriptor list lives under a single key in process-wide storage,
//! the way an editor extension keeps data in its global-state memento.
//! - `MemoryStateStore`: In-memory for testing
//! - `FileStateStore`: JSON file (user-level data directory)

mod traits;
mod memory;
mod file;

pub use traits::{StateStore, StateError, StateResult};
pub use memory::MemoryStateStore;
pub use file::FileStateStore;
