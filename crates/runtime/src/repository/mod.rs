//! Persistence adapters for combatant records and the event timeline.
//!
//! - [`StateRepository`] stores one [`EntityRecord`] per combatant
//! - [`EventRepository`] is an append-only event log

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileEventLog, FileStateRepository};
pub use memory::{InMemoryEventLog, InMemoryStateRepo};
pub use traits::{EntityRecord, EventRepository, StateRepository};
