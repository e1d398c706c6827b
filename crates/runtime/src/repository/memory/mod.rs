//! In-memory repository implementations for tests and local runs.

mod event;
mod state;

pub use event::InMemoryEventLog;
pub use state::InMemoryStateRepo;
