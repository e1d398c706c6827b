//! File-backed repository implementations.

mod log;
mod state;

pub use log::FileEventLog;
pub use state::FileStateRepository;
