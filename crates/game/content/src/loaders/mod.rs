//! Content loaders for reading balance data from files.
//!
//! Every loader offers `load(path)` for files and `parse(str)` for inline
//! content, returning [`LoadResult`] with the failing path or format in the
//! error context.

pub mod config;
pub mod equipment;
pub mod hazard;

pub use config::ConfigLoader;
pub use equipment::{EquipmentCatalog, EquipmentDefinition, EquipmentLoader};
pub use hazard::{HazardCatalog, HazardDefinition, HazardLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
