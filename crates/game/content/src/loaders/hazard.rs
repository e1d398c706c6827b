//! Hazard catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::Hazard;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A named hazard template. Each [`instantiate`](Self::instantiate) call
/// yields a fresh, untriggered hazard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardDefinition {
    pub name: String,
    pub difficulty: u32,
    pub severity: u32,
}

impl HazardDefinition {
    pub fn instantiate(&self) -> Hazard {
        Hazard::new(self.difficulty, self.severity)
    }
}

/// Hazard catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HazardCatalog {
    pub hazards: Vec<HazardDefinition>,
}

/// Loader for hazard catalogs from RON files.
pub struct HazardLoader;

impl HazardLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HazardDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HazardDefinition>> {
        let catalog: HazardCatalog =
            ron::from_str(content).context("Failed to parse hazard catalog RON")?;
        Ok(catalog.hazards)
    }
}
