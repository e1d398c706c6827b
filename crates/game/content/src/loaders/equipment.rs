//! Equipment catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::{EquipmentBonus, ItemId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One item and the bonus it grants while equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentDefinition {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub bonus: EquipmentBonus,
}

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub items: Vec<EquipmentDefinition>,
}

/// Loader for equipment catalogs from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    /// Load an equipment catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EquipmentDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse an equipment catalog from RON text.
    ///
    /// Duplicate item ids are rejected.
    pub fn parse(content: &str) -> LoadResult<Vec<EquipmentDefinition>> {
        let catalog: EquipmentCatalog =
            ron::from_str(content).context("Failed to parse equipment catalog RON")?;

        let mut seen = std::collections::BTreeSet::new();
        for item in &catalog.items {
            anyhow::ensure!(seen.insert(item.id), "duplicate equipment id {}", item.id);
        }

        Ok(catalog.items)
    }
}
