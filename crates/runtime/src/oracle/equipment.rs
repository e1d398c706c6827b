//! Minimal [`combat_core::EquipmentOracle`] backed by an in-memory map.
use std::collections::HashMap;

use combat_content::EquipmentDefinition;
use combat_core::{EquipmentBonus, EquipmentOracle, ItemId};

/// EquipmentOracle implementation with static item definitions
#[derive(Debug, Clone, Default)]
pub struct EquipmentOracleImpl {
    bonuses: HashMap<ItemId, EquipmentBonus>,
}

impl EquipmentOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the oracle from loaded catalog entries.
    pub fn from_definitions(definitions: impl IntoIterator<Item = EquipmentDefinition>) -> Self {
        let mut oracle = Self::new();
        for definition in definitions {
            oracle.add(definition.id, definition.bonus);
        }
        oracle
    }

    /// Add (or replace) an item's bonus
    pub fn add(&mut self, item: ItemId, bonus: EquipmentBonus) {
        self.bonuses.insert(item, bonus);
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}

impl EquipmentOracle for EquipmentOracleImpl {
    fn bonus(&self, item: ItemId) -> Option<EquipmentBonus> {
        self.bonuses.get(&item).cloned()
    }
}
