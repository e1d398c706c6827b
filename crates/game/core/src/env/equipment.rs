use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an equippable item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Oracle providing numeric bonuses granted by equipped items.
///
/// The core treats every bonus as an opaque additive input to its formulas.
/// An unknown item simply grants nothing.
pub trait EquipmentOracle: Send + Sync {
    fn bonus(&self, item: ItemId) -> Option<EquipmentBonus>;
}

/// Additive bonuses from one item, or from a whole loadout once summed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentBonus {
    /// Added to the max-HP formula; may be negative (cursed gear).
    pub hp: i32,
    /// Base damage of a weapon hit.
    pub weapon_damage: u32,
    /// Per-skill level modifiers keyed by skill name.
    pub skill_modifiers: BTreeMap<String, i32>,
}

impl EquipmentBonus {
    pub fn new(hp: i32, weapon_damage: u32) -> Self {
        Self {
            hp,
            weapon_damage,
            skill_modifiers: BTreeMap::new(),
        }
    }

    /// Adds a skill-level modifier (builder pattern).
    #[must_use]
    pub fn with_skill_modifier(mut self, skill: impl AsRef<str>, modifier: i32) -> Self {
        *self
            .skill_modifiers
            .entry(skill.as_ref().to_owned())
            .or_insert(0) += modifier;
        self
    }

    /// Modifier for one skill, 0 when the gear does not touch it.
    pub fn skill_modifier(&self, skill: &str) -> i32 {
        self.skill_modifiers.get(skill).copied().unwrap_or(0)
    }

    fn accumulate(&mut self, other: &EquipmentBonus) {
        self.hp = self.hp.saturating_add(other.hp);
        self.weapon_damage = self.weapon_damage.saturating_add(other.weapon_damage);
        for (skill, modifier) in &other.skill_modifiers {
            *self.skill_modifiers.entry(skill.clone()).or_insert(0) += modifier;
        }
    }
}

/// Items currently equipped by one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    items: Vec<ItemId>,
}

impl Loadout {
    pub fn new(items: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Equips an item. Equipping the same item twice is a no-op.
    #[must_use]
    pub fn equip(mut self, item: ItemId) -> Self {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
        self
    }

    /// Unequips an item. Unequipping an absent item is a no-op.
    #[must_use]
    pub fn unequip(mut self, item: ItemId) -> Self {
        self.items.retain(|i| *i != item);
        self
    }

    /// Sums the bonuses of every equipped item the oracle knows about.
    pub fn total(&self, oracle: &(impl EquipmentOracle + ?Sized)) -> EquipmentBonus {
        let mut total = EquipmentBonus::default();
        for bonus in self.items.iter().filter_map(|item| oracle.bonus(*item)) {
            total.accumulate(&bonus);
        }
        total
    }
}
