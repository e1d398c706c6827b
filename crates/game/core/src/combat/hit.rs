//! Attack roll against a defender's composite defense.

use crate::check::{CheckRoll, SkillCheck};
use crate::config::CheckTables;
use crate::env::RandomSource;

/// Difficulty an attacker must beat.
///
/// # Formula
///
/// ```text
/// difficulty = defense_modifier + base_defense
/// ```
///
/// The flat `base_defense` keeps an unskilled defender from being hit
/// automatically.
pub fn defense_difficulty(defense_modifier: u32, tables: &CheckTables) -> u32 {
    defense_modifier.saturating_add(tables.base_defense)
}

/// Rolls an attack, consuming one value from `rng`.
pub fn roll_to_hit(
    attack_modifier: u32,
    defense_modifier: u32,
    rng: &mut impl RandomSource,
    tables: &CheckTables,
) -> CheckRoll {
    SkillCheck::new(attack_modifier, defense_difficulty(defense_modifier, tables)).roll(rng)
}
