//! Damage calculation for a landed hit.

use crate::config::CheckTables;
use crate::env::RandomSource;

/// Damage dealt by a hit with non-negative `margin`.
///
/// # Formula
///
/// ```text
/// damage = weapon_damage + margin / margin_damage_divisor + variance
/// variance = uniform [0, weapon_damage / 4]
/// ```
///
/// Consumes one value from `rng` for the variance, even when the range is
/// empty.
pub fn calculate_damage(
    weapon_damage: u32,
    margin: i64,
    rng: &mut impl RandomSource,
    tables: &CheckTables,
) -> u32 {
    let divisor = i64::from(tables.margin_damage_divisor.max(1));
    let margin_bonus = (margin.max(0) / divisor).min(i64::from(u32::MAX)) as u32;
    let variance = rng.range(0, weapon_damage / 4);
    weapon_damage
        .saturating_add(margin_bonus)
        .saturating_add(variance)
}
