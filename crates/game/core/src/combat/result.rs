//! Attack resolution.

use crate::check::SkillCheckResult;
use crate::config::CheckTables;
use crate::env::RandomSource;

use super::damage::calculate_damage;
use super::hit::roll_to_hit;

/// Resolve a complete attack (hit roll + damage).
///
/// The result reports `avoided = Some(true)` when the defender evaded. A miss
/// consumes one random value, a hit two.
///
/// # Arguments
///
/// * `attack_modifier` - Attacker's composite attack modifier
/// * `defense_modifier` - Defender's composite defense modifier
/// * `weapon_damage` - Base damage of the attacker's weapon
/// * `rng` - Random source for the hit roll and damage variance
/// * `tables` - Balance parameters
pub fn resolve_attack(
    attack_modifier: u32,
    defense_modifier: u32,
    weapon_damage: u32,
    rng: &mut impl RandomSource,
    tables: &CheckTables,
) -> SkillCheckResult {
    let roll = roll_to_hit(attack_modifier, defense_modifier, rng, tables);

    if !roll.success {
        return SkillCheckResult {
            success: false,
            margin: roll.margin,
            avoided: Some(true),
            damage: 0,
        };
    }

    SkillCheckResult {
        success: true,
        margin: roll.margin,
        avoided: Some(false),
        damage: calculate_damage(weapon_damage, roll.margin, rng, tables),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn miss_is_avoided_and_harmless() {
        // difficulty 5 + 10 = 15
        let mut rng = ScriptedRng::new([14]);
        let result = resolve_attack(8, 5, 12, &mut rng, &CheckTables::default());
        assert!(!result.success);
        assert_eq!(result.margin, -1);
        assert_eq!(result.avoided, Some(true));
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn hit_adds_margin_bonus_and_variance() {
        // roll 23 → margin 8 → +1; variance 2 of [0, 3]
        let mut rng = ScriptedRng::new([23, 2]);
        let result = resolve_attack(8, 5, 12, &mut rng, &CheckTables::default());
        assert!(result.success);
        assert_eq!(result.avoided, Some(false));
        assert_eq!(result.damage, 12 + 1 + 2);
    }

    #[test]
    fn variance_is_bounded_by_a_quarter_of_weapon_damage() {
        let mut rng = PcgRng::new(11);
        for _ in 0..500 {
            let result = resolve_attack(40, 0, 20, &mut rng, &CheckTables::default());
            if result.success {
                let bonus = result.margin as u32 / 5;
                assert!((20 + bonus..=25 + bonus).contains(&result.damage));
            }
        }
    }

    #[test]
    fn better_attackers_hit_more_often() {
        let tables = CheckTables::default();
        let hits = |attack| {
            let mut rng = PcgRng::new(5);
            (0..5_000)
                .filter(|_| resolve_attack(attack, 10, 8, &mut rng, &tables).success)
                .count()
        };
        assert!(hits(5) < hits(20));
        assert!(hits(20) < hits(60));
    }
}
