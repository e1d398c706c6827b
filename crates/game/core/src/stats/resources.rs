//! Resource maximums derived from skills.
//!
//! Only current HP is stored; the maximum is recomputed from persisted skill
//! levels whenever skills or gear change.

use crate::config::CombatConfig;
use crate::progression::{Skill, SkillBook};

/// Maximum HP from persisted skill levels plus an item bonus.
///
/// # Formula
///
/// ```text
/// max_hp = max(10, 10 + 5·Vitality + 3·Endurance + 2·Constitution + item_hp_bonus)
/// ```
///
/// Temporary buffs are ignored. Missing skills count as level 0.
pub fn max_hp(skills: &SkillBook, item_hp_bonus: i32) -> u32 {
    let floor = i64::from(CombatConfig::MIN_MAX_HP);
    let raw = floor
        + 5 * i64::from(skills.level(Skill::Vitality))
        + 3 * i64::from(skills.level(Skill::Endurance))
        + 2 * i64::from(skills.level(Skill::Constitution))
        + i64::from(item_hp_bonus);
    raw.clamp(floor, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::SkillState;

    fn book(vitality: u32, endurance: u32, constitution: u32) -> SkillBook {
        SkillBook::new()
            .with_skill(Skill::Vitality, SkillState::at_level(vitality))
            .with_skill(Skill::Endurance, SkillState::at_level(endurance))
            .with_skill(Skill::Constitution, SkillState::at_level(constitution))
    }

    #[test]
    fn weighted_skill_sum() {
        assert_eq!(max_hp(&book(10, 5, 3), 0), 81);
        assert_eq!(max_hp(&book(10, 5, 3), 9), 90);
    }

    #[test]
    fn empty_book_gets_the_floor() {
        assert_eq!(max_hp(&SkillBook::new(), 0), 10);
    }

    #[test]
    fn negative_bonus_never_drops_below_floor() {
        assert_eq!(max_hp(&book(1, 0, 0), -100), 10);
        assert_eq!(max_hp(&book(4, 0, 0), -12), 18);
    }

    #[test]
    fn buffs_do_not_raise_max_hp() {
        let buffed = SkillBook::new().with_skill(Skill::Vitality, SkillState::at_level(2).apply_buff(8));
        assert_eq!(max_hp(&buffed, 0), 20);
    }
}
