//! Speed and action cost.
//!
//! Action costs are computed from a per-category base cost and the actor's
//! speed level:
//!
//! ```text
//! cost = max(minimum, floor(base × 10 / (10 + speed_level)))
//! ```
//!
//! which is the exact integer form of `base / (1 + speed_level / 10)`.

use crate::config::ActionCosts;
use crate::progression::{Skill, SkillBook};
use crate::state::{StatusEffectKind, StatusEffects};

/// Category of an action, selecting its base cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCategory {
    Attack,
    Cast,
    UseItem,
    Movement,
    Wait,
}

/// Speed-scaled cost of one action, never below `minimum`.
///
/// # Examples
///
/// - base 10, speed 0: 10
/// - base 10, speed 10: 5
/// - base 10, speed 40: 2
pub fn action_cost(base: u64, speed_level: u32, minimum: u64) -> u64 {
    let scaled = base.saturating_mul(10) / (10 + u64::from(speed_level));
    scaled.max(minimum)
}

/// Cost of an action category for an actor with `speed_level`.
pub fn category_cost(costs: &ActionCosts, category: ActionCategory, speed_level: u32, minimum: u64) -> u64 {
    action_cost(costs.get(category), speed_level, minimum)
}

/// Speed level: effective Agility, raised by Hasted and lowered by Slowed.
pub fn speed_level(skills: &SkillBook, effects: &StatusEffects) -> u32 {
    skills
        .effective_level(Skill::Agility)
        .saturating_add(effects.magnitude(StatusEffectKind::Hasted))
        .saturating_sub(effects.magnitude(StatusEffectKind::Slowed))
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::progression::SkillState;
    use crate::state::StatusEffect;

    #[test]
    fn speed_divides_base_cost() {
        assert_eq!(action_cost(10, 0, 2), 10);
        assert_eq!(action_cost(10, 10, 2), 5);
        assert_eq!(action_cost(12, 5, 2), 8);
    }

    #[test]
    fn minimum_cost_applies() {
        assert_eq!(action_cost(10, 40, 2), 2);
        assert_eq!(action_cost(10, 1_000, 2), 2);
        assert_eq!(action_cost(0, 0, 0), 0);
    }

    #[test]
    fn cost_never_increases_with_speed() {
        let mut previous = action_cost(20, 0, 1);
        for speed in 1..200 {
            let cost = action_cost(20, speed, 1);
            assert!(cost <= previous);
            previous = cost;
        }
    }

    #[test]
    fn every_category_has_a_cost() {
        let costs = ActionCosts::default();
        for category in ActionCategory::iter() {
            assert!(category_cost(&costs, category, 0, 2) >= 2, "{category}");
        }
        assert_eq!(category_cost(&costs, ActionCategory::Attack, 10, 2), 5);
    }

    #[test]
    fn haste_and_slow_shift_speed_level() {
        let skills = SkillBook::new().with_skill(Skill::Agility, SkillState::at_level(6));
        let mut effects = StatusEffects::empty();
        assert_eq!(speed_level(&skills, &effects), 6);

        effects.apply(StatusEffect::new(StatusEffectKind::Hasted, 4, 3, "potion"));
        assert_eq!(speed_level(&skills, &effects), 10);

        effects.apply(StatusEffect::new(StatusEffectKind::Slowed, 20, 3, "frost"));
        assert_eq!(speed_level(&skills, &effects), 0);
    }
}
