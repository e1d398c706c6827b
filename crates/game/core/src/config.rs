use crate::check::{CompositeCheck, SkillWeight};
use crate::progression::Skill;
use crate::stats::ActionCategory;

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Base percentage for the instant "lucky" level-up roll.
    pub lucky_base_chance: u32,

    /// Share of `base_xp` granted for a failed skill use, in percent.
    pub failed_attempt_xp_pct: u32,

    /// Experience granted per skill used in a successful attempt.
    pub attempt_xp: u32,

    /// Floor applied to every speed-scaled action cost.
    pub min_action_cost: u64,

    /// Base tick cost per action category.
    pub action_costs: ActionCosts,

    /// Balance parameters for checks, hazards and attacks.
    pub checks: CheckTables,

    /// Skills contributing to an attack roll.
    pub attack: CompositeCheck,

    /// Skills contributing to evading an attack.
    pub defense: CompositeCheck,

    /// Skills contributing to avoiding a hazard.
    pub hazard_avoidance: CompositeCheck,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on simultaneously active status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 32;
    /// Instances allowed for an additive-capped status effect kind.
    pub const ADDITIVE_STACK_CAP: u8 = 3;
    /// A perk milestone exists at every positive multiple of this level.
    pub const PERK_MILESTONE_INTERVAL: u32 = 10;
    /// Floor of the max-HP formula.
    pub const MIN_MAX_HP: u32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LUCKY_BASE_CHANCE: u32 = 15;
    pub const DEFAULT_FAILED_ATTEMPT_XP_PCT: u32 = 20;
    pub const DEFAULT_ATTEMPT_XP: u32 = 25;
    pub const DEFAULT_MIN_ACTION_COST: u64 = 2;

    pub fn new() -> Self {
        Self {
            lucky_base_chance: Self::DEFAULT_LUCKY_BASE_CHANCE,
            failed_attempt_xp_pct: Self::DEFAULT_FAILED_ATTEMPT_XP_PCT,
            attempt_xp: Self::DEFAULT_ATTEMPT_XP,
            min_action_cost: Self::DEFAULT_MIN_ACTION_COST,
            action_costs: ActionCosts::default(),
            checks: CheckTables::default(),
            attack: CompositeCheck::new(vec![
                SkillWeight::new(Skill::Melee, 100),
                SkillWeight::new(Skill::Agility, 25),
            ]),
            defense: CompositeCheck::new(vec![
                SkillWeight::new(Skill::Evasion, 100),
                SkillWeight::new(Skill::Agility, 25),
            ]),
            hazard_avoidance: CompositeCheck::new(vec![
                SkillWeight::new(Skill::Perception, 60),
                SkillWeight::new(Skill::Disarming, 60),
            ]),
        }
    }

    /// Overrides the lucky level-up base chance (builder pattern).
    #[must_use]
    pub fn with_lucky_base_chance(mut self, chance: u32) -> Self {
        self.lucky_base_chance = chance;
        self
    }

    /// Overrides the minimum action cost (builder pattern).
    #[must_use]
    pub fn with_min_action_cost(mut self, cost: u64) -> Self {
        self.min_action_cost = cost;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Base tick cost for each action category before speed scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionCosts {
    pub attack: u64,
    pub cast: u64,
    pub use_item: u64,
    pub movement: u64,
    pub wait: u64,
}

impl ActionCosts {
    pub const fn get(&self, category: ActionCategory) -> u64 {
        match category {
            ActionCategory::Attack => self.attack,
            ActionCategory::Cast => self.cast,
            ActionCategory::UseItem => self.use_item,
            ActionCategory::Movement => self.movement,
            ActionCategory::Wait => self.wait,
        }
    }
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            attack: 10,
            cast: 12,
            use_item: 8,
            movement: 6,
            wait: 5,
        }
    }
}

/// Balance parameters for skill checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CheckTables {
    /// Margin, as a percentage of difficulty, needed to avoid a hazard cleanly.
    pub clean_avoid_pct: u32,

    /// Flat difficulty added to every defense composite.
    pub base_defense: u32,

    /// Attack margin points per extra point of damage.
    pub margin_damage_divisor: u32,
}

impl Default for CheckTables {
    fn default() -> Self {
        Self {
            clean_avoid_pct: 50,
            base_defense: 10,
            margin_damage_divisor: 5,
        }
    }
}
