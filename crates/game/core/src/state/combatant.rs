//! Hit points, action timer and status effects of a single combatant.
//!
//! Every transform consumes the state and returns the next one; callers always
//! rebind to the returned value:
//!
//! ```
//! use combat_core::CombatantState;
//!
//! let goblin = CombatantState::new(20).unwrap();
//! let goblin = goblin.apply_damage(7);
//! assert_eq!(goblin.current_hp(), 13);
//! ```

use crate::error::{ErrorSeverity, GameError};
use crate::progression::SkillBook;
use crate::stats::max_hp;

use super::Tick;
use super::status::{StatusApplication, StatusEffect, StatusEffectKind, StatusEffects, TickBehavior};

/// Contract violations raised by combatant transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatantError {
    #[error("maximum HP must be at least 1, got {0}")]
    InvalidMaxHp(u32),

    #[error("action cost must be non-negative, got {0}")]
    NegativeActionCost(i64),

    #[error("status effect {0} applied with zero duration")]
    ZeroDuration(StatusEffectKind),
}

impl GameError for CombatantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMaxHp(_) => "COMBATANT_INVALID_MAX_HP",
            Self::NegativeActionCost(_) => "COMBATANT_NEGATIVE_ACTION_COST",
            Self::ZeroDuration(_) => "COMBATANT_ZERO_DURATION",
        }
    }
}

/// Whether an effect application hurt or healed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectNature {
    Damage,
    Healing,
}

/// Record of one effect changing hit points during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectApplication {
    pub kind: StatusEffectKind,
    pub magnitude: u32,
    pub nature: EffectNature,
    pub source: String,
    pub hp_before: u32,
    pub hp_after: u32,
    pub at: Tick,
}

/// Everything that happened during one `tick_effects` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// HP changes in the order the effects were added.
    pub applications: Vec<EffectApplication>,
    /// Effects whose duration ran out this tick.
    pub expired: Vec<StatusEffect>,
}

/// Combat state of one actor.
///
/// Invariant: `current_hp <= max_hp` and `max_hp >= 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    current_hp: u32,
    max_hp: u32,
    action_timer_end: Tick,
    status_effects: StatusEffects,
}

impl CombatantState {
    /// Creates a combatant at full health, ready to act at tick 0.
    pub fn new(max_hp: u32) -> Result<Self, CombatantError> {
        if max_hp < 1 {
            return Err(CombatantError::InvalidMaxHp(max_hp));
        }
        Ok(Self {
            current_hp: max_hp,
            max_hp,
            action_timer_end: Tick::ZERO,
            status_effects: StatusEffects::empty(),
        })
    }

    /// Creates a combatant whose maximum HP derives from skill levels and gear.
    pub fn from_skills(skills: &SkillBook, item_hp_bonus: i32) -> Self {
        let max_hp = max_hp(skills, item_hp_bonus);
        Self {
            current_hp: max_hp,
            max_hp,
            action_timer_end: Tick::ZERO,
            status_effects: StatusEffects::empty(),
        }
    }

    /// Sets current HP directly, clamped to `max_hp` (builder pattern).
    #[must_use]
    pub fn with_current_hp(mut self, current_hp: u32) -> Self {
        self.current_hp = current_hp.min(self.max_hp);
        self
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn action_timer_end(&self) -> Tick {
        self.action_timer_end
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }

    // ========================================================================
    // Hit points
    // ========================================================================

    #[must_use]
    pub fn apply_damage(mut self, amount: u32) -> Self {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self
    }

    #[must_use]
    pub fn heal(mut self, amount: u32) -> Self {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self
    }

    /// Resizes maximum HP while preserving the current HP ratio.
    ///
    /// The ratio uses the old maximum; the result is floored and then clamped
    /// to `[1, new_max]`, so a resize alone never leaves the combatant at 0 HP.
    pub fn update_max_hp(mut self, new_max: u32) -> Result<Self, CombatantError> {
        if new_max < 1 {
            return Err(CombatantError::InvalidMaxHp(new_max));
        }
        let scaled = u64::from(self.current_hp) * u64::from(new_max) / u64::from(self.max_hp);
        self.current_hp = (scaled as u32).clamp(1, new_max);
        self.max_hp = new_max;
        Ok(self)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Current HP as a floored percentage of maximum HP.
    pub fn hp_percentage(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (u64::from(self.current_hp) * 100 / u64::from(self.max_hp)) as u32
    }

    // ========================================================================
    // Action timer
    // ========================================================================

    /// Schedules the next action at `now + cost`.
    pub fn advance_timer(mut self, cost: i64, now: Tick) -> Result<Self, CombatantError> {
        if cost < 0 {
            return Err(CombatantError::NegativeActionCost(cost));
        }
        self.action_timer_end = now + cost as u64;
        Ok(self)
    }

    pub fn can_act(&self, now: Tick) -> bool {
        now >= self.action_timer_end
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    pub fn apply_status(
        mut self,
        effect: StatusEffect,
    ) -> Result<(Self, StatusApplication), CombatantError> {
        if effect.duration == 0 {
            return Err(CombatantError::ZeroDuration(effect.kind));
        }
        let outcome = self.status_effects.apply(effect);
        Ok((self, outcome))
    }

    /// Removes every instance of `kind`; returns the number removed.
    #[must_use]
    pub fn remove_status(mut self, kind: StatusEffectKind) -> (Self, usize) {
        let removed = self.status_effects.remove(kind);
        (self, removed)
    }

    pub fn has_status_effect(&self, kind: StatusEffectKind) -> bool {
        self.status_effects.has(kind)
    }

    pub fn status_effect_magnitude(&self, kind: StatusEffectKind) -> u32 {
        self.status_effects.magnitude(kind)
    }

    /// Processes every active effect once, in insertion order.
    ///
    /// Damage-over-time effects subtract their magnitude, regeneration adds it
    /// (clamped to `max_hp`), then every duration drops by one and effects that
    /// reach zero are removed.
    #[must_use]
    pub fn tick_effects(mut self, now: Tick) -> (Self, TickReport) {
        let mut applications = Vec::new();
        for effect in self.status_effects.iter() {
            let nature = match effect.kind.tick_behavior() {
                TickBehavior::Damage => EffectNature::Damage,
                TickBehavior::Heal => EffectNature::Healing,
                TickBehavior::Inert => continue,
            };
            let hp_before = self.current_hp;
            self.current_hp = match nature {
                EffectNature::Damage => hp_before.saturating_sub(effect.magnitude),
                EffectNature::Healing => hp_before.saturating_add(effect.magnitude).min(self.max_hp),
            };
            applications.push(EffectApplication {
                kind: effect.kind,
                magnitude: effect.magnitude,
                nature,
                source: effect.source.clone(),
                hp_before,
                hp_after: self.current_hp,
                at: now,
            });
        }
        let expired = self.status_effects.decrement_durations();
        (
            self,
            TickReport {
                applications,
                expired,
            },
        )
    }
}
