//! Status effect system for combatants.
//!
//! Status effects are timed modifiers (damage-over-time, regeneration, buffs,
//! debuffs) attached to a combatant. Every [`StatusEffectKind`] maps to exactly
//! one [`StackingPolicy`], which decides how repeated applications combine.
//!
//! # Ordering
//!
//! Effects are kept in the order they were first added. Replacements happen in
//! place so that ticking stays deterministic across re-applications.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    /// HP loss over time.
    Poisoned,

    /// Fire damage over time.
    Burning,

    /// Physical damage over time.
    Bleeding,

    // ========================================================================
    // Regeneration
    // ========================================================================
    /// HP recovery over time.
    Regenerating,

    // ========================================================================
    // Stat buffs
    // ========================================================================
    /// Attack bonus.
    Empowered,

    /// Defense bonus.
    Fortified,

    /// Speed bonus.
    Hasted,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Attack penalty.
    Weakened,

    /// Movement slowed.
    Slowed,

    /// Cannot move.
    Rooted,

    /// Cannot act.
    Stunned,
}

/// Rule governing how multiple applications of the same kind combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// One instance; a new one replaces it only with a strictly greater magnitude.
    ExclusiveStrongest,

    /// Up to `cap` instances coexist; their magnitudes are summed.
    AdditiveCapped { cap: u8 },

    /// One instance; a new one always replaces it.
    SingleInstanceLatest,
}

/// What an effect does to hit points each time it ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickBehavior {
    Damage,
    Heal,
    Inert,
}

impl StatusEffectKind {
    pub const fn stacking_policy(self) -> StackingPolicy {
        match self {
            Self::Poisoned | Self::Burning | Self::Bleeding | Self::Regenerating => {
                StackingPolicy::ExclusiveStrongest
            }
            Self::Empowered | Self::Fortified | Self::Hasted | Self::Weakened => {
                StackingPolicy::AdditiveCapped {
                    cap: CombatConfig::ADDITIVE_STACK_CAP,
                }
            }
            Self::Slowed | Self::Rooted | Self::Stunned => StackingPolicy::SingleInstanceLatest,
        }
    }

    pub const fn tick_behavior(self) -> TickBehavior {
        match self {
            Self::Poisoned | Self::Burning | Self::Bleeding => TickBehavior::Damage,
            Self::Regenerating => TickBehavior::Heal,
            Self::Empowered
            | Self::Fortified
            | Self::Hasted
            | Self::Weakened
            | Self::Slowed
            | Self::Rooted
            | Self::Stunned => TickBehavior::Inert,
        }
    }
}

/// A single status effect instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub magnitude: u32,
    /// Remaining ticks. Always positive while the effect is stored.
    pub duration: u32,
    /// Attribution id of whoever applied the effect.
    pub source: String,
}

impl StatusEffect {
    pub fn new(
        kind: StatusEffectKind,
        magnitude: u32,
        duration: u32,
        source: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            magnitude,
            duration,
            source: source.into(),
        }
    }
}

/// How an application was absorbed by the stacking policy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusApplication {
    /// Stored as a new instance.
    Added,
    /// Replaced an existing instance of the same kind.
    Replaced { previous: StatusEffect },
    /// Not strong enough to replace the existing instance.
    Discarded,
    /// Dropped because the kind (or the whole set) is at capacity.
    CapReached,
}

impl StatusApplication {
    /// Returns true if the application changed the effect list.
    pub const fn took_effect(&self) -> bool {
        matches!(self, Self::Added | Self::Replaced { .. })
    }
}

/// Active status effects on a combatant, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect according to its kind's stacking policy.
    ///
    /// Callers are expected to reject zero-duration effects beforehand.
    pub fn apply(&mut self, effect: StatusEffect) -> StatusApplication {
        match effect.kind.stacking_policy() {
            StackingPolicy::ExclusiveStrongest => {
                match self.effects.iter_mut().find(|e| e.kind == effect.kind) {
                    Some(existing) if effect.magnitude > existing.magnitude => {
                        let previous = core::mem::replace(existing, effect);
                        StatusApplication::Replaced { previous }
                    }
                    Some(_) => StatusApplication::Discarded,
                    None => self.push(effect),
                }
            }
            StackingPolicy::AdditiveCapped { cap } => {
                if self.count(effect.kind) >= cap as usize {
                    return StatusApplication::CapReached;
                }
                self.push(effect)
            }
            StackingPolicy::SingleInstanceLatest => {
                match self.effects.iter_mut().find(|e| e.kind == effect.kind) {
                    Some(existing) => {
                        let previous = core::mem::replace(existing, effect);
                        StatusApplication::Replaced { previous }
                    }
                    None => self.push(effect),
                }
            }
        }
    }

    fn push(&mut self, effect: StatusEffect) -> StatusApplication {
        match self.effects.try_push(effect) {
            Ok(()) => StatusApplication::Added,
            Err(_) => StatusApplication::CapReached,
        }
    }

    /// Removes every instance of a kind, returning how many were removed.
    pub fn remove(&mut self, kind: StatusEffectKind) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before - self.effects.len()
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Number of active instances of a kind.
    pub fn count(&self, kind: StatusEffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    /// Summed magnitude over all active instances of a kind (0 if none).
    pub fn magnitude(&self, kind: StatusEffectKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0u32, |acc, e| acc.saturating_add(e.magnitude))
    }

    /// Decrements every duration by one tick and drops the effects that run out.
    ///
    /// Returns the expired effects in insertion order.
    pub fn decrement_durations(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        let mut kept = ArrayVec::new();
        for mut effect in self.effects.drain(..) {
            effect.duration = effect.duration.saturating_sub(1);
            if effect.duration == 0 {
                expired.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.effects = kept;
        expired
    }

    /// Returns an iterator over all active effects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
