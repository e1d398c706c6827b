//! Event types for different topics.

use combat_core::{
    EffectApplication, EntityId, ProgressionEvent, SkillCheckResult, StatusApplication,
    StatusEffect, StatusEffectKind, Tick,
};
use serde::{Deserialize, Serialize};

/// Hit point changes and check outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An attack roll was resolved, hit or miss.
    AttackResolved {
        attacker: EntityId,
        target: EntityId,
        result: SkillCheckResult,
        clock: Tick,
    },

    /// A one-shot hazard was sprung.
    HazardSprung {
        entity: EntityId,
        result: SkillCheckResult,
        clock: Tick,
    },

    Damaged {
        entity: EntityId,
        amount: u32,
        hp_before: u32,
        hp_after: u32,
        clock: Tick,
    },

    Healed {
        entity: EntityId,
        amount: u32,
        hp_before: u32,
        hp_after: u32,
        clock: Tick,
    },

    MaxHpChanged {
        entity: EntityId,
        max_before: u32,
        max_after: u32,
        hp_after: u32,
        clock: Tick,
    },

    Died { entity: EntityId, clock: Tick },
}

/// Status effect lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEvent {
    /// An application attempt and how stacking absorbed it.
    Applied {
        entity: EntityId,
        effect: StatusEffect,
        outcome: StatusApplication,
        clock: Tick,
    },

    /// A damage-over-time or regeneration effect changed HP during a tick.
    Ticked {
        entity: EntityId,
        application: EffectApplication,
    },

    Expired {
        entity: EntityId,
        effect: StatusEffect,
        clock: Tick,
    },

    Removed {
        entity: EntityId,
        kind: StatusEffectKind,
        count: usize,
        clock: Tick,
    },
}

/// A skill progression change attributed to one combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgressed {
    pub entity: EntityId,
    pub event: ProgressionEvent,
    pub clock: Tick,
}

/// Events related to turn management (lightweight)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Entity was (re)queued to act at `ready_at`.
    Scheduled { entity: EntityId, ready_at: Tick },

    /// Entity's turn began at `clock`.
    Started { entity: EntityId, clock: Tick },

    /// Entity left the turn order (death or flight).
    Descheduled { entity: EntityId, clock: Tick },
}
