use combat_core::{
    ActionCategory, EntityId, SkillCheckResult, StatusApplication, StatusEffect,
    StatusEffectKind, Tick,
};
use serde::{Deserialize, Serialize};

/// What the current actor does with its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Weapon attack against the target's defense composite.
    Attack { target: EntityId },

    /// Apply a status effect to the target (buff, debuff or damage over time).
    Cast {
        target: EntityId,
        effect: StatusEffect,
    },

    /// Strip every instance of one status effect kind from the target.
    Cleanse {
        target: EntityId,
        kind: StatusEffectKind,
    },

    /// Restore hit points, e.g. from a potion or bandage.
    Heal { target: EntityId, amount: u32 },

    Wait,
}

impl Action {
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::Attack { .. } => ActionCategory::Attack,
            Action::Cast { .. } | Action::Cleanse { .. } => ActionCategory::Cast,
            Action::Heal { .. } => ActionCategory::UseItem,
            Action::Wait => ActionCategory::Wait,
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        match self {
            Action::Attack { target }
            | Action::Cast { target, .. }
            | Action::Cleanse { target, .. }
            | Action::Heal { target, .. } => Some(*target),
            Action::Wait => None,
        }
    }
}

/// Result of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// The action actually performed; a stunned actor always waits.
    pub performed: Action,
    /// Attack roll outcome, for attacks.
    pub check: Option<SkillCheckResult>,
    /// Stacking outcome, for casts.
    pub status: Option<StatusApplication>,
    /// Instances removed, for cleanses.
    pub removed: Option<usize>,
    /// Ticks the action cost after speed scaling; 0 when the actor died acting.
    pub cost: u64,
    /// Tick at which the actor is next ready, `None` when it died acting.
    pub ready_at: Option<Tick>,
}
