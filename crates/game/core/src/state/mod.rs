//! Combatant state representation.
//!
//! This module owns the data structures that describe a combatant's hit points,
//! action timer, and status effects. Runtime layers clone or query this state
//! but only ever replace it with the value returned by a transform.
mod combatant;
mod common;
mod status;

pub use combatant::{CombatantError, CombatantState, EffectApplication, EffectNature, TickReport};
pub use common::{EntityId, Tick};
pub use status::{
    StackingPolicy, StatusApplication, StatusEffect, StatusEffectKind, StatusEffects, TickBehavior,
};
