//! Deterministic combat resolution and character progression.
//!
//! `combat-core` defines the canonical rules (combatant state, status effects,
//! skill progression, skill checks, turn order) as pure functions over
//! immutable values. Every transform consumes its input and returns the new
//! state; every probabilistic rule draws from a caller-supplied
//! [`env::RandomSource`], so a fixed seed reproduces a fight exactly.
//!
//! The runtime crate wires these pieces into a session with persistence and
//! events; content loaders read [`CombatConfig`] and equipment tables.
pub mod check;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;

pub use check::{
    CheckRoll, CompositeCheck, Hazard, HazardOutcome, SkillCheck, SkillCheckResult, SkillWeight,
};
pub use combat::resolve_attack;
pub use config::{ActionCosts, CheckTables, CombatConfig};
pub use engine::{ScheduledTurn, SchedulerError, Side, TurnScheduler};
pub use env::{
    EquipmentBonus, EquipmentOracle, ItemId, Loadout, PcgRng, RandomSource, ScriptedRng,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{
    Perk, PerkKind, ProgressionEvent, ProgressionTracker, Skill, SkillBook, SkillError,
    SkillState, xp_to_next,
};
pub use state::{
    CombatantError, CombatantState, EffectApplication, EffectNature, EntityId, StackingPolicy,
    StatusApplication, StatusEffect, StatusEffectKind, StatusEffects, Tick, TickBehavior,
    TickReport,
};
pub use stats::{ActionCategory, action_cost, max_hp};
