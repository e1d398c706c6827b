//! Skill progression: experience curves, lucky level-ups, and perk milestones.
//!
//! # Architecture
//!
//! - [`SkillState`]: one skill's level, experience, buffs and perks
//! - [`SkillBook`]: every skill of a character, keyed by name
//! - [`ProgressionTracker`]: converts skill attempts into growth and events
mod book;
mod skill;
mod tracker;

pub use book::{Skill, SkillBook};
pub use skill::{Perk, PerkKind, SkillError, SkillState, xp_to_next};
pub use tracker::{ProgressionEvent, ProgressionTracker};
