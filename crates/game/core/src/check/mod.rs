//! Skill checks: the opposed roll, weighted composites and one-shot hazards.
//!
//! All functions here are pure given a [`RandomSource`](crate::env::RandomSource);
//! the same seed always yields the same result.
mod composite;
mod hazard;
mod roll;

pub use composite::{CompositeCheck, SkillWeight};
pub use hazard::{Hazard, HazardOutcome};
pub use roll::{CheckRoll, SkillCheck, SkillCheckResult};
