//! Turn order over a logical clock.
//!
//! The [`TurnScheduler`] is the sole source of "whose turn is next". It knows
//! nothing about combatants beyond their id, side and ready tick; callers
//! compute the next ready tick from action costs and re-insert the actor.
mod errors;
mod turns;

pub use errors::SchedulerError;
pub use turns::{ScheduledTurn, Side, TurnScheduler};
