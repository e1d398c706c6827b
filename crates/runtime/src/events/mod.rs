//! Topic-based event bus for runtime events.
//!
//! Every state change in a session is published as an [`Event`] on one of the
//! [`Topic`]s; consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, SkillProgressed, StatusEvent, TurnEvent};
