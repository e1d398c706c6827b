//! Derived quantities: maximum HP and speed-scaled action costs.
//!
//! Everything here is a pure function of persisted skill levels, gear bonuses
//! and active status effects. Nothing is stored.

pub mod resources;
pub mod speed;

pub use resources::max_hp;
pub use speed::{ActionCategory, action_cost, category_cost, speed_level};
