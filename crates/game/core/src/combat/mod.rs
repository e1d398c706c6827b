//! Combat resolution system.
//!
//! Pure functions for resolving attacks. All randomness comes from the
//! caller's [`RandomSource`](crate::env::RandomSource).
//!
//! # Core Functions
//!
//! - `resolve_attack`: complete attack resolution (hit roll + damage)
//! - `roll_to_hit`: attack composite against defense composite
//! - `calculate_damage`: weapon damage plus margin bonus and variance

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::calculate_damage;
pub use hit::{defense_difficulty, roll_to_hit};
pub use result::resolve_attack;
