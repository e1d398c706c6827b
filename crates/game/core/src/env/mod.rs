//! Boundaries to collaborators outside the resolution core.
//!
//! Oracles expose read-only data (equipment bonuses) and the injectable random
//! source. Concrete implementations live in the runtime or in tests so that the
//! core never couples to a storage technology or to ambient randomness.
mod equipment;
mod rng;

pub use equipment::{EquipmentBonus, EquipmentOracle, ItemId, Loadout};
pub use rng::{PcgRng, RandomSource, ScriptedRng};
