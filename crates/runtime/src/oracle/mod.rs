//! Oracle implementations that expose content to the combat core.

mod equipment;

pub use equipment::EquipmentOracleImpl;
