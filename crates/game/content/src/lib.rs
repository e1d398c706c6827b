//! Data-driven content definitions and loaders.
//!
//! This crate reads balance data from disk:
//! - Combat configuration (TOML)
//! - Equipment catalogs (RON)
//! - Hazard catalogs (RON)
//!
//! Content is consumed by runtime oracles and never appears in combatant state.
//! All loaders use combat-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, EquipmentCatalog, EquipmentDefinition, EquipmentLoader, HazardCatalog,
    HazardDefinition, HazardLoader, LoadResult,
};
