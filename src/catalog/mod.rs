//! Entity catalog: the read-only name lookup service of a loaded game.
//!
//! ## Key Types
//!
//! - `EntityCatalog`: unit types, territories, resources, players, alliances
//! - `UnitType`, `Territory`, `Resource`, `Player`: registered entities
//! - `Unit`: a unit on the map (type + owner)

pub mod entities;
pub mod registry;

pub use entities::{Player, Resource, Territory, Unit, UnitType};
pub use registry::EntityCatalog;
