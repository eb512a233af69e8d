//! Rule entities registered in the catalog.
//!
//! These are plain records. What a unit type can *do* lives in its
//! attachments, not here.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, ResourceId, TerritoryId, UnitTypeId};

/// A kind of unit ("infantry", "battleship").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitType {
    pub id: UnitTypeId,
    pub name: String,
}

/// A land territory or sea zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    /// Sea zones are water.
    pub is_water: bool,
}

/// A spendable resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
}

/// A participant in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Controlled by the computer; AI bonus offsets apply.
    pub is_ai: bool,
}

/// One unit on the map: its type and its owner.
///
/// Stacking and pairing queries only need these two facts, so a unit
/// carries nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitTypeId,
    pub owner: PlayerId,
}

impl Unit {
    /// Create a unit of `unit_type` owned by `owner`.
    #[must_use]
    pub const fn new(unit_type: UnitTypeId, owner: PlayerId) -> Self {
        Self { unit_type, owner }
    }
}
