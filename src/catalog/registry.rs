//! Entity catalog for name lookup.
//!
//! The `EntityCatalog` stores every unit type, territory, resource and
//! player of a loaded game, indexed by name. It is populated while the
//! definition is read and treated as read-only afterwards.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::entities::{Player, Resource, Territory, Unit, UnitType};
use crate::core::{
    AttachmentError, EntityKind, PlayerId, ResourceId, Result, TerritoryId, UnitTypeId, MAX_PLAYERS,
};

/// Catalog of the entities of one game.
///
/// ## Example
///
/// ```
/// use wargame_rules::catalog::EntityCatalog;
///
/// let mut catalog = EntityCatalog::new();
/// let infantry = catalog.add_unit_type("infantry").unwrap();
///
/// assert_eq!(catalog.unit_type("infantry"), Some(infantry));
/// assert_eq!(catalog.unit_type_name(infantry), Some("infantry"));
/// assert!(catalog.unit_type("armour").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCatalog {
    unit_types: Vec<UnitType>,
    unit_type_names: FxHashMap<String, UnitTypeId>,

    territories: Vec<Territory>,
    territory_names: FxHashMap<String, TerritoryId>,

    resources: Vec<Resource>,
    resource_names: FxHashMap<String, ResourceId>,

    players: Vec<Player>,
    player_names: FxHashMap<String, PlayerId>,

    /// Allied pairs, stored with the lower id first.
    alliances: FxHashSet<(PlayerId, PlayerId)>,
}

impl EntityCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration ===

    /// Register a unit type. Names must be unique.
    pub fn add_unit_type(&mut self, name: impl Into<String>) -> Result<UnitTypeId> {
        let name = name.into();
        if self.unit_type_names.contains_key(&name) {
            return Err(duplicate(EntityKind::UnitType, &name));
        }
        let id = UnitTypeId::new(self.unit_types.len() as u32);
        self.unit_type_names.insert(name.clone(), id);
        self.unit_types.push(UnitType { id, name });
        Ok(id)
    }

    /// Register a territory. Names must be unique.
    pub fn add_territory(&mut self, name: impl Into<String>, is_water: bool) -> Result<TerritoryId> {
        let name = name.into();
        if self.territory_names.contains_key(&name) {
            return Err(duplicate(EntityKind::Territory, &name));
        }
        let id = TerritoryId::new(self.territories.len() as u32);
        self.territory_names.insert(name.clone(), id);
        self.territories.push(Territory { id, name, is_water });
        Ok(id)
    }

    /// Register a resource. Names must be unique.
    pub fn add_resource(&mut self, name: impl Into<String>) -> Result<ResourceId> {
        let name = name.into();
        if self.resource_names.contains_key(&name) {
            return Err(duplicate(EntityKind::Resource, &name));
        }
        let id = ResourceId::new(self.resources.len() as u32);
        self.resource_names.insert(name.clone(), id);
        self.resources.push(Resource { id, name });
        Ok(id)
    }

    /// Register a player. Names must be unique; at most 255 players.
    pub fn add_player(&mut self, name: impl Into<String>, is_ai: bool) -> Result<PlayerId> {
        let name = name.into();
        if self.player_names.contains_key(&name) {
            return Err(duplicate(EntityKind::Player, &name));
        }
        let index = u8::try_from(self.players.len())
            .ok()
            .filter(|&index| usize::from(index) < MAX_PLAYERS)
            .ok_or_else(|| {
                AttachmentError::IllegalState(format!("at most {MAX_PLAYERS} players supported"))
            })?;
        let id = PlayerId::new(index);
        self.player_names.insert(name.clone(), id);
        self.players.push(Player { id, name, is_ai });
        Ok(id)
    }

    /// Declare two players allied. Alliances are symmetric.
    pub fn ally(&mut self, a: PlayerId, b: PlayerId) {
        self.alliances.insert(ordered_pair(a, b));
    }

    // === Lookup by name ===

    #[must_use]
    pub fn unit_type(&self, name: &str) -> Option<UnitTypeId> {
        self.unit_type_names.get(name).copied()
    }

    #[must_use]
    pub fn territory(&self, name: &str) -> Option<TerritoryId> {
        self.territory_names.get(name).copied()
    }

    #[must_use]
    pub fn resource(&self, name: &str) -> Option<ResourceId> {
        self.resource_names.get(name).copied()
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<PlayerId> {
        self.player_names.get(name).copied()
    }

    /// Resolve a unit type name, failing with `UnresolvedReference`.
    pub fn resolve_unit_type(&self, field: &'static str, name: &str) -> Result<UnitTypeId> {
        self.unit_type(name)
            .ok_or_else(|| unresolved(field, EntityKind::UnitType, name))
    }

    /// Resolve a territory name, failing with `UnresolvedReference`.
    pub fn resolve_territory(&self, field: &'static str, name: &str) -> Result<TerritoryId> {
        self.territory(name)
            .ok_or_else(|| unresolved(field, EntityKind::Territory, name))
    }

    /// Resolve a resource name, failing with `UnresolvedReference`.
    pub fn resolve_resource(&self, field: &'static str, name: &str) -> Result<ResourceId> {
        self.resource(name)
            .ok_or_else(|| unresolved(field, EntityKind::Resource, name))
    }

    /// Resolve a player name, failing with `UnresolvedReference`.
    pub fn resolve_player(&self, field: &'static str, name: &str) -> Result<PlayerId> {
        self.player(name)
            .ok_or_else(|| unresolved(field, EntityKind::Player, name))
    }

    // === Lookup by id ===

    #[must_use]
    pub fn unit_type_name(&self, id: UnitTypeId) -> Option<&str> {
        self.unit_types.get(id.index()).map(|u| u.name.as_str())
    }

    #[must_use]
    pub fn territory_by_id(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    #[must_use]
    pub fn resource_name(&self, id: ResourceId) -> Option<&str> {
        self.resources.get(id.index()).map(|r| r.name.as_str())
    }

    #[must_use]
    pub fn player_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.player_by_id(id).map(|p| p.name.as_str())
    }

    // === Iteration ===

    /// Unit types in registration order.
    pub fn unit_types(&self) -> impl Iterator<Item = &UnitType> {
        self.unit_types.iter()
    }

    /// Territories in registration order.
    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    /// Players in registration order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // === Relationships ===

    /// Check whether two players are allied. A player is its own ally.
    #[must_use]
    pub fn are_allied(&self, a: PlayerId, b: PlayerId) -> bool {
        a == b || self.alliances.contains(&ordered_pair(a, b))
    }

    /// Check whether `unit` belongs to `player` or one of its allies.
    #[must_use]
    pub fn is_unit_allied(&self, unit: &Unit, player: PlayerId) -> bool {
        self.are_allied(unit.owner, player)
    }
}

fn ordered_pair(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn duplicate(kind: EntityKind, name: &str) -> AttachmentError {
    AttachmentError::IllegalState(format!("{} '{}' already registered", kind, name))
}

fn unresolved(field: &'static str, kind: EntityKind, name: &str) -> AttachmentError {
    AttachmentError::UnresolvedReference {
        field,
        kind,
        name: name.to_string(),
    }
}
