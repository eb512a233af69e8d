//! The loaded game: properties, rules, entities, attachments and the units
//! currently on the map.
//!
//! `GameData` owns everything a rules query needs. Attachment queries
//! that depend on the map (stacking) or on player state (derived combat
//! values) go through it so callers never assemble the pieces by hand.

pub mod persistence;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attachments::{Attachment, AttachmentRegistry, PlayerModifiers, TechAdvances};
use crate::catalog::{EntityCatalog, Unit};
use crate::core::{
    AttachmentError, EntityKind, GameProperties, PlayerId, PlayerMap, Result, RuleConfig,
    TerritoryId, UnitTypeId, GAME_UUID,
};
use crate::validation::{ValidationContext, ValidationError};

/// One loaded game.
///
/// Occupants are stored as persistent vectors, so cloning a game to explore
/// a hypothetical placement does not copy the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub properties: GameProperties,
    pub rules: RuleConfig,
    pub catalog: EntityCatalog,
    pub attachments: AttachmentRegistry,
    occupants: FxHashMap<TerritoryId, Vector<Unit>>,
}

impl GameData {
    /// Create a game from its properties and entities.
    ///
    /// Rules are read from `properties`, and a fresh identity token is
    /// stored under [`GAME_UUID`].
    #[must_use]
    pub fn new(mut properties: GameProperties, catalog: EntityCatalog) -> Self {
        properties.set(GAME_UUID, Uuid::new_v4().to_string());
        let rules = RuleConfig::from_properties(&properties);
        Self {
            properties,
            rules,
            catalog,
            attachments: AttachmentRegistry::new(),
            occupants: FxHashMap::default(),
        }
    }

    /// Override the rules read from the properties.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn game_uuid(&self) -> Option<&str> {
        self.properties.game_uuid()
    }

    // === Map ===

    /// Put a unit into a territory.
    pub fn place_unit(&mut self, territory: TerritoryId, unit: Unit) -> Result<()> {
        if self.catalog.territory_by_id(territory).is_none() {
            return Err(AttachmentError::UnresolvedReference {
                field: "territory",
                kind: EntityKind::Territory,
                name: territory.to_string(),
            });
        }
        if self.catalog.unit_type_name(unit.unit_type).is_none() {
            return Err(AttachmentError::UnresolvedReference {
                field: "unitType",
                kind: EntityKind::UnitType,
                name: unit.unit_type.to_string(),
            });
        }
        self.occupants.entry(territory).or_default().push_back(unit);
        Ok(())
    }

    /// Put `count` units of one type and owner into a territory.
    pub fn place_units(
        &mut self,
        territory: TerritoryId,
        unit_type: UnitTypeId,
        owner: PlayerId,
        count: usize,
    ) -> Result<()> {
        for _ in 0..count {
            self.place_unit(territory, Unit::new(unit_type, owner))?;
        }
        Ok(())
    }

    /// Units currently in a territory.
    pub fn units_in(&self, territory: TerritoryId) -> impl Iterator<Item = &Unit> {
        self.occupants.get(&territory).into_iter().flatten()
    }

    // === Player state ===

    /// The modifiers in force for `player`: AI control and researched
    /// technology. Players without a tech attachment have no advances.
    #[must_use]
    pub fn player_modifiers(&self, player: PlayerId) -> PlayerModifiers {
        let is_ai = self
            .catalog
            .player_by_id(player)
            .is_some_and(|p| p.is_ai);
        let tech = self
            .attachments
            .tech_attachment(player)
            .map_or_else(TechAdvances::default, |t| t.advances());
        PlayerModifiers::new(is_ai, tech)
    }

    /// Modifiers of every player, taken once before a batch of queries.
    pub fn modifier_snapshot(&self) -> Result<PlayerMap<PlayerModifiers>> {
        PlayerMap::new(self.catalog.player_count(), |player| {
            self.player_modifiers(player)
        })
    }

    // === Queries ===

    /// How many more units of `unit_type` `owner` may place in `territory`.
    pub fn remaining_stacking_capacity(
        &self,
        unit_type: UnitTypeId,
        territory: TerritoryId,
        owner: PlayerId,
    ) -> Result<i32> {
        let ua = self.attachments.unit_attachment(unit_type)?;
        Ok(ua.remaining_stacking_capacity(
            owner,
            &self.rules,
            &self.catalog,
            self.units_in(territory),
        ))
    }

    #[must_use]
    pub fn validation_context(&self) -> ValidationContext<'_> {
        ValidationContext::new(&self.catalog, &self.attachments, &self.rules)
    }

    /// Validate every attachment, collecting each failing attachment's
    /// violations.
    pub fn validate_all(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let ctx = self.validation_context();
        let failures: Vec<ValidationError> = self
            .attachments
            .iter()
            .filter_map(|(_, attachment)| attachment.validate(&ctx).err())
            .inspect(|error| tracing::warn!("{}", error))
            .collect();

        tracing::info!(
            "Validated {} attachments, {} failed",
            self.attachments.len(),
            failures.len()
        );
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::{TechAttachment, UnitAttachment, UNIT_ATTACHMENT_NAME};

    fn game() -> (GameData, UnitTypeId, TerritoryId, PlayerId) {
        let mut catalog = EntityCatalog::new();
        let tank = catalog.add_unit_type("armour").unwrap();
        let berlin = catalog.add_territory("Berlin", false).unwrap();
        let germans = catalog.add_player("Germans", true).unwrap();
        catalog.add_player("Russians", false).unwrap();
        let mut data = GameData::new(GameProperties::new(), catalog);
        data.attachments
            .insert(UnitAttachment::new(tank, UNIT_ATTACHMENT_NAME))
            .unwrap();
        (data, tank, berlin, germans)
    }

    #[test]
    fn test_new_game_has_uuid() {
        let (data, ..) = game();
        let uuid = data.game_uuid().unwrap();
        assert!(Uuid::parse_str(uuid).is_ok());

        let (other, ..) = game();
        assert_ne!(other.game_uuid(), data.game_uuid());
    }

    #[test]
    fn test_place_units() {
        let (mut data, tank, berlin, germans) = game();
        data.place_units(berlin, tank, germans, 3).unwrap();
        assert_eq!(data.units_in(berlin).count(), 3);
        assert!(data
            .place_unit(TerritoryId::new(9), Unit::new(tank, germans))
            .is_err());
    }

    #[test]
    fn test_player_modifiers() {
        let (mut data, _, _, germans) = game();
        let mut tech = TechAttachment::new(germans);
        tech.set_property("jetPower", "true", &data.catalog).unwrap();
        data.attachments.insert(tech).unwrap();

        let snapshot = data.modifier_snapshot().unwrap();
        assert_eq!(snapshot.player_count(), 2);
        assert!(snapshot[germans].is_ai);
        assert!(snapshot[germans].tech.jet_power);

        let russians = data.catalog.player("Russians").unwrap();
        assert_eq!(snapshot[russians], PlayerModifiers::human());
    }

    #[test]
    fn test_snapshot_of_largest_game() {
        let mut catalog = EntityCatalog::new();
        for i in 0..crate::core::MAX_PLAYERS {
            catalog.add_player(format!("Player{i}"), i % 2 == 0).unwrap();
        }
        assert!(catalog.add_player("Extra", false).is_err());
        let data = GameData::new(GameProperties::new(), catalog);
        let snapshot = data.modifier_snapshot().unwrap();
        assert_eq!(snapshot.player_count(), crate::core::MAX_PLAYERS);
        assert!(snapshot[PlayerId::new(254)].is_ai);
    }

    #[test]
    fn test_stacking_through_game() {
        let (mut data, tank, berlin, germans) = game();
        assert_eq!(
            data.remaining_stacking_capacity(tank, berlin, germans).unwrap(),
            i32::MAX
        );
        let missing = UnitTypeId::new(7);
        assert!(matches!(
            data.remaining_stacking_capacity(missing, berlin, germans),
            Err(AttachmentError::IllegalState(_))
        ));

        let key = crate::attachments::AttachmentOwner::UnitType(tank);
        let catalog = data.catalog.clone();
        data.attachments
            .get_mut(key, UNIT_ATTACHMENT_NAME)
            .unwrap()
            .set_property("stackingLimit", "2:owned", &catalog)
            .unwrap();
        data.place_units(berlin, tank, germans, 1).unwrap();
        assert_eq!(
            data.remaining_stacking_capacity(tank, berlin, germans).unwrap(),
            1
        );
    }

    #[test]
    fn test_validate_all_collects_failures() {
        let (mut data, tank, ..) = game();
        assert!(data.validate_all().is_ok());

        let key = crate::attachments::AttachmentOwner::UnitType(tank);
        let catalog = data.catalog.clone();
        data.attachments
            .get_mut(key, UNIT_ATTACHMENT_NAME)
            .unwrap()
            .set_property("requiresUnits", "factory", &catalog)
            .unwrap();
        let failures = data.validate_all().unwrap_err();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].mentions("requiresUnits"));
        assert!(failures[0].to_string().contains("factory"));
    }
}
