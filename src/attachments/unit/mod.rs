//! The unit attachment: everything the rules know about a unit type.
//!
//! Fields are grouped the way the game uses them. Integer fields use `-1`
//! for "not applicable" or "unlimited" unless documented otherwise.
//!
//! Property operations live in `properties`, validation in `validate`,
//! effective values in `derive`, stacking limits in `stacking`,
//! ability pairing in `abilities`, and text export in `summary`.

mod abilities;
mod derive;
mod properties;
mod stacking;
mod summary;
mod validate;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use properties::ADD_DISCIPLINE_PROPERTIES;
pub use summary::LINE_BREAK;

use super::registry::AttachmentRegistry;
use super::values::{
    CaptureConversion, CaptureDirection, CombatDamageRule, IntegerMap, StackingLimit,
};
use super::{Attachment, AttachmentOwner};
use crate::catalog::EntityCatalog;
use crate::codec::TokenList;
use crate::core::{PlayerId, ResourceId, Result, TerritoryId, UnitTypeId};
use crate::validation::{ValidationContext, ValidationError};

/// Damage effect: aircraft may not land on this carrier.
pub const UNITS_MAY_NOT_LAND_ON_CARRIER: &str = "unitsMayNotLandOnCarrier";

/// Damage effect: allied aircraft may not leave this carrier.
pub const UNITS_MAY_NOT_LEAVE_ALLIED_CARRIER: &str = "unitsMayNotLeaveAlliedCarrier";

/// Rules of one unit type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAttachment {
    owner: UnitTypeId,
    name: String,

    // === Movement ===
    is_air: bool,
    is_sea: bool,
    movement: i32,
    can_blitz: bool,
    is_kamikaze: bool,
    /// Transport types this unit may invade from; `all` or `none` alone
    /// stand for every or no transport.
    can_invade_only_from: Option<TokenList>,
    fuel_cost: IntegerMap<ResourceId>,
    can_not_move_during_combat_move: bool,
    stacking_limit: Option<StackingLimit>,

    // === Combat ===
    attack: i32,
    defense: i32,
    is_infrastructure: bool,
    can_bombard: bool,
    bombard: i32,
    is_sub: bool,
    is_destroyer: bool,
    is_artillery: bool,
    is_artillery_supportable: bool,
    unit_support_count: i32,
    is_marine: bool,
    is_suicide: bool,

    // === Transport ===
    is_combat_transport: bool,
    transport_capacity: i32,
    transport_cost: i32,
    carrier_capacity: i32,
    carrier_cost: i32,
    is_air_transport: bool,
    is_air_transportable: bool,
    is_infantry: bool,
    is_land_transport: bool,

    // === Anti-air ===
    is_aa: bool,
    is_aa_for_combat_only: bool,
    is_aa_for_bombing_this_unit_only: bool,
    is_rocket: bool,
    attack_aa: i32,
    attack_aa_max_die_sides: i32,

    // === Strategic bombing and air battles ===
    is_strategic_bomber: bool,
    bombing_max_die_sides: i32,
    bombing_bonus: i32,
    can_intercept: bool,
    can_escort: bool,
    air_defense: i32,
    air_attack: i32,

    // === Production ===
    is_factory: bool,
    can_produce_units: bool,
    /// `-1` produces up to the territory value.
    can_produce_x_units: i32,
    creates_units_list: IntegerMap<UnitTypeId>,
    creates_resources_list: IntegerMap<ResourceId>,

    // === Damage ===
    is_two_hit: bool,
    can_be_damaged: bool,
    max_damage: i32,
    max_operational_damage: i32,
    can_die_from_reaching_max_damage: bool,

    // === Placement ===
    is_construction: bool,
    construction_type: String,
    constructions_per_terr_per_type_per_turn: i32,
    max_constructions_per_type_per_terr: i32,
    can_only_be_placed_in_territory_valued_at_x: i32,
    /// Alternative unit combinations, one of which must be present.
    requires_units: Vec<TokenList>,
    consumes_units: IntegerMap<UnitTypeId>,
    /// Territories this unit may not be placed in.
    unit_placement_restrictions: Option<TokenList>,
    max_built_per_player: i32,

    // === Scrambling ===
    can_scramble: bool,
    is_air_base: bool,
    max_scramble_distance: i32,
    max_scramble_count: i32,

    // === Special abilities ===
    blockade: i32,
    repairs_units: Option<TokenList>,
    gives_movement: IntegerMap<UnitTypeId>,
    destroyed_when_captured_by: Vec<(CaptureDirection, PlayerId)>,
    /// Keyed by the `from:to` pair; a repeated pair replaces in place.
    when_captured_changes_into: Vec<CaptureConversion>,
    can_be_captured_on_entering_by: Vec<PlayerId>,
    can_be_given_by_territory_to: Vec<PlayerId>,
    when_combat_damaged: Vec<CombatDamageRule>,
    /// Raw `ability:unitType` pairs, resolved during validation.
    receives_ability_when_with: Vec<String>,
    special: BTreeSet<String>,
}

impl UnitAttachment {
    /// An attachment where no capability applies.
    #[must_use]
    pub fn new(owner: UnitTypeId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),

            is_air: false,
            is_sea: false,
            movement: 0,
            can_blitz: false,
            is_kamikaze: false,
            can_invade_only_from: None,
            fuel_cost: IntegerMap::new(),
            can_not_move_during_combat_move: false,
            stacking_limit: None,

            attack: 0,
            defense: 0,
            is_infrastructure: false,
            can_bombard: false,
            bombard: -1,
            is_sub: false,
            is_destroyer: false,
            is_artillery: false,
            is_artillery_supportable: false,
            unit_support_count: -1,
            is_marine: false,
            is_suicide: false,

            is_combat_transport: false,
            transport_capacity: -1,
            transport_cost: -1,
            carrier_capacity: -1,
            carrier_cost: -1,
            is_air_transport: false,
            is_air_transportable: false,
            is_infantry: false,
            is_land_transport: false,

            is_aa: false,
            is_aa_for_combat_only: false,
            is_aa_for_bombing_this_unit_only: false,
            is_rocket: false,
            attack_aa: 1,
            attack_aa_max_die_sides: -1,

            is_strategic_bomber: false,
            bombing_max_die_sides: -1,
            bombing_bonus: -1,
            can_intercept: false,
            can_escort: false,
            air_defense: 0,
            air_attack: 0,

            is_factory: false,
            can_produce_units: false,
            can_produce_x_units: -1,
            creates_units_list: IntegerMap::new(),
            creates_resources_list: IntegerMap::new(),

            is_two_hit: false,
            can_be_damaged: false,
            max_damage: -1,
            max_operational_damage: -1,
            can_die_from_reaching_max_damage: false,

            is_construction: false,
            construction_type: "none".to_string(),
            constructions_per_terr_per_type_per_turn: -1,
            max_constructions_per_type_per_terr: -1,
            can_only_be_placed_in_territory_valued_at_x: -1,
            requires_units: Vec::new(),
            consumes_units: IntegerMap::new(),
            unit_placement_restrictions: None,
            max_built_per_player: -1,

            can_scramble: false,
            is_air_base: false,
            max_scramble_distance: -1,
            max_scramble_count: -1,

            blockade: 0,
            repairs_units: None,
            gives_movement: IntegerMap::new(),
            destroyed_when_captured_by: Vec::new(),
            when_captured_changes_into: Vec::new(),
            can_be_captured_on_entering_by: Vec::new(),
            can_be_given_by_territory_to: Vec::new(),
            when_combat_damaged: Vec::new(),
            receives_ability_when_with: Vec::new(),
            special: BTreeSet::new(),
        }
    }

    /// The unit attachment of `unit_type` under its default name.
    pub fn get(registry: &AttachmentRegistry, unit_type: UnitTypeId) -> Result<&Self> {
        registry.unit_attachment(unit_type)
    }

    /// The unit attachment of `unit_type` called `name`.
    pub fn get_named<'r>(
        registry: &'r AttachmentRegistry,
        unit_type: UnitTypeId,
        name: &str,
    ) -> Result<&'r Self> {
        registry.unit_attachment_named(unit_type, name)
    }

    #[must_use]
    pub fn unit_type(&self) -> UnitTypeId {
        self.owner
    }

    /// Check whether this unit may invade from a `transport` unit.
    ///
    /// No list, an empty first entry, or `all` permits every transport.
    pub fn can_invade_from(&self, transport: &str, catalog: &EntityCatalog) -> Result<bool> {
        catalog.resolve_unit_type("canInvadeOnlyFrom", transport)?;
        let Some(list) = &self.can_invade_only_from else {
            return Ok(true);
        };
        match list.first().map(String::as_str) {
            None | Some("") | Some("all") => Ok(true),
            Some(_) => Ok(list.iter().any(|t| t == transport)),
        }
    }

    /// Resolve a list of unit type names.
    pub fn listed_units(
        field: &'static str,
        names: &[String],
        catalog: &EntityCatalog,
    ) -> Result<Vec<UnitTypeId>> {
        names
            .iter()
            .map(|name| catalog.resolve_unit_type(field, name))
            .collect()
    }

    /// Resolve a list of territory names.
    pub fn listed_territories(
        field: &'static str,
        names: &[String],
        catalog: &EntityCatalog,
    ) -> Result<Vec<TerritoryId>> {
        names
            .iter()
            .map(|name| catalog.resolve_territory(field, name))
            .collect()
    }

    /// Any flavour of anti-air unit.
    #[must_use]
    pub fn is_any_aa(&self) -> bool {
        self.is_aa || self.is_aa_for_combat_only || self.is_aa_for_bombing_this_unit_only
    }
}

impl Attachment for UnitAttachment {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> AttachmentOwner {
        AttachmentOwner::UnitType(self.owner)
    }

    fn set_property(&mut self, property: &str, value: &str, catalog: &EntityCatalog) -> Result<()> {
        self.apply_property(property, value, catalog)
    }

    fn clear_property(&mut self, property: &str) -> Result<()> {
        self.reset_property(property)
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.check(ctx)
    }
}
