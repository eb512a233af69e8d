//! Setters, getters and clears of the unit attachment.
//!
//! Each option name from a definition file maps to one setter. Plain flags
//! and numbers are generated by the macros below; everything with structure
//! is written out by hand. Add-discipline properties append a record per
//! call and are emptied by their `clear_*` sibling.

use super::UnitAttachment;
use crate::attachments::values::{
    CaptureConversion, CaptureDirection, CaptureParty, CombatDamageRule, IntegerMap,
    StackingLimit,
};
use crate::catalog::EntityCatalog;
use crate::codec::{
    expect_shape, parse_bool, parse_int, parse_player_ref, parse_quantity, parse_unit_quantity,
    split, EntityRef, QuantityDomain, Sentinel, TokenList,
};
use crate::core::{AttachmentError, PlayerId, ResourceId, Result, UnitTypeId};

/// Option names whose setter appends instead of replacing. Each has a
/// matching `clear_property` arm.
pub const ADD_DISCIPLINE_PROPERTIES: &[&str] = &[
    "fuelCost",
    "createsUnitsList",
    "createsResourcesList",
    "consumesUnits",
    "givesMovement",
    "requiresUnits",
    "receivesAbilityWhenWith",
    "special",
    "whenCombatDamaged",
    "destroyedWhenCapturedBy",
    "destroyedWhenCapturedFrom",
    "whenCapturedChangesInto",
    "canBeCapturedOnEnteringBy",
    "canBeGivenByTerritoryTo",
];

/// Set-discipline options with hand-written setters.
const STRUCTURED_SET_PROPERTIES: &[&str] = &[
    "isAA",
    "isAAmovement",
    "stackingLimit",
    "constructionType",
    "canInvadeOnlyFrom",
    "unitPlacementRestrictions",
    "unitPlacementOnlyAllowedIn",
    "repairsUnits",
    "isParatroop",
    "isMechanized",
];

macro_rules! flag_properties {
    ($($property:literal => $field:ident, $setter:ident, $getter:ident;)*) => {
        impl UnitAttachment {
            const FLAG_PROPERTIES: &'static [&'static str] = &[$($property),*];

            $(
                pub fn $setter(&mut self, value: &str) -> Result<()> {
                    self.$field = parse_bool($property, value)?;
                    Ok(())
                }

                #[must_use]
                pub fn $getter(&self) -> bool {
                    self.$field
                }
            )*

            fn set_flag_property(&mut self, property: &str, value: &str) -> Option<Result<()>> {
                match property {
                    $($property => Some(self.$setter(value)),)*
                    _ => None,
                }
            }
        }
    };
}

macro_rules! number_properties {
    ($($property:literal => $field:ident, $setter:ident, $getter:ident;)*) => {
        impl UnitAttachment {
            const NUMBER_PROPERTIES: &'static [&'static str] = &[$($property),*];

            $(
                pub fn $setter(&mut self, value: &str) -> Result<()> {
                    self.$field = parse_int($property, value)?;
                    Ok(())
                }

                #[must_use]
                pub fn $getter(&self) -> i32 {
                    self.$field
                }
            )*

            fn set_number_property(&mut self, property: &str, value: &str) -> Option<Result<()>> {
                match property {
                    $($property => Some(self.$setter(value)),)*
                    _ => None,
                }
            }
        }
    };
}

flag_properties! {
    "isAir" => is_air, set_is_air, is_air;
    "isSea" => is_sea, set_is_sea, is_sea;
    "canBlitz" => can_blitz, set_can_blitz, can_blitz;
    "isKamikaze" => is_kamikaze, set_is_kamikaze, is_kamikaze;
    "canNotMoveDuringCombatMove" => can_not_move_during_combat_move,
        set_can_not_move_during_combat_move, can_not_move_during_combat_move;
    "isInfrastructure" => is_infrastructure, set_is_infrastructure, is_infrastructure;
    "canBombard" => can_bombard, set_can_bombard, can_bombard_flag;
    "isSub" => is_sub, set_is_sub, is_sub;
    "isDestroyer" => is_destroyer, set_is_destroyer, is_destroyer;
    "artillery" => is_artillery, set_artillery, is_artillery;
    "artillerySupportable" => is_artillery_supportable, set_artillery_supportable,
        is_artillery_supportable;
    "isMarine" => is_marine, set_is_marine, is_marine;
    "isSuicide" => is_suicide, set_is_suicide, is_suicide;
    "isCombatTransport" => is_combat_transport, set_is_combat_transport, is_combat_transport;
    "isAirTransport" => is_air_transport, set_is_air_transport, is_air_transport;
    "isAirTransportable" => is_air_transportable, set_is_air_transportable, is_air_transportable;
    "isInfantry" => is_infantry, set_is_infantry, is_infantry;
    "isLandTransport" => is_land_transport, set_is_land_transport, is_land_transport;
    "isAAforCombatOnly" => is_aa_for_combat_only, set_is_aa_for_combat_only,
        is_aa_for_combat_only;
    "isAAforBombingThisUnitOnly" => is_aa_for_bombing_this_unit_only,
        set_is_aa_for_bombing_this_unit_only, is_aa_for_bombing_this_unit_only;
    "isRocket" => is_rocket, set_is_rocket, is_rocket;
    "isStrategicBomber" => is_strategic_bomber, set_is_strategic_bomber, is_strategic_bomber;
    "canIntercept" => can_intercept, set_can_intercept, can_intercept;
    "canEscort" => can_escort, set_can_escort, can_escort;
    "isFactory" => is_factory, set_is_factory, is_factory;
    "canProduceUnits" => can_produce_units, set_can_produce_units, can_produce_units;
    "isTwoHit" => is_two_hit, set_is_two_hit, is_two_hit;
    "canBeDamaged" => can_be_damaged, set_can_be_damaged, can_be_damaged;
    "canDieFromReachingMaxDamage" => can_die_from_reaching_max_damage,
        set_can_die_from_reaching_max_damage, can_die_from_reaching_max_damage;
    "isConstruction" => is_construction, set_is_construction, is_construction;
    "canScramble" => can_scramble, set_can_scramble, can_scramble;
    "isAirBase" => is_air_base, set_is_air_base, is_air_base;
}

number_properties! {
    "movement" => movement, set_movement, base_movement;
    "attack" => attack, set_attack, base_attack;
    "defense" => defense, set_defense, base_defense;
    "bombard" => bombard, set_bombard, base_bombard;
    "unitSupportCount" => unit_support_count, set_unit_support_count, base_unit_support_count;
    "transportCapacity" => transport_capacity, set_transport_capacity, transport_capacity;
    "transportCost" => transport_cost, set_transport_cost, transport_cost;
    "carrierCapacity" => carrier_capacity, set_carrier_capacity, carrier_capacity;
    "carrierCost" => carrier_cost, set_carrier_cost, carrier_cost;
    "attackAA" => attack_aa, set_attack_aa, base_attack_aa;
    "attackAAmaxDieSides" => attack_aa_max_die_sides, set_attack_aa_max_die_sides,
        attack_aa_max_die_sides;
    "bombingMaxDieSides" => bombing_max_die_sides, set_bombing_max_die_sides,
        bombing_max_die_sides;
    "bombingBonus" => bombing_bonus, set_bombing_bonus, bombing_bonus;
    "airDefense" => air_defense, set_air_defense, base_air_defense;
    "airAttack" => air_attack, set_air_attack, base_air_attack;
    "canProduceXUnits" => can_produce_x_units, set_can_produce_x_units, can_produce_x_units;
    "maxDamage" => max_damage, set_max_damage, max_damage;
    "maxOperationalDamage" => max_operational_damage, set_max_operational_damage,
        max_operational_damage;
    "constructionsPerTerrPerTypePerTurn" => constructions_per_terr_per_type_per_turn,
        set_constructions_per_terr_per_type_per_turn, constructions_per_terr_per_type_per_turn;
    "maxConstructionsPerTypePerTerr" => max_constructions_per_type_per_terr,
        set_max_constructions_per_type_per_terr, max_constructions_per_type_per_terr;
    "canOnlyBePlacedInTerritoryValuedAtX" => can_only_be_placed_in_territory_valued_at_x,
        set_can_only_be_placed_in_territory_valued_at_x,
        can_only_be_placed_in_territory_valued_at_x;
    "maxBuiltPerPlayer" => max_built_per_player, set_max_built_per_player, max_built_per_player;
    "maxScrambleDistance" => max_scramble_distance, set_max_scramble_distance,
        max_scramble_distance;
    "maxScrambleCount" => max_scramble_count, set_max_scramble_count, max_scramble_count;
    "blockade" => blockade, set_blockade, blockade;
}

fn capture_party(field: &'static str, token: &str, catalog: &EntityCatalog) -> Result<CaptureParty> {
    Ok(match parse_player_ref(field, token, &[Sentinel::Any], catalog)? {
        EntityRef::Entity(player) => CaptureParty::Player(player),
        EntityRef::Sentinel(_) => CaptureParty::Any,
    })
}

fn resolve_players(
    field: &'static str,
    value: &str,
    catalog: &EntityCatalog,
) -> Result<Vec<PlayerId>> {
    value
        .split(crate::codec::DELIMITER)
        .map(|name| catalog.resolve_player(field, name))
        .collect()
}

impl UnitAttachment {
    // === Anti-air and movement restrictions ===

    /// Makes the unit anti-air. Anti-air units also get the anti-air
    /// movement restrictions.
    pub fn set_is_aa(&mut self, value: &str) -> Result<()> {
        self.is_aa = parse_bool("isAA", value)?;
        self.set_is_aa_movement(value)
    }

    #[must_use]
    pub fn is_aa(&self) -> bool {
        self.is_aa
    }

    /// Anti-air movement: no combat moves, and an unbounded allied
    /// stacking limit. `false` removes both.
    pub fn set_is_aa_movement(&mut self, value: &str) -> Result<()> {
        let restricted = parse_bool("isAAmovement", value)?;
        self.can_not_move_during_combat_move = restricted;
        self.stacking_limit =
            restricted.then(|| StackingLimit::new(StackingLimit::UNBOUNDED, "allied"));
        Ok(())
    }

    /// `max:scope`, where scope is `owned`, `allied` or `total`.
    pub fn set_stacking_limit(&mut self, value: &str) -> Result<()> {
        const FIELD: &str = "stackingLimit";
        let parts = split(value);
        expect_shape(FIELD, parts.len() == 2, "max:scope", value)?;
        let max = parse_int(FIELD, &parts[0])?;
        self.stacking_limit = Some(StackingLimit::new(max, parts[1].clone()));
        Ok(())
    }

    #[must_use]
    pub fn stacking_limit(&self) -> Option<&StackingLimit> {
        self.stacking_limit.as_ref()
    }

    // === Placement ===

    pub fn set_construction_type(&mut self, value: &str) -> Result<()> {
        self.construction_type = value.to_string();
        Ok(())
    }

    #[must_use]
    pub fn construction_type(&self) -> &str {
        &self.construction_type
    }

    /// Transport types this unit may invade from. A leading `none` or
    /// `all` in any case replaces the whole list.
    pub fn set_can_invade_only_from(&mut self, value: &str) -> Result<()> {
        let list = split(value);
        let first = list.first().map(String::as_str).unwrap_or_default();
        self.can_invade_only_from = Some(if first.eq_ignore_ascii_case("none") {
            TokenList::from_iter(["none".to_string()])
        } else if first.eq_ignore_ascii_case("all") {
            TokenList::from_iter(["all".to_string()])
        } else {
            list
        });
        Ok(())
    }

    #[must_use]
    pub fn can_invade_only_from(&self) -> Option<&[String]> {
        self.can_invade_only_from.as_deref()
    }

    pub fn set_unit_placement_restrictions(&mut self, value: &str) -> Result<()> {
        self.unit_placement_restrictions = Some(split(value));
        Ok(())
    }

    /// The inverse of `unitPlacementRestrictions`: every catalog territory
    /// not listed becomes restricted. Listed names must already exist.
    pub fn set_unit_placement_only_allowed_in(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        const FIELD: &str = "unitPlacementOnlyAllowedIn";
        let allowed = split(value);
        Self::listed_territories(FIELD, &allowed, catalog)?;
        let restricted = catalog
            .territories()
            .filter(|t| !allowed.contains(&t.name))
            .map(|t| t.name.clone())
            .collect();
        self.unit_placement_restrictions = Some(restricted);
        Ok(())
    }

    #[must_use]
    pub fn unit_placement_restrictions(&self) -> Option<&[String]> {
        self.unit_placement_restrictions.as_deref()
    }

    /// Appends one alternative combination of units that must be present.
    pub fn set_requires_units(&mut self, value: &str) -> Result<()> {
        self.requires_units.push(split(value));
        Ok(())
    }

    #[must_use]
    pub fn requires_units(&self) -> &[TokenList] {
        &self.requires_units
    }

    pub fn clear_requires_units(&mut self) {
        self.requires_units.clear();
    }

    /// Appends `count:unitType`; placing this unit consumes those units.
    pub fn set_consumes_units(&mut self, value: &str, catalog: &EntityCatalog) -> Result<()> {
        let (unit_type, count) =
            parse_unit_quantity("consumesUnits", value, QuantityDomain::Positive, catalog)?;
        self.consumes_units.put(unit_type, count);
        Ok(())
    }

    #[must_use]
    pub fn consumes_units(&self) -> &IntegerMap<UnitTypeId> {
        &self.consumes_units
    }

    pub fn clear_consumes_units(&mut self) {
        self.consumes_units.clear();
    }

    // === Production ===

    pub fn set_creates_units_list(&mut self, value: &str, catalog: &EntityCatalog) -> Result<()> {
        let (unit_type, count) =
            parse_unit_quantity("createsUnitsList", value, QuantityDomain::Positive, catalog)?;
        self.creates_units_list.put(unit_type, count);
        Ok(())
    }

    #[must_use]
    pub fn creates_units_list(&self) -> &IntegerMap<UnitTypeId> {
        &self.creates_units_list
    }

    pub fn clear_creates_units_list(&mut self) {
        self.creates_units_list.clear();
    }

    pub fn set_creates_resources_list(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        const FIELD: &str = "createsResourcesList";
        let (count, name) = parse_quantity(FIELD, value, QuantityDomain::Positive)?;
        let resource = catalog.resolve_resource(FIELD, name)?;
        self.creates_resources_list.put(resource, count);
        Ok(())
    }

    #[must_use]
    pub fn creates_resources_list(&self) -> &IntegerMap<ResourceId> {
        &self.creates_resources_list
    }

    pub fn clear_creates_resources_list(&mut self) {
        self.creates_resources_list.clear();
    }

    /// Appends `count:resource` spent per movement point.
    pub fn set_fuel_cost(&mut self, value: &str, catalog: &EntityCatalog) -> Result<()> {
        const FIELD: &str = "fuelCost";
        let (count, name) = parse_quantity(FIELD, value, QuantityDomain::NonNegative)?;
        let resource = catalog.resolve_resource(FIELD, name)?;
        self.fuel_cost.put(resource, count);
        Ok(())
    }

    #[must_use]
    pub fn fuel_cost(&self) -> &IntegerMap<ResourceId> {
        &self.fuel_cost
    }

    pub fn clear_fuel_cost(&mut self) {
        self.fuel_cost.clear();
    }

    // === Special abilities ===

    pub fn set_repairs_units(&mut self, value: &str) -> Result<()> {
        self.repairs_units = Some(split(value));
        Ok(())
    }

    #[must_use]
    pub fn repairs_units(&self) -> Option<&[String]> {
        self.repairs_units.as_deref()
    }

    /// Appends `count:unitType`. Negative counts take movement away.
    pub fn set_gives_movement(&mut self, value: &str, catalog: &EntityCatalog) -> Result<()> {
        let (unit_type, count) =
            parse_unit_quantity("givesMovement", value, QuantityDomain::Any, catalog)?;
        self.gives_movement.put(unit_type, count);
        Ok(())
    }

    #[must_use]
    pub fn gives_movement(&self) -> &IntegerMap<UnitTypeId> {
        &self.gives_movement
    }

    pub fn clear_gives_movement(&mut self) {
        self.gives_movement.clear();
    }

    /// Appends the listed players. A leading `BY:` or `FROM:` picks the
    /// direction unless a player carries that name; `BY` is the default.
    pub fn set_destroyed_when_captured_by(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        const FIELD: &str = "destroyedWhenCapturedBy";
        let (direction, names) = match (value.strip_prefix("BY:"), value.strip_prefix("FROM:")) {
            (Some(rest), _) if catalog.player("BY").is_none() => (CaptureDirection::By, rest),
            (_, Some(rest)) if catalog.player("FROM").is_none() => (CaptureDirection::From, rest),
            _ => (CaptureDirection::By, value),
        };
        let players = resolve_players(FIELD, names, catalog)?;
        self.destroyed_when_captured_by
            .extend(players.into_iter().map(|p| (direction, p)));
        Ok(())
    }

    /// Like `destroyedWhenCapturedBy`, defaulting to the `FROM` direction.
    pub fn set_destroyed_when_captured_from(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        if value.starts_with("BY:") || value.starts_with("FROM:") {
            self.set_destroyed_when_captured_by(value, catalog)
        } else {
            self.set_destroyed_when_captured_by(&format!("FROM:{value}"), catalog)
        }
    }

    #[must_use]
    pub fn destroyed_when_captured_by(&self) -> &[(CaptureDirection, PlayerId)] {
        &self.destroyed_when_captured_by
    }

    pub fn clear_destroyed_when_captured_by(&mut self) {
        self.destroyed_when_captured_by.clear();
    }

    /// Appends `fromPlayer:toPlayer:keepAttributes:unitType:count[...]`.
    /// Either player may be `any`. A record for an existing player pair
    /// replaces it in place.
    pub fn set_when_captured_changes_into(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        const FIELD: &str = "whenCapturedChangesInto";
        let parts = split(value);
        expect_shape(
            FIELD,
            parts.len() >= 5 && (parts.len() - 1) % 2 == 0,
            "fromPlayer:toPlayer:keepAttributes:unitType:count[:unitType:count...]",
            value,
        )?;
        let from = capture_party(FIELD, &parts[0], catalog)?;
        let to = capture_party(FIELD, &parts[1], catalog)?;
        let keep_attributes = parse_bool(FIELD, &parts[2])?;
        let mut units = IntegerMap::new();
        for pair in parts[3..].chunks(2) {
            let unit_type = catalog.resolve_unit_type(FIELD, &pair[0])?;
            units.put(unit_type, parse_int(FIELD, &pair[1])?);
        }

        let conversion = CaptureConversion {
            from,
            to,
            keep_attributes,
            units,
        };
        match self
            .when_captured_changes_into
            .iter_mut()
            .find(|c| c.from == from && c.to == to)
        {
            Some(existing) => *existing = conversion,
            None => self.when_captured_changes_into.push(conversion),
        }
        Ok(())
    }

    #[must_use]
    pub fn when_captured_changes_into(&self) -> &[CaptureConversion] {
        &self.when_captured_changes_into
    }

    pub fn clear_when_captured_changes_into(&mut self) {
        self.when_captured_changes_into.clear();
    }

    pub fn set_can_be_captured_on_entering_by(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        let players = resolve_players("canBeCapturedOnEnteringBy", value, catalog)?;
        self.can_be_captured_on_entering_by.extend(players);
        Ok(())
    }

    #[must_use]
    pub fn can_be_captured_on_entering_by(&self) -> &[PlayerId] {
        &self.can_be_captured_on_entering_by
    }

    pub fn clear_can_be_captured_on_entering_by(&mut self) {
        self.can_be_captured_on_entering_by.clear();
    }

    /// Appends the listed players. A `true` or `false` token empties the
    /// collection at that point instead.
    pub fn set_can_be_given_by_territory_to(
        &mut self,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        const FIELD: &str = "canBeGivenByTerritoryTo";
        for name in value.split(crate::codec::DELIMITER) {
            match parse_player_ref(FIELD, name, &[Sentinel::True, Sentinel::False], catalog)? {
                EntityRef::Entity(player) => self.can_be_given_by_territory_to.push(player),
                EntityRef::Sentinel(_) => self.can_be_given_by_territory_to.clear(),
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn can_be_given_by_territory_to(&self) -> &[PlayerId] {
        &self.can_be_given_by_territory_to
    }

    pub fn clear_can_be_given_by_territory_to(&mut self) {
        self.can_be_given_by_territory_to.clear();
    }

    /// Appends `from:to:effect[:parameter]`, applying while the unit's
    /// damage lies within `[from, to]`.
    pub fn set_when_combat_damaged(&mut self, value: &str) -> Result<()> {
        const FIELD: &str = "whenCombatDamaged";
        let parts = split(value);
        expect_shape(
            FIELD,
            parts.len() == 3 || parts.len() == 4,
            "from:to:effect[:parameter]",
            value,
        )?;
        let from = parse_int(FIELD, &parts[0])?;
        let to = parse_int(FIELD, &parts[1])?;
        if from < 0 {
            return Err(AttachmentError::OutOfRange {
                field: FIELD,
                value: from,
                reason: "damage bounds must not be negative",
            });
        }
        if to < from {
            return Err(AttachmentError::OutOfRange {
                field: FIELD,
                value: to,
                reason: "upper damage bound must not be below the lower one",
            });
        }
        self.when_combat_damaged.push(CombatDamageRule {
            from,
            to,
            effect: parts[2].clone(),
            parameter: parts.get(3).cloned(),
        });
        Ok(())
    }

    #[must_use]
    pub fn when_combat_damaged(&self) -> &[CombatDamageRule] {
        &self.when_combat_damaged
    }

    pub fn clear_when_combat_damaged(&mut self) {
        self.when_combat_damaged.clear();
    }

    /// Appends `ability:unitType`, checked during validation.
    pub fn set_receives_ability_when_with(&mut self, value: &str) -> Result<()> {
        self.receives_ability_when_with.push(value.to_string());
        Ok(())
    }

    #[must_use]
    pub fn receives_ability_when_with(&self) -> &[String] {
        &self.receives_ability_when_with
    }

    pub fn clear_receives_ability_when_with(&mut self) {
        self.receives_ability_when_with.clear();
    }

    /// Appends each listed option, checked during validation.
    pub fn set_special(&mut self, value: &str) -> Result<()> {
        self.special.extend(split(value));
        Ok(())
    }

    #[must_use]
    pub fn special(&self) -> &std::collections::BTreeSet<String> {
        &self.special
    }

    pub fn clear_special(&mut self) {
        self.special.clear();
    }

    // === Legacy ===

    /// Accepted and ignored; older definitions still carry it.
    pub fn set_is_paratroop(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }

    /// Accepted and ignored; older definitions still carry it.
    pub fn set_is_mechanized(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }

    // === Dispatch by option name ===

    fn has_property(property: &str) -> bool {
        Self::FLAG_PROPERTIES.contains(&property)
            || Self::NUMBER_PROPERTIES.contains(&property)
            || STRUCTURED_SET_PROPERTIES.contains(&property)
            || ADD_DISCIPLINE_PROPERTIES.contains(&property)
    }

    fn unknown(&self, property: &str) -> AttachmentError {
        AttachmentError::UnknownProperty {
            attachment: self.name.clone(),
            property: property.to_string(),
        }
    }

    pub(super) fn apply_property(
        &mut self,
        property: &str,
        value: &str,
        catalog: &EntityCatalog,
    ) -> Result<()> {
        if let Some(result) = self.set_flag_property(property, value) {
            return result;
        }
        if let Some(result) = self.set_number_property(property, value) {
            return result;
        }
        match property {
            "isAA" => self.set_is_aa(value),
            "isAAmovement" => self.set_is_aa_movement(value),
            "stackingLimit" => self.set_stacking_limit(value),
            "constructionType" => self.set_construction_type(value),
            "canInvadeOnlyFrom" => self.set_can_invade_only_from(value),
            "unitPlacementRestrictions" => self.set_unit_placement_restrictions(value),
            "unitPlacementOnlyAllowedIn" => self.set_unit_placement_only_allowed_in(value, catalog),
            "repairsUnits" => self.set_repairs_units(value),
            "isParatroop" => self.set_is_paratroop(value),
            "isMechanized" => self.set_is_mechanized(value),
            "fuelCost" => self.set_fuel_cost(value, catalog),
            "createsUnitsList" => self.set_creates_units_list(value, catalog),
            "createsResourcesList" => self.set_creates_resources_list(value, catalog),
            "consumesUnits" => self.set_consumes_units(value, catalog),
            "givesMovement" => self.set_gives_movement(value, catalog),
            "requiresUnits" => self.set_requires_units(value),
            "receivesAbilityWhenWith" => self.set_receives_ability_when_with(value),
            "special" => self.set_special(value),
            "whenCombatDamaged" => self.set_when_combat_damaged(value),
            "destroyedWhenCapturedBy" => self.set_destroyed_when_captured_by(value, catalog),
            "destroyedWhenCapturedFrom" => self.set_destroyed_when_captured_from(value, catalog),
            "whenCapturedChangesInto" => self.set_when_captured_changes_into(value, catalog),
            "canBeCapturedOnEnteringBy" => self.set_can_be_captured_on_entering_by(value, catalog),
            "canBeGivenByTerritoryTo" => self.set_can_be_given_by_territory_to(value, catalog),
            _ => Err(self.unknown(property)),
        }
    }

    pub(super) fn reset_property(&mut self, property: &str) -> Result<()> {
        match property {
            "fuelCost" => self.clear_fuel_cost(),
            "createsUnitsList" => self.clear_creates_units_list(),
            "createsResourcesList" => self.clear_creates_resources_list(),
            "consumesUnits" => self.clear_consumes_units(),
            "givesMovement" => self.clear_gives_movement(),
            "requiresUnits" => self.clear_requires_units(),
            "receivesAbilityWhenWith" => self.clear_receives_ability_when_with(),
            "special" => self.clear_special(),
            "whenCombatDamaged" => self.clear_when_combat_damaged(),
            "destroyedWhenCapturedBy" | "destroyedWhenCapturedFrom" => {
                self.clear_destroyed_when_captured_by();
            }
            "whenCapturedChangesInto" => self.clear_when_captured_changes_into(),
            "canBeCapturedOnEnteringBy" => self.clear_can_be_captured_on_entering_by(),
            "canBeGivenByTerritoryTo" => self.clear_can_be_given_by_territory_to(),
            _ if Self::has_property(property) => {
                return Err(AttachmentError::NotClearable {
                    property: property.to_string(),
                })
            }
            _ => return Err(self.unknown(property)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::Attachment;

    fn catalog() -> EntityCatalog {
        let mut catalog = EntityCatalog::new();
        catalog.add_unit_type("infantry").unwrap();
        catalog.add_unit_type("armour").unwrap();
        catalog.add_resource("PUs").unwrap();
        catalog.add_resource("fuel").unwrap();
        catalog.add_territory("Berlin", false).unwrap();
        catalog.add_territory("Paris", false).unwrap();
        catalog.add_territory("Rome", false).unwrap();
        catalog.add_player("Germans", false).unwrap();
        catalog.add_player("Russians", false).unwrap();
        catalog
    }

    fn attachment() -> UnitAttachment {
        UnitAttachment::new(UnitTypeId::new(0), "unitAttachment")
    }

    #[test]
    fn test_flags_and_numbers_dispatch() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("isSea", "true", &catalog).unwrap();
        ua.set_property("movement", "2", &catalog).unwrap();
        ua.set_property("canBombard", "yes", &catalog).unwrap();
        ua.set_property("bombard", "4", &catalog).unwrap();

        assert!(ua.is_sea());
        assert_eq!(ua.base_movement(), 2);
        assert!(ua.can_bombard_flag());
        assert_eq!(ua.base_bombard(), 4);

        assert!(matches!(
            ua.set_property("movement", "fast", &catalog),
            Err(AttachmentError::Parse { field: "movement", .. })
        ));
        assert!(matches!(
            ua.set_property("teleports", "true", &catalog),
            Err(AttachmentError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_is_aa_implies_aa_movement() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("isAA", "true", &catalog).unwrap();
        assert!(ua.is_aa());
        assert!(ua.can_not_move_during_combat_move());
        let limit = ua.stacking_limit().unwrap();
        assert!(limit.is_unbounded());
        assert_eq!(limit.scope, "allied");

        ua.set_property("isAAmovement", "false", &catalog).unwrap();
        assert!(ua.is_aa());
        assert!(!ua.can_not_move_during_combat_move());
        assert!(ua.stacking_limit().is_none());
    }

    #[test]
    fn test_stacking_limit_shape() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("stackingLimit", "3:owned", &catalog).unwrap();
        assert_eq!(ua.stacking_limit(), Some(&StackingLimit::new(3, "owned")));
        assert!(matches!(
            ua.set_property("stackingLimit", "3", &catalog),
            Err(AttachmentError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_quantity_fields_resolve_eagerly() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("fuelCost", "1:fuel", &catalog).unwrap();
        ua.set_property("fuelCost", "0:PUs", &catalog).unwrap();
        assert_eq!(ua.fuel_cost().len(), 2);

        assert!(matches!(
            ua.set_property("fuelCost", "-1:fuel", &catalog),
            Err(AttachmentError::OutOfRange { .. })
        ));
        assert!(matches!(
            ua.set_property("consumesUnits", "0:infantry", &catalog),
            Err(AttachmentError::OutOfRange { .. })
        ));
        assert!(matches!(
            ua.set_property("createsUnitsList", "1:tank", &catalog),
            Err(AttachmentError::UnresolvedReference { .. })
        ));

        ua.set_property("givesMovement", "-1:armour", &catalog).unwrap();
        assert_eq!(ua.gives_movement().get(UnitTypeId::new(1)), -1);
    }

    #[test]
    fn test_destroyed_when_captured_prefixes() {
        let catalog = catalog();
        let mut ua = attachment();
        let germans = catalog.player("Germans").unwrap();
        let russians = catalog.player("Russians").unwrap();

        ua.set_property("destroyedWhenCapturedBy", "Germans", &catalog).unwrap();
        ua.set_property("destroyedWhenCapturedBy", "FROM:Russians", &catalog).unwrap();
        ua.set_property("destroyedWhenCapturedFrom", "Germans:Russians", &catalog).unwrap();

        assert_eq!(
            ua.destroyed_when_captured_by(),
            &[
                (CaptureDirection::By, germans),
                (CaptureDirection::From, russians),
                (CaptureDirection::From, germans),
                (CaptureDirection::From, russians),
            ]
        );
        assert!(ua
            .set_property("destroyedWhenCapturedBy", "Martians", &catalog)
            .is_err());
    }

    #[test]
    fn test_when_captured_changes_into_replaces_pair() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("whenCapturedChangesInto", "any:Germans:false:infantry:1", &catalog)
            .unwrap();
        ua.set_property("whenCapturedChangesInto", "Russians:any:true:armour:2", &catalog)
            .unwrap();
        ua.set_property(
            "whenCapturedChangesInto",
            "any:Germans:true:infantry:2:armour:1",
            &catalog,
        )
        .unwrap();

        let records = ua.when_captured_changes_into();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].from, CaptureParty::Any);
        assert!(records[0].keep_attributes);
        assert_eq!(records[0].units.total_values(), 3);

        for bad in ["any:Germans:false:infantry", "any:Germans:false:infantry:1:armour"] {
            assert!(matches!(
                ua.set_property("whenCapturedChangesInto", bad, &catalog),
                Err(AttachmentError::MalformedRecord { .. })
            ));
        }
        assert!(matches!(
            ua.set_property("whenCapturedChangesInto", "any:Martians:false:infantry:1", &catalog),
            Err(AttachmentError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn test_can_be_given_by_territory_to_escape() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("canBeGivenByTerritoryTo", "Germans:Russians", &catalog).unwrap();
        assert_eq!(ua.can_be_given_by_territory_to().len(), 2);

        ua.set_property("canBeGivenByTerritoryTo", "TRUE:Germans", &catalog).unwrap();
        assert_eq!(ua.can_be_given_by_territory_to(), &[PlayerId::new(0)]);

        ua.set_property("canBeGivenByTerritoryTo", "false", &catalog).unwrap();
        assert!(ua.can_be_given_by_territory_to().is_empty());
    }

    #[test]
    fn test_when_combat_damaged_bounds() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("whenCombatDamaged", "1:2:unitsMayNotLandOnCarrier", &catalog).unwrap();
        ua.set_property("whenCombatDamaged", "0:0:unitsMayNotLeaveAlliedCarrier:1", &catalog)
            .unwrap();
        assert_eq!(ua.when_combat_damaged().len(), 2);
        assert_eq!(ua.when_combat_damaged()[1].parameter.as_deref(), Some("1"));

        for bad in ["2:1:x", "-1:1:x"] {
            assert!(matches!(
                ua.set_property("whenCombatDamaged", bad, &catalog),
                Err(AttachmentError::OutOfRange { .. })
            ));
        }
        assert!(matches!(
            ua.set_property("whenCombatDamaged", "1:2", &catalog),
            Err(AttachmentError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_placement_only_allowed_in_inverts() {
        let catalog = catalog();
        let mut ua = attachment();
        ua.set_property("unitPlacementOnlyAllowedIn", "Paris", &catalog).unwrap();
        assert_eq!(
            ua.unit_placement_restrictions().unwrap(),
            &["Berlin".to_string(), "Rome".to_string()]
        );
        assert!(ua
            .set_property("unitPlacementOnlyAllowedIn", "Atlantis", &catalog)
            .is_err());
    }

    #[test]
    fn test_legacy_options_ignored() {
        let catalog = catalog();
        let mut ua = attachment();
        let before = ua.clone();
        ua.set_property("isParatroop", "true", &catalog).unwrap();
        ua.set_property("isMechanized", "not-a-bool:at all", &catalog).unwrap();
        assert_eq!(ua, before);
    }

    #[test]
    fn test_clear_only_for_add_discipline() {
        let mut ua = attachment();
        assert!(matches!(
            ua.clear_property("attack"),
            Err(AttachmentError::NotClearable { .. })
        ));
        assert!(matches!(
            ua.clear_property("stackingLimit"),
            Err(AttachmentError::NotClearable { .. })
        ));
        assert!(matches!(
            ua.clear_property("teleports"),
            Err(AttachmentError::UnknownProperty { .. })
        ));
        for property in ADD_DISCIPLINE_PROPERTIES {
            ua.clear_property(property).unwrap();
        }
    }
}
