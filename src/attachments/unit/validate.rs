//! Load-time rules of the unit attachment.

use super::{UnitAttachment, UNITS_MAY_NOT_LAND_ON_CARRIER, UNITS_MAY_NOT_LEAVE_ALLIED_CARRIER};
use crate::attachments::values::StackingScope;
use crate::attachments::AttachmentOwner;
use crate::catalog::EntityCatalog;
use crate::codec::DELIMITER;
use crate::core::EntityKind;
use crate::validation::{ValidationContext, ValidationError, Violation, Violations};

/// Tags accepted by `special`.
pub const SPECIAL_OPTIONS: &[&str] = &["none", "canOnlyPlaceInOriginalTerritories"];

/// Abilities a unit may receive from a paired unit.
pub const RECEIVABLE_ABILITIES: &[&str] = &["canBlitz"];

const CONSTRUCTION_FIELDS: &[&str] = &[
    "isConstruction",
    "constructionType",
    "constructionsPerTerrPerTypePerTurn",
    "maxConstructionsPerTypePerTerr",
];

fn unresolved_units<'a>(
    field: &'static str,
    names: impl IntoIterator<Item = &'a String>,
    catalog: &EntityCatalog,
    violations: &mut Violations,
) {
    for name in names {
        violations.check(catalog.unit_type(name).is_none(), || {
            Violation::UnresolvedReference {
                field,
                kind: EntityKind::UnitType,
                name: name.clone(),
            }
        });
    }
}

impl UnitAttachment {
    /// Fields that make no sense for this unit's movement class, paired
    /// with whether they are set.
    fn capability_conflicts(&self) -> (&'static str, Vec<(&'static str, bool)>) {
        if self.is_air {
            (
                "isAir",
                vec![
                    ("isSea", self.is_sea),
                    ("isFactory", self.is_factory),
                    ("isSub", self.is_sub),
                    ("isAA", self.is_aa),
                    ("isAAforCombatOnly", self.is_aa_for_combat_only),
                    ("isAAforBombingThisUnitOnly", self.is_aa_for_bombing_this_unit_only),
                    ("transportCost", self.transport_cost != -1),
                    ("carrierCapacity", self.carrier_capacity != -1),
                    ("canBlitz", self.can_blitz),
                    ("canBombard", self.can_bombard),
                    ("isMarine", self.is_marine),
                    ("isInfantry", self.is_infantry),
                    ("isLandTransport", self.is_land_transport),
                    ("isAirTransportable", self.is_air_transportable),
                    ("isCombatTransport", self.is_combat_transport),
                ],
            )
        } else if self.is_sea {
            (
                "isSea",
                vec![
                    ("canIntercept", self.can_intercept),
                    ("canEscort", self.can_escort),
                    ("canBlitz", self.can_blitz),
                    ("isAA", self.is_aa),
                    ("isAAforCombatOnly", self.is_aa_for_combat_only),
                    ("isAAforBombingThisUnitOnly", self.is_aa_for_bombing_this_unit_only),
                    ("isFactory", self.is_factory),
                    ("isStrategicBomber", self.is_strategic_bomber),
                    ("carrierCost", self.carrier_cost != -1),
                    ("transportCost", self.transport_cost != -1),
                    ("isMarine", self.is_marine),
                    ("isInfantry", self.is_infantry),
                    ("isLandTransport", self.is_land_transport),
                    ("isAirTransportable", self.is_air_transportable),
                    ("isAirTransport", self.is_air_transport),
                    ("isKamikaze", self.is_kamikaze),
                ],
            )
        } else {
            (
                "land",
                vec![
                    ("canIntercept", self.can_intercept),
                    ("canEscort", self.can_escort),
                    ("canBombard", self.can_bombard),
                    ("isStrategicBomber", self.is_strategic_bomber),
                    ("isSub", self.is_sub),
                    ("carrierCapacity", self.carrier_capacity != -1),
                    ("bombard", self.bombard != -1),
                    ("transportCapacity", self.transport_capacity != -1),
                    ("isAirTransport", self.is_air_transport),
                    ("isCombatTransport", self.is_combat_transport),
                    ("isKamikaze", self.is_kamikaze),
                ],
            )
        }
    }

    fn check_capabilities(&self, violations: &mut Violations) {
        let (capability, conflicts) = self.capability_conflicts();
        for (field, set) in conflicts {
            violations.check(set, || Violation::CapabilityConflict { capability, field });
        }
    }

    fn check_ranges(&self, violations: &mut Violations) {
        let ranges = [
            ("attackAA", self.attack_aa, 0, i32::MAX),
            ("attackAAmaxDieSides", self.attack_aa_max_die_sides, -1, 200),
            ("bombingBonus", self.bombing_bonus, -1, 10_000),
            ("bombingMaxDieSides", self.bombing_max_die_sides, -1, 200),
            ("maxBuiltPerPlayer", self.max_built_per_player, -1, i32::MAX),
        ];
        for (field, value, min, max) in ranges {
            violations.check(!(min..=max).contains(&value), || Violation::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }

        violations.check(
            (self.bombing_bonus >= 0 || self.bombing_max_die_sides >= 0)
                && !(self.is_strategic_bomber || self.is_aa),
            || Violation::Incoherent {
                fields: &["bombingBonus", "bombingMaxDieSides", "isStrategicBomber", "isAA"],
                rule: "bombing damage only applies to strategic bombers and anti-air units",
            },
        );
    }

    fn check_transport_roles(&self, rules: &crate::core::RuleConfig, violations: &mut Violations) {
        violations.check(self.carrier_capacity != -1 && self.carrier_cost != -1, || {
            Violation::ExclusivePair {
                first: "carrierCapacity",
                second: "carrierCost",
            }
        });
        violations.check(self.transport_capacity != -1 && self.transport_cost != -1, || {
            Violation::ExclusivePair {
                first: "transportCapacity",
                second: "transportCost",
            }
        });
        violations.check(self.is_combat_transport && self.transport_capacity < 1, || {
            Violation::Incoherent {
                fields: &["isCombatTransport", "transportCapacity"],
                rule: "combat transports need a transport capacity",
            }
        });
        violations.check(
            self.is_sea
                && self.transport_capacity != -1
                && rules.transport_casualties_restricted
                && (self.attack > 0 || self.defense > 0)
                && !self.is_combat_transport,
            || Violation::Incoherent {
                fields: &["transportCapacity", "attack", "defense"],
                rule: "restricted transports can not attack or defend",
            },
        );
    }

    fn check_damage(&self, violations: &mut Violations) {
        violations.check(self.can_be_damaged && self.max_damage < 1, || {
            Violation::Incoherent {
                fields: &["canBeDamaged", "maxDamage"],
                rule: "damageable units need a positive maxDamage",
            }
        });
        violations.check(
            !self.can_be_damaged && !self.is_factory && self.max_damage >= 0,
            || Violation::Incoherent {
                fields: &["canBeDamaged", "maxDamage"],
                rule: "maxDamage needs canBeDamaged",
            },
        );
        violations.check(
            self.can_die_from_reaching_max_damage && !(self.max_damage >= 0 || self.is_factory),
            || Violation::Incoherent {
                fields: &["canDieFromReachingMaxDamage", "maxDamage"],
                rule: "units dying at max damage need a maxDamage",
            },
        );
        violations.check(self.can_be_damaged && self.is_factory, || {
            Violation::ExclusivePair {
                first: "canBeDamaged",
                second: "isFactory",
            }
        });
    }

    fn check_construction(&self, violations: &mut Violations) {
        let untyped = matches!(self.construction_type.as_str(), "" | "none");
        let per_turn = self.constructions_per_terr_per_type_per_turn;
        let per_territory = self.max_constructions_per_type_per_terr;

        violations.check(
            self.is_construction && (untyped || per_turn < 0 || per_territory < 0),
            || Violation::Incoherent {
                fields: CONSTRUCTION_FIELDS,
                rule: "constructions need a constructionType and non-negative limits",
            },
        );
        violations.check(
            !self.is_construction && (!untyped || per_turn >= 0 || per_territory >= 0),
            || Violation::Incoherent {
                fields: CONSTRUCTION_FIELDS,
                rule: "construction values need isConstruction",
            },
        );
        violations.check(per_turn > per_territory, || Violation::Incoherent {
            fields: &["constructionsPerTerrPerTypePerTurn", "maxConstructionsPerTypePerTerr"],
            rule: "constructions per turn exceed the per-territory maximum",
        });
    }

    fn check_references(&self, ctx: &ValidationContext<'_>, violations: &mut Violations) {
        let catalog = ctx.catalog;

        for name in self.unit_placement_restrictions.iter().flatten() {
            violations.check(catalog.territory(name).is_none(), || {
                Violation::UnresolvedReference {
                    field: "unitPlacementRestrictions",
                    kind: EntityKind::Territory,
                    name: name.clone(),
                }
            });
        }
        unresolved_units("repairsUnits", self.repairs_units.iter().flatten(), catalog, violations);
        unresolved_units(
            "requiresUnits",
            self.requires_units.iter().flatten(),
            catalog,
            violations,
        );

        if let Some(transports) = &self.can_invade_only_from {
            let sentinel = matches!(
                transports.first().map(String::as_str),
                Some("all") | Some("none")
            );
            for transport in transports.iter().filter(|_| !sentinel) {
                match catalog.unit_type(transport) {
                    None => violations.push(Violation::UnresolvedReference {
                        field: "canInvadeOnlyFrom",
                        kind: EntityKind::UnitType,
                        name: transport.clone(),
                    }),
                    Some(id) => violations.check(
                        !ctx.attachments.has_attachments(AttachmentOwner::UnitType(id)),
                        || Violation::MissingAttachment {
                            field: "canInvadeOnlyFrom",
                            name: transport.clone(),
                        },
                    ),
                }
            }
        }
    }

    fn check_vocabularies(&self, ctx: &ValidationContext<'_>, violations: &mut Violations) {
        const RECEIVES: &str = "receivesAbilityWhenWith";
        for pairing in &self.receives_ability_when_with {
            let parts: Vec<&str> = pairing.split(DELIMITER).collect();
            let [ability, unit] = parts.as_slice() else {
                violations.push(Violation::MalformedRecord {
                    field: RECEIVES,
                    expected: "ability:unitType",
                    found: pairing.clone(),
                });
                continue;
            };
            violations.check(ctx.catalog.unit_type(unit).is_none(), || {
                Violation::UnresolvedReference {
                    field: RECEIVES,
                    kind: EntityKind::UnitType,
                    name: (*unit).to_string(),
                }
            });
            violations.check(!RECEIVABLE_ABILITIES.contains(ability), || {
                Violation::UnrecognizedOption {
                    field: RECEIVES,
                    option: (*ability).to_string(),
                }
            });
        }

        for rule in &self.when_combat_damaged {
            let known = [UNITS_MAY_NOT_LAND_ON_CARRIER, UNITS_MAY_NOT_LEAVE_ALLIED_CARRIER]
                .contains(&rule.effect.as_str());
            violations.check(!known, || Violation::UnrecognizedOption {
                field: "whenCombatDamaged",
                option: rule.effect.clone(),
            });
        }

        for option in &self.special {
            violations.check(!SPECIAL_OPTIONS.contains(&option.as_str()), || {
                Violation::UnrecognizedOption {
                    field: "special",
                    option: option.clone(),
                }
            });
        }

        if let Some(limit) = &self.stacking_limit {
            violations.check(limit.max < 0, || Violation::OutOfRange {
                field: "stackingLimit",
                value: limit.max,
                min: 0,
                max: i32::MAX,
            });
            violations.check(StackingScope::from_tag(&limit.scope).is_none(), || {
                Violation::UnrecognizedOption {
                    field: "stackingLimit",
                    option: limit.scope.clone(),
                }
            });
        }
    }

    /// Run every rule and report all violations at once.
    pub(super) fn check(&self, ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        self.check_capabilities(&mut violations);
        self.check_ranges(&mut violations);
        self.check_transport_roles(ctx.rules, &mut violations);
        self.check_damage(&mut violations);
        self.check_construction(&mut violations);
        self.check_references(ctx, &mut violations);
        self.check_vocabularies(ctx, &mut violations);

        let owner = AttachmentOwner::UnitType(self.owner).display_name(ctx.catalog);
        violations.into_result(owner, self.name.clone())
    }
}
