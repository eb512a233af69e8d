//! Text export of a unit attachment.
//!
//! `describe` dumps every stored field for diffing and statistics tools;
//! its layout is fixed: each entry is preceded by two spaces, and new
//! fields are only ever appended. `summary` is the short English form
//! shown to players.

use std::fmt::{self, Display};

use super::UnitAttachment;
use crate::attachments::tech::PlayerModifiers;
use crate::attachments::values::{CaptureParty, IntegerMap};
use crate::attachments::AttachmentOwner;
use crate::catalog::EntityCatalog;
use crate::codec::{TokenList, DELIMITER};
use crate::core::{PlayerId, ResourceId, RuleConfig, UnitTypeId};

/// Separates the three groups of a summary when line breaks are requested.
pub const LINE_BREAK: &str = "\n";

/// Above this, a stacking limit is not worth mentioning.
const NOTABLE_STACKING_LIMIT: i32 = 10_000;

struct Names<'a>(&'a EntityCatalog);

impl Names<'_> {
    fn unit(&self, id: UnitTypeId) -> String {
        self.0
            .unit_type_name(id)
            .map_or_else(|| id.to_string(), str::to_string)
    }

    fn resource(&self, id: ResourceId) -> String {
        self.0
            .resource_name(id)
            .map_or_else(|| id.to_string(), str::to_string)
    }

    fn player(&self, id: PlayerId) -> String {
        self.0
            .player_name(id)
            .map_or_else(|| id.to_string(), str::to_string)
    }

    fn party(&self, party: CaptureParty) -> String {
        match party {
            CaptureParty::Any => "any".to_string(),
            CaptureParty::Player(id) => self.player(id),
        }
    }
}

fn list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn tokens(value: Option<&TokenList>) -> String {
    value.map_or_else(|| "unset".to_string(), |tokens| list(tokens.iter()))
}

fn quantities<K: Ord + Copy>(map: &IntegerMap<K>, name: impl Fn(K) -> String) -> String {
    if map.is_empty() {
        "empty".to_string()
    } else {
        list(map.iter().map(|(key, count)| format!("{count}{DELIMITER}{}", name(key))))
    }
}

/// Accumulates `", "`-separated clauses in up to three groups.
struct Clauses {
    groups: Vec<Vec<String>>,
}

impl Clauses {
    fn new() -> Self {
        Self {
            groups: vec![Vec::new()],
        }
    }

    fn push(&mut self, clause: impl Into<String>) {
        if let Some(group) = self.groups.last_mut() {
            group.push(clause.into());
        }
    }

    fn push_if(&mut self, condition: bool, clause: impl FnOnce() -> String) {
        if condition {
            self.push(clause());
        }
    }

    fn next_group(&mut self) {
        self.groups.push(Vec::new());
    }

    fn finish(self, line_breaks: bool) -> String {
        let separator = if line_breaks {
            format!(", {LINE_BREAK}")
        } else {
            ", ".to_string()
        };
        self.groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|group| group.join(", "))
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

impl UnitAttachment {
    /// Full dump of every stored field.
    #[must_use]
    pub fn describe(&self, catalog: &EntityCatalog) -> String {
        let names = Names(catalog);
        let mut out = format!(
            "{} with:",
            AttachmentOwner::UnitType(self.owner).display_name(catalog)
        );
        let mut entry = |name: &str, value: &dyn Display| {
            out.push_str(&format!("  {name}:{value}"));
        };

        entry("air", &self.is_air);
        entry("sea", &self.is_sea);
        entry("movement", &self.movement);
        entry("attack", &self.attack);
        entry("defense", &self.defense);
        entry("twoHit", &self.is_two_hit);
        entry("factory", &self.is_factory);
        entry("aa", &self.is_aa);
        entry("blitz", &self.can_blitz);
        entry("artillerySupportable", &self.is_artillery_supportable);
        entry("artillery", &self.is_artillery);
        entry("unitSupportCount", &self.unit_support_count);
        entry("marine", &self.is_marine);
        entry("infantry", &self.is_infantry);
        entry("landTransport", &self.is_land_transport);
        entry("airTransportable", &self.is_air_transportable);
        entry("airTransport", &self.is_air_transport);
        entry("strategicBomber", &self.is_strategic_bomber);
        entry("transportCapacity", &self.transport_capacity);
        entry("transportCost", &self.transport_cost);
        entry("carrierCapacity", &self.carrier_capacity);
        entry("carrierCost", &self.carrier_cost);
        entry("sub", &self.is_sub);
        entry("destroyer", &self.is_destroyer);
        entry("canBombard", &self.can_bombard);
        entry("bombard", &self.bombard);
        entry("isAAforCombatOnly", &self.is_aa_for_combat_only);
        entry("isAAforBombingThisUnitOnly", &self.is_aa_for_bombing_this_unit_only);
        entry("attackAA", &self.attack_aa);
        entry("attackAAmaxDieSides", &self.attack_aa_max_die_sides);
        entry("isRocket", &self.is_rocket);
        entry("canProduceUnits", &self.can_produce_units);
        entry("canProduceXUnits", &self.can_produce_x_units);
        entry(
            "createsUnitsList",
            &quantities(&self.creates_units_list, |id| names.unit(id)),
        );
        entry(
            "createsResourcesList",
            &quantities(&self.creates_resources_list, |id| names.resource(id)),
        );
        entry(
            "fuelCost",
            &quantities(&self.fuel_cost, |id| names.resource(id)),
        );
        entry("infrastructure", &self.is_infrastructure);
        entry("construction", &self.is_construction);
        entry("constructionType", &self.construction_type);
        entry(
            "constructionsPerTerrPerType",
            &self.constructions_per_terr_per_type_per_turn,
        );
        entry(
            "maxConstructionsPerType",
            &self.max_constructions_per_type_per_terr,
        );
        entry(
            "destroyedWhenCapturedBy",
            &list(self.destroyed_when_captured_by.iter().map(|(direction, player)| {
                format!("{}{DELIMITER}{}", direction.as_str(), names.player(*player))
            })),
        );
        entry(
            "canBeCapturedOnEnteringBy",
            &list(self.can_be_captured_on_entering_by.iter().map(|p| names.player(*p))),
        );
        entry("canBeDamaged", &self.can_be_damaged);
        entry(
            "canDieFromReachingMaxDamage",
            &self.can_die_from_reaching_max_damage,
        );
        entry("maxOperationalDamage", &self.max_operational_damage);
        entry("maxDamage", &self.max_damage);
        entry(
            "unitPlacementRestrictions",
            &tokens(self.unit_placement_restrictions.as_ref()),
        );
        entry(
            "requiresUnits",
            &list(self.requires_units.iter().map(|combo| list(combo.iter()))),
        );
        entry(
            "consumesUnits",
            &quantities(&self.consumes_units, |id| names.unit(id)),
        );
        entry(
            "canOnlyBePlacedInTerritoryValuedAtX",
            &self.can_only_be_placed_in_territory_valued_at_x,
        );
        entry("maxBuiltPerPlayer", &self.max_built_per_player);
        entry("special", &list(self.special.iter()));
        entry("isSuicide", &self.is_suicide);
        entry("isKamikaze", &self.is_kamikaze);
        entry("combatTransport", &self.is_combat_transport);
        entry(
            "canInvadeOnlyFrom",
            &tokens(self.can_invade_only_from.as_ref()),
        );
        entry(
            "canBeGivenByTerritoryTo",
            &list(self.can_be_given_by_territory_to.iter().map(|p| names.player(*p))),
        );
        entry(
            "receivesAbilityWhenWith",
            &list(self.receives_ability_when_with.iter()),
        );
        entry(
            "whenCombatDamaged",
            &list(self.when_combat_damaged.iter().map(|rule| {
                let mut text = format!("{}{DELIMITER}{}{DELIMITER}{}", rule.from, rule.to, rule.effect);
                if let Some(parameter) = &rule.parameter {
                    text.push(DELIMITER);
                    text.push_str(parameter);
                }
                text
            })),
        );
        entry("blockade", &self.blockade);
        entry("bombingMaxDieSides", &self.bombing_max_die_sides);
        entry("bombingBonus", &self.bombing_bonus);
        entry(
            "givesMovement",
            &quantities(&self.gives_movement, |id| names.unit(id)),
        );
        entry("repairsUnits", &tokens(self.repairs_units.as_ref()));
        entry("canScramble", &self.can_scramble);
        entry("maxScrambleDistance", &self.max_scramble_distance);
        entry("airBase", &self.is_air_base);
        entry("maxScrambleCount", &self.max_scramble_count);
        entry(
            "whenCapturedChangesInto",
            &list(self.when_captured_changes_into.iter().map(|c| {
                format!(
                    "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
                    names.party(c.from),
                    names.party(c.to),
                    c.keep_attributes,
                    quantities(&c.units, |id| names.unit(id))
                )
            })),
        );
        entry("canIntercept", &self.can_intercept);
        entry("canEscort", &self.can_escort);
        entry("airDefense", &self.air_defense);
        entry("airAttack", &self.air_attack);
        entry(
            "canNotMoveDuringCombatMove",
            &self.can_not_move_during_combat_move,
        );
        entry(
            "stackingLimit",
            &self
                .stacking_limit
                .as_ref()
                .map_or_else(|| "unset".to_string(), ToString::to_string),
        );
        out
    }

    fn damage_clause(&self, kind: &str, rules: &RuleConfig) -> String {
        let customised = self.bombing_max_die_sides != -1 || self.bombing_bonus != -1;
        if customised && rules.low_luck_damage_only {
            let (min, max) = self.bombing_damage_range(rules);
            format!("{min}-{max} {kind} Damage")
        } else {
            format!("1-{} {kind} Damage", rules.dice_sides)
        }
    }

    /// Short English summary of what matters about this unit for `player`.
    ///
    /// Clauses appear in a fixed order in three groups: combat and
    /// production, abilities, then placement and movement restrictions.
    /// With `line_breaks`, groups are separated by [`LINE_BREAK`].
    #[must_use]
    pub fn summary(
        &self,
        catalog: &EntityCatalog,
        player: &PlayerModifiers,
        rules: &RuleConfig,
        line_breaks: bool,
        include_owner_name: bool,
    ) -> String {
        let names = Names(catalog);
        let tech = player.tech;
        let mut stats = Clauses::new();

        // === Combat and production ===
        if include_owner_name {
            stats.push(names.unit(self.owner));
        }
        stats.push(if self.is_air {
            "Air unit"
        } else if self.is_sea {
            "Sea unit"
        } else {
            "Land unit"
        });
        let attack = self.attack(player, rules);
        let defense = self.defense(player, rules);
        let movement = self.movement(player);
        stats.push_if(attack > 0, || format!("{attack} Attack"));
        stats.push_if(defense > 0, || format!("{defense} Defense"));
        stats.push_if(movement > 0, || format!("{movement} Movement"));
        stats.push_if(self.is_two_hit, || "Two Hitpoints".to_string());

        let produces = self.is_factory || self.can_produce_units;
        if produces && self.can_produce_x_units < 0 {
            stats.push("can Produce Units Up To Territory Value");
        } else if produces && self.can_produce_x_units > 0 {
            stats.push(format!("can Produce {} Units", self.can_produce_x_units));
        }

        // one entry names its target, several are summed
        let mut per_turn = |verb: &str,
                            count: usize,
                            total: i32,
                            single: Option<String>,
                            kind: &str,
                            suffix: &str| match (count, single) {
            (1, Some(name)) => stats.push(format!("{verb} {total} {name} {suffix}")),
            (n, _) if n > 1 => stats.push(format!("{verb} {total} {kind} {suffix}")),
            _ => {}
        };
        per_turn(
            "Produces",
            self.creates_units_list.len(),
            self.creates_units_list.total_values(),
            self.creates_units_list.first_key().map(|id| names.unit(id)),
            "Units",
            "Each Turn",
        );
        per_turn(
            "Produces",
            self.creates_resources_list.len(),
            self.creates_resources_list.total_values(),
            self.creates_resources_list.first_key().map(|id| names.resource(id)),
            "Resources",
            "Each Turn",
        );
        per_turn(
            "Uses",
            self.fuel_cost.len(),
            self.fuel_cost.total_values(),
            self.fuel_cost.first_key().map(|id| names.resource(id)),
            "Resources",
            "Each movement point",
        );

        if self.is_any_aa() {
            let kind = if self.is_aa
                || (self.is_aa_for_combat_only && self.is_aa_for_bombing_this_unit_only)
            {
                "Anti-Air"
            } else if self.is_aa_for_combat_only {
                "Anti-Air for Combat"
            } else {
                "Anti-Air for Raids"
            };
            stats.push(format!(
                "{}/{} {kind}",
                self.attack_aa(player),
                self.aa_die_sides(rules)
            ));
        }
        if (self.is_aa || self.is_rocket) && tech.rocket {
            stats.push("can Rocket Attack");
            stats.push(self.damage_clause("Rocket", rules));
        }

        // === Abilities ===
        stats.next_group();
        stats.push_if(
            self.is_infrastructure || self.is_aa || self.is_factory,
            || "can be Captured".to_string(),
        );
        stats.push_if(self.is_construction || self.is_factory, || {
            "can be Placed Without Factory".to_string()
        });

        let damageable = self.can_be_damaged || self.is_factory;
        if damageable && rules.sbr_affects_unit_production {
            stats.push("can be Damaged By Raids");
            stats.push_if(self.can_die_from_reaching_max_damage, || {
                "will Die If Max Damage Reached".to_string()
            });
        } else if damageable && rules.damage_from_bombing_done_to_units {
            stats.push("can be Damaged By Raids");
            stats.push_if(self.max_operational_damage > -1, || {
                format!("{} Max Operational Damage", self.max_operational_damage)
            });
            if produces && self.can_produce_x_units < 0 {
                let factor = if self.max_damage > -1 { self.max_damage } else { 2 };
                stats.push(format!("Total Damage up to {factor}x Territory Value"));
            } else if self.max_damage > -1 {
                stats.push(format!("{} Max Total Damage", self.max_damage));
            }
            stats.push_if(self.can_die_from_reaching_max_damage, || {
                "will Die If Max Damage Reached".to_string()
            });
        } else if damageable {
            stats.push("can be Attacked By Raids");
        }

        stats.push_if(self.is_air_base && rules.scramble_rules_in_effect, || {
            "can Allow Scrambling".to_string()
        });
        stats.push_if(self.can_scramble && rules.scramble_rules_in_effect, || {
            format!("can Scramble {} Distance", self.max_scramble_distance.max(1))
        });
        stats.push_if(self.is_artillery, || "can Give Attack Bonus".to_string());
        stats.push_if(self.is_artillery_supportable, || {
            "can Receive Attack Bonus".to_string()
        });
        stats.push_if(self.is_marine, || "1 Amphibious Attack Bonus".to_string());
        stats.push_if(self.can_blitz, || "can Blitz".to_string());

        match self.receives_ability_when_with.as_slice() {
            [] => {}
            [pairing] => {
                let (ability, unit) = pairing
                    .split_once(DELIMITER)
                    .unwrap_or((pairing.as_str(), ""));
                stats.push(format!("receives {ability} when paired with {unit}"));
            }
            _ => stats.push("receives abilities when paired with other units"),
        }

        if self.is_strategic_bomber {
            stats.push("can Perform Raids");
            stats.push(self.damage_clause("Raid", rules));
        }
        stats.push_if(self.is_sub, || "is Stealth".to_string());
        stats.push_if(self.is_destroyer, || "is Anti-Stealth".to_string());
        let bombard = self.bombard();
        stats.push_if(self.can_bombard(player) && bombard > 0, || {
            format!("{bombard} Bombard")
        });
        stats.push_if(self.blockade > 0, || {
            format!("{} Blockade Loss", self.blockade)
        });
        stats.push_if(self.is_suicide, || "Suicide/Munition Unit".to_string());
        stats.push_if(
            self.is_air && (self.is_kamikaze || rules.kamikaze_airplanes),
            || "can use All Movement To Attack Target".to_string(),
        );
        stats.push_if(self.is_infantry && tech.mechanized_infantry, || {
            "can be Transported By Land".to_string()
        });
        stats.push_if(self.is_land_transport && tech.mechanized_infantry, || {
            "is a Land Transport".to_string()
        });
        stats.push_if(self.is_air_transportable && tech.paratroopers, || {
            "can be Transported By Air".to_string()
        });
        stats.push_if(self.is_air_transport && tech.paratroopers, || {
            "is an Air Transport".to_string()
        });

        let capacity = self.transport_capacity;
        if self.is_combat_transport && capacity > 0 {
            stats.push("is a Combat Transport");
        } else if capacity > 0 && self.is_sea {
            stats.push("is a Sea Transport");
        }
        stats.push_if(self.transport_cost > -1, || {
            format!("{} Transporting Cost", self.transport_cost)
        });
        let shows_capacity = capacity > 0
            && (self.is_sea
                || (self.is_air && tech.paratroopers)
                || (!self.is_air && tech.mechanized_infantry));
        stats.push_if(shows_capacity, || format!("{capacity} Transporting Capacity"));
        stats.push_if(self.carrier_cost > -1, || {
            format!("{} Carrier Cost", self.carrier_cost)
        });
        stats.push_if(self.carrier_capacity > 0, || {
            format!("{} Carrier Capacity", self.carrier_capacity)
        });
        stats.push_if(!self.when_combat_damaged.is_empty(), || {
            "when hit this unit loses certain abilities".to_string()
        });

        // === Placement and movement restrictions ===
        stats.next_group();
        stats.push_if(self.max_built_per_player > -1, || {
            format!("{} Max Built Allowed", self.max_built_per_player)
        });
        stats.push_if(
            self.repairs_units.is_some()
                && rules.two_hit_units_require_repair_facilities
                && (rules.battleships_repair_at_beginning_of_round
                    || rules.battleships_repair_at_end_of_round),
            || "can Repair Some Units".to_string(),
        );
        if rules.units_may_give_bonus_movement {
            let bonus = self.gives_movement.total_values();
            stats.push_if(bonus > 0, || "can Give Bonus Movement".to_string());
            stats.push_if(bonus < 0, || "can Take Away Movement".to_string());
        }
        match (self.consumes_units.total_values(), self.consumes_units.first_key()) {
            (1, Some(id)) => stats.push(format!("unit is an Upgrade Of {}", names.unit(id))),
            (n, _) if n > 1 => stats.push("unit Consumes Other Units On Placement"),
            _ => {}
        }
        if rules.unit_placement_restrictions {
            match self.requires_units.as_slice() {
                [] => {}
                [combo] if combo.len() == 1 => stats.push(format!(
                    "unit can only be Placed Where There Is A {}",
                    combo[0]
                )),
                _ => stats.push("unit Requires Other Units Present To Be Placed"),
            }
            stats.push_if(self.unit_placement_restrictions.is_some(), || {
                "has Placement Restrictions".to_string()
            });
            stats.push_if(self.can_only_be_placed_in_territory_valued_at_x > 0, || {
                format!(
                    "must be Placed In Territory Valued >={}",
                    self.can_only_be_placed_in_territory_valued_at_x
                )
            });
        }
        stats.push_if(self.can_not_move_during_combat_move, || {
            "cannot Combat Move".to_string()
        });
        if let (Some(limit), Some(max)) = (&self.stacking_limit, self.effective_stacking_max(rules)) {
            stats.push_if(max < NOTABLE_STACKING_LIMIT, || {
                format!("max of {max} {} per territory", limit.scope)
            });
        }

        stats.finish(line_breaks)
    }
}

impl fmt::Display for UnitAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.name, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::tech::TechAdvances;
    use crate::attachments::Attachment;

    fn catalog() -> EntityCatalog {
        let mut catalog = EntityCatalog::new();
        catalog.add_unit_type("infantry").unwrap();
        catalog.add_unit_type("armour").unwrap();
        catalog.add_resource("PUs").unwrap();
        catalog
    }

    fn configured(catalog: &EntityCatalog, options: &[(&str, &str)]) -> UnitAttachment {
        let mut ua = UnitAttachment::new(UnitTypeId::new(0), "unitAttachment");
        for (property, value) in options {
            ua.set_property(property, value, catalog).unwrap();
        }
        ua
    }

    #[test]
    fn test_describe_layout() {
        let catalog = catalog();
        let ua = configured(&catalog, &[("movement", "1"), ("fuelCost", "2:PUs")]);
        let text = ua.describe(&catalog);
        assert!(text.starts_with("infantry with:  air:false  sea:false  movement:1  attack:0"));
        assert!(text.contains("  fuelCost:[2:PUs]"));
        assert!(text.contains("  createsUnitsList:empty"));
        assert!(text.contains("  repairsUnits:unset"));
        assert!(text.ends_with("  stackingLimit:unset"));
    }

    #[test]
    fn test_summary_of_plain_infantry() {
        let catalog = catalog();
        let ua = configured(
            &catalog,
            &[("attack", "1"), ("defense", "2"), ("movement", "1"), ("transportCost", "2")],
        );
        let rules = RuleConfig::default();
        assert_eq!(
            ua.summary(&catalog, &PlayerModifiers::human(), &rules, false, true),
            "infantry, Land unit, 1 Attack, 2 Defense, 1 Movement, 2 Transporting Cost"
        );
        assert_eq!(
            ua.summary(&catalog, &PlayerModifiers::human(), &rules, false, false),
            "Land unit, 1 Attack, 2 Defense, 1 Movement, 2 Transporting Cost"
        );
    }

    #[test]
    fn test_summary_line_breaks_split_groups() {
        let catalog = catalog();
        let ua = configured(
            &catalog,
            &[("attack", "3"), ("canBlitz", "true"), ("maxBuiltPerPlayer", "4")],
        );
        let text = ua.summary(
            &catalog,
            &PlayerModifiers::human(),
            &RuleConfig::default(),
            true,
            false,
        );
        let groups: Vec<&str> = text.split(LINE_BREAK).collect();
        assert_eq!(
            groups,
            vec!["Land unit, 3 Attack, ", "can Blitz, ", "4 Max Built Allowed"]
        );
        assert!(!text.ends_with(", "));
    }

    #[test]
    fn test_summary_production_and_aa() {
        let catalog = catalog();
        let ua = configured(
            &catalog,
            &[
                ("isAA", "true"),
                ("createsUnitsList", "1:armour"),
                ("fuelCost", "2:PUs"),
            ],
        );
        let player = PlayerModifiers::human().with_tech(TechAdvances {
            aa_radar: true,
            ..TechAdvances::default()
        });
        let text = ua.summary(&catalog, &player, &RuleConfig::default(), false, false);
        assert!(text.contains("Produces 1 armour Each Turn"));
        assert!(text.contains("Uses 2 PUs Each movement point"));
        assert!(text.contains("2/6 Anti-Air"));
        assert!(text.contains("can be Captured"));
        assert!(text.ends_with("cannot Combat Move, max of 1 allied per territory"));
    }
}
