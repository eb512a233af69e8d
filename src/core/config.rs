//! Global rule configuration.
//!
//! `RuleConfig` is the frozen set of game-variant toggles consulted while
//! deriving combat values, resolving stacking limits, validating
//! attachments and rendering summaries. It is built once per game, either
//! directly through the `with_*` builders or from the game's property map,
//! and passed explicitly to every query. Nothing in the crate reads rules
//! from ambient state.

use serde::{Deserialize, Serialize};

use super::properties::GameProperties;

/// Property keys understood by [`RuleConfig::from_properties`].
pub mod keys {
    pub const DICE_SIDES: &str = "Dice Sides";
    pub const AI_BONUS_ATTACK: &str = "AI Bonus Attack";
    pub const AI_BONUS_DEFENSE: &str = "AI Bonus Defense";
    pub const SUPER_SUB_DEFENSE_BONUS: &str = "Super Sub Defense Bonus";
    pub const HEAVY_BOMBER_DICE_ROLLS: &str = "Heavy Bomber Dice Rolls";
    pub const WW2V2: &str = "WW2V2";
    pub const WW2V3: &str = "WW2V3";
    pub const WW2V3_TECH_MODEL: &str = "WW2V3 Tech Model";
    pub const MULTIPLE_AA_PER_TERRITORY: &str = "Multiple AA Per Territory";
    pub const LHTR_HEAVY_BOMBERS: &str = "LHTR Heavy Bombers";
    pub const TRANSPORT_CASUALTIES_RESTRICTED: &str = "Transport Casualties Restricted";
    pub const LOW_LUCK_DAMAGE_ONLY: &str = "Low Luck Damage Only";
    pub const SBR_AFFECTS_UNIT_PRODUCTION: &str = "SBR Affects Unit Production";
    pub const DAMAGE_FROM_BOMBING_DONE_TO_UNITS: &str =
        "Damage From Bombing Done To Units Instead Of Territories";
    pub const SCRAMBLE_RULES_IN_EFFECT: &str = "Scramble Rules In Effect";
    pub const KAMIKAZE_AIRPLANES: &str = "Kamikaze Airplanes";
    pub const TWO_HIT_UNITS_REQUIRE_REPAIR_FACILITIES: &str =
        "Two HitPoint Units Require Repair Facilities";
    pub const BATTLESHIPS_REPAIR_AT_BEGINNING_OF_ROUND: &str =
        "Battleships Repair At Beginning Of Round";
    pub const BATTLESHIPS_REPAIR_AT_END_OF_ROUND: &str = "Battleships Repair At End Of Round";
    pub const UNITS_MAY_GIVE_BONUS_MOVEMENT: &str = "Units May Give Bonus Movement";
    pub const UNIT_PLACEMENT_RESTRICTIONS: &str = "Unit Placement Restrictions";
}

/// Global rule toggles for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Sides on a combat die. Effective attack and defense never exceed this.
    pub dice_sides: i32,

    /// Added to positive attack values of AI-controlled players.
    pub ai_bonus_attack: i32,

    /// Added to positive defense values of AI-controlled players.
    pub ai_bonus_defense: i32,

    /// Extra defense for submarines of players with super submarines.
    pub super_sub_defense_bonus: i32,

    /// Rolls a heavy bomber makes.
    pub heavy_bomber_dice_rolls: i32,

    // === Era rules ===
    pub ww2v2: bool,
    pub ww2v3: bool,

    /// Jet fighters improve attack instead of defense.
    pub ww2v3_tech_model: bool,

    /// More than one anti-air unit may share a territory.
    pub multiple_aa_per_territory: bool,

    /// Heavy bombers also roll extra dice when defending.
    pub heavy_bombers_affect_defense: bool,

    /// Sea transports are taken as casualties last and may not fight.
    pub transport_casualties_restricted: bool,

    // === Bombing and damage ===
    pub low_luck_damage_only: bool,
    pub sbr_affects_unit_production: bool,
    pub damage_from_bombing_done_to_units: bool,

    // === Movement and placement ===
    pub scramble_rules_in_effect: bool,
    pub kamikaze_airplanes: bool,
    pub two_hit_units_require_repair_facilities: bool,
    pub battleships_repair_at_beginning_of_round: bool,
    pub battleships_repair_at_end_of_round: bool,
    pub units_may_give_bonus_movement: bool,
    pub unit_placement_restrictions: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            dice_sides: 6,
            ai_bonus_attack: 0,
            ai_bonus_defense: 0,
            super_sub_defense_bonus: 0,
            heavy_bomber_dice_rolls: 2,
            ww2v2: false,
            ww2v3: false,
            ww2v3_tech_model: false,
            multiple_aa_per_territory: false,
            heavy_bombers_affect_defense: false,
            transport_casualties_restricted: false,
            low_luck_damage_only: false,
            sbr_affects_unit_production: false,
            damage_from_bombing_done_to_units: false,
            scramble_rules_in_effect: false,
            kamikaze_airplanes: false,
            two_hit_units_require_repair_facilities: false,
            battleships_repair_at_beginning_of_round: false,
            battleships_repair_at_end_of_round: false,
            units_may_give_bonus_movement: false,
            unit_placement_restrictions: false,
        }
    }
}

impl RuleConfig {
    /// Read the rule toggles from a game's property map.
    ///
    /// Missing or mistyped keys keep their defaults.
    #[must_use]
    pub fn from_properties(props: &GameProperties) -> Self {
        let d = Self::default();
        let int = |key: &str, default: i32| {
            i32::try_from(props.get_int(key, i64::from(default))).unwrap_or(default)
        };

        Self {
            dice_sides: int(keys::DICE_SIDES, d.dice_sides),
            ai_bonus_attack: int(keys::AI_BONUS_ATTACK, d.ai_bonus_attack),
            ai_bonus_defense: int(keys::AI_BONUS_DEFENSE, d.ai_bonus_defense),
            super_sub_defense_bonus: int(keys::SUPER_SUB_DEFENSE_BONUS, d.super_sub_defense_bonus),
            heavy_bomber_dice_rolls: int(keys::HEAVY_BOMBER_DICE_ROLLS, d.heavy_bomber_dice_rolls),
            ww2v2: props.get_bool(keys::WW2V2, d.ww2v2),
            ww2v3: props.get_bool(keys::WW2V3, d.ww2v3),
            ww2v3_tech_model: props.get_bool(keys::WW2V3_TECH_MODEL, d.ww2v3_tech_model),
            multiple_aa_per_territory: props
                .get_bool(keys::MULTIPLE_AA_PER_TERRITORY, d.multiple_aa_per_territory),
            heavy_bombers_affect_defense: props
                .get_bool(keys::LHTR_HEAVY_BOMBERS, d.heavy_bombers_affect_defense),
            transport_casualties_restricted: props.get_bool(
                keys::TRANSPORT_CASUALTIES_RESTRICTED,
                d.transport_casualties_restricted,
            ),
            low_luck_damage_only: props.get_bool(keys::LOW_LUCK_DAMAGE_ONLY, d.low_luck_damage_only),
            sbr_affects_unit_production: props
                .get_bool(keys::SBR_AFFECTS_UNIT_PRODUCTION, d.sbr_affects_unit_production),
            damage_from_bombing_done_to_units: props.get_bool(
                keys::DAMAGE_FROM_BOMBING_DONE_TO_UNITS,
                d.damage_from_bombing_done_to_units,
            ),
            scramble_rules_in_effect: props
                .get_bool(keys::SCRAMBLE_RULES_IN_EFFECT, d.scramble_rules_in_effect),
            kamikaze_airplanes: props.get_bool(keys::KAMIKAZE_AIRPLANES, d.kamikaze_airplanes),
            two_hit_units_require_repair_facilities: props.get_bool(
                keys::TWO_HIT_UNITS_REQUIRE_REPAIR_FACILITIES,
                d.two_hit_units_require_repair_facilities,
            ),
            battleships_repair_at_beginning_of_round: props.get_bool(
                keys::BATTLESHIPS_REPAIR_AT_BEGINNING_OF_ROUND,
                d.battleships_repair_at_beginning_of_round,
            ),
            battleships_repair_at_end_of_round: props.get_bool(
                keys::BATTLESHIPS_REPAIR_AT_END_OF_ROUND,
                d.battleships_repair_at_end_of_round,
            ),
            units_may_give_bonus_movement: props
                .get_bool(keys::UNITS_MAY_GIVE_BONUS_MOVEMENT, d.units_may_give_bonus_movement),
            unit_placement_restrictions: props
                .get_bool(keys::UNIT_PLACEMENT_RESTRICTIONS, d.unit_placement_restrictions),
        }
    }

    /// True when any of the rules allowing several anti-air units per
    /// territory is enabled.
    #[must_use]
    pub fn allows_multiple_aa(&self) -> bool {
        self.ww2v2 || self.ww2v3 || self.multiple_aa_per_territory
    }

    /// Set the number of die sides.
    #[must_use]
    pub fn with_dice_sides(mut self, sides: i32) -> Self {
        self.dice_sides = sides;
        self
    }

    /// Set the AI attack and defense bonus offsets.
    #[must_use]
    pub fn with_ai_bonus(mut self, attack: i32, defense: i32) -> Self {
        self.ai_bonus_attack = attack;
        self.ai_bonus_defense = defense;
        self
    }

    /// Set the super submarine defense bonus.
    #[must_use]
    pub fn with_super_sub_defense_bonus(mut self, bonus: i32) -> Self {
        self.super_sub_defense_bonus = bonus;
        self
    }

    /// Set heavy bomber rolls, and whether they also apply on defense.
    #[must_use]
    pub fn with_heavy_bombers(mut self, rolls: i32, affect_defense: bool) -> Self {
        self.heavy_bomber_dice_rolls = rolls;
        self.heavy_bombers_affect_defense = affect_defense;
        self
    }

    /// Enable the WW2V2 era rules.
    #[must_use]
    pub fn with_ww2v2(mut self) -> Self {
        self.ww2v2 = true;
        self
    }

    /// Enable the WW2V3 era rules.
    #[must_use]
    pub fn with_ww2v3(mut self) -> Self {
        self.ww2v3 = true;
        self
    }

    /// Jet fighters improve attack rather than defense.
    #[must_use]
    pub fn with_ww2v3_tech_model(mut self) -> Self {
        self.ww2v3_tech_model = true;
        self
    }

    /// Allow several anti-air units per territory.
    #[must_use]
    pub fn with_multiple_aa_per_territory(mut self) -> Self {
        self.multiple_aa_per_territory = true;
        self
    }

    /// Restrict sea transports from fighting.
    #[must_use]
    pub fn with_transport_casualties_restricted(mut self) -> Self {
        self.transport_casualties_restricted = true;
        self
    }

    /// Enable placement restriction rules.
    #[must_use]
    pub fn with_unit_placement_restrictions(mut self) -> Self {
        self.unit_placement_restrictions = true;
        self
    }

    /// Enable scrambling rules.
    #[must_use]
    pub fn with_scramble_rules(mut self) -> Self {
        self.scramble_rules_in_effect = true;
        self
    }
}
