//! Effective unit values for a given player and rule set.
//!
//! Every function here is a pure function of the attachment, the player's
//! modifier snapshot and the rule configuration. Attack and defense style
//! values are capped at the die size; nothing raises them back to zero.

use super::UnitAttachment;
use crate::attachments::tech::PlayerModifiers;
use crate::core::RuleConfig;

impl UnitAttachment {
    fn has_jet_bonus(&self, player: &PlayerModifiers) -> bool {
        self.is_air && !self.is_strategic_bomber && player.tech.jet_power
    }

    /// Attack value on a combat die.
    #[must_use]
    pub fn attack(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        let mut value = self.attack;
        if value > 0 && self.is_sub && player.tech.super_sub {
            value = value.saturating_add(1);
        }
        if value > 0 && self.has_jet_bonus(player) && rules.ww2v3_tech_model {
            value = value.saturating_add(1);
        }
        if value > 0 && player.is_ai {
            value = value.saturating_add(rules.ai_bonus_attack);
        }
        value.min(rules.dice_sides)
    }

    /// Defense value on a combat die.
    #[must_use]
    pub fn defense(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        let mut value = self.defense;
        if value > 0 && self.has_jet_bonus(player) && !rules.ww2v3_tech_model {
            value = value.saturating_add(1);
        }
        if value > 0 && self.is_sub && player.tech.super_sub && rules.super_sub_defense_bonus > 0 {
            value = value.saturating_add(rules.super_sub_defense_bonus);
        }
        if value > 0 && player.is_ai {
            value = value.saturating_add(rules.ai_bonus_defense);
        }
        value.min(rules.dice_sides)
    }

    /// Movement points; long-range aircraft fly two further.
    #[must_use]
    pub fn movement(&self, player: &PlayerModifiers) -> i32 {
        if self.is_air && player.tech.long_range_air {
            self.movement.saturating_add(2)
        } else {
            self.movement
        }
    }

    /// Attack value in air battles.
    #[must_use]
    pub fn air_attack(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        let mut value = self.air_attack;
        if value > 0 && self.has_jet_bonus(player) {
            value = value.saturating_add(1);
        }
        value.min(rules.dice_sides)
    }

    /// Defense value in air battles.
    #[must_use]
    pub fn air_defense(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        let mut value = self.air_defense;
        if value > 0 && self.has_jet_bonus(player) {
            value = value.saturating_add(1);
        }
        value.min(rules.dice_sides)
    }

    /// Anti-air strength, one better with radar.
    #[must_use]
    pub fn attack_aa(&self, player: &PlayerModifiers) -> i32 {
        if player.tech.aa_radar {
            self.attack_aa.saturating_add(1)
        } else {
            self.attack_aa
        }
    }

    /// Sides of the anti-air die, the game's die when unset.
    #[must_use]
    pub fn aa_die_sides(&self, rules: &RuleConfig) -> i32 {
        if self.attack_aa_max_die_sides == -1 {
            rules.dice_sides
        } else {
            self.attack_aa_max_die_sides
        }
    }

    /// Dice rolled when attacking. Units without attack strength roll none;
    /// heavy bombers roll the configured count.
    #[must_use]
    pub fn attack_rolls(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        if self.attack(player, rules) == 0 {
            0
        } else if self.is_strategic_bomber && player.tech.heavy_bomber {
            rules.heavy_bomber_dice_rolls
        } else {
            1
        }
    }

    /// Dice rolled when defending. Heavy bombers only roll extra dice when
    /// the rules extend them to defense.
    #[must_use]
    pub fn defense_rolls(&self, player: &PlayerModifiers, rules: &RuleConfig) -> i32 {
        if self.defense(player, rules) == 0 {
            0
        } else if self.is_strategic_bomber
            && player.tech.heavy_bomber
            && rules.heavy_bombers_affect_defense
        {
            rules.heavy_bomber_dice_rolls
        } else {
            1
        }
    }

    /// Bombard strength: the explicit value, else the raw attack.
    #[must_use]
    pub fn bombard(&self) -> i32 {
        if self.bombard > 0 {
            self.bombard
        } else {
            self.attack
        }
    }

    /// Units one supporting unit empowers.
    #[must_use]
    pub fn unit_support_count(&self) -> i32 {
        if self.unit_support_count > 0 {
            self.unit_support_count
        } else {
            1
        }
    }

    /// Whether the unit may bombard: explicitly, or as a destroyer of a
    /// player with destroyer bombardment.
    #[must_use]
    pub fn can_bombard(&self, player: &PlayerModifiers) -> bool {
        self.can_bombard || (self.is_destroyer && player.tech.destroyer_bombard)
    }

    /// Smallest and largest damage of one bombing or rocket roll.
    #[must_use]
    pub fn bombing_damage_range(&self, rules: &RuleConfig) -> (i32, i32) {
        let bonus = if self.bombing_bonus == -1 {
            0
        } else {
            self.bombing_bonus
        };
        let sides = if self.bombing_max_die_sides == -1 {
            rules.dice_sides
        } else {
            self.bombing_max_die_sides
        };
        (bonus.saturating_add(1), sides.saturating_add(bonus))
    }
}
