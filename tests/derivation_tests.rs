//! Derived value integration tests.
//!
//! Effective combat values depend on the attachment, the player's
//! modifier snapshot and the rule toggles. These tests build the player
//! state through tech attachments and the game's property map, the way a
//! loaded game would.

use wargame_rules::attachments::{PlayerModifiers, TechAdvances, UnitAttachment, LINE_BREAK};
use wargame_rules::catalog::EntityCatalog;
use wargame_rules::core::config::keys;
use wargame_rules::core::{GameProperties, PlayerId, RuleConfig, UnitTypeId};
use wargame_rules::data::GameData;
use wargame_rules::loader::{load, AttachmentDeclaration};

struct Setup {
    data: GameData,
    fighter: UnitTypeId,
    bomber: UnitTypeId,
    germans: PlayerId,
    russians: PlayerId,
}

/// Germans are AI controlled with jets and heavy bombers; Russians are
/// human with no technology.
fn setup(properties: GameProperties) -> Setup {
    let mut catalog = EntityCatalog::new();
    let fighter = catalog.add_unit_type("fighter").unwrap();
    let bomber = catalog.add_unit_type("bomber").unwrap();
    let germans = catalog.add_player("Germans", true).unwrap();
    let russians = catalog.add_player("Russians", false).unwrap();

    let data = load(
        GameData::new(properties, catalog),
        [
            AttachmentDeclaration::unit(fighter)
                .option("isAir", "true")
                .option("attack", "5")
                .option("defense", "4")
                .option("movement", "4"),
            AttachmentDeclaration::unit(bomber)
                .option("isAir", "true")
                .option("isStrategicBomber", "true")
                .option("attack", "4")
                .option("defense", "1")
                .option("movement", "6"),
            AttachmentDeclaration::tech(germans)
                .option("jetPower", "true")
                .option("heavyBomber", "true")
                .option("longRangeAir", "true"),
        ],
    )
    .unwrap();

    Setup {
        data,
        fighter,
        bomber,
        germans,
        russians,
    }
}

fn unit(s: &Setup, unit_type: UnitTypeId) -> &UnitAttachment {
    UnitAttachment::get(&s.data.attachments, unit_type).unwrap()
}

// =============================================================================
// Attack and defense
// =============================================================================

/// Jet and AI bonuses stack but never exceed the die.
#[test]
fn test_attack_clamped_to_dice_sides() {
    let s = setup(
        GameProperties::new()
            .with(keys::WW2V3_TECH_MODEL, true)
            .with(keys::AI_BONUS_ATTACK, 2i32),
    );
    let player = s.data.player_modifiers(s.germans);
    assert!(player.is_ai);
    assert_eq!(unit(&s, s.fighter).attack(&player, &s.data.rules), 6);
}

/// The same unit is weaker for a player without the modifiers.
#[test]
fn test_modifiers_are_per_player() {
    let s = setup(
        GameProperties::new()
            .with(keys::WW2V3_TECH_MODEL, true)
            .with(keys::AI_BONUS_ATTACK, 2i32),
    );
    let snapshot = s.data.modifier_snapshot().unwrap();
    let fighter = unit(&s, s.fighter);
    assert_eq!(fighter.attack(&snapshot[s.russians], &s.data.rules), 5);
    assert_eq!(fighter.movement(&snapshot[s.russians]), 4);
    assert_eq!(fighter.movement(&snapshot[s.germans]), 6);
}

/// Under the classic tech model jets improve defense instead.
#[test]
fn test_classic_jets_defend() {
    let s = setup(GameProperties::new());
    let player = s.data.player_modifiers(s.germans);
    let fighter = unit(&s, s.fighter);
    assert_eq!(fighter.attack(&player, &s.data.rules), 5);
    assert_eq!(fighter.defense(&player, &s.data.rules), 5);
}

/// A larger die raises the cap.
#[test]
fn test_dice_sides_from_properties() {
    let s = setup(
        GameProperties::new()
            .with(keys::DICE_SIDES, 12i32)
            .with(keys::WW2V3_TECH_MODEL, true)
            .with(keys::AI_BONUS_ATTACK, 2i32),
    );
    let player = s.data.player_modifiers(s.germans);
    assert_eq!(unit(&s, s.fighter).attack(&player, &s.data.rules), 8);
}

/// Validated extreme values saturate instead of overflowing.
#[test]
fn test_extreme_values_do_not_overflow() {
    let mut catalog = EntityCatalog::new();
    let sub = catalog.add_unit_type("submarine").unwrap();
    let germans = catalog.add_player("Germans", false).unwrap();
    let max = i32::MAX.to_string();
    let data = load(
        GameData::new(GameProperties::new(), catalog),
        [
            AttachmentDeclaration::unit(sub)
                .option("isSea", "true")
                .option("isSub", "true")
                .option("attack", max.as_str())
                .option("movement", max.as_str())
                .option("attackAA", max.as_str()),
            AttachmentDeclaration::tech(germans)
                .option("superSub", "true")
                .option("aARadar", "true"),
        ],
    )
    .unwrap();

    let ua = UnitAttachment::get(&data.attachments, sub).unwrap();
    let player = data.player_modifiers(germans);
    assert_eq!(ua.attack(&player, &RuleConfig::default()), 6);
    assert_eq!(ua.attack(&player, &RuleConfig::default().with_dice_sides(i32::MAX)), i32::MAX);
    assert_eq!(ua.attack_aa(&player), i32::MAX);
    assert_eq!(ua.movement(&player), i32::MAX);
}

// =============================================================================
// Dice rolls
// =============================================================================

/// Heavy bombers roll extra dice; on defense only under LHTR rules.
#[test]
fn test_heavy_bomber_rolls() {
    let s = setup(GameProperties::new().with(keys::HEAVY_BOMBER_DICE_ROLLS, 3i32));
    let player = s.data.player_modifiers(s.germans);
    let bomber = unit(&s, s.bomber);
    assert_eq!(bomber.attack_rolls(&player, &s.data.rules), 3);
    assert_eq!(bomber.defense_rolls(&player, &s.data.rules), 1);

    let human = s.data.player_modifiers(s.russians);
    assert_eq!(bomber.attack_rolls(&human, &s.data.rules), 1);

    let lhtr = RuleConfig::default().with_heavy_bombers(3, true);
    assert_eq!(bomber.defense_rolls(&player, &lhtr), 3);
}

/// Bombers never receive the jet bonus.
#[test]
fn test_bomber_ignores_jets() {
    let s = setup(GameProperties::new().with(keys::WW2V3_TECH_MODEL, true));
    let player = s.data.player_modifiers(s.germans);
    assert_eq!(unit(&s, s.bomber).attack(&player, &s.data.rules), 4);
}

// =============================================================================
// Summary export
// =============================================================================

/// The summary reflects the player's effective values.
#[test]
fn test_summary_uses_effective_values() {
    let s = setup(GameProperties::new().with(keys::WW2V3_TECH_MODEL, true));
    let fighter = unit(&s, s.fighter);
    let text = fighter.summary(
        &s.data.catalog,
        &PlayerModifiers::human().with_tech(TechAdvances {
            jet_power: true,
            ..TechAdvances::default()
        }),
        &s.data.rules,
        false,
        true,
    );
    assert_eq!(text, "fighter, Air unit, 6 Attack, 4 Defense, 4 Movement");
}

/// Line breaks separate the groups and nothing trails.
#[test]
fn test_summary_line_breaks() {
    let s = setup(GameProperties::new());
    let bomber = unit(&s, s.bomber);
    let text = bomber.summary(
        &s.data.catalog,
        &s.data.player_modifiers(s.russians),
        &s.data.rules,
        true,
        false,
    );
    assert_eq!(text.matches(LINE_BREAK).count(), 1);
    assert!(text.starts_with("Air unit, 4 Attack, 1 Defense, 6 Movement"));
    assert!(text.ends_with("can Perform Raids, 1-6 Raid Damage"));
}

/// The full dump names every field of the unit.
#[test]
fn test_describe_dump() {
    let s = setup(GameProperties::new());
    let text = unit(&s, s.bomber).describe(&s.data.catalog);
    assert!(text.starts_with("bomber with:  air:true  sea:false  movement:6  attack:4  defense:1"));
    assert!(text.contains("  strategicBomber:true"));
}
