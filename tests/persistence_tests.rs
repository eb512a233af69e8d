//! Save/load integration tests.

use wargame_rules::attachments::{Attachment, UnitAttachment};
use wargame_rules::catalog::EntityCatalog;
use wargame_rules::core::config::keys;
use wargame_rules::core::{AttachmentError, GameProperties};
use wargame_rules::data::persistence::{from_bytes, load_game, save_game, to_bytes};
use wargame_rules::data::GameData;
use wargame_rules::loader::{load, AttachmentDeclaration};

fn loaded_game() -> GameData {
    let mut catalog = EntityCatalog::new();
    let infantry = catalog.add_unit_type("infantry").unwrap();
    let transport = catalog.add_unit_type("transport").unwrap();
    let berlin = catalog.add_territory("Berlin", false).unwrap();
    catalog.add_resource("PUs").unwrap();
    let germans = catalog.add_player("Germans", false).unwrap();
    let russians = catalog.add_player("Russians", true).unwrap();

    let mut data = load(
        GameData::new(GameProperties::new().with(keys::WW2V3, true), catalog),
        [
            AttachmentDeclaration::unit(infantry)
                .option("attack", "1")
                .option("defense", "2")
                .option("transportCost", "2")
                .option("canInvadeOnlyFrom", "transport")
                .option("fuelCost", "1:PUs")
                .option("whenCapturedChangesInto", "any:Russians:false:infantry:2")
                .option("stackingLimit", "6:owned"),
            AttachmentDeclaration::unit(transport)
                .option("isSea", "true")
                .option("transportCapacity", "5")
                .option("whenCombatDamaged", "1:1:unitsMayNotLandOnCarrier"),
            AttachmentDeclaration::tech(russians).option("superSub", "true"),
        ],
    )
    .unwrap();
    data.place_units(berlin, infantry, germans, 3).unwrap();
    data
}

/// A saved game loads back identical, identity token included.
#[test]
fn test_save_load_round_trip() {
    let data = loaded_game();
    let mut buffer = Vec::new();
    save_game(&data, &mut buffer).unwrap();

    let restored = load_game(buffer.as_slice()).unwrap();
    assert_eq!(restored.game_uuid(), data.game_uuid());
    assert!(restored.game_uuid().is_some());
    assert_eq!(restored.attachments, data.attachments);
    assert_eq!(restored.rules, data.rules);
    assert_eq!(restored, data);
}

/// Restored attachments answer queries the same way.
#[test]
fn test_restored_game_answers_queries() {
    let data = loaded_game();
    let restored = from_bytes(&to_bytes(&data).unwrap()).unwrap();

    let infantry = restored.catalog.unit_type("infantry").unwrap();
    let berlin = restored.catalog.territory("Berlin").unwrap();
    let germans = restored.catalog.player("Germans").unwrap();
    let russians = restored.catalog.player("Russians").unwrap();

    let ua = UnitAttachment::get(&restored.attachments, infantry).unwrap();
    assert_eq!(ua.name(), "unitAttachment");
    assert!(ua.can_invade_from("transport", &restored.catalog).unwrap());
    assert_eq!(
        restored
            .remaining_stacking_capacity(infantry, berlin, germans)
            .unwrap(),
        3
    );
    assert!(restored.player_modifiers(russians).tech.super_sub);
    assert!(restored.validate_all().is_ok());
}

/// Garbage input fails cleanly.
#[test]
fn test_corrupt_save() {
    let result = load_game(&[0xFFu8, 0xFF, 0xFF][..]);
    assert!(matches!(
        result,
        Err(AttachmentError::Persistence(_)) | Err(AttachmentError::Io(_))
    ));
}
