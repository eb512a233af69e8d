//! Stacking limit integration tests.
//!
//! Remaining capacity is asked of the loaded game, which counts the
//! units already placed in the territory.

use wargame_rules::catalog::EntityCatalog;
use wargame_rules::core::config::keys;
use wargame_rules::core::{GameProperties, PlayerId, TerritoryId, UnitTypeId};
use wargame_rules::data::GameData;
use wargame_rules::loader::{load, AttachmentDeclaration};

struct Board {
    data: GameData,
    aa_gun: UnitTypeId,
    fortress: UnitTypeId,
    infantry: UnitTypeId,
    berlin: TerritoryId,
    germans: PlayerId,
    italians: PlayerId,
    russians: PlayerId,
}

fn board(properties: GameProperties, fortress_limit: &str) -> Board {
    let mut catalog = EntityCatalog::new();
    let aa_gun = catalog.add_unit_type("aaGun").unwrap();
    let fortress = catalog.add_unit_type("fortress").unwrap();
    let infantry = catalog.add_unit_type("infantry").unwrap();
    let berlin = catalog.add_territory("Berlin", false).unwrap();
    let germans = catalog.add_player("Germans", false).unwrap();
    let italians = catalog.add_player("Italians", false).unwrap();
    let russians = catalog.add_player("Russians", false).unwrap();
    catalog.ally(germans, italians);

    let data = load(
        GameData::new(properties, catalog),
        [
            AttachmentDeclaration::unit(aa_gun).option("isAA", "true"),
            AttachmentDeclaration::unit(fortress).option("stackingLimit", fortress_limit),
            AttachmentDeclaration::unit(infantry)
                .option("attack", "1")
                .option("defense", "2"),
        ],
    )
    .unwrap();

    Board {
        data,
        aa_gun,
        fortress,
        infantry,
        berlin,
        germans,
        italians,
        russians,
    }
}

// =============================================================================
// Anti-air collapse
// =============================================================================

/// Classic rules allow one anti-air gun per territory.
#[test]
fn test_single_aa_gun_under_classic_rules() {
    let mut b = board(GameProperties::new(), "1:owned");
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.aa_gun, b.berlin, b.germans)
            .unwrap(),
        1
    );

    b.data.place_units(b.berlin, b.aa_gun, b.germans, 1).unwrap();
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.aa_gun, b.berlin, b.germans)
            .unwrap(),
        0
    );
    // the limit is shared with allies
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.aa_gun, b.berlin, b.italians)
            .unwrap(),
        0
    );
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.aa_gun, b.berlin, b.russians)
            .unwrap(),
        1
    );
}

/// Rule sets permitting several anti-air guns remove the limit.
#[test]
fn test_multiple_aa_rules() {
    for key in [keys::WW2V2, keys::WW2V3, keys::MULTIPLE_AA_PER_TERRITORY] {
        let mut b = board(GameProperties::new().with(key, true), "1:owned");
        b.data.place_units(b.berlin, b.aa_gun, b.germans, 4).unwrap();
        assert_eq!(
            b.data
                .remaining_stacking_capacity(b.aa_gun, b.berlin, b.germans)
                .unwrap(),
            i32::MAX,
            "{key}"
        );
    }
}

// =============================================================================
// Scopes
// =============================================================================

/// `owned` counts only the placing player's units.
#[test]
fn test_owned_scope() {
    let mut b = board(GameProperties::new(), "2:owned");
    b.data.place_units(b.berlin, b.fortress, b.germans, 1).unwrap();
    b.data.place_units(b.berlin, b.fortress, b.italians, 3).unwrap();
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        1
    );
}

/// `allied` counts allies, not enemies.
#[test]
fn test_allied_scope() {
    let mut b = board(GameProperties::new(), "3:allied");
    b.data.place_units(b.berlin, b.fortress, b.germans, 1).unwrap();
    b.data.place_units(b.berlin, b.fortress, b.italians, 1).unwrap();
    b.data.place_units(b.berlin, b.fortress, b.russians, 5).unwrap();
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        1
    );
}

/// `total` counts everyone and never goes negative.
#[test]
fn test_total_scope() {
    let mut b = board(GameProperties::new(), "2:total");
    b.data.place_units(b.berlin, b.fortress, b.russians, 5).unwrap();
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        0
    );
}

/// Other unit types in the territory do not count.
#[test]
fn test_only_same_type_counts() {
    let mut b = board(GameProperties::new(), "2:total");
    b.data.place_units(b.berlin, b.infantry, b.germans, 10).unwrap();
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        2
    );
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.infantry, b.berlin, b.germans)
            .unwrap(),
        i32::MAX
    );
}

/// Cloned games share nothing observable.
#[test]
fn test_clone_is_independent() {
    let mut b = board(GameProperties::new(), "2:total");
    let snapshot = b.data.clone();
    b.data.place_units(b.berlin, b.fortress, b.germans, 2).unwrap();
    assert_eq!(
        snapshot
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        2
    );
    assert_eq!(
        b.data
            .remaining_stacking_capacity(b.fortress, b.berlin, b.germans)
            .unwrap(),
        0
    );
}
