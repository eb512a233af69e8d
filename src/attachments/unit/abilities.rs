//! Abilities a unit receives while grouped with another unit type.

use std::collections::BTreeMap;

use super::UnitAttachment;
use crate::attachments::registry::AttachmentRegistry;
use crate::catalog::{EntityCatalog, Unit};
use crate::codec::{expect_shape, DELIMITER};
use crate::core::{Result, UnitTypeId};

const FIELD: &str = "receivesAbilityWhenWith";

fn split_pairing(pairing: &str) -> Result<(&str, &str)> {
    let parts = pairing.split_once(DELIMITER);
    expect_shape(
        FIELD,
        parts.is_some_and(|(_, unit)| !unit.contains(DELIMITER)),
        "ability:unitType",
        pairing,
    )?;
    Ok(parts.unwrap_or_default())
}

/// Distinct types among `units` that can receive some ability, in order
/// of first appearance.
fn receiving_types(units: &[Unit], registry: &AttachmentRegistry) -> Result<Vec<UnitTypeId>> {
    let mut types = Vec::new();
    for unit in units {
        if types.contains(&unit.unit_type) {
            continue;
        }
        if !registry
            .unit_attachment(unit.unit_type)?
            .receives_ability_when_with
            .is_empty()
        {
            types.push(unit.unit_type);
        }
    }
    Ok(types)
}

impl UnitAttachment {
    /// Pairings available within a group of units.
    ///
    /// Maps each `(ability, granting unit type)` declared by a receiving
    /// unit in the group to the number of granting units present. With a
    /// `filter`, only that ability is considered.
    pub fn receives_ability_when_with_map(
        units: &[Unit],
        filter: Option<&str>,
        catalog: &EntityCatalog,
        registry: &AttachmentRegistry,
    ) -> Result<BTreeMap<(String, String), usize>> {
        let mut map = BTreeMap::new();
        for unit_type in receiving_types(units, registry)? {
            let ua = registry.unit_attachment(unit_type)?;
            for pairing in &ua.receives_ability_when_with {
                let (ability, giver) = split_pairing(pairing)?;
                if filter.is_some_and(|f| f != ability) {
                    continue;
                }
                let giver_type = catalog.resolve_unit_type(FIELD, giver)?;
                let givers = units.iter().filter(|u| u.unit_type == giver_type).count();
                map.insert((ability.to_string(), giver.to_string()), givers);
            }
        }
        Ok(map)
    }

    /// The units of a group that actually receive an ability.
    ///
    /// Each granting unit empowers one receiving unit; receivers are taken
    /// in group order and never counted twice.
    pub fn units_which_receive_ability_when_with(
        units: &[Unit],
        filter: Option<&str>,
        catalog: &EntityCatalog,
        registry: &AttachmentRegistry,
    ) -> Result<Vec<Unit>> {
        let pairings = Self::receives_ability_when_with_map(units, filter, catalog, registry)?;
        let mut taken = vec![false; units.len()];
        for ((ability, giver), givers) in &pairings {
            let pairing = format!("{ability}{DELIMITER}{giver}");
            let mut remaining = *givers;
            for (index, unit) in units.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                if taken[index] {
                    continue;
                }
                let receives = registry
                    .unit_attachment(unit.unit_type)?
                    .receives_ability_when_with
                    .contains(&pairing);
                if receives {
                    taken[index] = true;
                    remaining -= 1;
                }
            }
        }
        Ok(units
            .iter()
            .zip(taken)
            .filter_map(|(unit, taken)| taken.then_some(*unit))
            .collect())
    }
}
