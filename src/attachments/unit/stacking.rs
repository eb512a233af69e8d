//! Stacking limits: how many more units of a type fit in a territory.

use super::UnitAttachment;
use crate::attachments::values::{StackingLimit, StackingScope};
use crate::catalog::{EntityCatalog, Unit};
use crate::core::{PlayerId, RuleConfig};

impl UnitAttachment {
    /// The maximum that applies under `rules`, `None` when unlimited.
    ///
    /// Classic rules allow a single anti-air unit per territory, so an
    /// unbounded limit on any anti-air unit collapses to one unless a rule
    /// set permitting several is active.
    #[must_use]
    pub fn effective_stacking_max(&self, rules: &RuleConfig) -> Option<i32> {
        let limit = self.stacking_limit.as_ref()?;
        if limit.is_unbounded() && self.is_any_aa() && !rules.allows_multiple_aa() {
            Some(1)
        } else {
            Some(limit.max)
        }
    }

    /// Units of this type `owner` may still add to a territory currently
    /// holding `occupants`. Unlimited types report `i32::MAX`.
    pub fn remaining_stacking_capacity<'a>(
        &self,
        owner: PlayerId,
        rules: &RuleConfig,
        catalog: &EntityCatalog,
        occupants: impl IntoIterator<Item = &'a Unit>,
    ) -> i32 {
        let (Some(limit), Some(max)) = (&self.stacking_limit, self.effective_stacking_max(rules))
        else {
            return StackingLimit::UNBOUNDED;
        };
        if max == StackingLimit::UNBOUNDED {
            return StackingLimit::UNBOUNDED;
        }
        let scope = limit.scope();
        let present = occupants
            .into_iter()
            .filter(|unit| unit.unit_type == self.owner)
            .filter(|unit| match scope {
                StackingScope::Owned => unit.owner == owner,
                StackingScope::Allied => catalog.is_unit_allied(unit, owner),
                StackingScope::Total => true,
            })
            .count();
        let present = i32::try_from(present).unwrap_or(i32::MAX);
        max.saturating_sub(present).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::Attachment;
    use crate::core::UnitTypeId;

    struct Fixture {
        catalog: EntityCatalog,
        aa_gun: UnitTypeId,
        tank: UnitTypeId,
        germans: PlayerId,
        italians: PlayerId,
        russians: PlayerId,
    }

    fn fixture() -> Fixture {
        let mut catalog = EntityCatalog::new();
        let aa_gun = catalog.add_unit_type("aaGun").unwrap();
        let tank = catalog.add_unit_type("armour").unwrap();
        let germans = catalog.add_player("Germans", false).unwrap();
        let italians = catalog.add_player("Italians", false).unwrap();
        let russians = catalog.add_player("Russians", false).unwrap();
        catalog.ally(germans, italians);
        Fixture {
            catalog,
            aa_gun,
            tank,
            germans,
            italians,
            russians,
        }
    }

    #[test]
    fn test_unset_limit_is_unbounded() {
        let f = fixture();
        let ua = UnitAttachment::new(f.tank, "unitAttachment");
        let occupants = vec![Unit::new(f.tank, f.germans); 50];
        assert_eq!(
            ua.remaining_stacking_capacity(f.germans, &RuleConfig::default(), &f.catalog, &occupants),
            i32::MAX
        );
    }

    #[test]
    fn test_classic_aa_collapses_to_one() {
        let f = fixture();
        let mut ua = UnitAttachment::new(f.aa_gun, "unitAttachment");
        ua.set_property("isAA", "true", &f.catalog).unwrap();
        let classic = RuleConfig::default();

        assert_eq!(ua.effective_stacking_max(&classic), Some(1));
        assert_eq!(
            ua.remaining_stacking_capacity(f.germans, &classic, &f.catalog, &Vec::<Unit>::new()),
            1
        );
        let one_gun = [Unit::new(f.aa_gun, f.germans)];
        assert_eq!(
            ua.remaining_stacking_capacity(f.germans, &classic, &f.catalog, &one_gun),
            0
        );

        for rules in [
            RuleConfig::default().with_ww2v2(),
            RuleConfig::default().with_ww2v3(),
            RuleConfig::default().with_multiple_aa_per_territory(),
        ] {
            assert_eq!(ua.effective_stacking_max(&rules), Some(i32::MAX));
            assert_eq!(
                ua.remaining_stacking_capacity(f.germans, &rules, &f.catalog, &one_gun),
                i32::MAX
            );
        }
    }

    #[test]
    fn test_scopes_filter_occupants() {
        let f = fixture();
        let occupants = [
            Unit::new(f.tank, f.germans),
            Unit::new(f.tank, f.italians),
            Unit::new(f.tank, f.russians),
            Unit::new(f.aa_gun, f.germans),
        ];
        let rules = RuleConfig::default();
        let remaining = |scope: &str| {
            let mut ua = UnitAttachment::new(f.tank, "unitAttachment");
            ua.set_property("stackingLimit", &format!("4:{scope}"), &f.catalog)
                .unwrap();
            ua.remaining_stacking_capacity(f.germans, &rules, &f.catalog, &occupants)
        };
        assert_eq!(remaining("owned"), 3);
        assert_eq!(remaining("allied"), 2);
        assert_eq!(remaining("total"), 1);
    }

    #[test]
    fn test_never_negative() {
        let f = fixture();
        let mut ua = UnitAttachment::new(f.tank, "unitAttachment");
        ua.set_property("stackingLimit", "1:total", &f.catalog).unwrap();
        let occupants = vec![Unit::new(f.tank, f.russians); 3];
        assert_eq!(
            ua.remaining_stacking_capacity(f.germans, &RuleConfig::default(), &f.catalog, &occupants),
            0
        );
    }
}
