//! Entity identification.
//!
//! Every rule entity registered in the catalog (unit type, territory,
//! resource) gets a dense numeric id in registration order. Attachments
//! hold these ids, never the entities themselves.
//!
//! ```
//! use wargame_rules::core::{UnitTypeId, TerritoryId};
//!
//! let infantry = UnitTypeId::new(0);
//! assert_eq!(infantry.index(), 0);
//! assert_eq!(format!("{}", TerritoryId::new(4)), "Territory(4)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id as an index into registration order.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a unit type ("infantry", "bomber").
    UnitTypeId,
    "UnitType"
);

entity_id!(
    /// Identifier of a map territory or sea zone.
    TerritoryId,
    "Territory"
);

entity_id!(
    /// Identifier of a resource ("PUs", "fuel").
    ResourceId,
    "Resource"
);

/// The kinds of entity a token may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    UnitType,
    Territory,
    Resource,
    Player,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityKind::UnitType => "unit type",
            EntityKind::Territory => "territory",
            EntityKind::Resource => "resource",
            EntityKind::Player => "player",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_basics() {
        let id = UnitTypeId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{}", id), "UnitType(7)");
        assert_eq!(format!("{}", ResourceId::new(1)), "Resource(1)");
    }

    #[test]
    fn test_ids_order_by_registration() {
        let mut ids = vec![TerritoryId::new(3), TerritoryId::new(1), TerritoryId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![TerritoryId::new(1), TerritoryId::new(2), TerritoryId::new(3)]);
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::UnitType.to_string(), "unit type");
        assert_eq!(EntityKind::Player.to_string(), "player");
    }
}
