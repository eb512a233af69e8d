//! Composite values stored by attachment fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Entity → quantity map with unique keys.
///
/// Keys are kept sorted so that rendering is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerMap<K: Ord> {
    values: BTreeMap<K, i32>,
}

impl<K: Ord> Default for IntegerMap<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> IntegerMap<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for `key`, replacing any previous one.
    pub fn put(&mut self, key: K, value: i32) {
        self.values.insert(key, value);
    }

    /// Quantity for `key`, zero when absent.
    #[must_use]
    pub fn get(&self, key: K) -> i32 {
        self.values.get(&key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.values.contains_key(&key)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_values(&self) -> i32 {
        self.values.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The smallest key, used when the map holds a single entry.
    #[must_use]
    pub fn first_key(&self) -> Option<K> {
        self.values.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, i32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

/// Who a stacking limit counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackingScope {
    /// Units owned by the querying player.
    Owned,
    /// Units owned by the querying player or its allies.
    Allied,
    /// Every unit of the type, whoever owns it.
    Total,
}

impl StackingScope {
    pub const TAGS: &'static [&'static str] = &["owned", "allied", "total"];

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "owned" => Some(StackingScope::Owned),
            "allied" => Some(StackingScope::Allied),
            "total" => Some(StackingScope::Total),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StackingScope::Owned => "owned",
            StackingScope::Allied => "allied",
            StackingScope::Total => "total",
        }
    }
}

/// Maximum number of a unit type allowed together in one territory.
///
/// The scope tag is kept as written and checked during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackingLimit {
    pub max: i32,
    pub scope: String,
}

impl StackingLimit {
    /// Maximum meaning "no limit".
    pub const UNBOUNDED: i32 = i32::MAX;

    #[must_use]
    pub fn new(max: i32, scope: impl Into<String>) -> Self {
        Self {
            max,
            scope: scope.into(),
        }
    }

    /// The parsed scope. Unrecognized tags count every unit.
    #[must_use]
    pub fn scope(&self) -> StackingScope {
        StackingScope::from_tag(&self.scope).unwrap_or(StackingScope::Total)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max == Self::UNBOUNDED
    }
}

impl fmt::Display for StackingLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.max, self.scope)
    }
}

/// Whether a unit is destroyed when captured *by* or *from* a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureDirection {
    By,
    From,
}

impl CaptureDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CaptureDirection::By => "BY",
            CaptureDirection::From => "FROM",
        }
    }
}

/// A side of a capture: a specific player or anyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureParty {
    Any,
    Player(PlayerId),
}

/// "When captured from X by Y, this unit becomes these units."
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConversion {
    pub from: CaptureParty,
    pub to: CaptureParty,
    /// Carry damage and similar per-unit state over to the new units.
    pub keep_attributes: bool,
    pub units: IntegerMap<crate::core::UnitTypeId>,
}

impl CaptureConversion {
    /// True when this record applies to a capture from `from` by `to`.
    #[must_use]
    pub fn applies(&self, from: PlayerId, to: PlayerId) -> bool {
        let matches = |party: CaptureParty, player: PlayerId| match party {
            CaptureParty::Any => true,
            CaptureParty::Player(p) => p == player,
        };
        matches(self.from, from) && matches(self.to, to)
    }
}

/// Effect applied while a unit's damage lies within `[from, to]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatDamageRule {
    pub from: i32,
    pub to: i32,
    pub effect: String,
    pub parameter: Option<String>,
}

impl CombatDamageRule {
    #[must_use]
    pub fn covers(&self, damage: i32) -> bool {
        (self.from..=self.to).contains(&damage)
    }
}
