//! Token parsing for attachment option values.
//!
//! Definition files hand every option value over as one string. Fields
//! interpret it as a boolean, an integer, a colon-delimited list, a
//! `count:name` quantity, or a fixed-shape record whose parts name other
//! entities.
//!
//! ```
//! use wargame_rules::codec::{parse_bool, parse_int, split};
//!
//! assert_eq!(parse_bool("isAir", "TRUE").unwrap(), true);
//! assert_eq!(parse_int("movement", "-2").unwrap(), -2);
//! assert_eq!(split("a::b").as_slice(), ["a", "", "b"]);
//! ```

use smallvec::SmallVec;

use crate::catalog::EntityCatalog;
use crate::core::{AttachmentError, EntityKind, PlayerId, Result, UnitTypeId};

/// Separator between the parts of a token.
pub const DELIMITER: char = ':';

/// Parts of a colon-delimited token. Most lists hold one to three names.
pub type TokenList = SmallVec<[String; 4]>;

/// Literals accepted in place of an entity name by some fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentinel {
    Any,
    All,
    None,
    True,
    False,
}

impl Sentinel {
    /// Match a token against the sentinel literals, ignoring case.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        [
            ("any", Sentinel::Any),
            ("all", Sentinel::All),
            ("none", Sentinel::None),
            ("true", Sentinel::True),
            ("false", Sentinel::False),
        ]
        .into_iter()
        .find(|(literal, _)| token.eq_ignore_ascii_case(literal))
        .map(|(_, sentinel)| sentinel)
    }
}

/// An entity reference, or one of the sentinel literals the field permits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityRef<T> {
    Entity(T),
    Sentinel(Sentinel),
}

/// Which counts a `count:name` field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityDomain {
    /// Counts of one or more.
    Positive,
    /// Counts of zero or more.
    NonNegative,
    /// Any count, including negative adjustments.
    Any,
}

impl QuantityDomain {
    fn check(self, field: &'static str, value: i32) -> Result<i32> {
        let (ok, reason) = match self {
            QuantityDomain::Positive => (value >= 1, "must be positive"),
            QuantityDomain::NonNegative => (value >= 0, "must not be negative"),
            QuantityDomain::Any => (true, ""),
        };
        if ok {
            Ok(value)
        } else {
            Err(AttachmentError::OutOfRange { field, value, reason })
        }
    }
}

/// Parse a boolean literal: `true`/`false`, or the older `yes`/`no`,
/// in any case.
pub fn parse_bool(field: &'static str, token: &str) -> Result<bool> {
    if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") || token.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(AttachmentError::Parse {
            field,
            token: token.to_string(),
            reason: "expected true or false".to_string(),
        })
    }
}

/// Parse a base-10 integer, which may be negative.
pub fn parse_int(field: &'static str, token: &str) -> Result<i32> {
    token.parse::<i32>().map_err(|e| AttachmentError::Parse {
        field,
        token: token.to_string(),
        reason: e.to_string(),
    })
}

/// Split a token on the delimiter. Empty segments are kept.
#[must_use]
pub fn split(token: &str) -> TokenList {
    token.split(DELIMITER).map(str::to_string).collect()
}

/// Fail with `MalformedRecord` unless `ok` holds.
pub fn expect_shape(field: &'static str, ok: bool, expected: &'static str, token: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(AttachmentError::MalformedRecord {
            field,
            expected,
            found: token.to_string(),
        })
    }
}

/// Parse a `count:name` token into its count and the raw name.
pub fn parse_quantity<'a>(
    field: &'static str,
    token: &'a str,
    domain: QuantityDomain,
) -> Result<(i32, &'a str)> {
    let parts: SmallVec<[&str; 2]> = token.split(DELIMITER).collect();
    expect_shape(field, parts.len() == 2, "count:name", token)?;
    let count = domain.check(field, parse_int(field, parts[0])?)?;
    Ok((count, parts[1]))
}

/// Parse a `count:unitType` token, resolving the unit type eagerly.
pub fn parse_unit_quantity(
    field: &'static str,
    token: &str,
    domain: QuantityDomain,
    catalog: &EntityCatalog,
) -> Result<(UnitTypeId, i32)> {
    let (count, name) = parse_quantity(field, token, domain)?;
    let unit_type = catalog.resolve_unit_type(field, name)?;
    Ok((unit_type, count))
}

/// Resolve a player name, or one of the `allowed` sentinels.
///
/// A real player of the same name wins over a sentinel literal.
pub fn parse_player_ref(
    field: &'static str,
    token: &str,
    allowed: &[Sentinel],
    catalog: &EntityCatalog,
) -> Result<EntityRef<PlayerId>> {
    if let Some(player) = catalog.player(token) {
        return Ok(EntityRef::Entity(player));
    }
    match Sentinel::parse(token) {
        Some(sentinel) if allowed.contains(&sentinel) => Ok(EntityRef::Sentinel(sentinel)),
        _ => Err(AttachmentError::UnresolvedReference {
            field,
            kind: EntityKind::Player,
            name: token.to_string(),
        }),
    }
}
