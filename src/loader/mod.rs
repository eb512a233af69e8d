//! Populate a game's attachments from parsed declarations.
//!
//! Each declaration names an owner, an attachment name, and its entries
//! in file order: options to apply and collection properties to reset.
//! Attachments are populated one declaration at a time; validation runs
//! once at the end so that options may name entities declared later.
//! Any failure aborts the load and no partial game is returned.

use thiserror::Error;

use crate::attachments::{
    Attachment, AttachmentKind, AttachmentOwner, TechAttachment, UnitAttachment,
    TECH_ATTACHMENT_NAME, UNIT_ATTACHMENT_NAME,
};
use crate::core::{AttachmentError, EntityKind, PlayerId, UnitTypeId};
use crate::data::GameData;
use crate::validation::ValidationError;

/// Errors that abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or more attachments failed validation.
    #[error("{} attachment(s) failed validation", .0.len())]
    Invalid(Vec<ValidationError>),

    /// A declaration could not be applied.
    #[error("{attachment} on {owner}: {source}")]
    Declaration {
        owner: String,
        attachment: String,
        source: AttachmentError,
    },
}

impl LoadError {
    /// The validation failures, when that is why the load stopped.
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            LoadError::Invalid(errors) => errors,
            LoadError::Declaration { .. } => &[],
        }
    }
}

/// One line of an attachment declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationEntry {
    /// Set, or for collection properties append, a value.
    Set { property: String, value: String },
    /// Empty a collection property.
    Clear { property: String },
}

/// One attachment as written in a game definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentDeclaration {
    pub owner: AttachmentOwner,
    pub name: String,
    /// Entries in file order.
    pub entries: Vec<DeclarationEntry>,
}

impl AttachmentDeclaration {
    #[must_use]
    pub fn new(owner: AttachmentOwner, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// The default unit attachment of `unit_type`.
    #[must_use]
    pub fn unit(unit_type: UnitTypeId) -> Self {
        Self::new(AttachmentOwner::UnitType(unit_type), UNIT_ATTACHMENT_NAME)
    }

    /// The tech attachment of `player`.
    #[must_use]
    pub fn tech(player: PlayerId) -> Self {
        Self::new(AttachmentOwner::Player(player), TECH_ATTACHMENT_NAME)
    }

    #[must_use]
    pub fn option(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(DeclarationEntry::Set {
            property: property.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn clear(mut self, property: impl Into<String>) -> Self {
        self.entries.push(DeclarationEntry::Clear {
            property: property.into(),
        });
        self
    }
}

fn create(data: &GameData, owner: AttachmentOwner, name: &str) -> Result<AttachmentKind, AttachmentError> {
    match owner {
        AttachmentOwner::UnitType(unit_type) => {
            if data.catalog.unit_type_name(unit_type).is_none() {
                return Err(AttachmentError::UnresolvedReference {
                    field: "attachTo",
                    kind: EntityKind::UnitType,
                    name: unit_type.to_string(),
                });
            }
            Ok(UnitAttachment::new(unit_type, name).into())
        }
        AttachmentOwner::Player(player) => {
            if data.catalog.player_by_id(player).is_none() {
                return Err(AttachmentError::UnresolvedReference {
                    field: "attachTo",
                    kind: EntityKind::Player,
                    name: player.to_string(),
                });
            }
            if name != TECH_ATTACHMENT_NAME {
                return Err(AttachmentError::IllegalState(format!(
                    "players carry no attachment named {name}"
                )));
            }
            Ok(TechAttachment::new(player).into())
        }
    }
}

fn apply(data: &GameData, declaration: &AttachmentDeclaration) -> Result<AttachmentKind, AttachmentError> {
    let mut attachment = create(data, declaration.owner, &declaration.name)?;
    for entry in &declaration.entries {
        match entry {
            DeclarationEntry::Set { property, value } => {
                attachment.set_property(property, value, &data.catalog)?;
            }
            DeclarationEntry::Clear { property } => attachment.clear_property(property)?,
        }
    }
    Ok(attachment)
}

/// Apply `declarations` to `data`, then validate every attachment.
///
/// `data` carries the catalog and rules the declarations are read against.
pub fn load(
    mut data: GameData,
    declarations: impl IntoIterator<Item = AttachmentDeclaration>,
) -> Result<GameData, LoadError> {
    for declaration in declarations {
        let wrap = |source| LoadError::Declaration {
            owner: declaration.owner.display_name(&data.catalog),
            attachment: declaration.name.clone(),
            source,
        };
        let attachment = apply(&data, &declaration).map_err(wrap)?;
        data.attachments.insert(attachment).map_err(wrap)?;
        tracing::debug!(
            "Applied {} on {} ({} entries)",
            declaration.name,
            declaration.owner.display_name(&data.catalog),
            declaration.entries.len()
        );
    }

    data.validate_all().map_err(LoadError::Invalid)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityCatalog;
    use crate::core::GameProperties;

    fn empty_game() -> (GameData, UnitTypeId, PlayerId) {
        let mut catalog = EntityCatalog::new();
        let infantry = catalog.add_unit_type("infantry").unwrap();
        let germans = catalog.add_player("Germans", false).unwrap();
        (GameData::new(GameProperties::new(), catalog), infantry, germans)
    }

    #[test]
    fn test_load_applies_options_in_order() {
        let (data, infantry, germans) = empty_game();
        let data = load(
            data,
            [
                AttachmentDeclaration::unit(infantry)
                    .option("attack", "1")
                    .option("attack", "2"),
                AttachmentDeclaration::tech(germans).option("rocket", "true"),
            ],
        )
        .unwrap();

        let ua = UnitAttachment::get(&data.attachments, infantry).unwrap();
        assert_eq!(ua.base_attack(), 2);
        assert!(data.player_modifiers(germans).tech.rocket);
    }

    #[test]
    fn test_clear_applies_in_file_order() {
        let (data, infantry, _) = empty_game();
        let data = load(
            data,
            [AttachmentDeclaration::unit(infantry)
                .option("special", "canOnlyPlaceInOriginalTerritories")
                .clear("special")],
        )
        .unwrap();
        let ua = UnitAttachment::get(&data.attachments, infantry).unwrap();
        assert!(ua.special().is_empty());
    }

    #[test]
    fn test_clear_of_set_property_aborts() {
        let (data, infantry, _) = empty_game();
        let err = load(
            data,
            [AttachmentDeclaration::unit(infantry)
                .option("attack", "1")
                .clear("attack")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Declaration {
                source: AttachmentError::NotClearable { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_bad_option_names_declaration() {
        let (data, infantry, _) = empty_game();
        let err = load(
            data,
            [AttachmentDeclaration::unit(infantry).option("attack", "strong")],
        )
        .unwrap_err();
        match err {
            LoadError::Declaration {
                owner,
                attachment,
                source: AttachmentError::Parse { field, .. },
            } => {
                assert_eq!(owner, "infantry");
                assert_eq!(attachment, UNIT_ATTACHMENT_NAME);
                assert_eq!(field, "attack");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let (data, infantry, _) = empty_game();
        let err = load(
            data,
            [
                AttachmentDeclaration::unit(infantry),
                AttachmentDeclaration::unit(infantry),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Declaration {
                source: AttachmentError::IllegalState(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_owner_rejected() {
        let (data, _, _) = empty_game();
        assert!(load(data, [AttachmentDeclaration::unit(UnitTypeId::new(5))]).is_err());
    }
}
