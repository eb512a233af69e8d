//! Storage of every attachment in a game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    Attachment, AttachmentKind, AttachmentOwner, TechAttachment, UnitAttachment,
    TECH_ATTACHMENT_NAME, UNIT_ATTACHMENT_NAME,
};
use crate::core::{AttachmentError, PlayerId, Result, UnitTypeId};

/// Identity of an attachment: its owner plus its name on that owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttachmentKey {
    pub owner: AttachmentOwner,
    pub name: String,
}

impl AttachmentKey {
    #[must_use]
    pub fn new(owner: AttachmentOwner, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }
}

/// All attachments of a game.
///
/// Attachments live apart from the entity catalog so that setters can
/// resolve names against the catalog while the attachment is borrowed
/// mutably. Iteration follows key order, which makes validation reports
/// and saved games deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRegistry {
    attachments: BTreeMap<AttachmentKey, AttachmentKind>,
}

impl AttachmentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attachment. An owner may not carry two attachments of
    /// the same name.
    pub fn insert(&mut self, attachment: impl Into<AttachmentKind>) -> Result<()> {
        let attachment = attachment.into();
        let key = AttachmentKey::new(attachment.owner(), attachment.name());
        if self.attachments.contains_key(&key) {
            return Err(AttachmentError::IllegalState(format!(
                "{} already has an attachment named {}",
                key.owner, key.name
            )));
        }
        self.attachments.insert(key, attachment);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, owner: AttachmentOwner, name: &str) -> Option<&AttachmentKind> {
        self.attachments.get(&AttachmentKey::new(owner, name))
    }

    pub fn get_mut(&mut self, owner: AttachmentOwner, name: &str) -> Option<&mut AttachmentKind> {
        self.attachments.get_mut(&AttachmentKey::new(owner, name))
    }

    /// The unit attachment of `unit_type` under its default name.
    ///
    /// A missing attachment is a broken precondition, reported as
    /// `IllegalState`.
    pub fn unit_attachment(&self, unit_type: UnitTypeId) -> Result<&UnitAttachment> {
        self.unit_attachment_named(unit_type, UNIT_ATTACHMENT_NAME)
    }

    /// The unit attachment of `unit_type` called `name`.
    pub fn unit_attachment_named(&self, unit_type: UnitTypeId, name: &str) -> Result<&UnitAttachment> {
        self.get(AttachmentOwner::UnitType(unit_type), name)
            .and_then(AttachmentKind::as_unit)
            .ok_or_else(|| {
                AttachmentError::IllegalState(format!(
                    "no unit type attachment for {unit_type} with name {name}"
                ))
            })
    }

    /// The technology attachment of `player`, if it declared one.
    #[must_use]
    pub fn tech_attachment(&self, player: PlayerId) -> Option<&TechAttachment> {
        self.get(AttachmentOwner::Player(player), TECH_ATTACHMENT_NAME)
            .and_then(AttachmentKind::as_tech)
    }

    /// Check whether `owner` carries at least one attachment.
    #[must_use]
    pub fn has_attachments(&self, owner: AttachmentOwner) -> bool {
        self.attachments.keys().any(|key| key.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttachmentKey, &AttachmentKind)> {
        self.attachments.iter()
    }

    /// All unit attachments, in key order.
    pub fn unit_attachments(&self) -> impl Iterator<Item = &UnitAttachment> {
        self.attachments.values().filter_map(AttachmentKind::as_unit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}
