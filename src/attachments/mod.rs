//! Attachments: named, typed property bundles hung on catalog entities.
//!
//! An attachment is identified by its owner and its name. The loader
//! creates it empty, feeds it `(property, value)` pairs in file order,
//! optionally clears collection-valued properties, and finally validates
//! it once the whole catalog is known. After that it is read-only.
//!
//! ## Key Types
//!
//! - `Attachment`: the operations every attachment kind supports
//! - `AttachmentKind`: closed set of attachment kinds
//! - `AttachmentRegistry`: all attachments of a game, keyed by owner and name
//! - `UnitAttachment`: the rules of a unit type
//! - `TechAttachment`: the technology advances of a player

pub mod registry;
pub mod tech;
pub mod unit;
pub mod values;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::EntityCatalog;
use crate::core::{PlayerId, Result, UnitTypeId};
use crate::validation::{ValidationContext, ValidationError};

pub use registry::{AttachmentKey, AttachmentRegistry};
pub use tech::{PlayerModifiers, TechAdvances, TechAttachment};
pub use unit::{UnitAttachment, ADD_DISCIPLINE_PROPERTIES, LINE_BREAK};
pub use values::{
    CaptureConversion, CaptureDirection, CaptureParty, CombatDamageRule, IntegerMap,
    StackingLimit, StackingScope,
};

/// Default name of the attachment holding a unit type's rules.
pub const UNIT_ATTACHMENT_NAME: &str = "unitAttachment";

/// Default name of the attachment holding a player's technology.
pub const TECH_ATTACHMENT_NAME: &str = "techAttachment";

/// The entity an attachment hangs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttachmentOwner {
    UnitType(UnitTypeId),
    Player(PlayerId),
}

impl AttachmentOwner {
    /// The owner's catalog name, or its id when the catalog does not know it.
    #[must_use]
    pub fn display_name(&self, catalog: &EntityCatalog) -> String {
        match *self {
            AttachmentOwner::UnitType(id) => catalog
                .unit_type_name(id)
                .map_or_else(|| id.to_string(), str::to_string),
            AttachmentOwner::Player(id) => catalog
                .player_name(id)
                .map_or_else(|| id.to_string(), str::to_string),
        }
    }
}

impl fmt::Display for AttachmentOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentOwner::UnitType(id) => write!(f, "{id}"),
            AttachmentOwner::Player(id) => write!(f, "{id}"),
        }
    }
}

/// Operations shared by every attachment kind.
pub trait Attachment {
    /// Name of this attachment on its owner.
    fn name(&self) -> &str;

    fn owner(&self) -> AttachmentOwner;

    /// Apply one `(property, value)` option.
    ///
    /// Set-discipline properties replace their value; add-discipline
    /// properties append one record. Names resolved eagerly are looked up
    /// in `catalog`.
    fn set_property(&mut self, property: &str, value: &str, catalog: &EntityCatalog) -> Result<()>;

    /// Empty an add-discipline property.
    ///
    /// Fails with `NotClearable` for set-discipline properties and
    /// `UnknownProperty` for names the attachment does not have.
    fn clear_property(&mut self, property: &str) -> Result<()>;

    /// Check every rule, reporting all violations together.
    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError>;
}

/// Every attachment kind the game knows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentKind {
    Unit(UnitAttachment),
    Tech(TechAttachment),
}

impl AttachmentKind {
    #[must_use]
    pub fn as_unit(&self) -> Option<&UnitAttachment> {
        match self {
            AttachmentKind::Unit(ua) => Some(ua),
            AttachmentKind::Tech(_) => None,
        }
    }

    #[must_use]
    pub fn as_tech(&self) -> Option<&TechAttachment> {
        match self {
            AttachmentKind::Tech(ta) => Some(ta),
            AttachmentKind::Unit(_) => None,
        }
    }

    fn inner(&self) -> &dyn Attachment {
        match self {
            AttachmentKind::Unit(ua) => ua,
            AttachmentKind::Tech(ta) => ta,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Attachment {
        match self {
            AttachmentKind::Unit(ua) => ua,
            AttachmentKind::Tech(ta) => ta,
        }
    }
}

impl From<UnitAttachment> for AttachmentKind {
    fn from(ua: UnitAttachment) -> Self {
        AttachmentKind::Unit(ua)
    }
}

impl From<TechAttachment> for AttachmentKind {
    fn from(ta: TechAttachment) -> Self {
        AttachmentKind::Tech(ta)
    }
}

impl Attachment for AttachmentKind {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn owner(&self) -> AttachmentOwner {
        self.inner().owner()
    }

    fn set_property(&mut self, property: &str, value: &str, catalog: &EntityCatalog) -> Result<()> {
        self.inner_mut().set_property(property, value, catalog)
    }

    fn clear_property(&mut self, property: &str) -> Result<()> {
        self.inner_mut().clear_property(property)
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        self.inner().validate(ctx)
    }
}
