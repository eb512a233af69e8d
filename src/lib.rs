//! # wargame-rules
//!
//! Rule-attribute engine for turn-based strategy games.
//!
//! Game definitions hang named property bundles (attachments) on unit
//! types and players. This crate parses their option tokens, validates
//! the populated attachments against the whole game, and answers rules
//! queries over them.
//!
//! ## Design Principles
//!
//! 1. **Load Once, Read Many**: Attachments are populated in file order,
//!    validated in one pass once every entity is known, and read-only
//!    afterwards.
//!
//! 2. **Explicit Context**: Rule toggles and player modifiers are passed to
//!    every derivation. Nothing reads ambient global state.
//!
//! 3. **All Violations At Once**: Validation reports every broken rule of
//!    an attachment together instead of stopping at the first.
//!
//! ## Modules
//!
//! - `core`: Entity ids, players, rule configuration, properties, errors
//! - `catalog`: Entity catalog (name lookup, alliances)
//! - `codec`: Option token parsing and entity resolution
//! - `attachments`: Unit and tech attachments, registry
//! - `validation`: Validation context and aggregated violations
//! - `data`: The loaded game graph and its persistence
//! - `loader`: Applying attachment declarations to a game

pub mod core;
pub mod catalog;
pub mod codec;
pub mod attachments;
pub mod validation;
pub mod data;
pub mod loader;

// Re-export commonly used types
pub use crate::core::{
    AttachmentError, EntityKind, GameProperties, PlayerId, PlayerMap, PropertyValue,
    ResourceId, Result, RuleConfig, TerritoryId, UnitTypeId, GAME_UUID,
};

pub use crate::catalog::{EntityCatalog, Player, Resource, Territory, Unit, UnitType};

pub use crate::attachments::{
    Attachment, AttachmentKind, AttachmentOwner, AttachmentRegistry, PlayerModifiers,
    StackingLimit, StackingScope, TechAdvances, TechAttachment, UnitAttachment,
    TECH_ATTACHMENT_NAME, UNIT_ATTACHMENT_NAME,
};

pub use crate::validation::{ValidationContext, ValidationError, Violation};

pub use crate::data::GameData;

pub use crate::loader::{load, AttachmentDeclaration, DeclarationEntry, LoadError};
