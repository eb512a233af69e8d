//! Core types: entity ids, players, rule configuration, game properties
//! and errors.
//!
//! These carry no game-specific rules; the attachment layer builds on them.

pub mod ids;
pub mod player;
pub mod properties;
pub mod config;
pub mod error;

pub use ids::{EntityKind, ResourceId, TerritoryId, UnitTypeId};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use properties::{GameProperties, PropertyValue, GAME_UUID};
pub use config::RuleConfig;
pub use error::{AttachmentError, Result};
