//! Error types shared by the codec, attachments and persistence.
//!
//! Parse-time failures abort a single setter call. Validate-time failures
//! are collected into a [`ValidationError`] per attachment instead, see
//! [`crate::validation`].

use thiserror::Error;

use super::ids::EntityKind;
use crate::validation::ValidationError;

/// Errors raised while populating, looking up or persisting attachments.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// A token does not have the shape its field expects.
    #[error("{field}: cannot parse '{token}': {reason}")]
    Parse {
        field: &'static str,
        token: String,
        reason: String,
    },

    /// A composite record has the wrong number of parts.
    #[error("{field}: malformed record '{found}', expected {expected}")]
    MalformedRecord {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A token names an entity the catalog does not contain.
    #[error("{field}: no {kind} named '{name}'")]
    UnresolvedReference {
        field: &'static str,
        kind: EntityKind,
        name: String,
    },

    /// A parsed number is outside its field's domain.
    #[error("{field}: value {value} out of range, {reason}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        reason: &'static str,
    },

    /// A tag is not a member of its field's closed vocabulary.
    #[error("{field}: unrecognized option '{option}'")]
    UnrecognizedOption { field: &'static str, option: String },

    /// The loader named a property the attachment does not have.
    #[error("{attachment} has no property named '{property}'")]
    UnknownProperty { attachment: String, property: String },

    /// `clear` was requested for a property that replaces its value.
    #[error("property '{property}' replaces its value and has no clear operation")]
    NotClearable { property: String },

    /// A programming-contract violation, such as a missing attachment.
    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence error: {0}")]
    Persistence(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AttachmentError>;
