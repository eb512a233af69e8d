//! Load-time validation.
//!
//! Validation runs once, after the whole catalog has been populated, so
//! that forward references inside one definition resolve. Each attachment
//! checks every rule it knows and reports all violations together in a
//! single [`ValidationError`] rather than stopping at the first.

use std::fmt;

use crate::attachments::AttachmentRegistry;
use crate::catalog::EntityCatalog;
use crate::core::{EntityKind, RuleConfig};

/// Everything a validator may consult: the frozen catalog, the other
/// attachments (to check that referenced entities declared theirs), and
/// the rule toggles.
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext<'a> {
    pub catalog: &'a EntityCatalog,
    pub attachments: &'a AttachmentRegistry,
    pub rules: &'a RuleConfig,
}

impl<'a> ValidationContext<'a> {
    #[must_use]
    pub fn new(
        catalog: &'a EntityCatalog,
        attachments: &'a AttachmentRegistry,
        rules: &'a RuleConfig,
    ) -> Self {
        Self {
            catalog,
            attachments,
            rules,
        }
    }
}

/// One violated rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A field that makes no sense for the unit's movement class.
    CapabilityConflict {
        capability: &'static str,
        field: &'static str,
    },

    /// Two fields that may not both be set.
    ExclusivePair {
        first: &'static str,
        second: &'static str,
    },

    /// A number outside its closed interval.
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Several fields that contradict each other.
    Incoherent {
        fields: &'static [&'static str],
        rule: &'static str,
    },

    /// A name that does not resolve in the catalog.
    UnresolvedReference {
        field: &'static str,
        kind: EntityKind,
        name: String,
    },

    /// A referenced unit type that declares no attachment of its own.
    MissingAttachment { field: &'static str, name: String },

    /// A tag outside its field's closed vocabulary.
    UnrecognizedOption { field: &'static str, option: String },

    /// A stored record whose shape is checked at validation time.
    MalformedRecord {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

impl Violation {
    /// Check whether this violation concerns `field`.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        match self {
            Violation::CapabilityConflict { capability, field: f } => {
                *capability == field || *f == field
            }
            Violation::ExclusivePair { first, second } => *first == field || *second == field,
            Violation::Incoherent { fields, .. } => fields.contains(&field),
            Violation::OutOfRange { field: f, .. }
            | Violation::UnresolvedReference { field: f, .. }
            | Violation::MissingAttachment { field: f, .. }
            | Violation::UnrecognizedOption { field: f, .. }
            | Violation::MalformedRecord { field: f, .. } => *f == field,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CapabilityConflict { capability, field } => {
                write!(f, "{capability} units can not have {field}")
            }
            Violation::ExclusivePair { first, second } => {
                write!(f, "{first} and {second} can not be set at the same time")
            }
            Violation::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} is {value}, must be within [{min}, {max}]"),
            Violation::Incoherent { fields, rule } => {
                write!(f, "{} ({})", rule, fields.join(", "))
            }
            Violation::UnresolvedReference { field, kind, name } => {
                write!(f, "{field}: no {kind} called {name}")
            }
            Violation::MissingAttachment { field, name } => write!(
                f,
                "{field}: {name} has no attachments, declare {name} before using it"
            ),
            Violation::UnrecognizedOption { field, option } => {
                write!(f, "{field} does not allow: {option}")
            }
            Violation::MalformedRecord {
                field,
                expected,
                found,
            } => write!(f, "{field}: '{found}' must have the form {expected}"),
        }
    }
}

/// All violations found on one attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Display name of the owning entity.
    pub owner: String,
    /// Name of the attachment on that entity.
    pub attachment: String,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Check whether any violation concerns `field`.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.mentions(field))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} on {}: {} violation(s)",
            self.attachment,
            self.owner,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates violations during one validation pass.
#[derive(Debug, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Record `violation` when `violated` holds.
    pub fn check(&mut self, violated: bool, violation: impl FnOnce() -> Violation) {
        if violated {
            self.0.push(violation());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finish the pass: `Ok` when nothing was recorded.
    pub fn into_result(
        self,
        owner: impl Into<String>,
        attachment: impl Into<String>,
    ) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                owner: owner.into(),
                attachment: attachment.into(),
                violations: self.0,
            })
        }
    }
}
