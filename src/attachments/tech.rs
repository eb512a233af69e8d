//! Player technology and the modifier snapshot used by derivations.

use serde::{Deserialize, Serialize};

use super::{Attachment, AttachmentOwner, TECH_ATTACHMENT_NAME};
use crate::catalog::EntityCatalog;
use crate::codec::parse_bool;
use crate::core::{AttachmentError, PlayerId, Result};
use crate::validation::{ValidationContext, ValidationError};

/// Technology advances a player may have unlocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechAdvances {
    pub heavy_bomber: bool,
    pub long_range_air: bool,
    pub jet_power: bool,
    pub rocket: bool,
    pub super_sub: bool,
    pub destroyer_bombard: bool,
    pub aa_radar: bool,
    pub mechanized_infantry: bool,
    pub paratroopers: bool,
}

impl TechAdvances {
    /// Option names accepted by the tech attachment.
    const PROPERTIES: [&'static str; 9] = [
        "heavyBomber",
        "longRangeAir",
        "jetPower",
        "rocket",
        "superSub",
        "destroyerBombard",
        "aARadar",
        "mechanizedInfantry",
        "paratroopers",
    ];

    fn flag_mut(&mut self, property: &str) -> Option<(&'static str, &mut bool)> {
        let flag = match property {
            "heavyBomber" => ("heavyBomber", &mut self.heavy_bomber),
            "longRangeAir" => ("longRangeAir", &mut self.long_range_air),
            "jetPower" => ("jetPower", &mut self.jet_power),
            "rocket" => ("rocket", &mut self.rocket),
            "superSub" => ("superSub", &mut self.super_sub),
            "destroyerBombard" => ("destroyerBombard", &mut self.destroyer_bombard),
            "aARadar" => ("aARadar", &mut self.aa_radar),
            "mechanizedInfantry" => ("mechanizedInfantry", &mut self.mechanized_infantry),
            "paratroopers" => ("paratroopers", &mut self.paratroopers),
            _ => return None,
        };
        Some(flag)
    }
}

/// The technology attachment of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechAttachment {
    owner: PlayerId,
    name: String,
    advances: TechAdvances,
}

impl TechAttachment {
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            name: TECH_ATTACHMENT_NAME.to_string(),
            advances: TechAdvances::default(),
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn advances(&self) -> TechAdvances {
        self.advances
    }
}

impl Attachment for TechAttachment {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> AttachmentOwner {
        AttachmentOwner::Player(self.owner)
    }

    fn set_property(&mut self, property: &str, value: &str, _catalog: &EntityCatalog) -> Result<()> {
        let (field, flag) =
            self.advances
                .flag_mut(property)
                .ok_or_else(|| AttachmentError::UnknownProperty {
                    attachment: TECH_ATTACHMENT_NAME.to_string(),
                    property: property.to_string(),
                })?;
        *flag = parse_bool(field, value)?;
        Ok(())
    }

    fn clear_property(&mut self, property: &str) -> Result<()> {
        if TechAdvances::PROPERTIES.contains(&property) {
            Err(AttachmentError::NotClearable {
                property: property.to_string(),
            })
        } else {
            Err(AttachmentError::UnknownProperty {
                attachment: TECH_ATTACHMENT_NAME.to_string(),
                property: property.to_string(),
            })
        }
    }

    fn validate(&self, _ctx: &ValidationContext<'_>) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

/// Immutable snapshot of everything about a player that modifies derived
/// unit values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerModifiers {
    pub is_ai: bool,
    pub tech: TechAdvances,
}

impl PlayerModifiers {
    #[must_use]
    pub fn new(is_ai: bool, tech: TechAdvances) -> Self {
        Self { is_ai, tech }
    }

    /// A human player without any advances.
    #[must_use]
    pub fn human() -> Self {
        Self::default()
    }

    /// An AI player without any advances.
    #[must_use]
    pub fn ai() -> Self {
        Self {
            is_ai: true,
            tech: TechAdvances::default(),
        }
    }

    #[must_use]
    pub fn with_tech(mut self, tech: TechAdvances) -> Self {
        self.tech = tech;
        self
    }
}
