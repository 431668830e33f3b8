//! Item rarity tiers and their probability/value tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Loot quality tier, ordered from most to least common.
///
/// The drop weights across all six tiers sum to 1.0 and drive the weighted
/// selection in [`select_rarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
        Self::Mythic,
    ];

    /// Probability weight for random generation.
    pub fn drop_weight(self) -> f64 {
        match self {
            Self::Common => 0.5,
            Self::Uncommon => 0.25,
            Self::Rare => 0.15,
            Self::Epic => 0.07,
            Self::Legendary => 0.025,
            Self::Mythic => 0.005,
        }
    }

    /// Gold value multiplier; doubles per tier.
    pub fn value_multiplier(self) -> u32 {
        match self {
            Self::Common => 1,
            Self::Uncommon => 2,
            Self::Rare => 4,
            Self::Epic => 8,
            Self::Legendary => 16,
            Self::Mythic => 32,
        }
    }

    /// Adjective prepended to generated item names. Common items get none.
    pub fn name_prefix(self) -> Option<&'static str> {
        match self {
            Self::Common => None,
            Self::Uncommon => Some("Enhanced"),
            Self::Rare => Some("Mystic"),
            Self::Epic => Some("Ancient"),
            Self::Legendary => Some("Mythical"),
            Self::Mythic => Some("Cosmic"),
        }
    }

    /// Opening phrase for generated item descriptions.
    pub fn description_phrase(self) -> &'static str {
        match self {
            Self::Common => "A standard",
            Self::Uncommon => "An improved",
            Self::Rare => "A powerful",
            Self::Epic => "An ancient",
            Self::Legendary => "A mythical",
            Self::Mythic => "A cosmic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Common => write!(f, "common"),
            Self::Uncommon => write!(f, "uncommon"),
            Self::Rare => write!(f, "rare"),
            Self::Epic => write!(f, "epic"),
            Self::Legendary => write!(f, "legendary"),
            Self::Mythic => write!(f, "mythic"),
        }
    }
}

impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            "mythic" => Ok(Self::Mythic),
            _ => Err(DomainError::parse(format!("Unknown rarity: {}", s))),
        }
    }
}

/// Select a rarity tier from a uniform draw in `[0, 1)`.
///
/// Walks the cumulative weight table and returns the first tier whose
/// cumulative sum reaches the draw. Falls back to `Common` if floating-point
/// drift leaves no match; the result is never undefined.
pub fn select_rarity(draw: f64) -> Rarity {
    let mut cumulative = 0.0;
    for rarity in Rarity::ALL {
        cumulative += rarity.drop_weight();
        if draw <= cumulative {
            return rarity;
        }
    }
    Rarity::Common
}
