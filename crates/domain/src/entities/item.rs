//! Item entity - loot that can be generated, dropped, and owned

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::ItemId;
use crate::value_objects::Rarity;

/// What slot an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Artifact,
    Consumable,
    Cosmetic,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Artifact => write!(f, "artifact"),
            Self::Consumable => write!(f, "consumable"),
            Self::Cosmetic => write!(f, "cosmetic"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            "artifact" => Ok(Self::Artifact),
            "consumable" => Ok(Self::Consumable),
            "cosmetic" => Ok(Self::Cosmetic),
            _ => Err(DomainError::parse(format!("Unknown item kind: {}", s))),
        }
    }
}

/// Visual/narrative theme of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    Fantasy,
    Steampunk,
    Scifi,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [Self::Fantasy, Self::Steampunk, Self::Scifi];

    /// Closing phrase for generated item descriptions.
    pub fn description_phrase(self) -> &'static str {
        match self {
            Self::Fantasy => "with magical properties",
            Self::Steampunk => "powered by steam and gears",
            Self::Scifi => "using advanced technology",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fantasy => write!(f, "fantasy"),
            Self::Steampunk => write!(f, "steampunk"),
            Self::Scifi => write!(f, "scifi"),
        }
    }
}

impl FromStr for ItemCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fantasy" => Ok(Self::Fantasy),
            "steampunk" => Ok(Self::Steampunk),
            "scifi" => Ok(Self::Scifi),
            _ => Err(DomainError::parse(format!("Unknown item category: {}", s))),
        }
    }
}

/// Numeric stat block carried by an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    pub power: u32,
    pub defense: u32,
    pub utility: u32,
    pub dexterity: u32,
}

impl ItemStats {
    pub const fn new(power: u32, defense: u32, utility: u32, dexterity: u32) -> Self {
        Self {
            power,
            defense,
            utility,
            dexterity,
        }
    }

    pub fn total(&self) -> u32 {
        self.power + self.defense + self.utility + self.dexterity
    }
}

/// A generated or cataloged loot item. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub kind: ItemKind,
    pub category: ItemCategory,
    pub stats: ItemStats,
    /// Gold value, computed at generation time.
    pub value: u32,
}

impl Item {
    /// Gold value of a stat block at a given rarity.
    pub fn value_of(rarity: Rarity, stats: &ItemStats) -> u32 {
        stats.total() * rarity.value_multiplier() * 10
    }
}

/// A quantity-counted inventory entry. Ownership of `quantity` copies of one
/// item by one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl InventoryEntry {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            quantity: 1,
        }
    }
}
