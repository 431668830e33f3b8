//! Character attributes, classes, and derived combat stats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Base attributes of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSet {
    pub strength: u32,
    pub dexterity: u32,
    pub intellect: u32,
    pub constitution: u32,
}

impl AttributeSet {
    pub fn new(strength: u32, dexterity: u32, intellect: u32, constitution: u32) -> Self {
        Self {
            strength,
            dexterity,
            intellect,
            constitution,
        }
    }

    /// Sum of all four attributes, used for allocation budget checks.
    pub fn total(&self) -> u32 {
        self.strength + self.dexterity + self.intellect + self.constitution
    }

    pub fn add(&self, other: &AttributeSet) -> AttributeSet {
        AttributeSet {
            strength: self.strength + other.strength,
            dexterity: self.dexterity + other.dexterity,
            intellect: self.intellect + other.intellect,
            constitution: self.constitution + other.constitution,
        }
    }
}

/// Per-level attribute growth rates for a class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRates {
    pub strength: f64,
    pub dexterity: f64,
    pub intellect: f64,
    pub constitution: f64,
}

/// Combat stats derived from attributes.
///
/// Equipment bonuses are a future extension; today the derivation is purely
/// attribute-driven.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub max_health: f64,
    pub melee_damage: f64,
    pub ranged_damage: f64,
    pub magic_damage: f64,
    pub heal_power: f64,
}

impl CombatStats {
    /// Derive combat stats from base attributes.
    pub fn derive(attributes: &AttributeSet) -> Self {
        Self {
            max_health: 50.0 + f64::from(attributes.constitution) * 10.0,
            melee_damage: 5.0 + f64::from(attributes.strength) * 2.0,
            ranged_damage: 5.0 + f64::from(attributes.dexterity) * 2.0,
            magic_damage: 5.0 + f64::from(attributes.intellect) * 2.0,
            heal_power: 5.0 + f64::from(attributes.intellect) * 1.5,
        }
    }
}

/// Which derived stat a class channels its damage through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageChannel {
    Melee,
    Ranged,
    Magic,
    /// Average of melee and ranged; Rogue only.
    Hybrid,
}

/// Playable character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Ranger,
    Rogue,
    Mage,
    Priest,
    Monk,
    Gunner,
    MagicSwordsman,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 8] = [
        Self::Warrior,
        Self::Ranger,
        Self::Rogue,
        Self::Mage,
        Self::Priest,
        Self::Monk,
        Self::Gunner,
        Self::MagicSwordsman,
    ];

    /// The damage channel this class attacks through.
    pub fn damage_channel(self) -> DamageChannel {
        match self {
            Self::Warrior | Self::Monk => DamageChannel::Melee,
            Self::Ranger | Self::Gunner => DamageChannel::Ranged,
            Self::Mage | Self::Priest | Self::MagicSwordsman => DamageChannel::Magic,
            Self::Rogue => DamageChannel::Hybrid,
        }
    }

    /// Static class template: base attributes, growth rates, starting skills.
    pub fn template(self) -> &'static ClassTemplate {
        match self {
            Self::Warrior => &WARRIOR,
            Self::Ranger => &RANGER,
            Self::Rogue => &ROGUE,
            Self::Mage => &MAGE,
            Self::Priest => &PRIEST,
            Self::Monk => &MONK,
            Self::Gunner => &GUNNER,
            Self::MagicSwordsman => &MAGIC_SWORDSMAN,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warrior => write!(f, "Warrior"),
            Self::Ranger => write!(f, "Ranger"),
            Self::Rogue => write!(f, "Rogue"),
            Self::Mage => write!(f, "Mage"),
            Self::Priest => write!(f, "Priest"),
            Self::Monk => write!(f, "Monk"),
            Self::Gunner => write!(f, "Gunner"),
            Self::MagicSwordsman => write!(f, "MagicSwordsman"),
        }
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Warrior" => Ok(Self::Warrior),
            "Ranger" => Ok(Self::Ranger),
            "Rogue" => Ok(Self::Rogue),
            "Mage" => Ok(Self::Mage),
            "Priest" => Ok(Self::Priest),
            "Monk" => Ok(Self::Monk),
            "Gunner" => Ok(Self::Gunner),
            "MagicSwordsman" => Ok(Self::MagicSwordsman),
            _ => Err(DomainError::parse(format!("Unknown class: {}", s))),
        }
    }
}

/// Authoring-time definition of a class.
#[derive(Debug, Clone)]
pub struct ClassTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub base_attributes: AttributeSet,
    pub growth: GrowthRates,
    pub skills: &'static [&'static str],
}

impl ClassTemplate {
    /// Attributes at a given level: base plus growth per level past the first,
    /// floored per attribute.
    pub fn attributes_at_level(&self, level: u32) -> AttributeSet {
        let steps = f64::from(level.saturating_sub(1));
        let grow = |base: u32, rate: f64| (f64::from(base) + rate * steps).floor() as u32;
        AttributeSet {
            strength: grow(self.base_attributes.strength, self.growth.strength),
            dexterity: grow(self.base_attributes.dexterity, self.growth.dexterity),
            intellect: grow(self.base_attributes.intellect, self.growth.intellect),
            constitution: grow(self.base_attributes.constitution, self.growth.constitution),
        }
    }
}

static WARRIOR: ClassTemplate = ClassTemplate {
    name: "Warrior",
    description: "A master of close combat and heavy weapons.",
    base_attributes: AttributeSet {
        strength: 10,
        dexterity: 6,
        intellect: 4,
        constitution: 8,
    },
    growth: GrowthRates {
        strength: 1.2,
        dexterity: 0.8,
        intellect: 0.4,
        constitution: 1.0,
    },
    skills: &["Slash", "Defend", "War Cry"],
};

static RANGER: ClassTemplate = ClassTemplate {
    name: "Ranger",
    description: "An expert in ranged combat and wilderness survival.",
    base_attributes: AttributeSet {
        strength: 6,
        dexterity: 10,
        intellect: 6,
        constitution: 6,
    },
    growth: GrowthRates {
        strength: 0.6,
        dexterity: 1.2,
        intellect: 0.7,
        constitution: 0.7,
    },
    skills: &["Precise Shot", "Quick Draw", "Track"],
};

static ROGUE: ClassTemplate = ClassTemplate {
    name: "Rogue",
    description: "A stealthy fighter specializing in critical strikes.",
    base_attributes: AttributeSet {
        strength: 6,
        dexterity: 12,
        intellect: 7,
        constitution: 5,
    },
    growth: GrowthRates {
        strength: 0.5,
        dexterity: 1.3,
        intellect: 0.8,
        constitution: 0.6,
    },
    skills: &["Backstab", "Stealth", "Pickpocket"],
};

static MAGE: ClassTemplate = ClassTemplate {
    name: "Mage",
    description: "A wielder of arcane magic and elemental forces.",
    base_attributes: AttributeSet {
        strength: 3,
        dexterity: 6,
        intellect: 12,
        constitution: 5,
    },
    growth: GrowthRates {
        strength: 0.3,
        dexterity: 0.6,
        intellect: 1.4,
        constitution: 0.5,
    },
    skills: &["Fireball", "Ice Spike", "Arcane Shield"],
};

static PRIEST: ClassTemplate = ClassTemplate {
    name: "Priest",
    description: "A divine spellcaster focused on healing and support.",
    base_attributes: AttributeSet {
        strength: 4,
        dexterity: 5,
        intellect: 10,
        constitution: 6,
    },
    growth: GrowthRates {
        strength: 0.4,
        dexterity: 0.5,
        intellect: 1.3,
        constitution: 0.7,
    },
    skills: &["Heal", "Bless", "Smite"],
};

static MONK: ClassTemplate = ClassTemplate {
    name: "Monk",
    description: "A martial artist mastering unarmed combat and inner energy.",
    base_attributes: AttributeSet {
        strength: 8,
        dexterity: 10,
        intellect: 6,
        constitution: 7,
    },
    growth: GrowthRates {
        strength: 0.9,
        dexterity: 1.1,
        intellect: 0.6,
        constitution: 0.8,
    },
    skills: &["Flying Kick", "Meditate", "Pressure Point"],
};

static GUNNER: ClassTemplate = ClassTemplate {
    name: "Gunner",
    description: "A modern warrior wielding firearms and explosives.",
    base_attributes: AttributeSet {
        strength: 7,
        dexterity: 9,
        intellect: 8,
        constitution: 6,
    },
    growth: GrowthRates {
        strength: 0.7,
        dexterity: 1.0,
        intellect: 0.9,
        constitution: 0.6,
    },
    skills: &["Rapid Fire", "Grenade Toss", "Snipe"],
};

static MAGIC_SWORDSMAN: ClassTemplate = ClassTemplate {
    name: "MagicSwordsman",
    description: "A hybrid warrior combining swordplay with magic.",
    base_attributes: AttributeSet {
        strength: 8,
        dexterity: 8,
        intellect: 9,
        constitution: 7,
    },
    growth: GrowthRates {
        strength: 0.9,
        dexterity: 0.9,
        intellect: 1.0,
        constitution: 0.8,
    },
    skills: &["Magic Slash", "Spell Blade", "Arcane Strike"],
};
