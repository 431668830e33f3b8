//! Combat actions and targets - how task completion becomes damage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{CharacterId, TaskId};
use crate::value_objects::{Rarity, TaskFrequency};

/// Attack tier, derived from the completed task's frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackType {
    Basic,
    Special,
    Ultimate,
}

impl AttackType {
    /// The attack tier a task of the given frequency unleashes.
    pub fn for_frequency(frequency: TaskFrequency) -> Self {
        match frequency {
            TaskFrequency::Daily => Self::Basic,
            TaskFrequency::Weekly => Self::Special,
            TaskFrequency::Monthly => Self::Ultimate,
        }
    }

    /// Damage multiplier for this tier.
    pub fn damage_multiplier(self) -> f64 {
        match self {
            Self::Basic => 1.0,
            Self::Special => 2.0,
            Self::Ultimate => 4.0,
        }
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Special => write!(f, "special"),
            Self::Ultimate => write!(f, "ultimate"),
        }
    }
}

impl FromStr for AttackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "special" => Ok(Self::Special),
            "ultimate" => Ok(Self::Ultimate),
            _ => Err(DomainError::parse(format!("Unknown attack type: {}", s))),
        }
    }
}

/// The three shared damage-pool targets a party fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatTarget {
    Encounter,
    MiniBoss,
    Boss,
}

impl CombatTarget {
    pub const ALL: [CombatTarget; 3] = [Self::Encounter, Self::MiniBoss, Self::Boss];

    /// Reward multiplier applied to damage-driven xp/gold.
    pub fn reward_multiplier(self) -> f64 {
        match self {
            Self::Encounter => 1.0,
            Self::MiniBoss => 2.0,
            Self::Boss => 5.0,
        }
    }

    /// Probability that a combat reward includes an item drop.
    pub fn item_drop_chance(self) -> f64 {
        match self {
            Self::Encounter => 0.1,
            Self::MiniBoss => 0.3,
            Self::Boss => 0.5,
        }
    }

    /// Rarity tier of items dropped by this target.
    pub fn loot_rarity(self) -> Rarity {
        match self {
            Self::Encounter => Rarity::Common,
            Self::MiniBoss => Rarity::Rare,
            Self::Boss => Rarity::Epic,
        }
    }
}

impl fmt::Display for CombatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encounter => write!(f, "encounter"),
            Self::MiniBoss => write!(f, "miniBoss"),
            Self::Boss => write!(f, "boss"),
        }
    }
}

impl FromStr for CombatTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encounter" => Ok(Self::Encounter),
            "miniBoss" => Ok(Self::MiniBoss),
            "boss" => Ok(Self::Boss),
            _ => Err(DomainError::parse(format!("Unknown combat target: {}", s))),
        }
    }
}

/// One attack against one target. Append-only; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatAction {
    pub attack_type: AttackType,
    pub damage: f64,
    pub target: CombatTarget,
    pub character_id: CharacterId,
    pub task_id: TaskId,
    pub timestamp: DateTime<Utc>,
}

/// Summary of a completed task's combat contribution, persisted on the task.
///
/// Stores only the encounter-channel total; the full per-target breakdown
/// lives in the combat log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatContribution {
    pub damage: f64,
    pub attack_type: AttackType,
    pub target: CombatTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_tier_follows_frequency() {
        assert_eq!(
            AttackType::for_frequency(TaskFrequency::Daily),
            AttackType::Basic
        );
        assert_eq!(
            AttackType::for_frequency(TaskFrequency::Weekly),
            AttackType::Special
        );
        assert_eq!(
            AttackType::for_frequency(TaskFrequency::Monthly),
            AttackType::Ultimate
        );
    }

    #[test]
    fn damage_multipliers_double_per_tier() {
        assert_eq!(AttackType::Basic.damage_multiplier(), 1.0);
        assert_eq!(AttackType::Special.damage_multiplier(), 2.0);
        assert_eq!(AttackType::Ultimate.damage_multiplier(), 4.0);
    }

    #[test]
    fn target_reward_tables() {
        assert_eq!(CombatTarget::Encounter.reward_multiplier(), 1.0);
        assert_eq!(CombatTarget::MiniBoss.reward_multiplier(), 2.0);
        assert_eq!(CombatTarget::Boss.reward_multiplier(), 5.0);

        assert_eq!(CombatTarget::Encounter.item_drop_chance(), 0.1);
        assert_eq!(CombatTarget::MiniBoss.item_drop_chance(), 0.3);
        assert_eq!(CombatTarget::Boss.item_drop_chance(), 0.5);

        assert_eq!(CombatTarget::Encounter.loot_rarity(), Rarity::Common);
        assert_eq!(CombatTarget::MiniBoss.loot_rarity(), Rarity::Rare);
        assert_eq!(CombatTarget::Boss.loot_rarity(), Rarity::Epic);
    }

    #[test]
    fn target_uses_camel_case_wire_names() {
        assert_eq!(CombatTarget::MiniBoss.to_string(), "miniBoss");
        let parsed: CombatTarget = "miniBoss".parse().expect("parse");
        assert_eq!(parsed, CombatTarget::MiniBoss);
    }
}
