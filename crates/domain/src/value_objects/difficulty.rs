//! Task difficulty and frequency value objects
//!
//! Both enums are closed sets backed by fixed lookup tables. The weight and
//! multiplier tables live here so they stay centrally auditable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How hard a task is to complete.
///
/// Ordered: `Easy < Medium < Hard < VeryHard`. The ordering is load-bearing
/// for the distributor, which places harder tasks first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl TaskDifficulty {
    pub const ALL: [TaskDifficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::VeryHard];

    /// Workload weight contributed by a task of this difficulty.
    pub fn weight(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::VeryHard => 4,
        }
    }

    /// Reward multiplier applied to base xp/gold for task completion.
    pub fn reward_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
            Self::VeryHard => 3.0,
        }
    }
}

impl fmt::Display for TaskDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
            Self::VeryHard => write!(f, "very_hard"),
        }
    }
}

impl FromStr for TaskDifficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "very_hard" => Ok(Self::VeryHard),
            _ => Err(DomainError::parse(format!("Unknown difficulty: {}", s))),
        }
    }
}

/// How often a task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TaskFrequency {
    /// Reward multiplier applied to base xp/gold for task completion.
    pub fn reward_multiplier(self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 2.0,
            Self::Monthly => 3.0,
        }
    }

    /// Suitability factor used by the distributor.
    ///
    /// Daily tasks are favored slightly so frequent chores keep moving.
    pub fn distribution_factor(self) -> f64 {
        match self {
            Self::Daily => 1.2,
            Self::Weekly => 1.0,
            Self::Monthly => 0.8,
        }
    }
}

impl fmt::Display for TaskFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for TaskFrequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(DomainError::parse(format!("Unknown frequency: {}", s))),
        }
    }
}
