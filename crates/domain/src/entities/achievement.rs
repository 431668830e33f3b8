//! Achievement entity and the fixed template catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::AchievementId;
use crate::value_objects::RewardBundle;

/// Grouping of achievements for display and unlock queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementCategory {
    Task,
    Adventure,
    Social,
    Collection,
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Adventure => write!(f, "adventure"),
            Self::Social => write!(f, "social"),
            Self::Collection => write!(f, "collection"),
        }
    }
}

impl FromStr for AchievementCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(Self::Task),
            "adventure" => Ok(Self::Adventure),
            "social" => Ok(Self::Social),
            "collection" => Ok(Self::Collection),
            _ => Err(DomainError::parse(format!(
                "Unknown achievement category: {}",
                s
            ))),
        }
    }
}

/// Metric an automatic unlock rule measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementMetric {
    CompletedTasks,
    CompletedAdventures,
    PartySize,
    UniqueItems,
}

/// Threshold rule for automatic unlocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRule {
    pub metric: AchievementMetric,
    pub threshold: u32,
}

/// Authoring-time achievement definition. Rewards are flat and pre-declared;
/// no randomness on this path.
#[derive(Debug, Clone)]
pub struct AchievementTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub xp: u32,
    pub gold: u32,
    /// None means the achievement is granted by an external flow, not by the
    /// automatic threshold check.
    pub unlock_rule: Option<UnlockRule>,
}

impl AchievementTemplate {
    pub fn reward(&self) -> RewardBundle {
        RewardBundle::flat(self.xp, self.gold)
    }
}

/// An unlocked (or unlockable) achievement instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub reward: RewardBundle,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Instantiate an unlocked achievement from a template.
    pub fn unlock_from(template: &AchievementTemplate, now: DateTime<Utc>) -> Self {
        Self {
            id: AchievementId::new(),
            title: template.title.to_string(),
            description: template.description.to_string(),
            category: template.category,
            reward: template.reward(),
            unlocked_at: Some(now),
        }
    }
}

/// The fixed achievement catalog.
pub fn achievement_catalog() -> &'static [AchievementTemplate] {
    &CATALOG
}

static CATALOG: [AchievementTemplate; 8] = [
    AchievementTemplate {
        title: "Task Master",
        description: "Complete 100 tasks",
        category: AchievementCategory::Task,
        xp: 1000,
        gold: 500,
        unlock_rule: Some(UnlockRule {
            metric: AchievementMetric::CompletedTasks,
            threshold: 100,
        }),
    },
    AchievementTemplate {
        title: "Speed Demon",
        description: "Complete 10 tasks in one day",
        category: AchievementCategory::Task,
        xp: 500,
        gold: 250,
        unlock_rule: None,
    },
    AchievementTemplate {
        title: "Adventure Seeker",
        description: "Complete 5 adventures",
        category: AchievementCategory::Adventure,
        xp: 2000,
        gold: 1000,
        unlock_rule: Some(UnlockRule {
            metric: AchievementMetric::CompletedAdventures,
            threshold: 5,
        }),
    },
    AchievementTemplate {
        title: "Boss Slayer",
        description: "Defeat a monthly boss",
        category: AchievementCategory::Adventure,
        xp: 1500,
        gold: 750,
        unlock_rule: None,
    },
    AchievementTemplate {
        title: "Party Animal",
        description: "Invite 5 members to your party",
        category: AchievementCategory::Social,
        xp: 800,
        gold: 400,
        unlock_rule: Some(UnlockRule {
            metric: AchievementMetric::PartySize,
            threshold: 5,
        }),
    },
    AchievementTemplate {
        title: "Team Player",
        description: "Complete 50 tasks with party members",
        category: AchievementCategory::Social,
        xp: 1200,
        gold: 600,
        unlock_rule: None,
    },
    AchievementTemplate {
        title: "Collector",
        description: "Collect 20 unique items",
        category: AchievementCategory::Collection,
        xp: 1000,
        gold: 500,
        unlock_rule: Some(UnlockRule {
            metric: AchievementMetric::UniqueItems,
            threshold: 20,
        }),
    },
    AchievementTemplate {
        title: "Treasure Hunter",
        description: "Find 5 legendary items",
        category: AchievementCategory::Collection,
        xp: 2000,
        gold: 1000,
        unlock_rule: None,
    },
];
