//! Reward bundles and the append-only audit record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Item;
use crate::error::DomainError;
use crate::ids::UserId;

/// An ephemeral grant of xp, gold, and items.
///
/// Computed, applied to a character, then discarded; only the resulting
/// character mutation and the audit record persist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBundle {
    pub xp: u32,
    pub gold: u32,
    pub items: Vec<Item>,
}

impl RewardBundle {
    /// A flat bundle with no items, as used by achievement templates.
    pub fn flat(xp: u32, gold: u32) -> Self {
        Self {
            xp,
            gold,
            items: Vec::new(),
        }
    }

    pub fn with_items(xp: u32, gold: u32, items: Vec<Item>) -> Self {
        Self { xp, gold, items }
    }

    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.gold == 0 && self.items.is_empty()
    }
}

/// What kind of event produced a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardEventKind {
    Task,
    Achievement,
    Combat,
}

impl fmt::Display for RewardEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Achievement => write!(f, "achievement"),
            Self::Combat => write!(f, "combat"),
        }
    }
}

impl FromStr for RewardEventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(Self::Task),
            "achievement" => Ok(Self::Achievement),
            "combat" => Ok(Self::Combat),
            _ => Err(DomainError::parse(format!("Unknown reward event: {}", s))),
        }
    }
}

/// Immutable audit record of one reward distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    pub user_id: UserId,
    pub kind: RewardEventKind,
    /// Task id, achievement id, or combat target name depending on `kind`.
    pub source_id: String,
    pub bundle: RewardBundle,
    pub timestamp: DateTime<Utc>,
}

impl RewardRecord {
    pub fn new(
        user_id: UserId,
        kind: RewardEventKind,
        source_id: impl Into<String>,
        bundle: RewardBundle,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            kind,
            source_id: source_id.into(),
            bundle,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_bundle_has_no_items() {
        let bundle = RewardBundle::flat(100, 50);
        assert_eq!(bundle.xp, 100);
        assert_eq!(bundle.gold, 50);
        assert!(bundle.items.is_empty());
        assert!(!bundle.is_empty());
    }

    #[test]
    fn default_bundle_is_empty() {
        assert!(RewardBundle::default().is_empty());
    }

    #[test]
    fn event_kind_round_trips() {
        for kind in [
            RewardEventKind::Task,
            RewardEventKind::Achievement,
            RewardEventKind::Combat,
        ] {
            let parsed: RewardEventKind = kind.to_string().parse().expect("round trip");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = RewardRecord::new(
            UserId::new(),
            RewardEventKind::Combat,
            "boss",
            RewardBundle::flat(125, 50),
            Utc::now(),
        );
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("userId").is_some());
        assert!(json.get("sourceId").is_some());
    }
}
