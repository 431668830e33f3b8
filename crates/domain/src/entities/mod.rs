//! Domain entities

mod achievement;
mod character;
mod combat;
mod item;
mod task;

pub use achievement::{
    achievement_catalog, Achievement, AchievementCategory, AchievementMetric,
    AchievementTemplate, UnlockRule,
};
pub use character::{experience_for_level, Character, STAT_POINTS_PER_LEVEL};
pub use combat::{AttackType, CombatAction, CombatContribution, CombatTarget};
pub use item::{InventoryEntry, Item, ItemCategory, ItemKind, ItemStats};
pub use task::{RewardConfig, Task, TaskCategory, TaskStatus, TaskTemplate};
