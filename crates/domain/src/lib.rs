//! ChoreQuest domain layer
//!
//! Entities, value objects, typed ids, and the pure game systems: task
//! distribution, reward calculation, loot generation, and combat resolution.
//! No I/O happens here; randomness and time are injected by callers.

pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use entities::{
    achievement_catalog, experience_for_level, Achievement, AchievementCategory,
    AchievementMetric, AchievementTemplate, AttackType, Character, CombatAction,
    CombatContribution, CombatTarget, InventoryEntry, Item, ItemCategory, ItemKind, ItemStats,
    RewardConfig, Task, TaskCategory, TaskStatus, TaskTemplate, UnlockRule,
    STAT_POINTS_PER_LEVEL,
};

pub use error::DomainError;

pub use ids::{AchievementId, CharacterId, ItemId, PartyId, TaskId, TemplateId, UserId};

pub use value_objects::{
    select_rarity, AttributeSet, CharacterClass, ClassTemplate, CombatStats, DamageChannel,
    GrowthRates, Rarity, RewardBundle, RewardEventKind, RewardRecord, TaskDifficulty,
    TaskFrequency,
};

pub use game_systems::{distribute_tasks, validate_distribution, Assignment, MemberWorkload};
