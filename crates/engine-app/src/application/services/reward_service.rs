//! Reward Service - Application service for reward distribution
//!
//! Converts task completions, combat damage, and achievement unlocks into
//! (xp, gold, items) bundles and applies them to the acting character.
//! Application is all-or-nothing per call: the character must resolve before
//! anything is granted, and the grant itself runs behind a per-character
//! lock because gold and xp are read-modify-write.
//!
//! The audit append happens after the grant; a failed append leaves the
//! reward applied and surfaces as [`RewardError::AuditLogFailed`] rather
//! than being masked.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use chorequest_domain::game_systems::{loot, rewards};
use chorequest_domain::{
    Achievement, Character, CharacterId, CombatTarget, Item, RewardBundle, RewardEventKind,
    RewardRecord, Task, TaskDifficulty, UserId,
};
use chorequest_engine_ports::outbound::{
    CharacterRepositoryPort, ClockPort, ItemCatalogPort, RandomPort, RewardLogPort,
};

/// Error type for reward distribution operations
#[derive(Debug, Error)]
pub enum RewardError {
    #[error("Character not found for user {0}")]
    CharacterNotFound(UserId),

    /// The reward was applied but the audit record could not be written.
    /// Callers must not retry the grant.
    #[error("Reward applied but audit log append failed: {0}")]
    AuditLogFailed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reward service trait defining the application use cases
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RewardService: Send + Sync {
    /// Compute the procedural reward bundle for completing a task. Pure
    /// aside from the injected randomness; nothing is applied or logged.
    fn calculate_task_rewards(&self, task: &Task, character: &Character) -> RewardBundle;

    /// Procedurally generate loot items. The difficulty is a hint carried
    /// for observability; rarity odds are global.
    fn generate_random_items(&self, count: usize, difficulty: TaskDifficulty) -> Vec<Item>;

    /// Pay out a task's configured rewards to the completing user, rolling
    /// the task's own candidate pool for the drop.
    async fn distribute_task_rewards(
        &self,
        task: &Task,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError>;

    /// Pay out damage-driven rewards against one target, with a
    /// target-dependent catalog drop.
    async fn distribute_combat_rewards(
        &self,
        damage: f64,
        target: CombatTarget,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError>;

    /// Pay out an achievement's flat, pre-declared bundle. No randomness.
    async fn distribute_achievement_rewards(
        &self,
        achievement: &Achievement,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError>;

    /// Distribution history for a user, newest first.
    async fn reward_history(&self, user_id: UserId) -> Result<Vec<RewardRecord>, RewardError>;
}

/// Default implementation of RewardService using port abstractions
#[derive(Clone)]
pub struct RewardServiceImpl {
    character_repository: Arc<dyn CharacterRepositoryPort>,
    item_catalog: Arc<dyn ItemCatalogPort>,
    reward_log: Arc<dyn RewardLogPort>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    character_locks: Arc<DashMap<CharacterId, Arc<Mutex<()>>>>,
}

impl RewardServiceImpl {
    pub fn new(
        character_repository: Arc<dyn CharacterRepositoryPort>,
        item_catalog: Arc<dyn ItemCatalogPort>,
        reward_log: Arc<dyn RewardLogPort>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repository,
            item_catalog,
            reward_log,
            random,
            clock,
            character_locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, character_id: CharacterId) -> Arc<Mutex<()>> {
        self.character_locks
            .entry(character_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Resolve the acting character for a user.
    async fn resolve_character(&self, user_id: UserId) -> Result<Character, RewardError> {
        self.character_repository
            .get_by_user(user_id)
            .await?
            .ok_or(RewardError::CharacterNotFound(user_id))
    }

    /// Apply a bundle to a character under its lock, then append the audit
    /// record.
    async fn apply_and_log(
        &self,
        character_id: CharacterId,
        user_id: UserId,
        kind: RewardEventKind,
        source_id: String,
        bundle: RewardBundle,
    ) -> Result<RewardBundle, RewardError> {
        let now = self.clock.now();

        {
            let lock = self.lock_for(character_id);
            let _guard = lock.lock().await;

            // Fresh read under the lock; xp/gold are read-modify-write.
            let mut character = self
                .character_repository
                .get(character_id)
                .await?
                .ok_or(RewardError::CharacterNotFound(user_id))?;

            let leveled = character.add_experience(u64::from(bundle.xp), now);
            character.add_gold(u64::from(bundle.gold), now);
            character.add_items(&bundle.items, now);
            self.character_repository.update(&character).await?;

            if leveled {
                info!(
                    character_id = %character_id,
                    level = character.level,
                    "Character leveled up"
                );
            }
        }

        let record = RewardRecord::new(user_id, kind, source_id, bundle.clone(), now);
        if let Err(err) = self.reward_log.append(&record).await {
            return Err(RewardError::AuditLogFailed(err.to_string()));
        }

        Ok(bundle)
    }
}

#[async_trait]
impl RewardService for RewardServiceImpl {
    fn calculate_task_rewards(&self, task: &Task, character: &Character) -> RewardBundle {
        debug!(
            task_id = %task.id,
            character_id = %character.id,
            difficulty = %task.difficulty,
            frequency = %task.frequency,
            "Calculating task rewards"
        );
        let mut draw = || self.random.random_f64();
        rewards::calculate_task_rewards(task, &mut draw)
    }

    fn generate_random_items(&self, count: usize, difficulty: TaskDifficulty) -> Vec<Item> {
        debug!(count, difficulty = %difficulty, "Generating random items");
        let mut draw = || self.random.random_f64();
        loot::generate_items(count, &mut draw)
    }

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn distribute_task_rewards(
        &self,
        task: &Task,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError> {
        let character = self.resolve_character(user_id).await?;

        let mut draw = || self.random.random_f64();
        let items = rewards::roll_pooled_drop(&task.rewards, &mut draw)
            .into_iter()
            .collect();
        let bundle = RewardBundle::with_items(task.rewards.xp, task.rewards.gold, items);

        self.apply_and_log(
            character.id,
            user_id,
            RewardEventKind::Task,
            task.id.to_string(),
            bundle,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn distribute_combat_rewards(
        &self,
        damage: f64,
        target: CombatTarget,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError> {
        let character = self.resolve_character(user_id).await?;

        let (xp, gold) = rewards::combat_reward_amounts(damage, target);
        let mut items = Vec::new();
        if self.random.random_f64() <= target.item_drop_chance() {
            let candidates = self
                .item_catalog
                .find_by_rarity(target.loot_rarity(), rewards::COMBAT_DROP_CANDIDATES)
                .await?;
            if !candidates.is_empty() {
                let index = self.random.random_index(candidates.len());
                items.extend(candidates.into_iter().nth(index));
            }
        }

        let bundle = RewardBundle::with_items(xp, gold, items);
        self.apply_and_log(
            character.id,
            user_id,
            RewardEventKind::Combat,
            target.to_string(),
            bundle,
        )
        .await
    }

    #[instrument(skip(self, achievement), fields(achievement_id = %achievement.id))]
    async fn distribute_achievement_rewards(
        &self,
        achievement: &Achievement,
        user_id: UserId,
    ) -> Result<RewardBundle, RewardError> {
        let character = self.resolve_character(user_id).await?;

        self.apply_and_log(
            character.id,
            user_id,
            RewardEventKind::Achievement,
            achievement.id.to_string(),
            achievement.reward.clone(),
        )
        .await
    }

    async fn reward_history(&self, user_id: UserId) -> Result<Vec<RewardRecord>, RewardError> {
        Ok(self.reward_log.list_for_user(user_id).await?)
    }
}
