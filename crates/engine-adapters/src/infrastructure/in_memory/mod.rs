//! In-memory port implementations
//!
//! Vec-backed stores behind async RwLocks. Used by integration tests and as
//! reference implementations for real persistence adapters. Insertion order
//! is preserved, which doubles as join order for party rosters.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use chorequest_domain::{
    Achievement, Character, CharacterId, CombatAction, Item, PartyId, Rarity, RewardRecord,
    Task, TaskId, TaskTemplate, TemplateId, UserId,
};
use chorequest_engine_ports::outbound::{
    AchievementRepositoryPort, CharacterRepositoryPort, CombatLogPort, ItemCatalogPort,
    PartyStatsPort, RewardLogPort, TaskRepositoryPort,
};

/// In-memory character store.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    characters: RwLock<Vec<Character>>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        self.characters.write().await.push(character.clone());
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        Ok(self
            .characters
            .read()
            .await
            .iter()
            .find(|character| character.id == id)
            .cloned())
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Character>> {
        Ok(self
            .characters
            .read()
            .await
            .iter()
            .find(|character| character.user_id == user_id)
            .cloned())
    }

    async fn list(&self, party_id: PartyId) -> Result<Vec<Character>> {
        Ok(self
            .characters
            .read()
            .await
            .iter()
            .filter(|character| character.party_id == party_id)
            .cloned()
            .collect())
    }

    async fn update(&self, character: &Character) -> Result<()> {
        let mut characters = self.characters.write().await;
        match characters.iter_mut().find(|stored| stored.id == character.id) {
            Some(stored) => {
                *stored = character.clone();
                Ok(())
            }
            None => anyhow::bail!("Character not found: {}", character.id),
        }
    }
}

/// In-memory task and template store.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
    templates: RwLock<Vec<TaskTemplate>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template into the store.
    pub async fn add_template(&self, template: TaskTemplate) {
        self.templates.write().await.push(template);
    }
}

#[async_trait]
impl TaskRepositoryPort for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> Result<()> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .find(|task| task.id == id)
            .cloned())
    }

    async fn list(&self, party_id: PartyId) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|task| task.party_id == party_id)
            .cloned()
            .collect())
    }

    async fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter_mut().find(|stored| stored.id == task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(())
            }
            None => anyhow::bail!("Task not found: {}", task.id),
        }
    }

    async fn get_template(&self, id: TemplateId) -> Result<Option<TaskTemplate>> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .find(|template| template.id == id)
            .cloned())
    }
}

/// In-memory item catalog.
#[derive(Debug, Default)]
pub struct InMemoryItemCatalog {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an item into the catalog.
    pub async fn add_item(&self, item: Item) {
        self.items.write().await.push(item);
    }
}

#[async_trait]
impl ItemCatalogPort for InMemoryItemCatalog {
    async fn find_by_rarity(&self, rarity: Rarity, limit: usize) -> Result<Vec<Item>> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|item| item.rarity == rarity)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// In-memory reward audit log.
#[derive(Debug, Default)]
pub struct InMemoryRewardLog {
    records: RwLock<Vec<RewardRecord>>,
}

impl InMemoryRewardLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All appended records, in append order.
    pub async fn records(&self) -> Vec<RewardRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RewardLogPort for InMemoryRewardLog {
    async fn append(&self, record: &RewardRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RewardRecord>> {
        let mut records: Vec<RewardRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.reverse();
        Ok(records)
    }
}

/// In-memory combat action log.
#[derive(Debug, Default)]
pub struct InMemoryCombatLog {
    actions: RwLock<Vec<CombatAction>>,
}

impl InMemoryCombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All appended actions, in append order.
    pub async fn actions(&self) -> Vec<CombatAction> {
        self.actions.read().await.clone()
    }
}

#[async_trait]
impl CombatLogPort for InMemoryCombatLog {
    async fn append(&self, action: &CombatAction) -> Result<()> {
        self.actions.write().await.push(action.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> Result<Vec<CombatAction>> {
        Ok(self
            .actions
            .read()
            .await
            .iter()
            .filter(|action| action.task_id == task_id)
            .cloned()
            .collect())
    }
}

/// Fixed party statistics for achievement checks in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticPartyStats {
    pub completed_tasks: u32,
    pub completed_adventures: u32,
    pub party_members: u32,
}

impl StaticPartyStats {
    pub fn new(completed_tasks: u32, completed_adventures: u32, party_members: u32) -> Self {
        Self {
            completed_tasks,
            completed_adventures,
            party_members,
        }
    }
}

#[async_trait]
impl PartyStatsPort for StaticPartyStats {
    async fn completed_task_count(&self, _character_id: CharacterId) -> Result<u32> {
        Ok(self.completed_tasks)
    }

    async fn completed_adventure_count(&self, _character_id: CharacterId) -> Result<u32> {
        Ok(self.completed_adventures)
    }

    async fn party_member_count(&self, _party_id: PartyId) -> Result<u32> {
        Ok(self.party_members)
    }
}

/// In-memory unlocked-achievement store.
#[derive(Debug, Default)]
pub struct InMemoryAchievementRepository {
    unlocks: RwLock<HashMap<CharacterId, Vec<Achievement>>>,
}

impl InMemoryAchievementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AchievementRepositoryPort for InMemoryAchievementRepository {
    async fn list_for_character(&self, character_id: CharacterId) -> Result<Vec<Achievement>> {
        Ok(self
            .unlocks
            .read()
            .await
            .get(&character_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, character_id: CharacterId, achievement: &Achievement) -> Result<()> {
        self.unlocks
            .write()
            .await
            .entry(character_id)
            .or_default()
            .push(achievement.clone());
        Ok(())
    }
}
