//! Character Service - Application service for character lifecycle
//!
//! Creation from class templates, experience grants with level-up, stat
//! point allocation, and derived combat stats. Leveling mutations run
//! behind a per-character lock; xp and attributes are read-modify-write.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use chorequest_domain::{
    AttributeSet, Character, CharacterClass, CharacterId, CombatStats, PartyId, UserId,
};
use chorequest_engine_ports::outbound::{CharacterRepositoryPort, ClockPort};

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub user_id: UserId,
    pub party_id: PartyId,
    pub name: String,
    pub class: CharacterClass,
}

/// Character service trait defining the application use cases
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create a character from its class template
    async fn create_character(&self, request: CreateCharacterRequest) -> Result<Character>;

    /// Get a character by ID
    async fn get_character(&self, character_id: CharacterId) -> Result<Option<Character>>;

    /// Grant experience, applying at most one level-up
    async fn add_experience(&self, character_id: CharacterId, amount: u64) -> Result<Character>;

    /// Spend unspent level-up points on attributes
    async fn allocate_stat_points(
        &self,
        character_id: CharacterId,
        allocation: AttributeSet,
    ) -> Result<Character>;

    /// Derived combat stats for a character
    async fn combat_stats(&self, character_id: CharacterId) -> Result<CombatStats>;
}

/// Default implementation of CharacterService using port abstractions
#[derive(Clone)]
pub struct CharacterServiceImpl {
    character_repository: Arc<dyn CharacterRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    character_locks: Arc<DashMap<CharacterId, Arc<Mutex<()>>>>,
}

impl CharacterServiceImpl {
    pub fn new(
        character_repository: Arc<dyn CharacterRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repository,
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

    fn validate_create_request(request: &CreateCharacterRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            anyhow::bail!("Character name cannot be empty");
        }
        if request.name.len() > 255 {
            anyhow::bail!("Character name cannot exceed 255 characters");
        }
        Ok(())
    }

    async fn load(&self, character_id: CharacterId) -> Result<Character> {
        self.character_repository
            .get(character_id)
            .await
            .context("Failed to get character from repository")?
            .ok_or_else(|| anyhow::anyhow!("Character not found: {}", character_id))
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self, request), fields(name = %request.name, class = %request.class))]
    async fn create_character(&self, request: CreateCharacterRequest) -> Result<Character> {
        Self::validate_create_request(&request)?;

        let character = Character::new(
            request.user_id,
            request.party_id,
            request.name,
            request.class,
            self.clock.now(),
        );
        self.character_repository
            .create(&character)
            .await
            .context("Failed to create character")?;

        info!(character_id = %character.id, class = %character.class, "Character created");
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn get_character(&self, character_id: CharacterId) -> Result<Option<Character>> {
        debug!(character_id = %character_id, "Fetching character");
        self.character_repository
            .get(character_id)
            .await
            .context("Failed to get character from repository")
    }

    #[instrument(skip(self))]
    async fn add_experience(&self, character_id: CharacterId, amount: u64) -> Result<Character> {
        let lock = self.lock_for(character_id);
        let _guard = lock.lock().await;

        let mut character = self.load(character_id).await?;
        let leveled = character.add_experience(amount, self.clock.now());
        self.character_repository
            .update(&character)
            .await
            .context("Failed to persist experience grant")?;

        if leveled {
            info!(
                character_id = %character_id,
                level = character.level,
                "Character leveled up"
            );
        }
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn allocate_stat_points(
        &self,
        character_id: CharacterId,
        allocation: AttributeSet,
    ) -> Result<Character> {
        let lock = self.lock_for(character_id);
        let _guard = lock.lock().await;

        let mut character = self.load(character_id).await?;
        character
            .allocate_stat_points(allocation, self.clock.now())
            .context("Stat allocation rejected")?;
        self.character_repository
            .update(&character)
            .await
            .context("Failed to persist stat allocation")?;

        Ok(character)
    }

    #[instrument(skip(self))]
    async fn combat_stats(&self, character_id: CharacterId) -> Result<CombatStats> {
        let character = self.load(character_id).await?;
        Ok(character.combat_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorequest_engine_ports::outbound::{FixedClock, MockCharacterRepositoryPort};
    use chrono::Utc;

    fn request(name: &str) -> CreateCharacterRequest {
        CreateCharacterRequest {
            user_id: UserId::new(),
            party_id: PartyId::new(),
            name: name.to_string(),
            class: CharacterClass::Mage,
        }
    }

    #[tokio::test]
    async fn create_character_uses_the_class_template() {
        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo
            .expect_create()
            .times(1)
            .withf(|character| {
                character.level == 1 && character.attributes.intellect == 12
            })
            .returning(|_| Ok(()));

        let service =
            CharacterServiceImpl::new(Arc::new(character_repo), Arc::new(FixedClock::epoch()));
        let character = service.create_character(request("Elba")).await.expect("create");

        assert_eq!(character.class, CharacterClass::Mage);
        assert_eq!(character.attributes.intellect, 12);
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo.expect_create().never();

        let service =
            CharacterServiceImpl::new(Arc::new(character_repo), Arc::new(FixedClock::epoch()));
        let err = service.create_character(request("   ")).await.unwrap_err();

        assert!(err.to_string().contains("cannot be empty"));
    }

    #[tokio::test]
    async fn experience_grant_persists_the_level_up() {
        let stored = Character::new(
            UserId::new(),
            PartyId::new(),
            "Elba",
            CharacterClass::Mage,
            Utc::now(),
        );
        let character_id = stored.id;

        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        character_repo
            .expect_update()
            .times(1)
            .withf(|character| character.level == 2 && character.unspent_stat_points == 5)
            .returning(|_| Ok(()));

        let service =
            CharacterServiceImpl::new(Arc::new(character_repo), Arc::new(FixedClock::epoch()));
        let character = service
            .add_experience(character_id, 300)
            .await
            .expect("grant");

        assert_eq!(character.level, 2);
    }

    #[tokio::test]
    async fn combat_stats_reflect_attributes() {
        let stored = Character::new(
            UserId::new(),
            PartyId::new(),
            "Elba",
            CharacterClass::Mage,
            Utc::now(),
        );
        let character_id = stored.id;

        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));

        let service =
            CharacterServiceImpl::new(Arc::new(character_repo), Arc::new(FixedClock::epoch()));
        let stats = service.combat_stats(character_id).await.expect("stats");

        // Mage base INT 12: magic 5 + 2*12.
        assert_eq!(stats.magic_damage, 29.0);
    }

    #[tokio::test]
    async fn over_budget_allocation_is_rejected() {
        let stored = Character::new(
            UserId::new(),
            PartyId::new(),
            "Elba",
            CharacterClass::Mage,
            Utc::now(),
        );
        let character_id = stored.id;

        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        character_repo.expect_update().never();

        let service =
            CharacterServiceImpl::new(Arc::new(character_repo), Arc::new(FixedClock::epoch()));
        let err = service
            .allocate_stat_points(character_id, AttributeSet::new(6, 0, 0, 0))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Stat allocation rejected"));
    }
}
