//! Achievement Service - threshold checks against the fixed catalog
//!
//! Walks the catalog's automatic unlock rules against the party stats,
//! skips anything already earned, persists new unlocks, and pays their
//! flat bundles through the reward path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use chorequest_domain::{
    achievement_catalog, Achievement, AchievementMetric, Character, CharacterId,
};
use chorequest_engine_ports::outbound::{
    AchievementRepositoryPort, CharacterRepositoryPort, ClockPort, PartyStatsPort,
};

use crate::application::services::reward_service::RewardService;

/// Achievement service trait defining the application use cases
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AchievementService: Send + Sync {
    /// Check the catalog's automatic rules for a character, unlock and pay
    /// out anything newly earned, and return the new unlocks.
    async fn check_and_award(&self, character_id: CharacterId) -> Result<Vec<Achievement>>;
}

/// Default implementation of AchievementService using port abstractions
#[derive(Clone)]
pub struct AchievementServiceImpl {
    character_repository: Arc<dyn CharacterRepositoryPort>,
    achievement_repository: Arc<dyn AchievementRepositoryPort>,
    party_stats: Arc<dyn PartyStatsPort>,
    reward_service: Arc<dyn RewardService>,
    clock: Arc<dyn ClockPort>,
}

impl AchievementServiceImpl {
    pub fn new(
        character_repository: Arc<dyn CharacterRepositoryPort>,
        achievement_repository: Arc<dyn AchievementRepositoryPort>,
        party_stats: Arc<dyn PartyStatsPort>,
        reward_service: Arc<dyn RewardService>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repository,
            achievement_repository,
            party_stats,
            reward_service,
            clock,
        }
    }

    /// Current value of one metric for a character.
    async fn metric_value(&self, metric: AchievementMetric, character: &Character) -> Result<u32> {
        match metric {
            AchievementMetric::CompletedTasks => self
                .party_stats
                .completed_task_count(character.id)
                .await
                .context("Failed to count completed tasks"),
            AchievementMetric::CompletedAdventures => self
                .party_stats
                .completed_adventure_count(character.id)
                .await
                .context("Failed to count completed adventures"),
            AchievementMetric::PartySize => self
                .party_stats
                .party_member_count(character.party_id)
                .await
                .context("Failed to count party members"),
            AchievementMetric::UniqueItems => Ok(character.unique_item_count() as u32),
        }
    }
}

#[async_trait]
impl AchievementService for AchievementServiceImpl {
    #[instrument(skip(self))]
    async fn check_and_award(&self, character_id: CharacterId) -> Result<Vec<Achievement>> {
        let character = self
            .character_repository
            .get(character_id)
            .await
            .context("Failed to load character for achievement check")?
            .ok_or_else(|| anyhow::anyhow!("Character not found: {}", character_id))?;

        let earned_titles: HashSet<String> = self
            .achievement_repository
            .list_for_character(character_id)
            .await
            .context("Failed to list earned achievements")?
            .into_iter()
            .map(|achievement| achievement.title)
            .collect();

        let mut unlocked = Vec::new();
        for template in achievement_catalog() {
            let Some(rule) = template.unlock_rule else {
                continue;
            };
            if earned_titles.contains(template.title) {
                continue;
            }

            let value = self.metric_value(rule.metric, &character).await?;
            debug!(
                title = template.title,
                value,
                threshold = rule.threshold,
                "Checked achievement rule"
            );
            if value < rule.threshold {
                continue;
            }

            let achievement = Achievement::unlock_from(template, self.clock.now());
            self.achievement_repository
                .save(character_id, &achievement)
                .await
                .context("Failed to persist achievement unlock")?;
            self.reward_service
                .distribute_achievement_rewards(&achievement, character.user_id)
                .await?;

            info!(title = template.title, character_id = %character_id, "Achievement unlocked");
            unlocked.push(achievement);
        }

        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::reward_service::MockRewardService;
    use chorequest_domain::value_objects::CharacterClass;
    use chorequest_domain::{PartyId, RewardBundle, UserId};
    use chorequest_engine_ports::outbound::{
        FixedClock, MockAchievementRepositoryPort, MockCharacterRepositoryPort,
        MockPartyStatsPort,
    };
    use chrono::Utc;

    fn character() -> Character {
        Character::new(
            UserId::new(),
            PartyId::new(),
            "Greta",
            CharacterClass::Warrior,
            Utc::now(),
        )
    }

    fn stats(tasks: u32, adventures: u32, party: u32) -> MockPartyStatsPort {
        let mut port = MockPartyStatsPort::new();
        port.expect_completed_task_count()
            .returning(move |_| Ok(tasks));
        port.expect_completed_adventure_count()
            .returning(move |_| Ok(adventures));
        port.expect_party_member_count()
            .returning(move |_| Ok(party));
        port
    }

    fn service_with(
        fighter: Character,
        stats_port: MockPartyStatsPort,
        already_earned: Vec<Achievement>,
        expected_unlocks: usize,
    ) -> AchievementServiceImpl {
        let mut character_repo = MockCharacterRepositoryPort::new();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(fighter.clone())));

        let mut achievement_repo = MockAchievementRepositoryPort::new();
        achievement_repo
            .expect_list_for_character()
            .returning(move |_| Ok(already_earned.clone()));
        achievement_repo
            .expect_save()
            .times(expected_unlocks)
            .returning(|_, _| Ok(()));

        let mut reward_service = MockRewardService::new();
        reward_service
            .expect_distribute_achievement_rewards()
            .times(expected_unlocks)
            .returning(|_, _| Ok(RewardBundle::default()));

        AchievementServiceImpl::new(
            Arc::new(character_repo),
            Arc::new(achievement_repo),
            Arc::new(stats_port),
            Arc::new(reward_service),
            Arc::new(FixedClock::epoch()),
        )
    }

    #[tokio::test]
    async fn no_thresholds_met_yields_no_unlocks() {
        let fighter = character();
        let service = service_with(fighter.clone(), stats(5, 0, 1), Vec::new(), 0);

        let unlocked = service.check_and_award(fighter.id).await.expect("check");
        assert!(unlocked.is_empty());
    }

    #[tokio::test]
    async fn task_master_unlocks_at_one_hundred_tasks() {
        let fighter = character();
        let service = service_with(fighter.clone(), stats(100, 0, 1), Vec::new(), 1);

        let unlocked = service.check_and_award(fighter.id).await.expect("check");
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].title, "Task Master");
        assert_eq!(unlocked[0].reward.xp, 1000);
    }

    #[tokio::test]
    async fn already_earned_achievements_are_not_reawarded() {
        let fighter = character();
        let template = &achievement_catalog()[0];
        let earned = Achievement::unlock_from(template, Utc::now());
        let service = service_with(fighter.clone(), stats(150, 0, 1), vec![earned], 0);

        let unlocked = service.check_and_award(fighter.id).await.expect("check");
        assert!(unlocked.is_empty());
    }

    #[tokio::test]
    async fn multiple_rules_can_fire_in_one_check() {
        let fighter = character();
        // 100 tasks and a 5-member party: Task Master and Party Animal.
        let service = service_with(fighter.clone(), stats(100, 0, 5), Vec::new(), 2);

        let unlocked = service.check_and_award(fighter.id).await.expect("check");
        let titles: Vec<&str> = unlocked
            .iter()
            .map(|achievement| achievement.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Task Master", "Party Animal"]);
    }
}
