//! Unlocked-achievement persistence operations.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{Achievement, CharacterId};

/// Persistence for achievements a character has unlocked.
///
/// # Used By
/// - `AchievementServiceImpl` - dedup of already-earned unlocks and
///   persistence of new ones
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AchievementRepositoryPort: Send + Sync {
    /// List achievements already unlocked by a character
    async fn list_for_character(&self, character_id: CharacterId) -> Result<Vec<Achievement>>;

    /// Persist a newly unlocked achievement
    async fn save(&self, character_id: CharacterId, achievement: &Achievement) -> Result<()>;
}
