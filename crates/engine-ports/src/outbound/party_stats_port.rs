//! Aggregate party statistics used by achievement checks.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{CharacterId, PartyId};

/// Aggregate count queries over party history.
///
/// # Used By
/// - `AchievementServiceImpl` - threshold checks against the catalog rules
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PartyStatsPort: Send + Sync {
    /// Number of tasks this character has completed
    async fn completed_task_count(&self, character_id: CharacterId) -> Result<u32>;

    /// Number of adventures this character has completed
    async fn completed_adventure_count(&self, character_id: CharacterId) -> Result<u32>;

    /// Current member count of a party
    async fn party_member_count(&self, party_id: PartyId) -> Result<u32>;
}
