//! Append-only reward audit log.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{RewardRecord, UserId};

/// Append-only audit sink for reward distributions.
///
/// # Used By
/// - `RewardServiceImpl` - one record per distribution, after application
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RewardLogPort: Send + Sync {
    /// Append one distribution record
    async fn append(&self, record: &RewardRecord) -> Result<()>;

    /// List records for a user, newest first
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RewardRecord>>;
}
