//! Append-only combat action log.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{CombatAction, TaskId};

/// Append-only sink for resolved combat actions.
///
/// # Used By
/// - `TaskServiceImpl` - one action per target per completed task
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CombatLogPort: Send + Sync {
    /// Append one combat action
    async fn append(&self, action: &CombatAction) -> Result<()>;

    /// List actions recorded for a task
    async fn list_for_task(&self, task_id: TaskId) -> Result<Vec<CombatAction>>;
}
