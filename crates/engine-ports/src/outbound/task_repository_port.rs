//! Task and task-template persistence operations.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{PartyId, Task, TaskId, TaskTemplate, TemplateId};

/// Task persistence operations.
///
/// # Used By
/// - `TaskServiceImpl` - completion and template instantiation
/// - `DistributionServiceImpl` - loading the backlog and writing assignees
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TaskRepositoryPort: Send + Sync {
    /// Create a new task
    async fn create(&self, task: &Task) -> Result<()>;

    /// Get a task by ID
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// List all tasks in a party
    async fn list(&self, party_id: PartyId) -> Result<Vec<Task>>;

    /// Persist a mutated task
    async fn update(&self, task: &Task) -> Result<()>;

    /// Get a task template by ID
    async fn get_template(&self, id: TemplateId) -> Result<Option<TaskTemplate>>;
}
