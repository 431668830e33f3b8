//! Task Service - completion with combat resolution, and template
//! instantiation
//!
//! Completing a task is the combat entry point: the task's frequency picks
//! the attack tier, the character's class picks the damage channel, and one
//! action lands on each of the three targets. The actions are logged, the
//! task is closed with its contribution summary, and rewards are forwarded -
//! the task bundle plus one combat bundle per target.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use chorequest_domain::game_systems::combat;
use chorequest_domain::{
    CharacterId, CombatAction, DomainError, PartyId, Task, TaskId, TemplateId, UserId,
};
use chorequest_engine_ports::outbound::{
    CharacterRepositoryPort, ClockPort, CombatLogPort, TaskRepositoryPort,
};

use crate::application::services::reward_service::{RewardError, RewardService};

/// Error type for task operations
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error("Character not found for user {0}")]
    CharacterNotFound(UserId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Task service trait defining the application use cases
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Complete a task on behalf of a user: resolve combat actions against
    /// all targets, log them, close the task, and forward rewards. Returns
    /// the resolved actions.
    async fn complete_task(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> Result<Vec<CombatAction>, TaskError>;

    /// Instantiate a pending task from a template, pre-assigned to a member.
    async fn create_task_from_template(
        &self,
        template_id: TemplateId,
        assignee: CharacterId,
        party_id: PartyId,
        created_by: UserId,
    ) -> Result<Task, TaskError>;
}

/// Default implementation of TaskService using port abstractions
#[derive(Clone)]
pub struct TaskServiceImpl {
    task_repository: Arc<dyn TaskRepositoryPort>,
    character_repository: Arc<dyn CharacterRepositoryPort>,
    combat_log: Arc<dyn CombatLogPort>,
    reward_service: Arc<dyn RewardService>,
    clock: Arc<dyn ClockPort>,
}

impl TaskServiceImpl {
    pub fn new(
        task_repository: Arc<dyn TaskRepositoryPort>,
        character_repository: Arc<dyn CharacterRepositoryPort>,
        combat_log: Arc<dyn CombatLogPort>,
        reward_service: Arc<dyn RewardService>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            task_repository,
            character_repository,
            combat_log,
            reward_service,
            clock,
        }
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    #[instrument(skip(self))]
    async fn complete_task(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> Result<Vec<CombatAction>, TaskError> {
        let mut task = self
            .task_repository
            .get(task_id)
            .await?
            .ok_or(TaskError::TaskNotFound(task_id))?;
        // Reject up front so a double completion leaves no partial log entries.
        if task.is_completed() {
            return Err(TaskError::Domain(DomainError::constraint(format!(
                "task {} is already completed",
                task.id
            ))));
        }
        let character = self
            .character_repository
            .get_by_user(user_id)
            .await?
            .ok_or(TaskError::CharacterNotFound(user_id))?;

        let now = self.clock.now();
        let actions = combat::resolve_combat_actions(&character, &task, now);
        for action in &actions {
            self.combat_log.append(action).await?;
        }

        if let Some(contribution) = combat::contribution_summary(&actions) {
            task.complete(character.id, contribution, now)?;
        }
        self.task_repository.update(&task).await?;

        info!(
            task_id = %task_id,
            character_id = %character.id,
            actions = actions.len(),
            "Task completed, forwarding rewards"
        );

        self.reward_service
            .distribute_task_rewards(&task, user_id)
            .await?;
        for action in &actions {
            self.reward_service
                .distribute_combat_rewards(action.damage, action.target, user_id)
                .await?;
        }

        Ok(actions)
    }

    #[instrument(skip(self))]
    async fn create_task_from_template(
        &self,
        template_id: TemplateId,
        assignee: CharacterId,
        party_id: PartyId,
        created_by: UserId,
    ) -> Result<Task, TaskError> {
        let template = self
            .task_repository
            .get_template(template_id)
            .await?
            .ok_or(TaskError::TemplateNotFound(template_id))?;

        let task = template.instantiate(party_id, assignee, created_by, self.clock.now());
        self.task_repository.create(&task).await?;

        info!(task_id = %task.id, template_id = %template_id, "Task created from template");
        Ok(task)
    }
}
