//! Distribution Service - Application service for workload-balanced task
//! assignment
//!
//! Wraps the pure distribution pass with I/O: loads the party's tasks and
//! roster, runs the pass behind a per-party lock, and persists the assignee
//! onto each task. The pass mutates a running workload accumulator between
//! tasks, so two concurrent passes over the same party would race; the lock
//! serializes them per party, not per task.

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use chorequest_domain::game_systems::distribution;
use chorequest_domain::{Assignment, PartyId};
use chorequest_engine_ports::outbound::{CharacterRepositoryPort, TaskRepositoryPort};

/// Distribution service trait defining the application use cases
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DistributionService: Send + Sync {
    /// Assign every unassigned task in the party to exactly one member and
    /// persist the assignments. Returns them in processing order
    /// (hardest task first).
    async fn distribute_tasks(&self, party_id: PartyId) -> Result<Vec<Assignment>>;

    /// Check whether a proposed distribution keeps the relative workload
    /// spread within 20%. A `false` result is a signal, not an error;
    /// remediation policy belongs to the caller.
    async fn validate_distribution(
        &self,
        party_id: PartyId,
        assignments: Vec<Assignment>,
    ) -> Result<bool>;
}

/// Default implementation of DistributionService using port abstractions
#[derive(Clone)]
pub struct DistributionServiceImpl {
    task_repository: Arc<dyn TaskRepositoryPort>,
    character_repository: Arc<dyn CharacterRepositoryPort>,
    party_locks: Arc<DashMap<PartyId, Arc<Mutex<()>>>>,
}

impl DistributionServiceImpl {
    pub fn new(
        task_repository: Arc<dyn TaskRepositoryPort>,
        character_repository: Arc<dyn CharacterRepositoryPort>,
    ) -> Self {
        Self {
            task_repository,
            character_repository,
            party_locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, party_id: PartyId) -> Arc<Mutex<()>> {
        self.party_locks
            .entry(party_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl DistributionService for DistributionServiceImpl {
    #[instrument(skip(self))]
    async fn distribute_tasks(&self, party_id: PartyId) -> Result<Vec<Assignment>> {
        let lock = self.lock_for(party_id);
        let _guard = lock.lock().await;

        let tasks = self
            .task_repository
            .list(party_id)
            .await
            .context("Failed to list tasks for distribution")?;
        let members = self
            .character_repository
            .list(party_id)
            .await
            .context("Failed to list party members for distribution")?;

        if members.is_empty() {
            warn!(party_id = %party_id, "No members to distribute tasks to");
            return Ok(Vec::new());
        }

        let assignments = distribution::distribute_tasks(&tasks, &members);
        debug!(
            party_id = %party_id,
            task_count = tasks.len(),
            assignment_count = assignments.len(),
            "Computed distribution pass"
        );

        for assignment in &assignments {
            let Some(task) = tasks.iter().find(|task| task.id == assignment.task_id) else {
                continue;
            };
            let mut task = task.clone();
            task.assign_to(assignment.character_id);
            self.task_repository
                .update(&task)
                .await
                .context("Failed to persist task assignment")?;
        }

        info!(
            party_id = %party_id,
            assigned = assignments.len(),
            "Distributed tasks"
        );
        Ok(assignments)
    }

    #[instrument(skip(self, assignments))]
    async fn validate_distribution(
        &self,
        party_id: PartyId,
        assignments: Vec<Assignment>,
    ) -> Result<bool> {
        let tasks = self
            .task_repository
            .list(party_id)
            .await
            .context("Failed to list tasks for validation")?;
        let members = self
            .character_repository
            .list(party_id)
            .await
            .context("Failed to list party members for validation")?;

        let fair = distribution::validate_distribution(&assignments, &tasks, &members);
        if !fair {
            debug!(party_id = %party_id, "Distribution exceeds fairness threshold");
        }
        Ok(fair)
    }
}
