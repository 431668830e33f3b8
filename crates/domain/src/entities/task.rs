//! Task entity - chores modeled as quests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{CombatContribution, Item};
use crate::error::DomainError;
use crate::ids::{CharacterId, PartyId, TaskId, TemplateId, UserId};
use crate::value_objects::{TaskDifficulty, TaskFrequency};

/// Life-cycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// Household category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskCategory {
    #[default]
    Chores,
    Work,
    Health,
    Learning,
    Social,
    Personal,
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chores => write!(f, "chores"),
            Self::Work => write!(f, "work"),
            Self::Health => write!(f, "health"),
            Self::Learning => write!(f, "learning"),
            Self::Social => write!(f, "social"),
            Self::Personal => write!(f, "personal"),
        }
    }
}

impl FromStr for TaskCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chores" => Ok(Self::Chores),
            "work" => Ok(Self::Work),
            "health" => Ok(Self::Health),
            "learning" => Ok(Self::Learning),
            "social" => Ok(Self::Social),
            "personal" => Ok(Self::Personal),
            _ => Err(DomainError::parse(format!("Unknown task category: {}", s))),
        }
    }
}

/// Reward configuration authored on a task or template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardConfig {
    pub xp: u32,
    pub gold: u32,
    /// Probability in [0, 1] that completing the task drops an item.
    pub item_chance: f64,
    /// Candidate pool for the drop. Empty means the drop is procedurally
    /// generated instead of drawn from a pool.
    #[serde(default)]
    pub possible_items: Vec<Item>,
}

/// A chore modeled as a quest.
///
/// Invariant: an assigned task has exactly one assignee, and its workload
/// contribution to that assignee equals its difficulty weight. Completed
/// tasks are immutable except for audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub party_id: PartyId,
    pub title: String,
    pub description: String,
    pub difficulty: TaskDifficulty,
    pub frequency: TaskFrequency,
    pub category: TaskCategory,
    pub status: TaskStatus,
    pub assigned_to: Option<CharacterId>,
    pub rewards: RewardConfig,
    /// Template this task was instantiated from, if any.
    pub template: Option<TemplateId>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<CharacterId>,
    pub combat_contribution: Option<CombatContribution>,
}

impl Task {
    pub fn new(
        party_id: PartyId,
        title: impl Into<String>,
        difficulty: TaskDifficulty,
        frequency: TaskFrequency,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            party_id,
            title: title.into(),
            description: String::new(),
            difficulty,
            frequency,
            category: TaskCategory::default(),
            status: TaskStatus::Pending,
            assigned_to: None,
            rewards: RewardConfig::default(),
            template: None,
            is_custom: true,
            created_at,
            created_by,
            completed_at: None,
            completed_by: None,
            combat_contribution: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_assignee(mut self, assignee: CharacterId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Workload weight this task contributes to its assignee.
    pub fn workload_weight(&self) -> u32 {
        self.difficulty.weight()
    }

    /// Assign this task to a member.
    pub fn assign_to(&mut self, assignee: CharacterId) {
        self.assigned_to = Some(assignee);
    }

    /// Mark the task completed, recording who, when, and the combat summary.
    ///
    /// Completing an already-completed task is a constraint violation.
    pub fn complete(
        &mut self,
        completed_by: CharacterId,
        contribution: CombatContribution,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::constraint(format!(
                "task {} is already completed",
                self.id
            )));
        }
        self.status = TaskStatus::Completed;
        self.completed_by = Some(completed_by);
        self.completed_at = Some(now);
        self.combat_contribution = Some(contribution);
        Ok(())
    }
}

/// Authoring-time template from which recurring tasks are instantiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub id: TemplateId,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub difficulty: TaskDifficulty,
    pub frequency: TaskFrequency,
    pub rewards: RewardConfig,
}

impl TaskTemplate {
    /// Instantiate a pending task from this template.
    pub fn instantiate(
        &self,
        party_id: PartyId,
        assignee: CharacterId,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Task {
        Task {
            id: TaskId::new(),
            party_id,
            title: self.title.clone(),
            description: self.description.clone(),
            difficulty: self.difficulty,
            frequency: self.frequency,
            category: self.category,
            status: TaskStatus::Pending,
            assigned_to: Some(assignee),
            rewards: self.rewards.clone(),
            template: Some(self.id),
            is_custom: false,
            created_at: now,
            created_by,
            completed_at: None,
            completed_by: None,
            combat_contribution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AttackType;

    fn pending_task() -> Task {
        Task::new(
            PartyId::new(),
            "Clean the kitchen",
            TaskDifficulty::Medium,
            TaskFrequency::Daily,
            UserId::new(),
            Utc::now(),
        )
    }

    #[test]
    fn new_task_is_pending_and_unassigned() {
        let task = pending_task();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.is_assigned());
        assert!(!task.is_completed());
    }

    #[test]
    fn workload_weight_equals_difficulty_weight() {
        let task = pending_task();
        assert_eq!(task.workload_weight(), TaskDifficulty::Medium.weight());
    }

    #[test]
    fn complete_records_audit_fields() {
        let mut task = pending_task();
        let member = CharacterId::new();
        let now = Utc::now();
        task.complete(
            member,
            CombatContribution {
                damage: 25.0,
                attack_type: AttackType::Basic,
                target: crate::entities::CombatTarget::Encounter,
            },
            now,
        )
        .expect("first completion succeeds");

        assert!(task.is_completed());
        assert_eq!(task.completed_by, Some(member));
        assert_eq!(task.completed_at, Some(now));
        assert!(task.combat_contribution.is_some());
    }

    #[test]
    fn completing_twice_is_rejected() {
        let mut task = pending_task();
        let contribution = CombatContribution {
            damage: 25.0,
            attack_type: AttackType::Basic,
            target: crate::entities::CombatTarget::Encounter,
        };
        task.complete(CharacterId::new(), contribution.clone(), Utc::now())
            .expect("first completion succeeds");
        let err = task
            .complete(CharacterId::new(), contribution, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
    }

    #[test]
    fn template_instantiation_copies_reward_config() {
        let template = TaskTemplate {
            id: TemplateId::new(),
            title: "Take out the trash".to_string(),
            description: "Bins to the curb before pickup".to_string(),
            category: TaskCategory::Chores,
            difficulty: TaskDifficulty::Easy,
            frequency: TaskFrequency::Weekly,
            rewards: RewardConfig {
                xp: 50,
                gold: 25,
                item_chance: 0.2,
                possible_items: Vec::new(),
            },
        };

        let assignee = CharacterId::new();
        let task = template.instantiate(PartyId::new(), assignee, UserId::new(), Utc::now());

        assert_eq!(task.template, Some(template.id));
        assert_eq!(task.assigned_to, Some(assignee));
        assert_eq!(task.rewards.xp, 50);
        assert!(!task.is_custom);
        assert_eq!(task.status, TaskStatus::Pending);
    }
}
