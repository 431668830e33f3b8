//! Task distribution - workload-balanced assignment of chores to members
//!
//! The distributor is a pure pass over the full task and member lists. It
//! scores every (task, member) pair and assigns greedily, hardest task first,
//! folding each assignment into the running workload before scoring the next
//! task. Harder tasks are placed while workloads are still most balanced so
//! they do not strand with already-overloaded members.

use serde::{Deserialize, Serialize};

use crate::entities::{Character, Task};
use crate::ids::{CharacterId, TaskId};

/// Weight given to the inverse-workload term of the suitability score.
const WORKLOAD_WEIGHT: f64 = 0.4;
/// Weight given to the level-vs-difficulty term.
const LEVEL_WEIGHT: f64 = 0.4;
/// Weight given to the task-frequency term.
const FREQUENCY_WEIGHT: f64 = 0.2;

/// Maximum tolerated relative workload spread, `(max - min) / max`.
const FAIRNESS_THRESHOLD: f64 = 0.2;

/// One proposed task assignment.
///
/// The score is a ranking artifact only; the persisted fact is the assignee
/// on the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub task_id: TaskId,
    pub character_id: CharacterId,
    pub score: f64,
}

/// Running workload of one member during a distribution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberWorkload {
    pub character_id: CharacterId,
    /// Sum of difficulty weights of assigned, incomplete tasks.
    pub total_difficulty: u32,
    pub task_count: u32,
}

/// Compute each member's current workload from their assigned, incomplete
/// tasks. Output order matches the input member order.
pub fn member_workloads(members: &[Character], tasks: &[Task]) -> Vec<MemberWorkload> {
    members
        .iter()
        .map(|member| {
            let mut total_difficulty = 0;
            let mut task_count = 0;
            for task in tasks {
                if task.assigned_to == Some(member.id) && !task.is_completed() {
                    total_difficulty += task.workload_weight();
                    task_count += 1;
                }
            }
            MemberWorkload {
                character_id: member.id,
                total_difficulty,
                task_count,
            }
        })
        .collect()
}

/// Suitability of one member for one task.
///
/// `0.4 * 1/(workload+1) + 0.4 * level/weight + 0.2 * frequency_factor`.
/// The `+1` keeps the workload term defined for idle members.
fn suitability_score(task: &Task, member: &Character, workload: &MemberWorkload) -> f64 {
    let workload_score = 1.0 / (f64::from(workload.total_difficulty) + 1.0);
    let level_score = f64::from(member.level) / f64::from(task.workload_weight());
    let frequency_score = task.frequency.distribution_factor();

    workload_score * WORKLOAD_WEIGHT
        + level_score * LEVEL_WEIGHT
        + frequency_score * FREQUENCY_WEIGHT
}

/// Assign every unassigned, incomplete task to exactly one member.
///
/// Tasks are processed hardest-first (stable for equal weights); each
/// assignment updates the assignee's workload before the next task is
/// scored, so the pass must run as one sequential unit. Ties on score break
/// to the earliest member in input order.
///
/// Returns assignments in processing order. An empty member list yields an
/// empty result; no side effects on the inputs - writing assignees onto the
/// tasks is the caller's job.
pub fn distribute_tasks(tasks: &[Task], members: &[Character]) -> Vec<Assignment> {
    if members.is_empty() {
        return Vec::new();
    }

    let mut workloads = member_workloads(members, tasks);

    let mut unassigned: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.is_assigned() && !task.is_completed())
        .collect();
    // Hardest first; sort_by is stable so equal weights keep input order.
    unassigned.sort_by(|a, b| b.workload_weight().cmp(&a.workload_weight()));

    let mut assignments = Vec::with_capacity(unassigned.len());
    for task in unassigned {
        let mut best: Option<(usize, f64)> = None;
        for (index, member) in members.iter().enumerate() {
            let score = suitability_score(task, member, &workloads[index]);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }

        if let Some((index, score)) = best {
            assignments.push(Assignment {
                task_id: task.id,
                character_id: members[index].id,
                score,
            });
            workloads[index].total_difficulty += task.workload_weight();
            workloads[index].task_count += 1;
        }
    }

    assignments
}

/// Check that a proposed distribution keeps the relative workload spread
/// within 20%: `(max - min) / max <= 0.2` over final workloads.
///
/// Final workloads are the existing assigned workloads plus the proposed
/// assignments. This is a post-hoc signal, never an error; remediation policy
/// belongs to the caller. All-zero workloads (nothing assigned anywhere) are
/// trivially fair.
pub fn validate_distribution(
    assignments: &[Assignment],
    tasks: &[Task],
    members: &[Character],
) -> bool {
    if members.is_empty() {
        return true;
    }

    let mut workloads = member_workloads(members, tasks);
    for assignment in assignments {
        let Some(task) = tasks.iter().find(|task| task.id == assignment.task_id) else {
            continue;
        };
        if let Some(workload) = workloads
            .iter_mut()
            .find(|workload| workload.character_id == assignment.character_id)
        {
            workload.total_difficulty += task.workload_weight();
            workload.task_count += 1;
        }
    }

    let max = workloads
        .iter()
        .map(|workload| workload.total_difficulty)
        .max()
        .unwrap_or(0);
    let min = workloads
        .iter()
        .map(|workload| workload.total_difficulty)
        .min()
        .unwrap_or(0);

    if max == 0 {
        return true;
    }

    f64::from(max - min) / f64::from(max) <= FAIRNESS_THRESHOLD
}
