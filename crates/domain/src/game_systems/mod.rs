//! Pure game systems - no I/O, randomness injected by the caller

pub mod combat;
pub mod distribution;
pub mod loot;
pub mod rewards;

pub use combat::{contribution_summary, damage_output, resolve_combat_actions};
pub use distribution::{
    distribute_tasks, member_workloads, validate_distribution, Assignment, MemberWorkload,
};
pub use loot::{generate_item, generate_items, ItemTemplate};
pub use rewards::{
    calculate_task_rewards, combat_reward_amounts, roll_pooled_drop, task_completion_amounts,
};
