//! Reward calculation - multipliers, probability rolls, and bundle math
//!
//! Three reward paths with deliberately different drop semantics:
//! procedural task rewards dampen the configured item chance by a global
//! 0.1, while the configured-pool path and combat drops roll the chance
//! undampened. The discrepancy is inherited behavior; do not unify.

use crate::entities::{CombatTarget, Item, RewardConfig, Task};
use crate::game_systems::loot;
use crate::value_objects::{RewardBundle, TaskDifficulty, TaskFrequency};

/// Base xp for completing a task, before multipliers.
pub const BASE_TASK_XP: f64 = 100.0;
/// Base gold for completing a task, before multipliers.
pub const BASE_TASK_GOLD: f64 = 50.0;
/// Global dampening applied to the configured item chance on the procedural
/// task path only.
pub const ITEM_CHANCE_DAMPENING: f64 = 0.1;
/// Fraction of dealt damage converted to xp on the combat path.
pub const COMBAT_XP_RATE: f64 = 0.5;
/// Fraction of dealt damage converted to gold on the combat path.
pub const COMBAT_GOLD_RATE: f64 = 0.2;
/// Maximum catalog candidates considered for a combat drop.
pub const COMBAT_DROP_CANDIDATES: usize = 10;

/// Deterministic xp/gold for completing a task of the given difficulty and
/// frequency: `floor(base * difficulty_mult * frequency_mult)`.
pub fn task_completion_amounts(
    difficulty: TaskDifficulty,
    frequency: TaskFrequency,
) -> (u32, u32) {
    let multiplier = difficulty.reward_multiplier() * frequency.reward_multiplier();
    (
        (BASE_TASK_XP * multiplier).floor() as u32,
        (BASE_TASK_GOLD * multiplier).floor() as u32,
    )
}

/// Compute the procedural reward bundle for a task completion.
///
/// Draws once against the dampened item chance; on success exactly one item
/// is generated, with its theme category rolled uniformly. A zero configured
/// chance can never drop.
pub fn calculate_task_rewards(task: &Task, draw: &mut dyn FnMut() -> f64) -> RewardBundle {
    let (xp, gold) = task_completion_amounts(task.difficulty, task.frequency);

    let chance = task.rewards.item_chance * ITEM_CHANCE_DAMPENING;
    let items = if draw() < chance {
        loot::generate_items(1, draw)
    } else {
        Vec::new()
    };

    RewardBundle { xp, gold, items }
}

/// Roll the configured candidate pool of a task, undampened.
///
/// Returns the drawn item, or None when the chance misses, the chance is
/// zero, or the pool is empty.
pub fn roll_pooled_drop(config: &RewardConfig, draw: &mut dyn FnMut() -> f64) -> Option<Item> {
    if config.item_chance <= 0.0 || config.possible_items.is_empty() {
        return None;
    }
    if draw() > config.item_chance {
        return None;
    }
    let index = ((draw() * config.possible_items.len() as f64) as usize)
        .min(config.possible_items.len() - 1);
    config.possible_items.get(index).cloned()
}

/// Deterministic xp/gold for damage dealt to a target:
/// `floor(damage * rate * target_mult)`.
pub fn combat_reward_amounts(damage: f64, target: CombatTarget) -> (u32, u32) {
    let multiplier = target.reward_multiplier();
    (
        (damage * COMBAT_XP_RATE * multiplier).floor() as u32,
        (damage * COMBAT_GOLD_RATE * multiplier).floor() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ItemCategory, ItemKind, ItemStats};
    use crate::ids::{ItemId, PartyId, UserId};
    use crate::value_objects::Rarity;
    use chrono::Utc;

    fn task(difficulty: TaskDifficulty, frequency: TaskFrequency, item_chance: f64) -> Task {
        let mut task = Task::new(
            PartyId::new(),
            "task",
            difficulty,
            frequency,
            UserId::new(),
            Utc::now(),
        );
        task.rewards.item_chance = item_chance;
        task
    }

    fn pool_item(name: &str) -> Item {
        Item {
            id: ItemId::new(),
            name: name.to_string(),
            description: String::new(),
            rarity: Rarity::Common,
            kind: ItemKind::Consumable,
            category: ItemCategory::Fantasy,
            stats: ItemStats::default(),
            value: 10,
        }
    }

    #[test]
    fn scenario_medium_daily_amounts() {
        let (xp, gold) = task_completion_amounts(TaskDifficulty::Medium, TaskFrequency::Daily);
        assert_eq!(xp, 150);
        assert_eq!(gold, 75);
    }

    #[test]
    fn very_hard_monthly_amounts() {
        let (xp, gold) = task_completion_amounts(TaskDifficulty::VeryHard, TaskFrequency::Monthly);
        assert_eq!(xp, 900);
        assert_eq!(gold, 450);
    }

    #[test]
    fn zero_item_chance_never_drops() {
        let task = task(TaskDifficulty::Easy, TaskFrequency::Daily, 0.0);
        // Even a draw of exactly 0.0 must not drop against a zero chance.
        for draw_value in [0.0, 0.01, 0.5, 0.99] {
            let mut draw = move || draw_value;
            let bundle = calculate_task_rewards(&task, &mut draw);
            assert!(bundle.items.is_empty());
        }
    }

    #[test]
    fn drop_chance_is_dampened_by_ten() {
        let task = task(TaskDifficulty::Easy, TaskFrequency::Daily, 1.0);
        // Effective chance is 0.1: a 0.05 roll drops, a 0.15 roll does not.
        let mut draws = vec![0.05, 0.0, 0.0, 0.0, 0.0].into_iter();
        let mut draw = move || draws.next().expect("draws");
        let bundle = calculate_task_rewards(&task, &mut draw);
        assert_eq!(bundle.items.len(), 1);

        let mut draw = || 0.15;
        let bundle = calculate_task_rewards(&task, &mut draw);
        assert!(bundle.items.is_empty());
    }

    #[test]
    fn combat_amounts_follow_target_multiplier() {
        // Scenario: 50 damage against the boss.
        let (xp, gold) = combat_reward_amounts(50.0, CombatTarget::Boss);
        assert_eq!(xp, 125);
        assert_eq!(gold, 50);

        let (xp, gold) = combat_reward_amounts(50.0, CombatTarget::Encounter);
        assert_eq!(xp, 25);
        assert_eq!(gold, 10);
    }

    #[test]
    fn boss_reward_is_five_times_encounter() {
        let (boss_xp, boss_gold) = combat_reward_amounts(40.0, CombatTarget::Boss);
        let (enc_xp, enc_gold) = combat_reward_amounts(40.0, CombatTarget::Encounter);
        assert_eq!(boss_xp, enc_xp * 5);
        assert_eq!(boss_gold, enc_gold * 5);
    }

    #[test]
    fn pooled_drop_hits_within_chance() {
        let config = RewardConfig {
            xp: 0,
            gold: 0,
            item_chance: 0.5,
            possible_items: vec![pool_item("Soap"), pool_item("Sponge")],
        };
        let mut draws = vec![0.4, 0.9].into_iter();
        let mut draw = move || draws.next().expect("draws");
        let item = roll_pooled_drop(&config, &mut draw).expect("drop");
        assert_eq!(item.name, "Sponge");
    }

    #[test]
    fn pooled_drop_misses_past_chance() {
        let config = RewardConfig {
            xp: 0,
            gold: 0,
            item_chance: 0.5,
            possible_items: vec![pool_item("Soap")],
        };
        let mut draw = || 0.6;
        assert!(roll_pooled_drop(&config, &mut draw).is_none());
    }

    #[test]
    fn pooled_drop_requires_a_pool() {
        let config = RewardConfig {
            xp: 0,
            gold: 0,
            item_chance: 1.0,
            possible_items: Vec::new(),
        };
        let mut draw = || 0.0;
        assert!(roll_pooled_drop(&config, &mut draw).is_none());
    }
}
