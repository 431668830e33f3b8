//! Combat resolution - turning task completion into damage

use chrono::{DateTime, Utc};

use crate::entities::{
    AttackType, Character, CombatAction, CombatContribution, CombatTarget, Task,
};
use crate::value_objects::{CharacterClass, CombatStats, DamageChannel};

/// Damage dealt by one attack of the given tier through the class's channel.
pub fn damage_output(stats: &CombatStats, class: CharacterClass, attack: AttackType) -> f64 {
    let channel_stat = match class.damage_channel() {
        DamageChannel::Melee => stats.melee_damage,
        DamageChannel::Ranged => stats.ranged_damage,
        DamageChannel::Magic => stats.magic_damage,
        DamageChannel::Hybrid => (stats.melee_damage + stats.ranged_damage) / 2.0,
    };
    channel_stat * attack.damage_multiplier()
}

/// Resolve a task completion into one combat action per target.
///
/// The attack tier follows the task's frequency; damage is identical across
/// targets since the damage pools differ only in how rewards scale.
pub fn resolve_combat_actions(
    character: &Character,
    task: &Task,
    now: DateTime<Utc>,
) -> Vec<CombatAction> {
    let attack = AttackType::for_frequency(task.frequency);
    let stats = character.combat_stats();
    let damage = damage_output(&stats, character.class, attack);

    CombatTarget::ALL
        .iter()
        .map(|&target| CombatAction {
            attack_type: attack,
            damage,
            target,
            character_id: character.id,
            task_id: task.id,
            timestamp: now,
        })
        .collect()
}

/// Summarize resolved actions for persistence on the task: total damage
/// across all actions, attributed to the encounter channel.
pub fn contribution_summary(actions: &[CombatAction]) -> Option<CombatContribution> {
    let first = actions.first()?;
    Some(CombatContribution {
        damage: actions.iter().map(|action| action.damage).sum(),
        attack_type: first.attack_type,
        target: CombatTarget::Encounter,
    })
}
