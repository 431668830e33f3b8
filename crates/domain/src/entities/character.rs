//! Character entity - a party member's RPG avatar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{InventoryEntry, Item};
use crate::error::DomainError;
use crate::ids::{CharacterId, PartyId, UserId};
use crate::value_objects::{AttributeSet, CharacterClass, CombatStats};

/// Stat points granted on level-up and awaiting allocation.
pub const STAT_POINTS_PER_LEVEL: u32 = 5;

/// Experience required to reach a level: `floor(100 * level^1.5)`.
pub fn experience_for_level(level: u32) -> u64 {
    (100.0 * f64::from(level).powf(1.5)).floor() as u64
}

/// A party member's character.
///
/// Created at party join, mutated by leveling and inventory changes, never
/// deleted while the party exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub party_id: PartyId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    /// Effective attributes: class template at current level plus allocations.
    pub attributes: AttributeSet,
    /// Player-allocated bonus points, preserved across level-ups.
    pub allocated_attributes: AttributeSet,
    pub unspent_stat_points: u32,
    pub inventory: Vec<InventoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(
        user_id: UserId,
        party_id: PartyId,
        name: impl Into<String>,
        class: CharacterClass,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            user_id,
            party_id,
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            gold: 0,
            attributes: class.template().base_attributes,
            allocated_attributes: AttributeSet::default(),
            unspent_stat_points: 0,
            inventory: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self.attributes = self
            .class
            .template()
            .attributes_at_level(self.level)
            .add(&self.allocated_attributes);
        self
    }

    /// Derived combat stats for the current attributes.
    pub fn combat_stats(&self) -> CombatStats {
        CombatStats::derive(&self.attributes)
    }

    /// Grant experience. At most one level is gained per grant; returns true
    /// if the character leveled up.
    pub fn add_experience(&mut self, amount: u64, now: DateTime<Utc>) -> bool {
        self.experience += amount;
        self.updated_at = now;

        let next_level = self.level + 1;
        if self.experience >= experience_for_level(next_level) {
            self.level = next_level;
            self.attributes = self
                .class
                .template()
                .attributes_at_level(next_level)
                .add(&self.allocated_attributes);
            self.unspent_stat_points += STAT_POINTS_PER_LEVEL;
            return true;
        }
        false
    }

    pub fn add_gold(&mut self, amount: u64, now: DateTime<Utc>) {
        self.gold += amount;
        self.updated_at = now;
    }

    /// Merge items into the inventory, incrementing quantity for item ids
    /// already present.
    pub fn add_items(&mut self, items: &[Item], now: DateTime<Utc>) {
        for item in items {
            match self
                .inventory
                .iter_mut()
                .find(|entry| entry.item_id == item.id)
            {
                Some(entry) => entry.quantity += 1,
                None => self.inventory.push(InventoryEntry::new(item.id)),
            }
        }
        self.updated_at = now;
    }

    /// Number of distinct item ids in the inventory.
    pub fn unique_item_count(&self) -> usize {
        self.inventory.len()
    }

    /// Spend level-up points on attributes.
    ///
    /// Rejects allocations exceeding [`STAT_POINTS_PER_LEVEL`] per call or the
    /// character's unspent balance.
    pub fn allocate_stat_points(
        &mut self,
        allocation: AttributeSet,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let total = allocation.total();
        if total > STAT_POINTS_PER_LEVEL {
            return Err(DomainError::constraint(format!(
                "cannot allocate more than {} points per level",
                STAT_POINTS_PER_LEVEL
            )));
        }
        if total > self.unspent_stat_points {
            return Err(DomainError::constraint(format!(
                "only {} unspent points available",
                self.unspent_stat_points
            )));
        }
        self.allocated_attributes = self.allocated_attributes.add(&allocation);
        self.attributes = self.attributes.add(&allocation);
        self.unspent_stat_points -= total;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Character {
        Character::new(
            UserId::new(),
            PartyId::new(),
            "Greta",
            CharacterClass::Warrior,
            Utc::now(),
        )
    }

    #[test]
    fn experience_curve() {
        assert_eq!(experience_for_level(1), 100);
        assert_eq!(experience_for_level(2), 282); // floor(100 * 2^1.5)
        assert_eq!(experience_for_level(4), 800);
    }

    #[test]
    fn new_character_starts_at_class_base() {
        let character = warrior();
        assert_eq!(character.level, 1);
        assert_eq!(
            character.attributes,
            CharacterClass::Warrior.template().base_attributes
        );
        assert!(character.inventory.is_empty());
    }

    #[test]
    fn add_experience_levels_up_once() {
        let mut character = warrior();
        let leveled = character.add_experience(300, Utc::now());
        assert!(leveled);
        assert_eq!(character.level, 2);
        assert_eq!(character.unspent_stat_points, STAT_POINTS_PER_LEVEL);
        // Warrior at level 2: str 10 + 1.2 -> 11
        assert_eq!(character.attributes.strength, 11);
    }

    #[test]
    fn add_experience_below_threshold_does_not_level() {
        let mut character = warrior();
        let leveled = character.add_experience(100, Utc::now());
        assert!(!leveled);
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 100);
    }

    #[test]
    fn inventory_merge_increments_quantity() {
        use crate::entities::{ItemCategory, ItemKind, ItemStats};
        use crate::value_objects::Rarity;

        let mut character = warrior();
        let item = Item {
            id: crate::ids::ItemId::new(),
            name: "Enchanted Sword".to_string(),
            description: "A standard weapon with magical properties.".to_string(),
            rarity: Rarity::Common,
            kind: ItemKind::Weapon,
            category: ItemCategory::Fantasy,
            stats: ItemStats::new(10, 0, 0, 0),
            value: 100,
        };

        character.add_items(std::slice::from_ref(&item), Utc::now());
        character.add_items(std::slice::from_ref(&item), Utc::now());

        assert_eq!(character.inventory.len(), 1);
        assert_eq!(character.inventory[0].quantity, 2);
        assert_eq!(character.unique_item_count(), 1);
    }

    #[test]
    fn allocation_over_budget_is_rejected() {
        let mut character = warrior();
        character.unspent_stat_points = 10;
        let err = character
            .allocate_stat_points(AttributeSet::new(3, 3, 0, 0), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
    }

    #[test]
    fn allocation_spends_points_and_raises_attributes() {
        let mut character = warrior();
        character.unspent_stat_points = 5;
        character
            .allocate_stat_points(AttributeSet::new(2, 1, 0, 1), Utc::now())
            .expect("allocation within budget");
        assert_eq!(character.unspent_stat_points, 1);
        assert_eq!(character.attributes.strength, 12);
    }

    #[test]
    fn allocations_survive_level_up() {
        let mut character = warrior();
        character.unspent_stat_points = 5;
        character
            .allocate_stat_points(AttributeSet::new(5, 0, 0, 0), Utc::now())
            .expect("allocation within budget");
        assert_eq!(character.attributes.strength, 15);

        character.add_experience(300, Utc::now());
        // Level 2 template strength is 11, plus the 5 allocated.
        assert_eq!(character.attributes.strength, 16);
    }

    #[test]
    fn scenario_level_ten_warrior_melee_damage() {
        // Level-10 Warrior with STR at exactly 10 has melee 5 + 2*10.
        let mut character = warrior().with_level(10);
        character.attributes.strength = 10;
        let stats = character.combat_stats();
        assert_eq!(character.level, 10);
        assert_eq!(stats.melee_damage, 25.0);
    }
}
