//! Content provider boundary.
//!
//! The resolution core never reaches into a global registry: enemy, item and
//! mission tables are external content injected through these traits. The
//! in-memory table types cover tests and small embedded deployments; real
//! drivers back them with their own stores.

use crate::enemy::{Enemy, EnemyId};
use crate::items::{Item, ItemId};
use crate::missions::{MissionId, PrincipalMission, SecondaryMission};
use crate::rarity::{EnemyTier, Rarity};

pub trait ItemCatalog {
    fn item(&self, id: ItemId) -> Option<&Item>;
    /// Candidate pool for the loot generator: every item at or below the
    /// given level ceiling. Rarity filtering happens inside the generator.
    fn candidates(&self, max_level: u32) -> Vec<Item>;
    fn by_rarity(&self, rarity: Rarity) -> Vec<&Item>;
}

pub trait EnemyCatalog {
    fn enemy(&self, id: EnemyId) -> Option<&Enemy>;
    fn by_tier(&self, tier: EnemyTier) -> Vec<Enemy>;
}

pub trait MissionCatalog {
    fn principal(&self, id: MissionId) -> Option<&PrincipalMission>;
    fn secondary(&self, id: MissionId) -> Option<&SecondaryMission>;
    fn secondaries(&self) -> &[SecondaryMission];
}

#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    items: Vec<Item>,
}

impl ItemTable {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl ItemCatalog for ItemTable {
    fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn candidates(&self, max_level: u32) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.level_requirement <= max_level)
            .cloned()
            .collect()
    }

    fn by_rarity(&self, rarity: Rarity) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.rarity == rarity)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnemyTable {
    enemies: Vec<Enemy>,
}

impl EnemyTable {
    pub fn new(enemies: Vec<Enemy>) -> Self {
        Self { enemies }
    }
}

impl EnemyCatalog for EnemyTable {
    fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    fn by_tier(&self, tier: EnemyTier) -> Vec<Enemy> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.tier == tier)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MissionTable {
    principals: Vec<PrincipalMission>,
    secondaries: Vec<SecondaryMission>,
}

impl MissionTable {
    pub fn new(principals: Vec<PrincipalMission>, secondaries: Vec<SecondaryMission>) -> Self {
        Self {
            principals,
            secondaries,
        }
    }
}

impl MissionCatalog for MissionTable {
    fn principal(&self, id: MissionId) -> Option<&PrincipalMission> {
        self.principals.iter().find(|mission| mission.id == id)
    }

    fn secondary(&self, id: MissionId) -> Option<&SecondaryMission> {
        self.secondaries.iter().find(|mission| mission.id == id)
    }

    fn secondaries(&self) -> &[SecondaryMission] {
        &self.secondaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::EquipmentSlot;
    use crate::missions::{MissionReward, WinCondition};
    use crate::stats::StatBundle;

    fn item(id: ItemId, rarity: Rarity, level: u32) -> Item {
        Item {
            id,
            name: format!("Item {id}"),
            slot: EquipmentSlot::Armor,
            rarity,
            level_requirement: level,
            bonuses: StatBundle::zero(),
            preferred_class: None,
        }
    }

    #[test]
    fn test_item_table_lookup_and_filters() {
        let table = ItemTable::new(vec![
            item(1, Rarity::Common, 1),
            item(2, Rarity::Rare, 5),
            item(3, Rarity::Rare, 20),
        ]);

        assert!(table.item(2).is_some());
        assert!(table.item(9).is_none());
        assert_eq!(table.candidates(10).len(), 2);
        assert_eq!(table.by_rarity(Rarity::Rare).len(), 2);
        assert!(table.by_rarity(Rarity::Legendary).is_empty());
    }

    #[test]
    fn test_enemy_table_by_tier() {
        let enemy = |id, tier| Enemy {
            id,
            name: format!("Enemy {id}"),
            tier,
            level: 3,
            hp: 10,
            attack: 2,
            defense: 1,
        };
        let table = EnemyTable::new(vec![
            enemy(1, EnemyTier::Normal),
            enemy(2, EnemyTier::Boss),
            enemy(3, EnemyTier::Normal),
        ]);

        assert_eq!(table.by_tier(EnemyTier::Normal).len(), 2);
        assert_eq!(table.enemy(2).map(|e| e.tier), Some(EnemyTier::Boss));
    }

    #[test]
    fn test_mission_table_lookups() {
        let table = MissionTable::new(
            vec![],
            vec![SecondaryMission {
                id: 4,
                name: "Gold Rush".to_string(),
                win_condition: WinCondition::AccumulateGold { amount: 500 },
                reward: MissionReward { xp: 10, gold: 5 },
            }],
        );
        assert!(table.secondary(4).is_some());
        assert!(table.principal(4).is_none());
        assert_eq!(table.secondaries().len(), 1);
    }
}
