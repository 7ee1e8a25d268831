use crate::character::JobClass;
use crate::rarity::Rarity;
use crate::stats::StatBundle;
use serde::{Deserialize, Serialize};

pub type ItemId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    MainWeapon,
    OffWeapon,
    Armor,
    Gloves,
    Head,
    Accessory,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 6] {
        [
            EquipmentSlot::MainWeapon,
            EquipmentSlot::OffWeapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Gloves,
            EquipmentSlot::Head,
            EquipmentSlot::Accessory,
        ]
    }
}

/// One catalog entry. Catalogs are external content; the core only filters
/// and selects, it never authors items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub level_requirement: u32,
    pub bonuses: StatBundle,
    /// Class whose affinity this item favors in equip tie-breaks.
    pub preferred_class: Option<JobClass>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    #[test]
    fn test_item_creation() {
        let item = Item {
            id: 1,
            name: "Worn Sword".to_string(),
            slot: EquipmentSlot::MainWeapon,
            rarity: Rarity::Common,
            level_requirement: 1,
            bonuses: StatBundle::zero().with(Stat::Strength, 2),
            preferred_class: Some(JobClass::Warrior),
        };
        assert_eq!(item.slot, EquipmentSlot::MainWeapon);
        assert_eq!(item.bonuses.sum(), 2);
    }

    #[test]
    fn test_all_slots_listed_once() {
        let slots = EquipmentSlot::all();
        for (i, a) in slots.iter().enumerate() {
            for b in slots.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
