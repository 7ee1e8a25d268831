use crate::character::Character;
use crate::items::{EquipmentSlot, Item};
use crate::stats::StatBundle;
use serde::{Deserialize, Serialize};

/// Worn equipment, one optional item per slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Equipment {
    pub main_weapon: Option<Item>,
    pub off_weapon: Option<Item>,
    pub armor: Option<Item>,
    pub gloves: Option<Item>,
    pub head: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::MainWeapon => &self.main_weapon,
            EquipmentSlot::OffWeapon => &self.off_weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::MainWeapon => self.main_weapon = item,
            EquipmentSlot::OffWeapon => self.off_weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Gloves => self.gloves = item,
            EquipmentSlot::Head => self.head = item,
            EquipmentSlot::Accessory => self.accessory = item,
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.main_weapon,
            &self.off_weapon,
            &self.armor,
            &self.gloves,
            &self.head,
            &self.accessory,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// Sum of all equipped bonus bundles.
    pub fn bonus_total(&self) -> StatBundle {
        self.iter_equipped()
            .fold(StatBundle::zero(), |acc, item| acc.combined(&item.bonuses))
    }

    /// Highest rarity currently worn, if anything is worn at all.
    pub fn best_rarity(&self) -> Option<crate::rarity::Rarity> {
        self.iter_equipped().map(|item| item.rarity).max()
    }
}

/// Auto-equip decision. Total and pure:
/// 1. strictly higher summed stat bonus wins, strictly lower loses;
/// 2. on an exact tie, class affinity beats no affinity;
/// 3. any remaining tie goes to the candidate (the newly found item).
///
/// An empty slot always accepts the candidate.
pub fn is_better(candidate: &Item, current: Option<&Item>, character: &Character) -> bool {
    let Some(current) = current else {
        return true;
    };

    let candidate_sum = candidate.bonuses.sum();
    let current_sum = current.bonuses.sum();
    if candidate_sum != current_sum {
        return candidate_sum > current_sum;
    }

    let candidate_affinity = candidate.preferred_class == Some(character.job_class);
    let current_affinity = current.preferred_class == Some(character.job_class);
    if candidate_affinity != current_affinity {
        return candidate_affinity;
    }

    true
}

/// Equips `item` into its slot when `is_better` says so, returning whether a
/// swap happened. Off-weapons are rejected outright for classes that cannot
/// dual-wield.
pub fn auto_equip_if_better(item: Item, character: &mut Character) -> bool {
    if item.slot == EquipmentSlot::OffWeapon && !character.job_class.can_dual_wield() {
        return false;
    }
    if is_better(&item, character.equipment.get(item.slot).as_ref(), character) {
        character.equipment.set(item.slot, Some(item));
        true
    } else {
        false
    }
}
