use crate::equipment::Equipment;
use crate::stats::{Stat, StatBundle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Ranger,
}

impl JobClass {
    pub fn all() -> [JobClass; 5] {
        [
            JobClass::Warrior,
            JobClass::Mage,
            JobClass::Rogue,
            JobClass::Cleric,
            JobClass::Ranger,
        ]
    }

    /// Only dual-wield-capable classes may fill the off-weapon slot.
    pub fn can_dual_wield(&self) -> bool {
        matches!(self, JobClass::Rogue | JobClass::Ranger)
    }
}

/// Character snapshot the driver passes into every resolution call. The core
/// returns updated snapshots; persistence belongs to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub job_class: JobClass,
    pub level: u32,
    pub xp: u64,
    pub gold: u64,
    pub base_stats: StatBundle,
    pub equipment: Equipment,
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// Creates a level-1 character. The timestamp comes from the driver; the
    /// core never reads the wall clock.
    pub fn new(name: String, job_class: JobClass, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            job_class,
            level: 1,
            xp: 0,
            gold: 0,
            base_stats: StatBundle::uniform(5),
            equipment: Equipment::new(),
            created_at: now,
        }
    }

    /// Base stats plus every equipped bonus, floor-clamped per stat.
    pub fn total_stats(&self) -> StatBundle {
        self.base_stats.combined(&self.equipment.bonus_total())
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.total_stats().get(stat)
    }

    /// Total luck as the non-negative score the dice and loot rolls expect.
    pub fn luck(&self) -> u32 {
        self.stat(Stat::Luck).max(0) as u32
    }
}
