//! Mission content definitions and win conditions.
//!
//! Missions are external content the core reads through a catalog; only the
//! progress records in [`crate::progress`] belong to a character.

use crate::character::{Character, JobClass};
use crate::enemy::EnemyId;
use crate::items::ItemId;
use crate::rarity::Rarity;
use crate::stats::{Stat, StatBundle};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type MissionId = u32;
pub type StepId = u32;
pub type LocationId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionStep {
    pub id: StepId,
    /// Location the character must be acting in for this step to be
    /// discoverable; `None` means any action qualifies.
    pub required_location: Option<LocationId>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossBattle {
    pub enemy_id: EnemyId,
    /// Whether a lost boss fight returns the mission to awaiting-boss or
    /// fails it permanently.
    pub can_retry: bool,
    pub requirements: BossRequirements,
}

/// Pre-check gating the boss encounter roll. When unmet, the encounter roll
/// does not fire at all — no wasted roll, no partial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BossRequirements {
    pub min_level: u32,
    pub required_stats: Vec<(Stat, i32)>,
}

impl BossRequirements {
    pub fn met_by(&self, character: &Character) -> bool {
        if character.level < self.min_level {
            return false;
        }
        let totals = character.total_stats();
        self.required_stats
            .iter()
            .all(|&(stat, minimum)| totals.get(stat) >= minimum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MissionReward {
    pub xp: u64,
    pub gold: u64,
}

/// A per-class storyline: discoverable steps, then a boss encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalMission {
    pub id: MissionId,
    pub name: String,
    /// Restricts the storyline to one class; `None` means any class.
    pub job_class: Option<JobClass>,
    pub steps: Vec<MissionStep>,
    pub boss: BossBattle,
    pub reward: MissionReward,
    /// Released to the caller once, at boss defeat.
    pub lore: String,
}

impl PrincipalMission {
    pub fn step(&self, id: StepId) -> Option<&MissionStep> {
        self.steps.iter().find(|step| step.id == id)
    }
}

/// An optional side objective with a deterministic win condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMission {
    pub id: MissionId,
    pub name: String,
    pub win_condition: WinCondition,
    pub reward: MissionReward,
}

/// Declarative completion predicate for secondary missions. Closed set,
/// matched exhaustively: a new kind is a compile error at every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WinCondition {
    VisitLocation { location: LocationId },
    CollectItem { item: ItemId, count: u32 },
    DefeatEnemyCount { count: u32 },
    ReachLevel { level: u32 },
    AccumulateGold { amount: u64 },
    EquipRarity { rarity: Rarity },
    StatAtLeast { stat: Stat, value: i32 },
    SurviveDays { days: u32 },
    CriticalHitCount { count: u32 },
    TradeCount { count: u32 },
}

impl WinCondition {
    pub fn is_met(&self, context: &MissionContext) -> bool {
        match self {
            WinCondition::VisitLocation { location } => {
                context.visited_locations.contains(location)
            }
            WinCondition::CollectItem { item, count } => {
                context.item_counts.get(item).copied().unwrap_or(0) >= *count
            }
            WinCondition::DefeatEnemyCount { count } => context.enemies_defeated >= *count,
            WinCondition::ReachLevel { level } => context.level >= *level,
            WinCondition::AccumulateGold { amount } => context.gold >= *amount,
            WinCondition::EquipRarity { rarity } => {
                context.best_equipped_rarity.is_some_and(|best| best >= *rarity)
            }
            WinCondition::StatAtLeast { stat, value } => context.stats.get(*stat) >= *value,
            WinCondition::SurviveDays { days } => context.days_survived >= *days,
            WinCondition::CriticalHitCount { count } => context.critical_hits >= *count,
            WinCondition::TradeCount { count } => context.trades >= *count,
        }
    }
}

/// Read-only snapshot of everything win conditions look at, produced by the
/// external simulation driver each tick. The tracker never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MissionContext {
    pub visited_locations: HashSet<LocationId>,
    pub item_counts: HashMap<ItemId, u32>,
    pub enemies_defeated: u32,
    pub level: u32,
    pub gold: u64,
    pub best_equipped_rarity: Option<Rarity>,
    pub stats: StatBundle,
    pub days_survived: u32,
    pub critical_hits: u32,
    pub trades: u32,
}
