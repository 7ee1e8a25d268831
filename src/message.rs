use crate::combat::CombatOutcome;
use serde::{Deserialize, Serialize};

/// Category key for the external message-template lookup. The core emits
/// the category and parameters; template selection and substitution happen
/// outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCategory {
    CombatVictory,
    CombatCriticalVictory,
    CombatDefeat,
    CombatCriticalDefeat,
    CombatFlee,
    LootFound,
    StepDiscovered,
    BossEncountered,
    MissionCompleted,
    MissionFailed,
    MissionDiscovered,
}

impl MessageCategory {
    /// Stable lookup key for the template store.
    pub fn key(&self) -> &'static str {
        match self {
            MessageCategory::CombatVictory => "COMBAT_VICTORY",
            MessageCategory::CombatCriticalVictory => "COMBAT_CRITICAL_VICTORY",
            MessageCategory::CombatDefeat => "COMBAT_DEFEAT",
            MessageCategory::CombatCriticalDefeat => "COMBAT_CRITICAL_DEFEAT",
            MessageCategory::CombatFlee => "COMBAT_FLEE",
            MessageCategory::LootFound => "LOOT_FOUND",
            MessageCategory::StepDiscovered => "STEP_DISCOVERED",
            MessageCategory::BossEncountered => "BOSS_ENCOUNTERED",
            MessageCategory::MissionCompleted => "MISSION_COMPLETED",
            MessageCategory::MissionFailed => "MISSION_FAILED",
            MessageCategory::MissionDiscovered => "MISSION_DISCOVERED",
        }
    }
}

/// Maps a combat outcome to its message category.
pub fn combat_category(outcome: &CombatOutcome) -> MessageCategory {
    match outcome {
        CombatOutcome::Win { critical: true } => MessageCategory::CombatCriticalVictory,
        CombatOutcome::Win { critical: false } => MessageCategory::CombatVictory,
        CombatOutcome::Death { critical: true } => MessageCategory::CombatCriticalDefeat,
        CombatOutcome::Death { critical: false } => MessageCategory::CombatDefeat,
        CombatOutcome::Flee => MessageCategory::CombatFlee,
    }
}
