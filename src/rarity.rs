use crate::config::RarityConfig;
use crate::error::EngineError;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Junk = 0,
    Common = 1,
    Uncommon = 2,
    Rare = 3,
    Epic = 4,
    Legendary = 5,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Junk => "Junk",
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Enemy tier, selecting which rarity threshold table applies. New tiers are
/// new config tables, not new resolver branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    Normal,
    Elite,
    Boss,
    WorldBoss,
}

impl EnemyTier {
    pub fn all() -> [EnemyTier; 4] {
        [
            EnemyTier::Normal,
            EnemyTier::Elite,
            EnemyTier::Boss,
            EnemyTier::WorldBoss,
        ]
    }
}

/// Cumulative ascending breakpoints over a uniform roll in `[0, 1)`, rarest
/// tier first. An adjusted roll below `legendary` maps to Legendary, below
/// `epic` to Epic, and so on; anything past `common` is Junk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityThresholds {
    pub legendary: f64,
    pub epic: f64,
    pub rare: f64,
    pub uncommon: f64,
    pub common: f64,
}

impl RarityThresholds {
    /// Fail-fast structural check: breakpoints must be in `[0, 1]` and
    /// non-decreasing from rarest to most common.
    pub fn validate(&self, context: &str) -> Result<(), EngineError> {
        let points = [
            self.legendary,
            self.epic,
            self.rare,
            self.uncommon,
            self.common,
        ];
        for point in points {
            if !(0.0..=1.0).contains(&point) {
                return Err(EngineError::Configuration(format!(
                    "{context}: breakpoint {point} outside [0, 1]"
                )));
            }
        }
        if points.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(EngineError::Configuration(format!(
                "{context}: breakpoints must ascend from legendary to common"
            )));
        }
        Ok(())
    }

    fn pick(&self, adjusted_roll: f64) -> Rarity {
        if adjusted_roll < self.legendary {
            Rarity::Legendary
        } else if adjusted_roll < self.epic {
            Rarity::Epic
        } else if adjusted_roll < self.rare {
            Rarity::Rare
        } else if adjusted_roll < self.uncommon {
            Rarity::Uncommon
        } else if adjusted_roll < self.common {
            Rarity::Common
        } else {
            Rarity::Junk
        }
    }
}

/// Luck's downward shift on the rarity roll. Monotone in luck and capped
/// strictly below 1.0 so the mapping stays well-defined at any luck score.
pub fn luck_bonus(luck: u32, config: &RarityConfig) -> f64 {
    (luck as f64 * config.luck_bonus_per_point).min(config.luck_bonus_cap)
}

/// Maps an already-drawn uniform roll to a rarity tier.
pub fn allocate(roll: f64, luck: u32, table: &RarityThresholds, config: &RarityConfig) -> Rarity {
    table.pick(roll - luck_bonus(luck, config))
}

/// Draws a roll from `rng` and maps it to a rarity tier.
pub fn roll_rarity(
    luck: u32,
    table: &RarityThresholds,
    config: &RarityConfig,
    rng: &mut impl RandomSource,
) -> Rarity {
    allocate(rng.next_unit(), luck, table, config)
}
