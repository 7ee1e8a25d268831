//! Game balance configuration.
//!
//! Every probability constant and scaling knob the resolvers consume lives
//! here, injected by the driver so balancing never touches resolver code.
//! Malformed values are rejected at load time, never clamped silently.

use crate::error::EngineError;
use crate::rarity::{EnemyTier, RarityThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameBalanceConfig {
    pub dice: DiceConfig,
    pub rarity: RarityConfig,
    pub loot: LootConfig,
    pub combat: CombatConfig,
    pub missions: MissionConfig,
    pub enemy: EnemyConfig,
}

impl Default for GameBalanceConfig {
    fn default() -> Self {
        Self {
            dice: DiceConfig::default(),
            rarity: RarityConfig::default(),
            loot: LootConfig::default(),
            combat: CombatConfig::default(),
            missions: MissionConfig::default(),
            enemy: EnemyConfig::default(),
        }
    }
}

impl GameBalanceConfig {
    /// Parses and validates a config from JSON. Missing sections fall back
    /// to defaults; a structurally invalid config is a fatal load error.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: GameBalanceConfig = serde_json::from_str(json)
            .map_err(|err| EngineError::Configuration(format!("balance config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.dice.validate()?;
        self.rarity.validate()?;
        self.loot.validate()?;
        self.combat.validate()?;
        self.missions.validate()?;
        self.enemy.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Minimum luck for the one-time reroll of a natural 1.
    pub reroll_min_luck: u32,
    /// Minimum luck before the critical band widens below 21.
    pub crit_band_min_luck: u32,
    /// The band widens by one face per this many points of luck.
    pub crit_band_luck_divisor: u32,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            reroll_min_luck: 10,
            crit_band_min_luck: 15,
            crit_band_luck_divisor: 5,
        }
    }
}

impl DiceConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if self.crit_band_luck_divisor == 0 {
            return Err(EngineError::Configuration(
                "dice: crit_band_luck_divisor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityConfig {
    pub luck_bonus_per_point: f64,
    /// Hard cap on the luck shift, strictly below 1.0 so no luck score can
    /// force the rarest tier with certainty.
    pub luck_bonus_cap: f64,
    pub normal: RarityThresholds,
    pub elite: RarityThresholds,
    pub boss: RarityThresholds,
    pub world_boss: RarityThresholds,
}

impl Default for RarityConfig {
    fn default() -> Self {
        Self {
            luck_bonus_per_point: 0.005,
            luck_bonus_cap: 0.25,
            normal: RarityThresholds {
                legendary: 0.001,
                epic: 0.011,
                rare: 0.061,
                uncommon: 0.211,
                common: 0.611,
            },
            elite: RarityThresholds {
                legendary: 0.005,
                epic: 0.035,
                rare: 0.135,
                uncommon: 0.335,
                common: 0.735,
            },
            boss: RarityThresholds {
                legendary: 0.02,
                epic: 0.10,
                rare: 0.30,
                uncommon: 0.60,
                common: 0.90,
            },
            world_boss: RarityThresholds {
                legendary: 0.05,
                epic: 0.20,
                rare: 0.50,
                uncommon: 0.80,
                common: 1.0,
            },
        }
    }
}

impl RarityConfig {
    pub fn table_for(&self, tier: EnemyTier) -> &RarityThresholds {
        match tier {
            EnemyTier::Normal => &self.normal,
            EnemyTier::Elite => &self.elite,
            EnemyTier::Boss => &self.boss,
            EnemyTier::WorldBoss => &self.world_boss,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.luck_bonus_per_point < 0.0 {
            return Err(EngineError::Configuration(
                "rarity: luck_bonus_per_point must not be negative".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.luck_bonus_cap) {
            return Err(EngineError::Configuration(
                "rarity: luck_bonus_cap must be in [0, 1)".to_string(),
            ));
        }
        self.normal.validate("rarity.normal")?;
        self.elite.validate("rarity.elite")?;
        self.boss.validate("rarity.boss")?;
        self.world_boss.validate("rarity.world_boss")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub normal_drop_chance: f64,
    pub elite_drop_chance: f64,
    pub boss_drop_chance: f64,
    pub world_boss_drop_chance: f64,
    /// Additive drop-chance bonus per point of luck.
    pub luck_bonus_per_point: f64,
    /// Items up to `character_level + level_window` are eligible.
    pub level_window: u32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            normal_drop_chance: 0.30,
            elite_drop_chance: 0.45,
            boss_drop_chance: 0.75,
            world_boss_drop_chance: 1.0,
            luck_bonus_per_point: 0.002,
            level_window: 3,
        }
    }
}

impl LootConfig {
    pub fn base_drop_chance(&self, tier: EnemyTier) -> f64 {
        match tier {
            EnemyTier::Normal => self.normal_drop_chance,
            EnemyTier::Elite => self.elite_drop_chance,
            EnemyTier::Boss => self.boss_drop_chance,
            EnemyTier::WorldBoss => self.world_boss_drop_chance,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        for (name, chance) in [
            ("normal_drop_chance", self.normal_drop_chance),
            ("elite_drop_chance", self.elite_drop_chance),
            ("boss_drop_chance", self.boss_drop_chance),
            ("world_boss_drop_chance", self.world_boss_drop_chance),
        ] {
            validate_probability("loot", name, chance)?;
        }
        if self.luck_bonus_per_point < 0.0 {
            return Err(EngineError::Configuration(
                "loot: luck_bonus_per_point must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Base chance to flee after a plain (non-critical) failed roll.
    pub flee_base_chance: f64,
    /// Additive flee-chance bonus per point of agility.
    pub flee_agility_bonus: f64,
    pub flee_chance_cap: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            flee_base_chance: 0.20,
            flee_agility_bonus: 0.01,
            flee_chance_cap: 0.75,
        }
    }
}

impl CombatConfig {
    fn validate(&self) -> Result<(), EngineError> {
        validate_probability("combat", "flee_base_chance", self.flee_base_chance)?;
        validate_probability("combat", "flee_chance_cap", self.flee_chance_cap)?;
        if self.flee_agility_bonus < 0.0 {
            return Err(EngineError::Configuration(
                "combat: flee_agility_bonus must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Per-action, per-incomplete-step discovery chance (principal).
    pub step_discovery_chance: f64,
    /// Per-action boss encounter chance once all steps are complete.
    pub boss_encounter_chance: f64,
    /// Per-action chance to discover a new secondary mission.
    pub mission_discovery_chance: f64,
    /// Independent Bernoulli trials rolled at secondary completion.
    pub equipment_reward_chance: f64,
    pub rare_equipment_reward_chance: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            step_discovery_chance: 0.02,
            boss_encounter_chance: 0.02,
            mission_discovery_chance: 0.01,
            equipment_reward_chance: 0.20,
            rare_equipment_reward_chance: 0.02,
        }
    }
}

impl MissionConfig {
    fn validate(&self) -> Result<(), EngineError> {
        for (name, chance) in [
            ("step_discovery_chance", self.step_discovery_chance),
            ("boss_encounter_chance", self.boss_encounter_chance),
            ("mission_discovery_chance", self.mission_discovery_chance),
            ("equipment_reward_chance", self.equipment_reward_chance),
            (
                "rare_equipment_reward_chance",
                self.rare_equipment_reward_chance,
            ),
        ] {
            validate_probability("missions", name, chance)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Extra multiplier applied to HP when scaling an enemy template, on top
    /// of the level factor applied to every stat. Intentional asymmetry.
    pub hp_scale_bonus: f64,
    /// Preferred level distance when selecting an encounter candidate.
    pub level_band: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            hp_scale_bonus: 1.2,
            level_band: 2,
        }
    }
}

impl EnemyConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if self.hp_scale_bonus <= 0.0 {
            return Err(EngineError::Configuration(
                "enemy: hp_scale_bonus must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_probability(section: &str, name: &str, value: f64) -> Result<(), EngineError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::Configuration(format!(
            "{section}: {name} = {value} outside [0, 1]"
        )));
    }
    Ok(())
}
