use crate::config::EnemyConfig;
use crate::rarity::EnemyTier;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

pub type EnemyId = u32;

/// Enemy template from the external bestiary. Scaling produces a fresh value
/// rather than mutating the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub tier: EnemyTier,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

/// Scales a template to a target level. Every stat is multiplied by the
/// level ratio and floored at 1; HP gets an extra multiplier on top
/// (`hp_scale_bonus`, 1.2 by default) — an intentional asymmetry, not a bug.
pub fn scale(template: &Enemy, target_level: u32, config: &EnemyConfig) -> Enemy {
    let target_level = target_level.max(1);
    let factor = target_level as f64 / template.level.max(1) as f64;
    Enemy {
        id: template.id,
        name: template.name.clone(),
        tier: template.tier,
        level: target_level,
        hp: scale_stat(template.hp, factor * config.hp_scale_bonus),
        attack: scale_stat(template.attack, factor),
        defense: scale_stat(template.defense, factor),
    }
}

fn scale_stat(value: u32, factor: f64) -> u32 {
    ((value as f64 * factor) as u32).max(1)
}

/// Picks an encounter candidate from `pool` by explicit priority:
/// 1. matching tier within `level_band` levels of the character;
/// 2. matching tier at any level;
/// 3. no candidates — a named None, never a panic.
pub fn select_encounter<'a>(
    pool: &'a [Enemy],
    character_level: u32,
    tier: EnemyTier,
    config: &EnemyConfig,
    rng: &mut impl RandomSource,
) -> Option<&'a Enemy> {
    let of_tier: Vec<&Enemy> = pool.iter().filter(|enemy| enemy.tier == tier).collect();
    if of_tier.is_empty() {
        return None;
    }

    let in_band: Vec<&Enemy> = of_tier
        .iter()
        .copied()
        .filter(|enemy| enemy.level.abs_diff(character_level) <= config.level_band)
        .collect();

    let candidates = if in_band.is_empty() { &of_tier } else { &in_band };
    let pick = rng.next_in(0, candidates.len() as u32 - 1) as usize;
    Some(candidates[pick])
}
