use crate::character::Character;
use crate::config::GameBalanceConfig;
use crate::dice;
use crate::enemy::Enemy;
use crate::rng::RandomSource;
use crate::stats::Stat;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Terminal result of one resolved encounter. Combat is a single resolved
/// roll here; turn-by-turn simulation is an external concern layered on top,
/// so the only non-terminal state (ongoing) never escapes the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Win { critical: bool },
    Death { critical: bool },
    Flee,
}

impl CombatOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, CombatOutcome::Win { .. })
    }
}

/// Effective stat and difficulty for one encounter, produced by a pluggable
/// formula so balancing changes never touch the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatCheck {
    pub stat: i32,
    pub difficulty: i32,
}

/// Default balance formula: strength carries the attack, a slice of agility
/// helps, and difficulty grows with the enemy's level, attack and defense.
pub fn default_formula(character: &Character, enemy: &Enemy) -> CombatCheck {
    let totals = character.total_stats();
    CombatCheck {
        stat: totals.get(Stat::Strength) + totals.get(Stat::Agility) / 2,
        difficulty: enemy.level as i32 + (enemy.attack + enemy.defense) as i32 / 2,
    }
}

/// Resolves one encounter.
///
/// A critical success is `Win(critical)`, a critical failure `Death(critical)`
/// with no flee attempt — there is no retreating from an instant fatal blow.
/// A plain failure gets one flee check (base chance plus agility modifier,
/// capped) before it becomes a death.
pub fn resolve<F>(
    character: &Character,
    enemy: &Enemy,
    formula: F,
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
) -> CombatOutcome
where
    F: Fn(&Character, &Enemy) -> CombatCheck,
{
    let check = formula(character, enemy);
    let roll = dice::roll_with_luck(
        check.stat,
        check.difficulty,
        character.luck(),
        &config.dice,
        rng,
    );
    debug!(
        enemy = %enemy.name,
        value = roll.value,
        success = roll.success,
        rerolled = roll.was_rerolled,
        "combat roll"
    );

    if roll.is_critical_success {
        return CombatOutcome::Win { critical: true };
    }
    if roll.is_critical_failure {
        return CombatOutcome::Death { critical: true };
    }
    if roll.success {
        return CombatOutcome::Win { critical: false };
    }

    let agility = character.stat(Stat::Agility).max(0) as f64;
    let flee_chance = (config.combat.flee_base_chance
        + agility * config.combat.flee_agility_bonus)
        .min(config.combat.flee_chance_cap);
    if rng.next_unit() < flee_chance {
        CombatOutcome::Flee
    } else {
        CombatOutcome::Death { critical: false }
    }
}
