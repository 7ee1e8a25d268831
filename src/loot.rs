use crate::config::GameBalanceConfig;
use crate::items::Item;
use crate::rarity::{self, EnemyTier};
use crate::rng::RandomSource;
use tracing::debug;

/// Decides whether loot drops and which item it is.
///
/// Three stages: a luck-adjusted drop gate, a rarity roll against the tier's
/// threshold table, then a uniform pick from the candidates matching that
/// exact rarity and the level window. A rarity with no matching candidate is
/// a miss, not an error — it is never retried at a lower tier, since that
/// would erase genuine scarcity.
pub fn generate(
    character_level: u32,
    luck: u32,
    tier: EnemyTier,
    candidate_pool: &[Item],
    config: &GameBalanceConfig,
    rng: &mut impl RandomSource,
) -> Option<Item> {
    let drop_chance = (config.loot.base_drop_chance(tier)
        + luck as f64 * config.loot.luck_bonus_per_point)
        .clamp(0.0, 1.0);
    if rng.next_unit() > drop_chance {
        return None;
    }

    let rolled = rarity::roll_rarity(luck, config.rarity.table_for(tier), &config.rarity, rng);

    let max_level = character_level + config.loot.level_window;
    let matching: Vec<&Item> = candidate_pool
        .iter()
        .filter(|item| item.rarity == rolled && item.level_requirement <= max_level)
        .collect();
    if matching.is_empty() {
        debug!(rarity = rolled.name(), "no candidate at rolled rarity, no drop");
        return None;
    }

    let pick = rng.next_in(0, matching.len() as u32 - 1) as usize;
    let item = matching[pick].clone();
    debug!(item = %item.name, rarity = item.rarity.name(), "loot dropped");
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EquipmentSlot, ItemId};
    use crate::rarity::Rarity;
    use crate::rng::{seeded, ScriptedSource};
    use crate::stats::StatBundle;

    fn pool_item(id: ItemId, rarity: Rarity, level_requirement: u32) -> Item {
        Item {
            id,
            name: format!("Item {id}"),
            slot: EquipmentSlot::MainWeapon,
            rarity,
            level_requirement,
            bonuses: StatBundle::zero(),
            preferred_class: None,
        }
    }

    #[test]
    fn test_empty_pool_never_drops() {
        let config = GameBalanceConfig::default();
        // Drop gate passes (0.0), rarity rolls Common; still nothing to give.
        let mut rng = ScriptedSource::new([], [0.0, 0.5]);
        let result = generate(10, 0, EnemyTier::WorldBoss, &[], &config, &mut rng);
        assert!(result.is_none());
    }

    #[test]
    fn test_failed_gate_means_no_drop() {
        let config = GameBalanceConfig::default();
        let pool = vec![pool_item(1, Rarity::Common, 1)];
        // Normal tier base chance is 0.30; a 0.99 roll misses the gate.
        let mut rng = ScriptedSource::new([], [0.99]);
        assert!(generate(10, 0, EnemyTier::Normal, &pool, &config, &mut rng).is_none());
        // The rarity roll was never consumed.
        assert_eq!(rng.units_left(), 0);
    }

    #[test]
    fn test_drop_selects_matching_rarity() {
        let config = GameBalanceConfig::default();
        let pool = vec![
            pool_item(1, Rarity::Common, 1),
            pool_item(2, Rarity::Legendary, 1),
        ];
        // Gate passes; 0.001 rolls Legendary on the boss table (breakpoint
        // 0.02); face 0 picks the only legendary candidate.
        let mut rng = ScriptedSource::new([0], [0.0, 0.001]);
        let item = generate(10, 0, EnemyTier::Boss, &pool, &config, &mut rng);
        assert_eq!(item.map(|i| i.id), Some(2));
    }

    #[test]
    fn test_rarity_miss_is_not_retried_lower() {
        let config = GameBalanceConfig::default();
        // Pool has a Common item, but the roll lands Legendary.
        let pool = vec![pool_item(1, Rarity::Common, 1)];
        let mut rng = ScriptedSource::new([], [0.0, 0.001]);
        assert!(generate(10, 0, EnemyTier::Boss, &pool, &config, &mut rng).is_none());
    }

    #[test]
    fn test_level_window_excludes_high_items() {
        let config = GameBalanceConfig::default();
        // Window is 3: a level-5 character can use up to level 8.
        let pool = vec![
            pool_item(1, Rarity::Common, 8),
            pool_item(2, Rarity::Common, 9),
        ];
        // 0.9 rolls Common on the world-boss table (uncommon 0.80, common 1.0).
        let mut rng = ScriptedSource::new([0], [0.0, 0.9, 0.0, 0.9]);
        let first = generate(5, 0, EnemyTier::WorldBoss, &pool, &config, &mut rng);
        assert_eq!(first.map(|i| i.id), Some(1));

        let narrow_pool = vec![pool_item(2, Rarity::Common, 9)];
        let second = generate(5, 0, EnemyTier::WorldBoss, &narrow_pool, &config, &mut rng);
        assert!(second.is_none());
    }

    #[test]
    fn test_luck_raises_drop_rate() {
        let config = GameBalanceConfig::default();
        let pool: Vec<Item> = [
            Rarity::Junk,
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
        .iter()
        .enumerate()
        .map(|(i, &rarity)| pool_item(i as ItemId, rarity, 1))
        .collect();

        let drops_with = |luck: u32| {
            let mut rng = seeded(17);
            (0..10_000)
                .filter(|_| {
                    generate(10, luck, EnemyTier::Normal, &pool, &config, &mut rng).is_some()
                })
                .count()
        };

        let low = drops_with(0);
        let high = drops_with(100);
        // 0.30 base vs 0.30 + 100 * 0.002 = 0.50.
        assert!(low > 2_600 && low < 3_400, "low = {low}");
        assert!(high > low + 1_000, "high = {high}, low = {low}");
    }
}
