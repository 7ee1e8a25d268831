use crate::character::Character;
use crate::missions::MissionReward;

// XP curve parameters. Balance-stable, unlike the per-roll chances that live
// in GameBalanceConfig.
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

/// XP required to advance from `level` to `level + 1`.
pub fn xp_to_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)) as u64
}

/// Applies a mission reward to a character snapshot, consuming banked XP
/// into level-ups. Returns the number of levels gained.
pub fn apply_reward(character: &mut Character, reward: &MissionReward) -> u32 {
    character.gold = character.gold.saturating_add(reward.gold);
    character.xp = character.xp.saturating_add(reward.xp);

    let mut gained = 0;
    while character.xp >= xp_to_next_level(character.level) {
        character.xp -= xp_to_next_level(character.level);
        character.level += 1;
        gained += 1;
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::JobClass;
    use chrono::Utc;

    fn test_character() -> Character {
        Character::new("Test Hero".to_string(), JobClass::Cleric, Utc::now())
    }

    #[test]
    fn test_xp_curve_grows() {
        assert_eq!(xp_to_next_level(1), 100);
        let mut last = 0;
        for level in 1..50 {
            let needed = xp_to_next_level(level);
            assert!(needed > last);
            last = needed;
        }
    }

    #[test]
    fn test_apply_reward_grants_gold_and_xp() {
        let mut character = test_character();
        let gained = apply_reward(&mut character, &MissionReward { xp: 50, gold: 30 });
        assert_eq!(gained, 0);
        assert_eq!(character.gold, 30);
        assert_eq!(character.xp, 50);
        assert_eq!(character.level, 1);
    }

    #[test]
    fn test_apply_reward_levels_up() {
        let mut character = test_character();
        // Level 1 needs 100 XP; 120 leaves 20 banked at level 2.
        let gained = apply_reward(&mut character, &MissionReward { xp: 120, gold: 0 });
        assert_eq!(gained, 1);
        assert_eq!(character.level, 2);
        assert_eq!(character.xp, 20);
    }

    #[test]
    fn test_apply_reward_chains_multiple_levels() {
        let mut character = test_character();
        // 100 (1->2) + 282 (2->3) = 382; 400 clears both.
        let gained = apply_reward(&mut character, &MissionReward { xp: 400, gold: 0 });
        assert_eq!(gained, 2);
        assert_eq!(character.level, 3);
        assert_eq!(character.xp, 400 - 100 - xp_to_next_level(2));
    }
}
