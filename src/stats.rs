use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stat {
    Strength,
    Intelligence,
    Agility,
    Luck,
    Charisma,
    Vitality,
}

impl Stat {
    pub fn all() -> [Stat; 6] {
        [
            Stat::Strength,
            Stat::Intelligence,
            Stat::Agility,
            Stat::Luck,
            Stat::Charisma,
            Stat::Vitality,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Intelligence => "INT",
            Stat::Agility => "AGI",
            Stat::Luck => "LCK",
            Stat::Charisma => "CHA",
            Stat::Vitality => "VIT",
        }
    }

    fn index(&self) -> usize {
        match self {
            Stat::Strength => 0,
            Stat::Intelligence => 1,
            Stat::Agility => 2,
            Stat::Luck => 3,
            Stat::Charisma => 4,
            Stat::Vitality => 5,
        }
    }
}

/// Six named stats. Used both for a character's base values and for the
/// additive bonus bundle an equipment piece contributes; bonuses may be
/// negative but a combined total is floor-clamped so no stat goes below zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatBundle {
    values: [i32; 6],
}

impl Default for StatBundle {
    fn default() -> Self {
        Self::zero()
    }
}

impl StatBundle {
    pub fn zero() -> Self {
        Self { values: [0; 6] }
    }

    pub fn uniform(value: i32) -> Self {
        Self { values: [value; 6] }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        self.values[stat.index()] = value;
    }

    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    /// Sum across all six stats. Drives equipment comparison.
    pub fn sum(&self) -> i32 {
        self.values.iter().sum()
    }

    /// Adds two bundles, clamping each stat at zero.
    pub fn combined(&self, other: &StatBundle) -> StatBundle {
        let mut out = StatBundle::zero();
        for stat in Stat::all() {
            out.set(stat, (self.get(stat) + other.get(stat)).max(0));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bundle() {
        let bundle = StatBundle::zero();
        for stat in Stat::all() {
            assert_eq!(bundle.get(stat), 0);
        }
        assert_eq!(bundle.sum(), 0);
    }

    #[test]
    fn test_get_set() {
        let mut bundle = StatBundle::zero();
        bundle.set(Stat::Luck, 15);
        assert_eq!(bundle.get(Stat::Luck), 15);
        assert_eq!(bundle.get(Stat::Strength), 0);
    }

    #[test]
    fn test_sum() {
        let bundle = StatBundle::uniform(3).with(Stat::Vitality, 5);
        assert_eq!(bundle.sum(), 3 * 5 + 5);
    }

    #[test]
    fn test_combined_clamps_at_zero() {
        let base = StatBundle::uniform(2);
        let cursed = StatBundle::zero().with(Stat::Charisma, -10);

        let total = base.combined(&cursed);
        assert_eq!(total.get(Stat::Charisma), 0);
        assert_eq!(total.get(Stat::Strength), 2);
    }

    #[test]
    fn test_stat_abbrev() {
        assert_eq!(Stat::Strength.abbrev(), "STR");
        assert_eq!(Stat::Agility.abbrev(), "AGI");
        assert_eq!(Stat::Luck.abbrev(), "LCK");
        assert_eq!(Stat::Vitality.abbrev(), "VIT");
    }
}
