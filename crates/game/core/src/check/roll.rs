//! The opposed-roll primitive shared by every check.

use crate::env::RandomSource;

/// A single skill check: `modifier` pushes toward success, `difficulty` away.
///
/// # Formula
///
/// ```text
/// roll    = uniform [0, modifier + difficulty]
/// success = roll >= difficulty
/// margin  = roll - difficulty
/// ```
///
/// The success probability is `(modifier + 1) / (modifier + difficulty + 1)`.
/// It strictly increases with the modifier and strictly decreases with the
/// difficulty whenever the other term is held fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCheck {
    pub modifier: u32,
    pub difficulty: u32,
}

/// Raw outcome of one [`SkillCheck`] roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckRoll {
    pub roll: u32,
    pub success: bool,
    /// Signed distance from the difficulty; non-negative exactly on success.
    pub margin: i64,
}

impl SkillCheck {
    pub fn new(modifier: u32, difficulty: u32) -> Self {
        Self {
            modifier,
            difficulty,
        }
    }

    /// Rolls the check, consuming exactly one value from `rng`.
    pub fn roll(&self, rng: &mut impl RandomSource) -> CheckRoll {
        let upper = self.modifier.saturating_add(self.difficulty);
        let roll = rng.range(0, upper);
        CheckRoll {
            roll,
            success: roll >= self.difficulty,
            margin: i64::from(roll) - i64::from(self.difficulty),
        }
    }

    /// Exact success probability as `(numerator, denominator)`.
    pub fn success_odds(&self) -> (u64, u64) {
        let modifier = u64::from(self.modifier);
        let difficulty = u64::from(self.difficulty);
        (modifier + 1, modifier + difficulty + 1)
    }
}

/// Outcome of a resolved check, hazard or attack.
///
/// `avoided` is `None` for checks where avoidance is meaningless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCheckResult {
    pub success: bool,
    pub margin: i64,
    pub avoided: Option<bool>,
    pub damage: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    /// Counts successes over every possible roll value.
    fn exhaustive_successes(check: SkillCheck) -> u32 {
        (0..=check.modifier + check.difficulty)
            .filter(|&value| check.roll(&mut ScriptedRng::new([value])).success)
            .count() as u32
    }

    #[test]
    fn roll_at_difficulty_is_a_zero_margin_success() {
        let check = SkillCheck::new(5, 10);
        let roll = check.roll(&mut ScriptedRng::new([10]));
        assert!(roll.success);
        assert_eq!(roll.margin, 0);

        let roll = check.roll(&mut ScriptedRng::new([3]));
        assert!(!roll.success);
        assert_eq!(roll.margin, -7);
    }

    #[test]
    fn success_count_matches_exact_odds() {
        for (modifier, difficulty) in [(0, 1), (3, 7), (10, 10), (25, 4)] {
            let check = SkillCheck::new(modifier, difficulty);
            let (num, _) = check.success_odds();
            assert_eq!(u64::from(exhaustive_successes(check)), num);
        }
    }

    #[test]
    fn odds_strictly_increase_with_modifier() {
        let difficulty = 12;
        let mut previous = SkillCheck::new(0, difficulty).success_odds();
        for modifier in 1..40 {
            let odds = SkillCheck::new(modifier, difficulty).success_odds();
            // a/b < c/d  <=>  a·d < c·b
            assert!(previous.0 * odds.1 < odds.0 * previous.1, "modifier {modifier}");
            previous = odds;
        }
    }

    #[test]
    fn odds_strictly_decrease_with_difficulty() {
        let modifier = 8;
        let mut previous = SkillCheck::new(modifier, 1).success_odds();
        for difficulty in 2..40 {
            let odds = SkillCheck::new(modifier, difficulty).success_odds();
            assert!(odds.0 * previous.1 < previous.0 * odds.1, "difficulty {difficulty}");
            previous = odds;
        }
    }

    #[test]
    fn zero_difficulty_always_succeeds() {
        let mut rng = PcgRng::new(3);
        assert!((0..100).all(|_| SkillCheck::new(4, 0).roll(&mut rng).success));
    }

    #[test]
    fn sampled_rate_tracks_exact_odds() {
        let check = SkillCheck::new(10, 30);
        let mut rng = PcgRng::new(77);
        let hits = (0..20_000).filter(|_| check.roll(&mut rng).success).count();
        // 11 / 41 ≈ 26.8%
        assert!((4_900..5_850).contains(&hits), "hits: {hits}");
    }
}
