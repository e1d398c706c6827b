//! One-shot environmental hazards (traps, collapsing floors, gas vents).

use crate::config::CheckTables;
use crate::env::RandomSource;

use super::roll::{SkillCheck, SkillCheckResult};

/// A hazard that fires at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    pub difficulty: u32,
    pub severity: u32,
    triggered: bool,
}

/// What springing a hazard produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HazardOutcome {
    Resolved(SkillCheckResult),
    /// The hazard had already fired; nothing was rolled.
    AlreadyTriggered,
}

impl HazardOutcome {
    pub fn result(&self) -> Option<&SkillCheckResult> {
        match self {
            Self::Resolved(result) => Some(result),
            Self::AlreadyTriggered => None,
        }
    }
}

impl Hazard {
    pub fn new(difficulty: u32, severity: u32) -> Self {
        Self {
            difficulty,
            severity,
            triggered: false,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Damage before avoidance: `severity + difficulty / 4`.
    pub fn base_damage(&self) -> u32 {
        self.severity.saturating_add(self.difficulty / 4)
    }

    /// Resolves the hazard against an avoidance modifier.
    ///
    /// ```text
    /// clean success  (margin × 100 >= difficulty × clean_avoid_pct) → avoided, 0 damage
    /// narrow success                                                → base / 2
    /// failure                                                       → base
    /// ```
    #[must_use]
    pub fn spring(
        mut self,
        modifier: u32,
        rng: &mut impl RandomSource,
        tables: &CheckTables,
    ) -> (Self, HazardOutcome) {
        if self.triggered {
            return (self, HazardOutcome::AlreadyTriggered);
        }
        self.triggered = true;

        let roll = SkillCheck::new(modifier, self.difficulty).roll(rng);
        let base = self.base_damage();
        let clean = roll.success
            && roll.margin * 100 >= i64::from(self.difficulty) * i64::from(tables.clean_avoid_pct);

        let (avoided, damage) = match (roll.success, clean) {
            (true, true) => (true, 0),
            (true, false) => (false, base / 2),
            (false, _) => (false, base),
        };

        let result = SkillCheckResult {
            success: roll.success,
            margin: roll.margin,
            avoided: Some(avoided),
            damage,
        };
        (self, HazardOutcome::Resolved(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    fn spring(hazard: Hazard, roll: u32) -> SkillCheckResult {
        let (_, outcome) = hazard.spring(10, &mut ScriptedRng::new([roll]), &CheckTables::default());
        *outcome.result().expect("fresh hazard resolves")
    }

    #[test]
    fn base_damage_adds_a_quarter_of_difficulty() {
        assert_eq!(Hazard::new(20, 6).base_damage(), 11);
        assert_eq!(Hazard::new(3, 6).base_damage(), 6);
    }

    #[test]
    fn clean_success_avoids_all_damage() {
        // difficulty 20, clean needs margin >= 10
        let result = spring(Hazard::new(20, 6), 30);
        assert_eq!(result.margin, 10);
        assert_eq!(result.avoided, Some(true));
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn narrow_success_halves_damage() {
        let result = spring(Hazard::new(20, 6), 25);
        assert!(result.success);
        assert_eq!(result.avoided, Some(false));
        assert_eq!(result.damage, 5);
    }

    #[test]
    fn failure_takes_full_damage() {
        let result = spring(Hazard::new(20, 6), 4);
        assert!(!result.success);
        assert_eq!(result.avoided, Some(false));
        assert_eq!(result.damage, 11);
    }

    #[test]
    fn second_spring_is_inert_and_rolls_nothing() {
        let tables = CheckTables::default();
        let mut rng = ScriptedRng::new([25, 30]);
        let (hazard, first) = Hazard::new(20, 6).spring(10, &mut rng, &tables);
        assert!(hazard.is_triggered());
        assert!(matches!(first, HazardOutcome::Resolved(_)));

        let (_, second) = hazard.spring(10, &mut rng, &tables);
        assert_eq!(second, HazardOutcome::AlreadyTriggered);
        // the next scripted value is still unconsumed
        assert_eq!(rng.range(0, 100), 30);
    }
}
