//! Dual progression path shared by every kind of skill use.
//!
//! Each attempt first rolls for an instant "lucky" level-up; when that fails it
//! falls through to an ordinary experience grant. The same rules apply to
//! combat, gathering, crafting and social checks.
//!
//! # Lucky chance
//!
//! ```text
//! chance% = floor(base_chance / sqrt(target_level + 1))
//! ```
//!
//! where `target_level` is the level being advanced toward. The percentage is
//! compared against a d100 roll, so once the floor reaches 0 the lucky path is
//! closed for good (level 224 and above with the default base chance of 15).

use crate::config::CombatConfig;
use crate::env::RandomSource;

use super::book::SkillBook;
use super::skill::SkillState;

/// Observable progression changes, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionEvent {
    /// A locked skill became available.
    Unlocked { skill: String },

    /// The lucky roll advanced the skill one level at no experience cost.
    LuckyLevelUp { skill: String, from: u32, to: u32 },

    /// Accumulated experience covered one more level.
    LevelUp { skill: String, from: u32, to: u32 },

    /// Experience granted by an ordinary attempt.
    XpGained {
        skill: String,
        amount: u64,
        xp_before: u64,
        xp_after: u64,
    },

    /// The skill reached a level at which a perk can be chosen.
    PerkMilestoneReached { skill: String, level: u32 },
}

/// Turns skill attempts into experience, levels and perk milestones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressionTracker {
    lucky_base_chance: u32,
    failed_attempt_xp_pct: u32,
}

impl ProgressionTracker {
    pub fn new(lucky_base_chance: u32, failed_attempt_xp_pct: u32) -> Self {
        Self {
            lucky_base_chance,
            failed_attempt_xp_pct,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.lucky_base_chance, config.failed_attempt_xp_pct)
    }

    /// Lucky level-up chance, in whole percent, for reaching `target_level`.
    pub fn lucky_chance(&self, target_level: u32) -> u32 {
        let divisor = (f64::from(target_level) + 1.0).sqrt();
        (f64::from(self.lucky_base_chance) / divisor).floor() as u32
    }

    /// Experience granted by an ordinary attempt.
    pub fn xp_for_attempt(&self, succeeded: bool, base_xp: u32) -> u64 {
        if succeeded {
            u64::from(base_xp)
        } else {
            u64::from(base_xp) * u64::from(self.failed_attempt_xp_pct) / 100
        }
    }

    /// Resolves one use of `skill` and returns the progressed state.
    ///
    /// Exactly one d100 roll is consumed for the lucky path.
    pub fn record_attempt(
        &self,
        skill: &str,
        state: SkillState,
        succeeded: bool,
        base_xp: u32,
        rng: &mut impl RandomSource,
    ) -> (SkillState, Vec<ProgressionEvent>) {
        let mut events = Vec::new();
        let target_level = state.level().saturating_add(1);

        if rng.percent(self.lucky_chance(target_level)) {
            if !state.is_unlocked() {
                events.push(ProgressionEvent::Unlocked {
                    skill: skill.to_owned(),
                });
                return (state.unlock(), events);
            }
            let from = state.level();
            let state = state.lucky_level_up();
            events.push(ProgressionEvent::LuckyLevelUp {
                skill: skill.to_owned(),
                from,
                to: state.level(),
            });
            push_milestones(skill, from, state.level(), &mut events);
            return (state, events);
        }

        let mut state = state;
        if !state.is_unlocked() {
            state = state.unlock();
            events.push(ProgressionEvent::Unlocked {
                skill: skill.to_owned(),
            });
        }

        let amount = self.xp_for_attempt(succeeded, base_xp);
        if amount == 0 {
            return (state, events);
        }

        let from = state.level();
        let xp_before = state.xp();
        let state = state.grant_xp(amount);
        events.push(ProgressionEvent::XpGained {
            skill: skill.to_owned(),
            amount,
            xp_before,
            xp_after: state.xp(),
        });
        for level in from..state.level() {
            events.push(ProgressionEvent::LevelUp {
                skill: skill.to_owned(),
                from: level,
                to: level + 1,
            });
        }
        push_milestones(skill, from, state.level(), &mut events);
        (state, events)
    }

    /// Same as [`record_attempt`](Self::record_attempt), reading and writing a skill book.
    pub fn record_in_book(
        &self,
        book: SkillBook,
        skill: impl AsRef<str>,
        succeeded: bool,
        base_xp: u32,
        rng: &mut impl RandomSource,
    ) -> (SkillBook, Vec<ProgressionEvent>) {
        let name = skill.as_ref();
        let (state, events) = self.record_attempt(name, book.skill(name), succeeded, base_xp, rng);
        (book.with_skill(name, state), events)
    }
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

fn push_milestones(skill: &str, from: u32, to: u32, events: &mut Vec<ProgressionEvent>) {
    let interval = CombatConfig::PERK_MILESTONE_INTERVAL;
    for level in (from + 1..=to).filter(|level| level % interval == 0) {
        events.push(ProgressionEvent::PerkMilestoneReached {
            skill: skill.to_owned(),
            level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    /// d100 roll that never triggers the lucky path.
    const UNLUCKY: u32 = 100;

    #[test]
    fn lucky_chance_uses_integer_floor() {
        let tracker = ProgressionTracker::default();
        assert_eq!(tracker.lucky_chance(0), 15);
        assert_eq!(tracker.lucky_chance(1), 10);
        assert_eq!(tracker.lucky_chance(8), 5);
        assert_eq!(tracker.lucky_chance(99), 1);
        assert_eq!(tracker.lucky_chance(224), 1);
        assert_eq!(tracker.lucky_chance(225), 0);
    }

    #[test]
    fn lucky_roll_levels_up_without_spending_xp() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([1]);
        let state = SkillState::at_level(3).add_xp(40).unwrap();

        let (state, events) = tracker.record_attempt("melee", state, true, 500, &mut rng);

        assert_eq!(state.level(), 4);
        assert_eq!(state.xp(), 40);
        assert_eq!(
            events,
            vec![ProgressionEvent::LuckyLevelUp {
                skill: "melee".into(),
                from: 3,
                to: 4
            }]
        );
    }

    #[test]
    fn lucky_roll_unlocks_a_locked_skill() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([1]);

        let (state, events) = tracker.record_attempt("fishing", SkillState::new(), true, 50, &mut rng);

        assert!(state.is_unlocked());
        assert_eq!(state.level(), 0);
        assert_eq!(
            events,
            vec![ProgressionEvent::Unlocked {
                skill: "fishing".into()
            }]
        );
    }

    #[test]
    fn failed_lucky_roll_grants_full_xp_on_success() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([UNLUCKY]);

        let (state, events) =
            tracker.record_attempt("melee", SkillState::at_level(1), true, 450, &mut rng);

        assert_eq!(state.level(), 2);
        assert_eq!(state.xp(), 50);
        assert_eq!(
            events,
            vec![
                ProgressionEvent::XpGained {
                    skill: "melee".into(),
                    amount: 450,
                    xp_before: 0,
                    xp_after: 50
                },
                ProgressionEvent::LevelUp {
                    skill: "melee".into(),
                    from: 1,
                    to: 2
                },
            ]
        );
    }

    #[test]
    fn failed_use_grants_fractional_xp() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([UNLUCKY]);

        let (state, _) = tracker.record_attempt("melee", SkillState::at_level(1), false, 50, &mut rng);

        assert_eq!(state.xp(), 10);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn using_a_locked_skill_unlocks_it_before_granting_xp() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([UNLUCKY]);

        let (state, events) = tracker.record_attempt("herbalism", SkillState::new(), true, 30, &mut rng);

        assert!(state.is_unlocked());
        assert_eq!(state.xp(), 30);
        assert!(matches!(events[0], ProgressionEvent::Unlocked { .. }));
        assert!(matches!(events[1], ProgressionEvent::XpGained { amount: 30, .. }));
    }

    #[test]
    fn large_grant_crosses_several_perk_milestones() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([UNLUCKY]);
        // Levels 9 through 20 cost 100 × (10² + … + 21²) = 302_600.
        let (state, events) = tracker.record_attempt(
            "melee",
            SkillState::at_level(9),
            true,
            302_600,
            &mut rng,
        );

        assert_eq!(state.level(), 21);
        assert_eq!(state.xp(), 0);
        let milestones: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                ProgressionEvent::PerkMilestoneReached { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(milestones, vec![10, 20]);
        let level_ups = events
            .iter()
            .filter(|e| matches!(e, ProgressionEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 12);
    }

    #[test]
    fn lucky_level_up_into_a_milestone_is_reported() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([1]);

        let (_, events) = tracker.record_attempt("melee", SkillState::at_level(19), true, 0, &mut rng);

        assert_eq!(
            events.last(),
            Some(&ProgressionEvent::PerkMilestoneReached {
                skill: "melee".into(),
                level: 20
            })
        );
    }

    #[test]
    fn record_in_book_updates_named_skill() {
        let tracker = ProgressionTracker::default();
        let mut rng = ScriptedRng::new([UNLUCKY]);
        let book = SkillBook::new();

        let (book, _) = tracker.record_in_book(book, "smithing", true, 120, &mut rng);

        assert_eq!(book.level("smithing"), 1);
        assert_eq!(book.skill("smithing").xp(), 20);
    }

    #[test]
    fn seeded_attempts_are_reproducible() {
        let tracker = ProgressionTracker::default();
        let run = |seed| {
            let mut rng = PcgRng::new(seed);
            let mut state = SkillState::new();
            let mut log = Vec::new();
            for i in 0..200u32 {
                let (next, events) = tracker.record_attempt("melee", state, i % 3 != 0, 75, &mut rng);
                state = next;
                log.extend(events);
            }
            (state, log)
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn lucky_rate_roughly_matches_configured_chance() {
        let tracker = ProgressionTracker::new(15, 20);
        let mut rng = PcgRng::new(2024);
        let mut lucky = 0;
        for _ in 0..10_000 {
            let (_, events) = tracker.record_attempt("melee", SkillState::at_level(0), true, 0, &mut rng);
            if matches!(events.first(), Some(ProgressionEvent::LuckyLevelUp { .. })) {
                lucky += 1;
            }
        }
        // target level 1 → floor(15 / √2) = 10%
        assert!((800..1200).contains(&lucky), "lucky level-ups: {lucky}");
    }
}
