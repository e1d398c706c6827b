use std::collections::BTreeMap;

use super::skill::SkillState;

/// Well-known skills referenced by the combat formulas.
///
/// Skill books are keyed by name, so any other skill (gathering, crafting,
/// social) works the same way; this enum only pins the canonical spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Skill {
    Vitality,
    Endurance,
    Constitution,
    Agility,
    Melee,
    Archery,
    Evasion,
    Perception,
    Disarming,
    Spellcraft,
}

/// Every skill of one character, keyed by skill name.
///
/// Lookups of an absent skill behave like a locked level-0 skill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBook {
    skills: BTreeMap<String, SkillState>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `state` under `skill`, replacing any previous entry.
    #[must_use]
    pub fn with_skill(mut self, skill: impl AsRef<str>, state: SkillState) -> Self {
        self.skills.insert(skill.as_ref().to_owned(), state);
        self
    }

    pub fn get(&self, skill: impl AsRef<str>) -> Option<&SkillState> {
        self.skills.get(skill.as_ref())
    }

    /// Copy of a skill's state, or a fresh locked skill when absent.
    pub fn skill(&self, skill: impl AsRef<str>) -> SkillState {
        self.get(skill).cloned().unwrap_or_default()
    }

    /// Persisted level, 0 when the skill is absent.
    pub fn level(&self, skill: impl AsRef<str>) -> u32 {
        self.get(skill).map_or(0, SkillState::level)
    }

    /// Level including temporary buffs, 0 when the skill is absent.
    pub fn effective_level(&self, skill: impl AsRef<str>) -> u32 {
        self.get(skill).map_or(0, SkillState::effective_level)
    }

    /// Clears temporary buffs on every skill.
    #[must_use]
    pub fn clear_buffs(self) -> Self {
        Self {
            skills: self
                .skills
                .into_iter()
                .map(|(name, state)| (name, state.clear_buffs()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillState)> {
        self.skills.iter().map(|(name, state)| (name.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
