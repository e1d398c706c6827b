//! Weighted multi-skill checks.

use crate::env::EquipmentBonus;
use crate::progression::SkillBook;

/// One skill's contribution to a composite check, in percent (100 = ×1.0).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillWeight {
    pub skill: String,
    pub weight_pct: u16,
}

impl SkillWeight {
    pub fn new(skill: impl AsRef<str>, weight_pct: u16) -> Self {
        Self {
            skill: skill.as_ref().to_owned(),
            weight_pct,
        }
    }
}

/// A check whose modifier blends several skills.
///
/// # Formula
///
/// ```text
/// modifier = Σ max(0, effective_level(skill) + item_modifier(skill)) × weight_pct / 100
/// ```
///
/// Weights need not sum to 100. Each term is truncated separately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CompositeCheck {
    weights: Vec<SkillWeight>,
}

impl CompositeCheck {
    pub fn new(weights: Vec<SkillWeight>) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[SkillWeight] {
        &self.weights
    }

    /// Skill names in declaration order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.weights.iter().map(|w| w.skill.as_str())
    }

    /// Combined modifier from buffed skill levels and equipment.
    pub fn modifier(&self, skills: &SkillBook, equipment: &EquipmentBonus) -> u32 {
        self.weights
            .iter()
            .map(|weight| {
                let level = i64::from(skills.effective_level(&weight.skill))
                    + i64::from(equipment.skill_modifier(&weight.skill));
                level.max(0) * i64::from(weight.weight_pct) / 100
            })
            .sum::<i64>()
            .clamp(0, i64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{Skill, SkillState};

    fn book() -> SkillBook {
        SkillBook::new()
            .with_skill(Skill::Perception, SkillState::at_level(10))
            .with_skill(Skill::Disarming, SkillState::at_level(5))
    }

    #[test]
    fn weighted_sum_truncates_each_term() {
        let check = CompositeCheck::new(vec![
            SkillWeight::new(Skill::Perception, 60),
            SkillWeight::new(Skill::Disarming, 60),
        ]);
        // 10 × 0.6 = 6, 5 × 0.6 = 3
        assert_eq!(check.modifier(&book(), &EquipmentBonus::default()), 9);
    }

    #[test]
    fn weights_need_not_sum_to_one_hundred() {
        let check = CompositeCheck::new(vec![
            SkillWeight::new(Skill::Perception, 150),
            SkillWeight::new(Skill::Disarming, 100),
        ]);
        assert_eq!(check.modifier(&book(), &EquipmentBonus::default()), 20);
    }

    #[test]
    fn temporary_buffs_count() {
        let check = CompositeCheck::new(vec![SkillWeight::new(Skill::Perception, 100)]);
        let book = book().with_skill(Skill::Perception, SkillState::at_level(10).apply_buff(4));
        assert_eq!(check.modifier(&book, &EquipmentBonus::default()), 14);
    }

    #[test]
    fn equipment_modifiers_add_and_floor_at_zero() {
        let check = CompositeCheck::new(vec![
            SkillWeight::new(Skill::Perception, 100),
            SkillWeight::new(Skill::Disarming, 100),
        ]);
        let gear = EquipmentBonus::default()
            .with_skill_modifier(Skill::Perception, 3)
            .with_skill_modifier(Skill::Disarming, -9);
        assert_eq!(check.modifier(&book(), &gear), 13);
    }

    #[test]
    fn unknown_skills_contribute_nothing() {
        let check = CompositeCheck::new(vec![SkillWeight::new("lockpicking", 100)]);
        assert_eq!(check.modifier(&book(), &EquipmentBonus::default()), 0);
        assert_eq!(CompositeCheck::default().modifier(&book(), &EquipmentBonus::default()), 0);
    }
}
