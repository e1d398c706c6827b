//! Per-skill progression state: level, experience, buffs and perks.

use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};

/// Level at which the experience curve switches from quadratic to accelerated.
const QUADRATIC_CURVE_CAP: u64 = 100;

/// Experience needed to advance from `level` to `level + 1`.
///
/// Formula (`target = level + 1`):
///
/// ```text
/// target <= 100: 100 × target²
/// target >  100: 100 × target² × (target / 100)^1.5   (truncated)
/// ```
pub fn xp_to_next(level: u32) -> u64 {
    let target = u64::from(level) + 1;
    if target <= QUADRATIC_CURVE_CAP {
        return 100 * target * target;
    }
    let t = target as f64;
    (100.0 * t * t * (t / QUADRATIC_CURVE_CAP as f64).powf(1.5)) as u64
}

/// Contract violations raised by skill transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("experience grants must be non-negative, got {0}")]
    NegativeXp(i64),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeXp(_) => "SKILL_NEGATIVE_XP",
        }
    }
}

/// Whether a perk grants a new ability or a passive bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerkKind {
    Ability,
    Passive,
}

/// A perk chosen at a milestone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perk {
    pub name: String,
    pub description: String,
    pub kind: PerkKind,
}

impl Perk {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: PerkKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Progression of one skill.
///
/// Invariant: after any experience grant, `xp < xp_to_next(level)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillState {
    level: u32,
    xp: u64,
    unlocked: bool,
    temp_buffs: i32,
    perks: Vec<Perk>,
    tags: Vec<String>,
    resource_type: Option<String>,
}

impl SkillState {
    /// A locked skill at level 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// An unlocked skill at `level` with no experience.
    pub fn at_level(level: u32) -> Self {
        Self {
            level,
            unlocked: true,
            ..Self::default()
        }
    }

    /// Adds a classification tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the resource the skill consumes, e.g. "mana" (builder pattern).
    #[must_use]
    pub fn with_resource_type(mut self, resource: impl Into<String>) -> Self {
        self.resource_type = Some(resource.into());
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn temp_buffs(&self) -> i32 {
        self.temp_buffs
    }

    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    // ========================================================================
    // Experience and levels
    // ========================================================================

    /// Grants experience, rolling over into as many levels as it covers.
    pub fn add_xp(self, amount: i64) -> Result<Self, SkillError> {
        if amount < 0 {
            return Err(SkillError::NegativeXp(amount));
        }
        Ok(self.grant_xp(amount as u64))
    }

    /// Unsigned experience grant used once the amount is known to be valid.
    pub(crate) fn grant_xp(mut self, amount: u64) -> Self {
        self.xp = self.xp.saturating_add(amount);
        loop {
            let threshold = xp_to_next(self.level);
            if self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            self.level += 1;
        }
        self
    }

    /// Advances exactly one level without spending experience.
    #[must_use]
    pub fn lucky_level_up(mut self) -> Self {
        self.level = self.level.saturating_add(1);
        self
    }

    #[must_use]
    pub fn unlock(mut self) -> Self {
        self.unlocked = true;
        self
    }

    // ========================================================================
    // Temporary buffs
    // ========================================================================

    /// Level used by checks: persisted level plus temporary buffs, floored at 0.
    pub fn effective_level(&self) -> u32 {
        (i64::from(self.level) + i64::from(self.temp_buffs)).clamp(0, i64::from(u32::MAX)) as u32
    }

    #[must_use]
    pub fn apply_buff(mut self, amount: i32) -> Self {
        self.temp_buffs = self.temp_buffs.saturating_add(amount);
        self
    }

    #[must_use]
    pub fn clear_buffs(mut self) -> Self {
        self.temp_buffs = 0;
        self
    }

    // ========================================================================
    // Perks
    // ========================================================================

    pub fn is_at_perk_milestone(&self) -> bool {
        self.level > 0 && self.level % CombatConfig::PERK_MILESTONE_INTERVAL == 0
    }

    pub fn perk_milestones_earned(&self) -> u32 {
        self.level / CombatConfig::PERK_MILESTONE_INTERVAL
    }

    pub fn has_pending_perk_choice(&self) -> bool {
        self.perk_milestones_earned() as usize > self.perks.len()
    }

    #[must_use]
    pub fn add_perk(mut self, perk: Perk) -> Self {
        self.perks.push(perk);
        self
    }
}
