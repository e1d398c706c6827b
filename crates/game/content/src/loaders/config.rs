//! Combat configuration loader.

use std::path::Path;

use anyhow::Context;
use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
///
/// Missing keys fall back to [`CombatConfig::default`], so a file only needs
/// the values it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig =
            toml::from_str(content).context("Failed to parse combat config TOML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActionCategory, Skill, SkillWeight};

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }

    #[test]
    fn overrides_are_merged_with_defaults() {
        let config = ConfigLoader::parse(
            r#"
            lucky_base_chance = 30
            min_action_cost = 3

            [action_costs]
            attack = 14

            [checks]
            clean_avoid_pct = 75

            [[hazard_avoidance]]
            skill = "perception"
            weight_pct = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.lucky_base_chance, 30);
        assert_eq!(config.failed_attempt_xp_pct, 20);
        assert_eq!(config.min_action_cost, 3);
        assert_eq!(config.action_costs.get(ActionCategory::Attack), 14);
        assert_eq!(config.action_costs.get(ActionCategory::Wait), 5);
        assert_eq!(config.checks.clean_avoid_pct, 75);
        assert_eq!(config.checks.base_defense, 10);
        assert_eq!(
            config.hazard_avoidance.weights(),
            &[SkillWeight::new(Skill::Perception, 100)]
        );
        assert_eq!(config.attack, CombatConfig::default().attack);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = ConfigLoader::parse("lucky_base_chance = \"lots\"").unwrap_err();
        assert!(err.to_string().contains("combat config"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/combat.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/combat.toml"));
    }
}
