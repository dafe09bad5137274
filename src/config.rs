use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::planner::constants::DEFAULT_PLAN_DAYS;
use crate::planner::rotation::RotationSettings;
use crate::planner::variety::VarietyLimits;
use crate::shopping::savings::SavingsSettings;

/// Every policy knob of a planning run. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub plan_days: u8,
    pub variety: VarietyLimits,
    pub rotation: RotationSettings,
    pub savings: SavingsSettings,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            plan_days: DEFAULT_PLAN_DAYS,
            variety: VarietyLimits::default(),
            rotation: RotationSettings::default(),
            savings: SavingsSettings::default(),
        }
    }
}

impl PlannerConfig {
    /// Load a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                let config = Self::load(p)?;
                debug!(?config, "loaded planner config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.plan_days == 0 {
            return Err(PlanError::InvalidInput(
                "plan_days must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.savings.target_ratio) {
            return Err(PlanError::InvalidInput(
                "savings.target_ratio must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.plan_days, 7);
        assert_eq!(config.variety.max_fish_per_week, 2);
        assert_eq!(config.variety.min_unique_vegetables, 5);
        assert_eq!(config.rotation.max_uses_per_food, 2);
        assert_eq!(config.savings.max_protein_substitutions, 2);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"plan_days": 5, "variety": {"max_fish_per_week": 3}}"#)
            .unwrap();

        let config = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(config.plan_days, 5);
        assert_eq!(config.variety.max_fish_per_week, 3);
        assert_eq!(config.variety.max_red_meat_per_week, 2);
        assert_eq!(config.savings, SavingsSettings::default());
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"plan_days": 0}"#).unwrap();
        assert!(PlannerConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = PlannerConfig::load_or_default(None::<&str>).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }
}
