use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::food::CostLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Cutting,
    #[default]
    Maintenance,
    Bulking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DietStyle {
    #[default]
    Omnivore,
    Pescatarian,
    Vegetarian,
    Vegan,
}

/// Validated user profile handed to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub sex: Sex,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub trains: bool,
    pub meals_per_day: u8,
    #[serde(default)]
    pub diet_style: DietStyle,
    #[serde(default)]
    pub cost_tier: CostLevel,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub excluded_foods: Vec<String>,
}

impl PlanInput {
    /// Re-check the numeric ranges the planner relies on.
    pub fn validate(&self) -> Result<()> {
        if !(13..=100).contains(&self.age) {
            return Err(invalid("age", "must be between 13 and 100"));
        }
        if !(30.0..=300.0).contains(&self.weight) {
            return Err(invalid("weight", "must be between 30 and 300 kg"));
        }
        if !(100.0..=250.0).contains(&self.height) {
            return Err(invalid("height", "must be between 100 and 250 cm"));
        }
        if !(3..=6).contains(&self.meals_per_day) {
            return Err(invalid("mealsPerDay", "must be between 3 and 6"));
        }
        if let Some(target) = self.protein_target {
            if !target.is_finite() || target <= 0.0 {
                return Err(invalid("proteinTarget", "must be a positive number"));
            }
        }
        Ok(())
    }

    pub fn goal(&self) -> Goal {
        self.goal.unwrap_or_default()
    }

    /// Restrictions and explicit exclusions merged, lowercased and deduplicated.
    pub fn exclusions(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .restrictions
            .iter()
            .chain(self.excluded_foods.iter())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        all.sort();
        all.dedup();
        all
    }
}

fn invalid(field: &'static str, message: &str) -> PlanError {
    PlanError::InvalidProfile {
        field,
        message: message.to_string(),
    }
}
