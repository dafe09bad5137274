use serde::{Deserialize, Serialize};

use crate::models::{PlanInput, Sex};
use crate::planner::constants::*;

/// Daily energy and macro targets. Created once per plan, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub bmr: u32,
    pub activity_multiplier: f64,
    pub tdee: u32,
    pub calories_per_day: u32,
    pub protein_per_day: u32,
    pub carbs_per_day: u32,
    pub fat_per_day: u32,
}

/// Macro grams a single meal should deliver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroTargets {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl NutritionTargets {
    /// Even split of the daily macros over `meals_per_day` meals.
    pub fn per_meal(&self, meals_per_day: u8) -> MacroTargets {
        let n = f64::from(meals_per_day.max(1));
        MacroTargets {
            protein: f64::from(self.protein_per_day) / n,
            carbs: f64::from(self.carbs_per_day) / n,
            fat: f64::from(self.fat_per_day) / n,
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate.
///
/// BMR = 10·weight + 6.25·height − 5·age + s, with s = +5 (male) or −161 (female).
pub fn mifflin_st_jeor(sex: Sex, age: u32, weight_kg: f64, height_cm: f64) -> f64 {
    let offset = match sex {
        Sex::Male => BMR_MALE_OFFSET,
        Sex::Female => BMR_FEMALE_OFFSET,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

pub fn activity_multiplier(trains: bool) -> f64 {
    if trains {
        ACTIVITY_MULT_TRAINING
    } else {
        ACTIVITY_MULT_SEDENTARY
    }
}

/// Derive the daily targets for a profile. Pure and deterministic.
pub fn calculate(profile: &PlanInput) -> NutritionTargets {
    let goal = profile.goal();

    let bmr = mifflin_st_jeor(profile.sex, profile.age, profile.weight, profile.height).round();
    let multiplier = activity_multiplier(profile.trains);
    let tdee = (bmr * multiplier).round();
    let calories = (tdee * goal_calorie_factor(goal)).round().max(0.0);

    let protein = profile
        .protein_target
        .unwrap_or(profile.weight * protein_per_kg(goal))
        .round()
        .max(0.0);

    let fat = (calories * FAT_CALORIE_SHARE / 9.0).round();
    let carbs = ((calories - protein * 4.0 - fat * 9.0) / 4.0).round().max(0.0);

    NutritionTargets {
        bmr: bmr.max(0.0) as u32,
        activity_multiplier: multiplier,
        tdee: tdee.max(0.0) as u32,
        calories_per_day: calories as u32,
        protein_per_day: protein as u32,
        carbs_per_day: carbs as u32,
        fat_per_day: fat as u32,
    }
}
