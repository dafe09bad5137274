use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::food::{CostLevel, FoodCategory, FoodItem};
use crate::planner::targets::NutritionTargets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A food reference inside a meal with its portion in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFood {
    pub food_id: String,
    pub name: String,
    pub category: FoodCategory,
    pub grams: u32,
}

impl MealFood {
    pub fn new(food: &FoodItem, grams: u32) -> Self {
        Self {
            food_id: food.id.clone(),
            name: food.name.clone(),
            category: food.category,
            grams,
        }
    }
}

/// Total energy and macros of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroBreakdown {
    /// Add `grams` of `food` to the running totals.
    pub fn add(&mut self, food: &FoodItem, grams: u32) {
        let factor = grams as f64 / 100.0;
        self.protein += food.protein() * factor;
        self.carbs += food.carbs() * factor;
        self.fat += food.fat() * factor;
        self.calories = self.protein * 4.0 + self.carbs * 4.0 + self.fat * 9.0;
    }

    /// Round every field to one decimal for presentation.
    pub fn rounded(&self) -> Self {
        let r = |v: f64| (v * 10.0).round() / 10.0;
        Self {
            calories: r(self.calories),
            protein: r(self.protein),
            carbs: r(self.carbs),
            fat: r(self.fat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub meal_type: MealType,
    pub name: String,
    pub foods: Vec<MealFood>,
    pub totals: MacroBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u8,
    pub meals: Vec<Meal>,
}

/// Diversity counters reported alongside a finished plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarietySummary {
    pub unique_proteins: usize,
    pub unique_vegetables: usize,
    pub fish_meals: u32,
    pub red_meat_meals: u32,
    pub meets_minimum: bool,
}

/// A generated week of meals. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
    pub targets: NutritionTargets,
    pub meals_per_day: u8,
    pub cost_tier: CostLevel,
    pub seed: String,
    pub variety: VarietySummary,
}

impl WeeklyPlan {
    /// Iterate every meal of every day in order.
    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        self.days.iter().flat_map(|d| d.meals.iter())
    }

    pub fn meal_count(&self) -> usize {
        self.days.iter().map(|d| d.meals.len()).sum()
    }
}
