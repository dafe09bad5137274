use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{FoodCategory, FoodItem, VarietySummary};
use crate::planner::classify::{FoodClassifier, KeywordClassifier};
use crate::planner::constants::*;

/// Diversity rules for one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarietyLimits {
    pub max_fish_per_week: u32,
    pub max_red_meat_per_week: u32,
    pub max_meal_repetitions: u32,
    pub min_unique_proteins: usize,
    pub min_unique_vegetables: usize,
}

impl Default for VarietyLimits {
    fn default() -> Self {
        Self {
            max_fish_per_week: MAX_FISH_PER_WEEK,
            max_red_meat_per_week: MAX_RED_MEAT_PER_WEEK,
            max_meal_repetitions: MAX_MEAL_REPETITIONS,
            min_unique_proteins: MIN_UNIQUE_PROTEINS,
            min_unique_vegetables: MIN_UNIQUE_VEGETABLES,
        }
    }
}

/// Accumulating diversity state for one weekly-plan generation.
///
/// Not safe to share across concurrent generations; create one per plan.
#[derive(Clone)]
pub struct VarietyTracker {
    limits: VarietyLimits,
    classifier: Arc<dyn FoodClassifier>,
    proteins: HashSet<String>,
    vegetables: HashSet<String>,
    meal_names: HashMap<String, u32>,
    fish_count: u32,
    red_meat_count: u32,
}

impl Default for VarietyTracker {
    fn default() -> Self {
        Self::new(VarietyLimits::default())
    }
}

impl VarietyTracker {
    pub fn new(limits: VarietyLimits) -> Self {
        Self::with_classifier(limits, Arc::new(KeywordClassifier))
    }

    pub fn with_classifier(limits: VarietyLimits, classifier: Arc<dyn FoodClassifier>) -> Self {
        Self {
            limits,
            classifier,
            proteins: HashSet::new(),
            vegetables: HashSet::new(),
            meal_names: HashMap::new(),
            fish_count: 0,
            red_meat_count: 0,
        }
    }

    pub fn limits(&self) -> &VarietyLimits {
        &self.limits
    }

    /// False once the fish or red-meat weekly cap for this food's group is reached.
    pub fn can_use_protein_source(&self, food: &FoodItem) -> bool {
        if self.classifier.is_fish(&food.name) && self.fish_count >= self.limits.max_fish_per_week
        {
            return false;
        }
        if self.classifier.is_red_meat(&food.name)
            && self.red_meat_count >= self.limits.max_red_meat_per_week
        {
            return false;
        }
        true
    }

    pub fn can_use_meal_name(&self, name: &str) -> bool {
        self.meal_name_count(name) < self.limits.max_meal_repetitions
    }

    pub fn meal_name_count(&self, name: &str) -> u32 {
        self.meal_names
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn record_protein_source(&mut self, food: &FoodItem) {
        self.proteins.insert(food.key());
        if self.classifier.is_fish(&food.name) {
            self.fish_count += 1;
        }
        if self.classifier.is_red_meat(&food.name) {
            self.red_meat_count += 1;
        }
    }

    pub fn record_vegetable(&mut self, food: &FoodItem) {
        self.vegetables.insert(food.key());
    }

    pub fn record_meal_name(&mut self, name: &str) {
        *self.meal_names.entry(name.to_lowercase()).or_insert(0) += 1;
    }

    pub fn is_vegetable_used(&self, food: &FoodItem) -> bool {
        self.vegetables.contains(&food.key())
    }

    pub fn is_protein_used(&self, food: &FoodItem) -> bool {
        self.proteins.contains(&food.key())
    }

    pub fn meets_minimum_variety(&self) -> bool {
        self.proteins.len() >= self.limits.min_unique_proteins
            && self.vegetables.len() >= self.limits.min_unique_vegetables
    }

    /// First unused, non-excluded protein source the caps still allow.
    pub fn suggest_alternative_protein<'a>(
        &self,
        catalog: &'a [FoodItem],
        excluded: &[String],
    ) -> Option<&'a FoodItem> {
        catalog.iter().find(|f| {
            f.category == FoodCategory::Protein
                && f.protein() > PROTEIN_SOURCE_MIN_PROTEIN
                && !self.is_protein_used(f)
                && !f.matches_any(excluded)
                && self.can_use_protein_source(f)
        })
    }

    /// First unused, non-excluded vegetable.
    pub fn suggest_alternative_vegetable<'a>(
        &self,
        catalog: &'a [FoodItem],
        excluded: &[String],
    ) -> Option<&'a FoodItem> {
        catalog.iter().find(|f| {
            f.category == FoodCategory::Vegetables
                && f.carbs() < VEGETABLE_MAX_CARBS
                && !self.is_vegetable_used(f)
                && !f.matches_any(excluded)
        })
    }

    pub fn summary(&self) -> VarietySummary {
        VarietySummary {
            unique_proteins: self.proteins.len(),
            unique_vegetables: self.vegetables.len(),
            fish_meals: self.fish_count,
            red_meat_meals: self.red_meat_count,
            meets_minimum: self.meets_minimum_variety(),
        }
    }
}

impl std::fmt::Debug for VarietyTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarietyTracker")
            .field("limits", &self.limits)
            .field("proteins", &self.proteins)
            .field("vegetables", &self.vegetables)
            .field("fish_count", &self.fish_count)
            .field("red_meat_count", &self.red_meat_count)
            .finish()
    }
}
