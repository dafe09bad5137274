use std::sync::Arc;

use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{DayPlan, DietStyle, FoodCategory, FoodItem, MealType, PlanInput, WeeklyPlan};
use crate::planner::builder::{BuildContext, MealRequest, build_for_slot};
use crate::planner::classify::{FoodClassifier, KeywordClassifier};
use crate::planner::rotation::FoodRotationEngine;
use crate::planner::selection::PreferenceScorer;
use crate::planner::targets::{self, MacroTargets, NutritionTargets};
use crate::planner::variety::VarietyTracker;

/// Meal slots for a day: breakfast, lunch, dinner, plus a snack from four meals up.
pub fn meal_slots(meals_per_day: u8) -> Vec<MealType> {
    let mut slots = vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner];
    if meals_per_day >= 4 {
        slots.push(MealType::Snack);
    }
    slots
}

/// Macro target for one slot. The snack absorbs every meal beyond the third.
pub fn slot_targets(targets: &NutritionTargets, meals_per_day: u8, slot: MealType) -> MacroTargets {
    let per_meal = targets.per_meal(meals_per_day);
    match slot {
        MealType::Snack => per_meal.scaled(f64::from(meals_per_day.saturating_sub(3).max(1))),
        _ => per_meal,
    }
}

/// Foods a diet style allows.
pub fn allowed_by_diet(food: &FoodItem, style: DietStyle, classifier: &dyn FoodClassifier) -> bool {
    let name = &food.name;
    match style {
        DietStyle::Omnivore => true,
        DietStyle::Pescatarian => !classifier.is_meat(name),
        DietStyle::Vegetarian => !classifier.is_meat(name) && !classifier.is_fish(name),
        DietStyle::Vegan => {
            !classifier.is_meat(name)
                && !classifier.is_fish(name)
                && food.category != FoodCategory::Dairy
                && !(food.category == FoodCategory::Protein && classifier.is_egg(name))
        }
    }
}

/// Builds a full week of meals for one profile.
///
/// Owns the variety tracker and rotation engine for the duration of one
/// generation; nothing is shared between calls.
pub struct WeeklyPlanAssembler<'a> {
    catalog: &'a [FoodItem],
    preferences: &'a dyn PreferenceScorer,
    config: &'a PlannerConfig,
    classifier: Arc<dyn FoodClassifier>,
}

impl<'a> WeeklyPlanAssembler<'a> {
    pub fn new(
        catalog: &'a [FoodItem],
        preferences: &'a dyn PreferenceScorer,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            catalog,
            preferences,
            config,
            classifier: Arc::new(KeywordClassifier),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn FoodClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Generate the plan. `seed` identifies the user and week for rotation.
    pub fn generate(&self, profile: &PlanInput, seed: &str) -> Result<WeeklyPlan> {
        profile.validate()?;

        let targets = targets::calculate(profile);
        let excluded = profile.exclusions();
        let foods: Vec<FoodItem> = self
            .catalog
            .iter()
            .filter(|f| allowed_by_diet(f, profile.diet_style, self.classifier.as_ref()))
            .cloned()
            .collect();

        let mut tracker =
            VarietyTracker::with_classifier(self.config.variety, Arc::clone(&self.classifier));
        let mut rotation = FoodRotationEngine::with_classifier(
            seed,
            self.config.rotation,
            Arc::clone(&self.classifier),
        );

        let slots = meal_slots(profile.meals_per_day);
        let mut days = Vec::with_capacity(usize::from(self.config.plan_days));

        {
            let mut ctx = BuildContext::new(self.preferences)
                .with_variety(&mut tracker)
                .with_rotation(&mut rotation);

            for day in 1..=self.config.plan_days {
                let mut meals = Vec::with_capacity(slots.len());
                for &slot in &slots {
                    let request = MealRequest {
                        meal_type: slot,
                        targets: slot_targets(&targets, profile.meals_per_day, slot),
                        available_foods: &foods,
                        excluded_foods: &excluded,
                        cost_tier: profile.cost_tier,
                    };
                    meals.push(build_for_slot(&request, &mut ctx)?);
                }
                days.push(DayPlan { day, meals });
            }
        }

        let variety = tracker.summary();
        if !variety.meets_minimum {
            warn!(
                unique_proteins = variety.unique_proteins,
                unique_vegetables = variety.unique_vegetables,
                "weekly plan is below the variety floor"
            );
        }
        info!(
            days = days.len(),
            meals_per_day = profile.meals_per_day,
            kcal_per_day = targets.calories_per_day,
            "weekly plan generated"
        );

        Ok(WeeklyPlan {
            days,
            targets,
            meals_per_day: profile.meals_per_day,
            cost_tier: profile.cost_tier,
            seed: seed.to_string(),
            variety,
        })
    }
}

/// Convenience wrapper around [`WeeklyPlanAssembler`].
pub fn generate_weekly_plan(
    profile: &PlanInput,
    catalog: &[FoodItem],
    preferences: &dyn PreferenceScorer,
    config: &PlannerConfig,
    seed: &str,
) -> Result<WeeklyPlan> {
    WeeklyPlanAssembler::new(catalog, preferences, config).generate(profile, seed)
}
