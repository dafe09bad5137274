pub mod builder;
pub mod classify;
pub mod constants;
pub mod rotation;
pub mod selection;
pub mod targets;
pub mod variety;
pub mod weekly;

pub use builder::{BuildContext, MealRequest, build_breakfast, build_for_slot, build_meal, build_snack, grams_for, meal_name};
pub use classify::{FoodClassifier, KeywordClassifier, RotationGroup};
pub use constants::*;
pub use rotation::{FoodRotationEngine, RotationSettings, seeded_noise};
pub use selection::{FoodRole, NeutralPreferences, PreferenceScorer};
pub use targets::{MacroTargets, NutritionTargets, activity_multiplier, calculate, mifflin_st_jeor};
pub use variety::{VarietyLimits, VarietyTracker};
pub use weekly::{WeeklyPlanAssembler, allowed_by_diet, generate_weekly_plan, meal_slots, slot_targets};
