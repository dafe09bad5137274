use crate::models::{FoodCategory, Goal, MealType};

// ─────────────────────────────────────────────────────────────────────────────
// Nutrition targets
// ─────────────────────────────────────────────────────────────────────────────

/// Mifflin-St Jeor sex-specific constant terms.
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

/// Binary activity model: trains regularly or not.
pub const ACTIVITY_MULT_TRAINING: f64 = 1.55;
pub const ACTIVITY_MULT_SEDENTARY: f64 = 1.2;

/// Share of daily calories assigned to fat.
pub const FAT_CALORIE_SHARE: f64 = 0.25;

/// Calorie factor applied to TDEE for a goal.
pub fn goal_calorie_factor(goal: Goal) -> f64 {
    match goal {
        Goal::Cutting => 0.85,
        Goal::Maintenance => 1.0,
        Goal::Bulking => 1.10,
    }
}

/// Protein grams per kilogram of bodyweight for a goal.
pub fn protein_per_kg(goal: Goal) -> f64 {
    match goal {
        Goal::Cutting => 2.2,
        Goal::Maintenance => 1.8,
        Goal::Bulking => 2.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variety and rotation defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const MAX_FISH_PER_WEEK: u32 = 2;
pub const MAX_RED_MEAT_PER_WEEK: u32 = 2;
pub const MAX_MEAL_REPETITIONS: u32 = 4;
pub const MIN_UNIQUE_PROTEINS: usize = 3;
pub const MIN_UNIQUE_VEGETABLES: usize = 5;

/// Per-food usage cap enforced by the rotation engine.
pub const MAX_USES_PER_FOOD: u32 = 2;

/// Score bonus for candidates from the least-used rotation group.
pub const ROTATION_GROUP_BONUS: f64 = 0.15;

/// Maximum relative score perturbation from the seeded noise.
pub const ROTATION_NOISE_WEIGHT: f64 = 0.05;

pub const DEFAULT_PLAN_DAYS: u8 = 7;

// ─────────────────────────────────────────────────────────────────────────────
// Meal builder
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum protein per 100g for a protein source.
pub const PROTEIN_SOURCE_MIN_PROTEIN: f64 = 15.0;
/// Minimum carbs per 100g for a carb source.
pub const CARB_SOURCE_MIN_CARBS: f64 = 15.0;
/// Vegetables must stay below this many carbs per 100g.
pub const VEGETABLE_MAX_CARBS: f64 = 15.0;
/// Minimum fat per 100g for a fat source.
pub const FAT_SOURCE_MIN_FAT: f64 = 50.0;

/// Fixed vegetable portion, independent of macro targets.
pub const VEGETABLE_PORTION_G: u32 = 150;

/// Number of ranked candidates considered for preference reordering.
pub const PREFERENCE_WINDOW: usize = 3;

pub const BREAKFAST_OATS_G: u32 = 80;
pub const BREAKFAST_DAIRY_G: u32 = 150;
pub const BREAKFAST_FRUIT_G: u32 = 100;
pub const SNACK_DAIRY_G: u32 = 150;
pub const SNACK_FRUIT_G: u32 = 100;

pub const FALLBACK_MEAL_NAME: &str = "Custom Meal";

/// Carb shortlist preferred by the high tier.
pub const PREMIUM_CARBS: &[&str] = &["quinoa", "sweet potato"];
/// Carb shortlist preferred by the medium tier.
pub const BALANCED_CARBS: &[&str] = &["brown rice", "whole wheat", "whole-wheat", "wholemeal"];

pub const NUTRITIONIST_PROTEINS: &[&str] = &["chicken breast", "turkey", "salmon"];
pub const NUTRITIONIST_CARBS: &[&str] = &["brown rice", "quinoa", "sweet potato"];
pub const NUTRITIONIST_VEGETABLES: &[&str] = &["broccoli", "spinach"];
pub const NUTRITIONIST_FATS: &[&str] = &["olive oil"];

// ─────────────────────────────────────────────────────────────────────────────
// Shopping list
// ─────────────────────────────────────────────────────────────────────────────

/// Reference daily targets the portion heuristics are calibrated for.
pub const BASELINE_PROTEIN_G: f64 = 150.0;
pub const BASELINE_CARBS_G: f64 = 250.0;
pub const BASELINE_FAT_G: f64 = 70.0;

/// Clamp range for target/baseline scaling of portions.
pub const PORTION_SCALE_MIN: f64 = 0.7;
pub const PORTION_SCALE_MAX: f64 = 1.6;

/// Raw protein bought per meal, by meal type.
pub fn protein_portion_g(meal_type: MealType) -> f64 {
    match meal_type {
        MealType::Breakfast => 100.0,
        MealType::Lunch => 150.0,
        MealType::Dinner => 200.0,
        MealType::Snack => 100.0,
    }
}

/// Packs of 12 eggs per 3-egg meal.
pub const EGG_PACKS_PER_MEAL: f64 = 0.25;
/// Cans of tuna per meal.
pub const TUNA_CANS_PER_MEAL: f64 = 1.0;
/// Oil per meal in millilitres.
pub const OIL_PER_MEAL_ML: f64 = 15.0;

/// Base portion bought per meal for a non-protein category.
pub fn category_portion(category: FoodCategory) -> f64 {
    match category {
        FoodCategory::Protein => 150.0,
        FoodCategory::Carbs => 80.0,
        FoodCategory::Vegetables => 150.0,
        FoodCategory::Fruits => 100.0,
        FoodCategory::Dairy => 150.0,
        FoodCategory::Fats => 30.0,
        FoodCategory::Legumes => 100.0,
        FoodCategory::Snacks => 50.0,
        FoodCategory::Supplements | FoodCategory::Others => 30.0,
    }
}

/// Result label thresholds on item count: below LOW -> low, up to MEDIUM -> medium.
pub const LIST_TIER_LOW_MAX_ITEMS: usize = 35;
pub const LIST_TIER_MEDIUM_MAX_ITEMS: usize = 55;

// ─────────────────────────────────────────────────────────────────────────────
// Savings optimizer
// ─────────────────────────────────────────────────────────────────────────────

/// Savings target as a share of the computed cost (low tier only).
pub const SAVINGS_TARGET_RATIO: f64 = 0.70;
pub const MAX_PROTEIN_SUBSTITUTIONS: usize = 2;
pub const MIN_DISTINCT_PROTEINS: usize = 2;

/// Round to two decimals.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_factors_bracket_maintenance() {
        assert!(goal_calorie_factor(Goal::Cutting) < 1.0);
        assert_eq!(goal_calorie_factor(Goal::Maintenance), 1.0);
        assert!(goal_calorie_factor(Goal::Bulking) > 1.0);
    }

    #[test]
    fn test_protein_portion_grows_through_the_day() {
        assert!(protein_portion_g(MealType::Breakfast) < protein_portion_g(MealType::Lunch));
        assert!(protein_portion_g(MealType::Lunch) < protein_portion_g(MealType::Dinner));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
    }
}
