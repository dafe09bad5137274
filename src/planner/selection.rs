use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{CostLevel, FoodCategory, FoodItem};
use crate::planner::classify::matches_keyword;
use crate::planner::constants::*;
use crate::planner::rotation::FoodRotationEngine;

/// Role a food plays inside a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodRole {
    Protein,
    Carb,
    Vegetable,
    Fat,
}

impl fmt::Display for FoodRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FoodRole::Protein => "protein",
            FoodRole::Carb => "carb",
            FoodRole::Vegetable => "vegetable",
            FoodRole::Fat => "fat",
        })
    }
}

impl FoodRole {
    /// Category and minimum macro thresholds for the role.
    pub fn qualifies(&self, food: &FoodItem) -> bool {
        match self {
            FoodRole::Protein => {
                food.category == FoodCategory::Protein
                    && food.protein() > PROTEIN_SOURCE_MIN_PROTEIN
            }
            FoodRole::Carb => {
                food.category == FoodCategory::Carbs
                    && food.carbs() > CARB_SOURCE_MIN_CARBS
                    && food.carbs() > food.protein()
                    && !matches_keyword(&food.name, &["oat"])
            }
            FoodRole::Vegetable => {
                food.category == FoodCategory::Vegetables && food.carbs() < VEGETABLE_MAX_CARBS
            }
            FoodRole::Fat => food.category == FoodCategory::Fats && food.fat() > FAT_SOURCE_MIN_FAT,
        }
    }

    /// Nutrient the role is ranked on, per 100g.
    pub fn nutrient(&self, food: &FoodItem) -> f64 {
        match self {
            FoodRole::Protein => food.protein(),
            FoodRole::Carb => food.carbs(),
            FoodRole::Vegetable => food.protein() + food.carbs(),
            FoodRole::Fat => food.fat(),
        }
    }

    fn nutritionist_keywords(&self) -> &'static [&'static str] {
        match self {
            FoodRole::Protein => NUTRITIONIST_PROTEINS,
            FoodRole::Carb => NUTRITIONIST_CARBS,
            FoodRole::Vegetable => NUTRITIONIST_VEGETABLES,
            FoodRole::Fat => NUTRITIONIST_FATS,
        }
    }
}

/// Learned per-user liking for a food. Higher is preferred; 0 is neutral.
pub trait PreferenceScorer {
    fn score(&self, food_name: &str) -> f64;
}

/// Scorer with no opinions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralPreferences;

impl PreferenceScorer for NeutralPreferences {
    fn score(&self, _food_name: &str) -> f64 {
        0.0
    }
}

impl<F> PreferenceScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, food_name: &str) -> f64 {
        self(food_name)
    }
}

/// High tier allows everything; low and medium exclude high-cost foods.
pub fn allowed_for_tier(food: &FoodItem, tier: CostLevel) -> bool {
    match tier {
        CostLevel::High => true,
        CostLevel::Low | CostLevel::Medium => !food.is_high_cost(),
    }
}

/// Tier-specific ranking score for a candidate.
///
/// low: nutrient per cost; high: raw nutrient; medium: nutrient × efficiency.
pub fn tier_score(food: &FoodItem, role: FoodRole, tier: CostLevel) -> f64 {
    let nutrient = role.nutrient(food);
    let price = food.price_per_100();
    let efficiency = if price > 0.0 { nutrient / price } else { nutrient };
    match tier {
        CostLevel::Low => efficiency,
        CostLevel::High => nutrient,
        CostLevel::Medium => nutrient * efficiency,
    }
}

/// Carbs on the tier's shortlist are ranked ahead of everything else.
fn on_shortlist(food: &FoodItem, role: FoodRole, tier: CostLevel) -> bool {
    if role != FoodRole::Carb {
        return false;
    }
    match tier {
        CostLevel::High => matches_keyword(&food.name, PREMIUM_CARBS),
        CostLevel::Medium => matches_keyword(&food.name, BALANCED_CARBS),
        CostLevel::Low => false,
    }
}

/// Foods in `pool` that fill `role`, are not excluded and fit the tier.
pub fn eligible<'a>(
    pool: &'a [FoodItem],
    role: FoodRole,
    excluded: &[String],
    tier: CostLevel,
) -> Vec<&'a FoodItem> {
    pool.iter()
        .filter(|f| role.qualifies(f))
        .filter(|f| !f.matches_any(excluded))
        .filter(|f| allowed_for_tier(f, tier))
        .collect()
}

/// Order candidates best first. Rotation, when present, scales scores.
pub fn rank_candidates<'a>(
    candidates: Vec<&'a FoodItem>,
    role: FoodRole,
    tier: CostLevel,
    rotation: Option<&FoodRotationEngine>,
) -> Vec<&'a FoodItem> {
    let candidates = match rotation {
        Some(engine) => engine.filter_available(candidates),
        None => candidates,
    };
    let multipliers = match rotation {
        Some(engine) => engine.score_multipliers(&candidates),
        None => vec![1.0; candidates.len()],
    };

    let mut scored: Vec<(&FoodItem, bool, f64)> = candidates
        .into_iter()
        .zip(multipliers)
        .map(|(food, mult)| {
            (
                food,
                on_shortlist(food, role, tier),
                tier_score(food, role, tier) * mult,
            )
        })
        .collect();

    // Shortlisted first, then higher score; stable so catalog order breaks ties.
    scored.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
    });

    scored.into_iter().map(|(food, _, _)| food).collect()
}

/// Final pick among the top ranked candidates.
///
/// A positive user preference wins; otherwise a nutritionist favourite in
/// the window; otherwise the top-ranked food.
pub fn pick_preferred<'a>(
    ranked: &[&'a FoodItem],
    role: FoodRole,
    preferences: &dyn PreferenceScorer,
) -> Option<&'a FoodItem> {
    let window = &ranked[..ranked.len().min(PREFERENCE_WINDOW)];
    let first = window.first().copied()?;

    let mut by_preference: Vec<(&FoodItem, f64)> = window
        .iter()
        .map(|f| (*f, preferences.score(&f.name)))
        .collect();
    by_preference.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    if let Some((food, score)) = by_preference.first() {
        if *score > 0.0 {
            return Some(*food);
        }
    }

    window
        .iter()
        .copied()
        .find(|f| matches_keyword(&f.name, role.nutritionist_keywords()))
        .or(Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Unit};

    fn item(name: &str, category: FoodCategory, price: f64, m: (f64, f64, f64), cost: CostLevel) -> FoodItem {
        FoodItem::catalog(
            &name.to_lowercase().replace(' ', "-"),
            name,
            category,
            Unit::Kg,
            price,
            Macros::new(m.0, m.1, m.2),
            cost,
        )
    }

    fn proteins() -> Vec<FoodItem> {
        vec![
            item("Beef steak", FoodCategory::Protein, 22.0, (26.0, 0.0, 10.0), CostLevel::High),
            item("Chicken thighs", FoodCategory::Protein, 5.2, (24.0, 0.0, 9.0), CostLevel::Low),
            item("Turkey mince", FoodCategory::Protein, 8.0, (22.0, 0.0, 7.0), CostLevel::Medium),
            item("Eggs", FoodCategory::Protein, 4.4, (13.0, 1.1, 11.0), CostLevel::Low),
        ]
    }

    #[test]
    fn test_role_thresholds() {
        let foods = proteins();
        assert!(FoodRole::Protein.qualifies(&foods[0]));
        assert!(!FoodRole::Protein.qualifies(&foods[3]));

        let oats = item("Rolled oats", FoodCategory::Carbs, 1.8, (13.0, 66.0, 7.0), CostLevel::Low);
        let rice = item("White rice", FoodCategory::Carbs, 1.6, (7.0, 80.0, 0.6), CostLevel::Low);
        assert!(!FoodRole::Carb.qualifies(&oats));
        assert!(FoodRole::Carb.qualifies(&rice));

        let oil = item("Olive oil", FoodCategory::Fats, 9.0, (0.0, 0.0, 100.0), CostLevel::Medium);
        assert!(FoodRole::Fat.qualifies(&oil));
    }

    #[test]
    fn test_tier_filter() {
        let foods = proteins();
        let low = eligible(&foods, FoodRole::Protein, &[], CostLevel::Low);
        assert!(low.iter().all(|f| !f.is_high_cost()));
        let high = eligible(&foods, FoodRole::Protein, &[], CostLevel::High);
        assert_eq!(high.len(), 3);
    }

    #[test]
    fn test_low_tier_ranks_by_efficiency() {
        let foods = proteins();
        let ranked = rank_candidates(
            eligible(&foods, FoodRole::Protein, &[], CostLevel::Low),
            FoodRole::Protein,
            CostLevel::Low,
            None,
        );
        assert_eq!(ranked[0].name, "Chicken thighs");
    }

    #[test]
    fn test_high_tier_ranks_by_content() {
        let foods = proteins();
        let ranked = rank_candidates(
            eligible(&foods, FoodRole::Protein, &[], CostLevel::High),
            FoodRole::Protein,
            CostLevel::High,
            None,
        );
        assert_eq!(ranked[0].name, "Beef steak");
    }

    #[test]
    fn test_premium_carb_shortlist() {
        let carbs = vec![
            item("White rice", FoodCategory::Carbs, 1.6, (7.0, 80.0, 0.6), CostLevel::Low),
            item("Quinoa", FoodCategory::Carbs, 8.0, (14.0, 64.0, 6.0), CostLevel::High),
            item("Brown rice", FoodCategory::Carbs, 2.4, (7.5, 76.0, 2.7), CostLevel::Low),
        ];
        let high = rank_candidates(
            eligible(&carbs, FoodRole::Carb, &[], CostLevel::High),
            FoodRole::Carb,
            CostLevel::High,
            None,
        );
        assert_eq!(high[0].name, "Quinoa");

        let medium = rank_candidates(
            eligible(&carbs, FoodRole::Carb, &[], CostLevel::Medium),
            FoodRole::Carb,
            CostLevel::Medium,
            None,
        );
        assert_eq!(medium[0].name, "Brown rice");
    }

    #[test]
    fn test_preference_reorders_window() {
        let foods = proteins();
        let ranked: Vec<&FoodItem> = foods.iter().take(3).collect();
        let likes_turkey = |name: &str| if name.contains("Turkey") { 2.0 } else { 0.0 };
        let pick = pick_preferred(&ranked, FoodRole::Protein, &likes_turkey);
        assert_eq!(pick.map(|f| f.name.as_str()), Some("Turkey mince"));
    }

    #[test]
    fn test_nutritionist_fallback_when_no_positive_preference() {
        let foods = proteins();
        let ranked: Vec<&FoodItem> = foods.iter().take(3).collect();
        let pick = pick_preferred(&ranked, FoodRole::Protein, &NeutralPreferences);
        assert_eq!(pick.map(|f| f.name.as_str()), Some("Turkey mince"));

        let ranked: Vec<&FoodItem> = foods.iter().take(2).collect();
        let pick = pick_preferred(&ranked, FoodRole::Protein, &NeutralPreferences);
        assert_eq!(pick.map(|f| f.name.as_str()), Some("Beef steak"));
    }

    #[test]
    fn test_preference_outside_window_ignored() {
        let foods = proteins();
        let ranked: Vec<&FoodItem> = foods.iter().collect();
        let likes_eggs = |name: &str| if name == "Eggs" { 5.0 } else { 0.0 };
        let pick = pick_preferred(&ranked, FoodRole::Protein, &likes_eggs);
        assert_ne!(pick.map(|f| f.name.as_str()), Some("Eggs"));
    }

    #[test]
    fn test_pick_from_empty() {
        assert!(pick_preferred(&[], FoodRole::Fat, &NeutralPreferences).is_none());
    }
}
