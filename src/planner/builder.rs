use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{CostLevel, FoodCategory, FoodItem, MacroBreakdown, Meal, MealFood, MealType};
use crate::planner::classify::{OAT_KEYWORDS, matches_keyword};
use crate::planner::constants::*;
use crate::planner::rotation::FoodRotationEngine;
use crate::planner::selection::{
    FoodRole, PreferenceScorer, allowed_for_tier, eligible, pick_preferred, rank_candidates,
    tier_score,
};
use crate::planner::targets::MacroTargets;
use crate::planner::variety::VarietyTracker;

/// Inputs for building one meal.
#[derive(Debug, Clone, Copy)]
pub struct MealRequest<'a> {
    pub meal_type: MealType,
    pub targets: MacroTargets,
    pub available_foods: &'a [FoodItem],
    pub excluded_foods: &'a [String],
    pub cost_tier: CostLevel,
}

/// Mutable collaborators shared across the meals of one plan.
pub struct BuildContext<'a> {
    pub variety: Option<&'a mut VarietyTracker>,
    pub rotation: Option<&'a mut FoodRotationEngine>,
    pub preferences: &'a dyn PreferenceScorer,
}

impl<'a> BuildContext<'a> {
    pub fn new(preferences: &'a dyn PreferenceScorer) -> Self {
        Self {
            variety: None,
            rotation: None,
            preferences,
        }
    }

    pub fn with_variety(mut self, tracker: &'a mut VarietyTracker) -> Self {
        self.variety = Some(tracker);
        self
    }

    pub fn with_rotation(mut self, engine: &'a mut FoodRotationEngine) -> Self {
        self.rotation = Some(engine);
        self
    }

    fn can_use_meal_name(&self, name: &str) -> bool {
        self.variety
            .as_deref()
            .map_or(true, |v| v.can_use_meal_name(name))
    }
}

/// Grams of a food needed to deliver `target` grams of a macro.
///
/// Returns 0 when the food has none of that macro or the target is not positive.
pub fn grams_for(macro_per_100: f64, target: f64) -> u32 {
    if macro_per_100 <= 0.0 || target <= 0.0 {
        return 0;
    }
    (target / macro_per_100 * 100.0).round() as u32
}

/// Foods joined by " + " with qualifiers stripped.
pub fn meal_name(parts: &[(&FoodItem, u32)]) -> String {
    if parts.is_empty() {
        return FALLBACK_MEAL_NAME.to_string();
    }
    parts
        .iter()
        .map(|(food, _)| food.display_name())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Build a protein + carb (+ vegetable, + fat) meal that hits the macro targets.
///
/// Fails when no protein or carb source survives tier, exclusion and variety
/// filtering.
pub fn build_meal(request: &MealRequest<'_>, ctx: &mut BuildContext<'_>) -> Result<Meal> {
    let proteins = ranked_role(request, ctx, FoodRole::Protein);
    if proteins.is_empty() {
        return Err(PlanError::UnsatisfiableMeal {
            role: FoodRole::Protein,
        });
    }

    let carbs = ranked_role(request, ctx, FoodRole::Carb);
    let carb = pick_preferred(&carbs, FoodRole::Carb, ctx.preferences)
        .ok_or(PlanError::UnsatisfiableMeal {
            role: FoodRole::Carb,
        })?;

    let vegetables = ranked_role(request, ctx, FoodRole::Vegetable);
    let vegetable = pick_preferred(&vegetables, FoodRole::Vegetable, ctx.preferences);

    let fats = ranked_role(request, ctx, FoodRole::Fat);
    let fat_source = pick_preferred(&fats, FoodRole::Fat, ctx.preferences);

    // Walk protein candidates until the composed name is under the repetition cap.
    let mut remaining = proteins;
    let mut chosen: Option<(&FoodItem, Vec<(&FoodItem, u32)>)> = None;
    while let Some(protein) = pick_preferred(&remaining, FoodRole::Protein, ctx.preferences) {
        let parts = compose(&request.targets, protein, carb, vegetable, fat_source);
        let usable = ctx.can_use_meal_name(&meal_name(&parts));
        // Every candidate blocked: the last composition tried is kept.
        chosen = Some((protein, parts));
        if usable {
            break;
        }
        remaining.retain(|f| f.id != protein.id);
    }

    let (protein, parts) = chosen.ok_or(PlanError::UnsatisfiableMeal {
        role: FoodRole::Protein,
    })?;
    Ok(finish(request.meal_type, &parts, ctx, Some(protein), vegetable))
}

/// Breakfast template: oats 80g + dairy 150g + optional fruit 100g.
///
/// Falls back to [`build_meal`] when oats or a dairy item is unavailable
/// under the active tier and exclusions.
pub fn build_breakfast(request: &MealRequest<'_>, ctx: &mut BuildContext<'_>) -> Result<Meal> {
    let oats = request.available_foods.iter().find(|f| {
        f.category == FoodCategory::Carbs
            && matches_keyword(&f.name, OAT_KEYWORDS)
            && allowed_for_tier(f, request.cost_tier)
            && !f.matches_any(request.excluded_foods)
    });
    let dairy = best_dairy(request, ctx);

    match (oats, dairy) {
        (Some(oats), Some(dairy)) => Ok(template_meal(
            request,
            ctx,
            vec![(oats, BREAKFAST_OATS_G), (dairy, BREAKFAST_DAIRY_G)],
            BREAKFAST_FRUIT_G,
        )),
        _ => {
            debug!(
                tier = %request.cost_tier,
                "breakfast template unavailable, using general builder"
            );
            build_meal(request, ctx)
        }
    }
}

/// Snack template: dairy 150g + optional fruit 100g, else the general builder.
pub fn build_snack(request: &MealRequest<'_>, ctx: &mut BuildContext<'_>) -> Result<Meal> {
    match best_dairy(request, ctx) {
        Some(dairy) => Ok(template_meal(
            request,
            ctx,
            vec![(dairy, SNACK_DAIRY_G)],
            SNACK_FRUIT_G,
        )),
        None => {
            debug!("snack template unavailable, using general builder");
            build_meal(request, ctx)
        }
    }
}

/// Dispatch on the meal type.
pub fn build_for_slot(request: &MealRequest<'_>, ctx: &mut BuildContext<'_>) -> Result<Meal> {
    match request.meal_type {
        MealType::Breakfast => build_breakfast(request, ctx),
        MealType::Snack => build_snack(request, ctx),
        MealType::Lunch | MealType::Dinner => build_meal(request, ctx),
    }
}

/// Candidates for a role after every filter, best first.
fn ranked_role<'a>(
    request: &MealRequest<'a>,
    ctx: &BuildContext<'_>,
    role: FoodRole,
) -> Vec<&'a FoodItem> {
    let mut candidates = eligible(
        request.available_foods,
        role,
        request.excluded_foods,
        request.cost_tier,
    );

    if let Some(tracker) = ctx.variety.as_deref() {
        match role {
            FoodRole::Protein => candidates.retain(|f| tracker.can_use_protein_source(f)),
            FoodRole::Vegetable => {
                let unused: Vec<&FoodItem> = candidates
                    .iter()
                    .copied()
                    .filter(|f| !tracker.is_vegetable_used(f))
                    .collect();
                if !unused.is_empty() {
                    candidates = unused;
                }
            }
            FoodRole::Carb | FoodRole::Fat => {}
        }
    }

    rank_candidates(candidates, role, request.cost_tier, ctx.rotation.as_deref())
}

/// Portion the chosen foods against the per-meal targets.
fn compose<'a>(
    targets: &MacroTargets,
    protein: &'a FoodItem,
    carb: &'a FoodItem,
    vegetable: Option<&'a FoodItem>,
    fat_source: Option<&'a FoodItem>,
) -> Vec<(&'a FoodItem, u32)> {
    let protein_g = grams_for(protein.protein(), targets.protein);
    let carb_g = grams_for(carb.carbs(), targets.carbs);

    let mut parts = vec![(protein, protein_g), (carb, carb_g)];
    if let Some(veg) = vegetable {
        parts.push((veg, VEGETABLE_PORTION_G));
    }

    let covered_fat =
        protein.fat() * f64::from(protein_g) / 100.0 + carb.fat() * f64::from(carb_g) / 100.0;
    let residual_fat = targets.fat - covered_fat;
    if residual_fat > 0.0 {
        if let Some(fat) = fat_source {
            let grams = grams_for(fat.fat(), residual_fat);
            if grams > 0 {
                parts.push((fat, grams));
            }
        }
    }
    parts
}

fn best_dairy<'a>(request: &MealRequest<'a>, ctx: &BuildContext<'_>) -> Option<&'a FoodItem> {
    let mut ranked: Vec<&FoodItem> = request
        .available_foods
        .iter()
        .filter(|f| f.category == FoodCategory::Dairy)
        .filter(|f| allowed_for_tier(f, request.cost_tier))
        .filter(|f| !f.matches_any(request.excluded_foods))
        .collect();
    ranked.sort_by(|a, b| {
        tier_score(b, FoodRole::Protein, request.cost_tier)
            .total_cmp(&tier_score(a, FoodRole::Protein, request.cost_tier))
    });
    pick_preferred(&ranked, FoodRole::Protein, ctx.preferences)
}

/// Fixed-portion meal; tries each fruit (then no fruit) to respect the name cap.
fn template_meal<'a>(
    request: &MealRequest<'a>,
    ctx: &mut BuildContext<'_>,
    lead: Vec<(&'a FoodItem, u32)>,
    fruit_grams: u32,
) -> Meal {
    let fruits: Vec<&FoodItem> = request
        .available_foods
        .iter()
        .filter(|f| f.category == FoodCategory::Fruits)
        .filter(|f| allowed_for_tier(f, request.cost_tier))
        .filter(|f| !f.matches_any(request.excluded_foods))
        .collect();
    let fruits = rank_candidates(
        fruits,
        FoodRole::Carb,
        request.cost_tier,
        ctx.rotation.as_deref(),
    );

    let options = fruits.iter().copied().map(Some).chain(std::iter::once(None));
    let mut chosen: Option<Vec<(&'a FoodItem, u32)>> = None;
    for fruit in options {
        let mut parts = lead.clone();
        if let Some(fruit) = fruit {
            parts.push((fruit, fruit_grams));
        }
        let usable = ctx.can_use_meal_name(&meal_name(&parts));
        chosen = Some(parts);
        if usable {
            break;
        }
    }

    let parts = chosen.unwrap_or(lead);
    finish(request.meal_type, &parts, ctx, None, None)
}

/// Total the macros, record side effects and produce the meal.
fn finish(
    meal_type: MealType,
    parts: &[(&FoodItem, u32)],
    ctx: &mut BuildContext<'_>,
    protein: Option<&FoodItem>,
    vegetable: Option<&FoodItem>,
) -> Meal {
    let name = meal_name(parts);

    let mut totals = MacroBreakdown::default();
    for (food, grams) in parts {
        totals.add(food, *grams);
    }

    if let Some(tracker) = ctx.variety.as_deref_mut() {
        if let Some(p) = protein {
            tracker.record_protein_source(p);
        }
        if let Some(v) = vegetable {
            tracker.record_vegetable(v);
        }
        tracker.record_meal_name(&name);
    }
    if let Some(engine) = ctx.rotation.as_deref_mut() {
        for (food, _) in parts {
            engine.record_food(food);
        }
    }

    debug!(meal = %name, slot = %meal_type, kcal = totals.calories.round(), "built meal");

    Meal {
        meal_type,
        name,
        foods: parts.iter().map(|(f, g)| MealFood::new(f, *g)).collect(),
        totals: totals.rounded(),
    }
}
