use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::info;

use crate::catalog::FoodCatalog;
use crate::error::{PlanError, Result};
use crate::models::{
    CostLevel, FoodCategory, FoodItem, MealType, SavingsStatus, ShoppingListResult, Unit,
    WeeklyPlan,
};
use crate::planner::classify::{FoodClassifier, KeywordClassifier, matches_keyword};
use crate::planner::constants::*;
use crate::planner::targets::NutritionTargets;
use crate::shopping::savings::{SavingsOptimizer, SavingsSettings};
use crate::shopping::substitutions::SubstitutionGraph;

/// How often a food appears in a plan, per meal type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodTally {
    pub by_meal_type: BTreeMap<MealType, u32>,
}

impl FoodTally {
    pub fn total(&self) -> u32 {
        self.by_meal_type.values().sum()
    }
}

/// Count each referenced food id across every slot of every day, in order of
/// first appearance.
pub fn tally(plan: &WeeklyPlan) -> Vec<(String, FoodTally)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(String, FoodTally)> = Vec::new();
    for meal in plan.meals() {
        for food in &meal.foods {
            let i = *index.entry(food.food_id.as_str()).or_insert_with(|| {
                out.push((food.food_id.clone(), FoodTally::default()));
                out.len() - 1
            });
            *out[i].1.by_meal_type.entry(meal.meal_type).or_insert(0) += 1;
        }
    }
    out
}

/// Target/baseline ratio clamped to the portion scale range.
pub fn portion_scale(actual: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return 1.0;
    }
    (actual / baseline).clamp(PORTION_SCALE_MIN, PORTION_SCALE_MAX)
}

/// Small-label size band of a list: under 35 items low, up to 55 medium, else high.
pub fn list_tier(item_count: usize) -> CostLevel {
    if item_count < LIST_TIER_LOW_MAX_ITEMS {
        CostLevel::Low
    } else if item_count <= LIST_TIER_MEDIUM_MAX_ITEMS {
        CostLevel::Medium
    } else {
        CostLevel::High
    }
}

/// "Breakfast, Dinner protein for 4 meals".
pub fn reason_for(food: &FoodItem, tally: &FoodTally) -> String {
    let labels: Vec<&str> = tally.by_meal_type.keys().map(|m| m.label()).collect();
    let meals = tally.total();
    let noun = if meals == 1 { "meal" } else { "meals" };
    format!("{} {} for {meals} {noun}", labels.join(", "), food.category)
}

/// Turns a weekly plan into a priced shopping list.
pub struct ShoppingListGenerator<'a> {
    catalog: &'a FoodCatalog,
    graph: &'a SubstitutionGraph,
    settings: SavingsSettings,
    classifier: Arc<dyn FoodClassifier>,
}

impl<'a> ShoppingListGenerator<'a> {
    pub fn new(
        catalog: &'a FoodCatalog,
        graph: &'a SubstitutionGraph,
        settings: SavingsSettings,
    ) -> Self {
        Self {
            catalog,
            graph,
            settings,
            classifier: Arc::new(KeywordClassifier),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn FoodClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Base amount (g, ml, or the unit's base for eggs and canned fish) bought for
    /// every use of `food` counted in `tally`.
    fn purchase_base(&self, food: &FoodItem, tally: &FoodTally, targets: &NutritionTargets) -> f64 {
        let meals = f64::from(tally.total());
        match food.category {
            FoodCategory::Protein if self.classifier.is_egg(&food.name) => {
                meals * EGG_PACKS_PER_MEAL * Unit::Pack.base_amount()
            }
            FoodCategory::Protein if self.classifier.is_fish(&food.name) && food.unit == Unit::Can => {
                meals * TUNA_CANS_PER_MEAL * Unit::Can.base_amount()
            }
            FoodCategory::Protein => {
                let scale = portion_scale(f64::from(targets.protein_per_day), BASELINE_PROTEIN_G);
                tally
                    .by_meal_type
                    .iter()
                    .map(|(meal_type, count)| protein_portion_g(*meal_type) * f64::from(*count))
                    .sum::<f64>()
                    * scale
            }
            FoodCategory::Carbs => {
                meals
                    * category_portion(FoodCategory::Carbs)
                    * portion_scale(f64::from(targets.carbs_per_day), BASELINE_CARBS_G)
            }
            FoodCategory::Fats => {
                let per_meal = if matches_keyword(&food.name, &["oil"]) {
                    OIL_PER_MEAL_ML
                } else {
                    category_portion(FoodCategory::Fats)
                };
                meals * per_meal * portion_scale(f64::from(targets.fat_per_day), BASELINE_FAT_G)
            }
            category => meals * category_portion(category),
        }
    }

    /// Build the list. Low-tier plans get a savings pass toward 70% of cost.
    ///
    /// Fails when a plan references a food id the catalog does not contain.
    pub fn generate(&self, plan: &WeeklyPlan, excluded: &[String]) -> Result<ShoppingListResult> {
        let mut items = Vec::new();
        for (food_id, counts) in tally(plan) {
            let food = self
                .catalog
                .get(&food_id)
                .ok_or_else(|| PlanError::MissingCatalogReference(food_id.clone()))?;

            let base = self.purchase_base(food, &counts, &plan.targets);
            let quantity = round2(base / food.unit.base_amount());
            items.push(FoodItem {
                quantity,
                estimated_price: Some(round2(quantity * food.price_per_unit)),
                reason: Some(reason_for(food, &counts)),
                ..food.clone()
            });
        }

        items.sort_by(|a, b| {
            a.category
                .shelf_rank()
                .cmp(&b.category.shelf_rank())
                .then_with(|| a.name.cmp(&b.name))
        });

        let total_cost = round2(items.iter().map(FoodItem::line_price).sum());

        let (items, total_estimated_cost, savings_status, savings_target, substitutions) =
            if plan.cost_tier == CostLevel::Low {
                let target = round2(total_cost * self.settings.target_ratio);
                let optimizer = SavingsOptimizer::new(self.graph, self.catalog, self.settings);
                let result = optimizer.optimize(items, total_cost, target, excluded);
                (
                    result.items,
                    result.total_estimated_cost,
                    result.status,
                    Some(target),
                    result.substitutions,
                )
            } else {
                (items, total_cost, SavingsStatus::WithinSavings, None, Vec::new())
            };

        let total_protein = round2(items.iter().map(FoodItem::line_protein).sum());
        let efficiency_score = if total_estimated_cost > 0.0 {
            round2(total_protein / total_estimated_cost)
        } else {
            0.0
        };

        info!(
            items = items.len(),
            cost = total_estimated_cost,
            protein = total_protein,
            status = %savings_status,
            "shopping list generated"
        );

        Ok(ShoppingListResult {
            cost_tier: list_tier(items.len()),
            items,
            total_estimated_cost,
            total_protein,
            efficiency_score,
            savings_status,
            savings_target,
            substitutions,
        })
    }
}

/// Convenience wrapper around [`ShoppingListGenerator`].
pub fn generate_shopping_list(
    plan: &WeeklyPlan,
    catalog: &FoodCatalog,
    graph: &SubstitutionGraph,
    settings: SavingsSettings,
    excluded: &[String],
) -> Result<ShoppingListResult> {
    ShoppingListGenerator::new(catalog, graph, settings).generate(plan, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::models::{DayPlan, MacroBreakdown, Meal, MealFood, VarietySummary};

    fn targets(protein: u32) -> NutritionTargets {
        NutritionTargets {
            bmr: 1780,
            activity_multiplier: 1.55,
            tdee: 2759,
            calories_per_day: 2759,
            protein_per_day: protein,
            carbs_per_day: 250,
            fat_per_day: 70,
        }
    }

    fn meal(catalog: &FoodCatalog, meal_type: MealType, ids: &[&str]) -> Meal {
        Meal {
            meal_type,
            name: ids.join(" + "),
            foods: ids
                .iter()
                .map(|id| MealFood::new(catalog.get(id).unwrap(), 100))
                .collect(),
            totals: MacroBreakdown::default(),
        }
    }

    fn plan(catalog: &FoodCatalog, tier: CostLevel, protein: u32) -> WeeklyPlan {
        let days = (1..=2)
            .map(|day| DayPlan {
                day,
                meals: vec![
                    meal(catalog, MealType::Breakfast, &["rolled-oats", "greek-yogurt", "bananas"]),
                    meal(catalog, MealType::Lunch, &["chicken-breast", "white-rice", "broccoli", "olive-oil"]),
                    meal(catalog, MealType::Dinner, &["chicken-breast", "potatoes", "carrots"]),
                ],
            })
            .collect();
        WeeklyPlan {
            days,
            targets: targets(protein),
            meals_per_day: 3,
            cost_tier: tier,
            seed: "test".to_string(),
            variety: VarietySummary::default(),
        }
    }

    #[test]
    fn test_tally_counts_meal_types() {
        let catalog = FoodCatalog::new(default_catalog());
        let counts = tally(&plan(&catalog, CostLevel::Medium, 150));
        let (id, chicken) = counts
            .iter()
            .find(|(id, _)| id == "chicken-breast")
            .unwrap();
        assert_eq!(id, "chicken-breast");
        assert_eq!(chicken.total(), 4);
        assert_eq!(chicken.by_meal_type.get(&MealType::Lunch), Some(&2));
        assert_eq!(chicken.by_meal_type.get(&MealType::Dinner), Some(&2));
    }

    #[test]
    fn test_quantities_reasons_and_order() {
        let catalog = FoodCatalog::new(default_catalog());
        let graph = SubstitutionGraph::default();
        let list = generate_shopping_list(
            &plan(&catalog, CostLevel::Medium, 150),
            &catalog,
            &graph,
            SavingsSettings::default(),
            &[],
        )
        .unwrap();

        let chicken = &list.items[0];
        assert_eq!(chicken.id, "chicken-breast");
        // 2 lunches at 150g and 2 dinners at 200g, unscaled.
        assert_eq!(chicken.quantity, 0.7);
        assert_eq!(chicken.estimated_price, Some(5.25));
        assert_eq!(chicken.reason.as_deref(), Some("Lunch, Dinner protein for 4 meals"));

        let oil = list.items.iter().find(|i| i.id == "olive-oil").unwrap();
        assert_eq!(oil.quantity, 0.03);

        let ranks: Vec<u8> = list.items.iter().map(|i| i.category.shelf_rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(list.savings_status, SavingsStatus::WithinSavings);
        assert_eq!(list.cost_tier, CostLevel::Low);
        assert!(list.savings_target.is_none());
    }

    #[test]
    fn test_protein_scaled_by_target() {
        let catalog = FoodCatalog::new(default_catalog());
        let graph = SubstitutionGraph::default();
        let list = generate_shopping_list(
            &plan(&catalog, CostLevel::High, 300),
            &catalog,
            &graph,
            SavingsSettings::default(),
            &[],
        )
        .unwrap();
        // Ratio 2.0 is clamped to 1.6.
        assert_eq!(list.items[0].quantity, 1.12);
    }

    #[test]
    fn test_low_tier_runs_savings_pass() {
        let catalog = FoodCatalog::new(default_catalog());
        let graph = SubstitutionGraph::default();
        let list = generate_shopping_list(
            &plan(&catalog, CostLevel::Low, 150),
            &catalog,
            &graph,
            SavingsSettings::default(),
            &[],
        )
        .unwrap();
        assert!(list.savings_target.is_some());
        assert_ne!(list.savings_status, SavingsStatus::WithinSavings);
        assert!(!list.substitutions.is_empty());
    }

    #[test]
    fn test_missing_catalog_reference() {
        let catalog = FoodCatalog::new(default_catalog());
        let mut plan = plan(&catalog, CostLevel::Medium, 150);
        plan.days[0].meals[0].foods[0].food_id = "dragonfruit".to_string();
        let graph = SubstitutionGraph::default();
        let err = generate_shopping_list(&plan, &catalog, &graph, SavingsSettings::default(), &[])
            .unwrap_err();
        assert!(matches!(err, PlanError::MissingCatalogReference(id) if id == "dragonfruit"));
    }

    struct BonitoIsFish;

    impl FoodClassifier for BonitoIsFish {
        fn is_fish(&self, name: &str) -> bool {
            name.to_lowercase().contains("bonito") || KeywordClassifier.is_fish(name)
        }
        fn is_red_meat(&self, name: &str) -> bool {
            KeywordClassifier.is_red_meat(name)
        }
        fn is_poultry(&self, name: &str) -> bool {
            KeywordClassifier.is_poultry(name)
        }
        fn is_egg(&self, name: &str) -> bool {
            KeywordClassifier.is_egg(name)
        }
        fn rotation_group(&self, name: &str) -> Option<crate::planner::classify::RotationGroup> {
            KeywordClassifier.rotation_group(name)
        }
    }

    #[test]
    fn test_canned_fish_is_bought_by_the_can() {
        let bonito = FoodItem::catalog(
            "canned-bonito",
            "Canned bonito",
            FoodCategory::Protein,
            Unit::Can,
            1.5,
            crate::models::Macros::new(25.0, 0.0, 2.0),
            CostLevel::Low,
        );
        let sardines = default_catalog()
            .into_iter()
            .find(|f| f.id == "canned-sardines")
            .unwrap();
        let catalog = FoodCatalog::new(vec![bonito.clone(), sardines.clone()]);
        let graph = SubstitutionGraph::default();
        let counts = FoodTally {
            by_meal_type: BTreeMap::from([(MealType::Lunch, 3)]),
        };
        let can = Unit::Can.base_amount();

        let keyword = ShoppingListGenerator::new(&catalog, &graph, SavingsSettings::default());
        assert_eq!(keyword.purchase_base(&sardines, &counts, &targets(150)), 3.0 * can);
        // Not fish by keyword, so portioned by grams like any protein.
        assert_ne!(keyword.purchase_base(&bonito, &counts, &targets(150)), 3.0 * can);

        let custom = ShoppingListGenerator::new(&catalog, &graph, SavingsSettings::default())
            .with_classifier(Arc::new(BonitoIsFish));
        assert_eq!(custom.purchase_base(&bonito, &counts, &targets(150)), 3.0 * can);
    }

    #[test]
    fn test_list_tier_thresholds() {
        assert_eq!(list_tier(34), CostLevel::Low);
        assert_eq!(list_tier(35), CostLevel::Medium);
        assert_eq!(list_tier(55), CostLevel::Medium);
        assert_eq!(list_tier(56), CostLevel::High);
    }
}
