use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::FoodCatalog;
use crate::models::{FoodCategory, FoodItem, SavingsStatus, SubstitutionRecord};
use crate::planner::constants::*;
use crate::shopping::substitutions::SubstitutionGraph;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsSettings {
    /// Savings target as a share of the unoptimized cost.
    pub target_ratio: f64,
    pub max_protein_substitutions: usize,
    pub min_distinct_proteins: usize,
}

impl Default for SavingsSettings {
    fn default() -> Self {
        Self {
            target_ratio: SAVINGS_TARGET_RATIO,
            max_protein_substitutions: MAX_PROTEIN_SUBSTITUTIONS,
            min_distinct_proteins: MIN_DISTINCT_PROTEINS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub items: Vec<FoodItem>,
    pub total_estimated_cost: f64,
    pub status: SavingsStatus,
    pub substitutions: Vec<SubstitutionRecord>,
    pub total_savings: f64,
    pub protein_delta: f64,
}

/// Protein grams bought per unit of money: quantity × protein/100g × 10 / price.
pub fn protein_per_cost(item: &FoodItem) -> f64 {
    let price = item.line_price();
    if price <= 0.0 {
        return f64::INFINITY;
    }
    item.quantity * item.protein() * 10.0 / price
}

/// Number of distinct protein-category names in a list.
pub fn distinct_proteins(items: &[FoodItem]) -> usize {
    items
        .iter()
        .filter(|i| i.category == FoodCategory::Protein)
        .map(FoodItem::key)
        .collect::<HashSet<_>>()
        .len()
}

/// Greedy single-pass cost reducer.
///
/// Swaps low protein-per-cost items for cheaper alternatives from the
/// substitution graph until the target is met or options run out. Protein
/// swaps are capped and rolled back if they collapse protein diversity.
pub struct SavingsOptimizer<'a> {
    graph: &'a SubstitutionGraph,
    catalog: &'a FoodCatalog,
    settings: SavingsSettings,
}

impl<'a> SavingsOptimizer<'a> {
    pub fn new(
        graph: &'a SubstitutionGraph,
        catalog: &'a FoodCatalog,
        settings: SavingsSettings,
    ) -> Self {
        Self {
            graph,
            catalog,
            settings,
        }
    }

    pub fn optimize(
        &self,
        items: Vec<FoodItem>,
        total_cost: f64,
        savings_target: f64,
        excluded: &[String],
    ) -> OptimizationResult {
        if total_cost <= savings_target {
            return OptimizationResult {
                items,
                total_estimated_cost: round2(total_cost).min(total_cost),
                status: SavingsStatus::WithinSavings,
                substitutions: Vec::new(),
                total_savings: 0.0,
                protein_delta: 0.0,
            };
        }

        let mut items = items;
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| protein_per_cost(&items[a]).total_cmp(&protein_per_cost(&items[b])));

        let mut cost = total_cost;
        let mut substitutions = Vec::new();
        let mut protein_swaps = 0usize;
        let mut protein_delta = 0.0;

        for idx in order {
            if cost <= savings_target {
                break;
            }

            let current = &items[idx];
            let is_protein = current.category == FoodCategory::Protein;
            if is_protein && protein_swaps >= self.settings.max_protein_substitutions {
                continue;
            }
            let Some(replacement) = self.cheapest_substitute(current, excluded) else {
                continue;
            };

            let old_price = current.line_price();
            let new_price = replacement.line_price();
            let record = SubstitutionRecord {
                from: current.name.clone(),
                to: replacement.name.clone(),
                reason: format!(
                    "{} is cheaper than {} for the same quantity",
                    replacement.display_name(),
                    current.display_name()
                ),
                savings: round2(old_price - new_price),
                protein_delta: round2(replacement.line_protein() - current.line_protein()),
            };

            if is_protein {
                let snapshot = items.clone();
                let before = distinct_proteins(&items);
                items[idx] = replacement;
                let after = distinct_proteins(&items);
                if after < self.settings.min_distinct_proteins && after < before {
                    items = snapshot;
                    warn!(
                        from = %record.from,
                        to = %record.to,
                        distinct_proteins = after,
                        "substitution would collapse protein variety, stopping"
                    );
                    break;
                }
                protein_swaps += 1;
            } else {
                items[idx] = replacement;
            }

            debug!(from = %record.from, to = %record.to, savings = record.savings, "applied substitution");
            cost -= old_price - new_price;
            protein_delta += record.protein_delta;
            substitutions.push(record);
        }

        // Rounding must never report more than the list cost before the pass.
        let cost = round2(cost).min(total_cost);
        let status = if cost <= savings_target {
            SavingsStatus::AdjustedToSavings
        } else {
            SavingsStatus::OverSavingsMinimum
        };
        info!(%status, cost, target = savings_target, swaps = substitutions.len(), "savings pass finished");

        OptimizationResult {
            items,
            total_estimated_cost: cost,
            status,
            total_savings: round2(total_cost - cost),
            protein_delta: round2(protein_delta),
            substitutions,
        }
    }

    /// The cheapest graph alternative that is known, not excluded and actually
    /// cheaper for the same amount, already converted to its own unit.
    fn cheapest_substitute(&self, item: &FoodItem, excluded: &[String]) -> Option<FoodItem> {
        let base = item.quantity_in_base();
        let old_price = item.line_price();

        self.graph
            .alternatives(&item.name)
            .iter()
            .filter_map(|name| self.catalog.find_by_name(name).ok())
            .filter(|alt| !alt.matches_any(excluded))
            .map(|alt| {
                let quantity = round2(base / alt.unit.base_amount());
                let price = round2(quantity * alt.price_per_unit);
                FoodItem {
                    id: item.id.clone(),
                    quantity,
                    reason: item.reason.clone(),
                    estimated_price: Some(price),
                    ..alt.clone()
                }
            })
            .filter(|alt| alt.line_price() < old_price)
            .min_by(|a, b| a.line_price().total_cmp(&b.line_price()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostLevel, Macros, Unit};

    fn food(id: &str, name: &str, category: FoodCategory, price: f64, protein: f64) -> FoodItem {
        FoodItem::catalog(
            id,
            name,
            category,
            Unit::Kg,
            price,
            Macros::new(protein, 0.0, 5.0),
            CostLevel::Medium,
        )
    }

    fn line(base: &FoodItem, quantity: f64) -> FoodItem {
        FoodItem {
            quantity,
            estimated_price: Some(round2(quantity * base.price_per_unit)),
            ..base.clone()
        }
    }

    #[test]
    fn test_within_target_is_untouched() {
        let catalog = FoodCatalog::default();
        let graph = SubstitutionGraph::default();
        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());
        let items = vec![line(&food("a", "A", FoodCategory::Carbs, 10.0, 5.0), 1.0)];
        let result = optimizer.optimize(items.clone(), 10.0, 12.0, &[]);
        assert_eq!(result.status, SavingsStatus::WithinSavings);
        assert_eq!(result.items, items);
    }

    #[test]
    fn test_converges_to_target() {
        let premium = food("premium", "Premium grain", FoodCategory::Carbs, 50.0, 8.0);
        let budget = food("budget", "Budget grain", FoodCategory::Carbs, 15.0, 8.0);
        let other = food("other", "Other", FoodCategory::Vegetables, 50.0, 2.0);
        let catalog = FoodCatalog::new(vec![premium.clone(), budget, other.clone()]);
        let mut graph = SubstitutionGraph::empty();
        graph.insert("Premium grain", vec!["Budget grain".to_string()]);

        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());
        let items = vec![line(&premium, 1.0), line(&other, 1.0)];
        let result = optimizer.optimize(items, 100.0, 70.0, &[]);

        assert_eq!(result.status, SavingsStatus::AdjustedToSavings);
        assert!(result.total_estimated_cost <= 70.0);
        assert_eq!(result.substitutions.len(), 1);
        assert_eq!(result.substitutions[0].savings, 35.0);
        assert_eq!(result.items[0].id, "premium");
        assert_eq!(result.items[0].name, "Budget grain");
    }

    #[test]
    fn test_excluded_substitute_is_skipped() {
        let premium = food("premium", "Premium grain", FoodCategory::Carbs, 50.0, 8.0);
        let budget = food("budget", "Budget grain", FoodCategory::Carbs, 15.0, 8.0);
        let catalog = FoodCatalog::new(vec![premium.clone(), budget]);
        let mut graph = SubstitutionGraph::empty();
        graph.insert("Premium grain", vec!["Budget grain".to_string()]);

        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());
        let excluded = vec!["budget".to_string()];
        let result = optimizer.optimize(vec![line(&premium, 1.0)], 50.0, 35.0, &excluded);
        assert_eq!(result.status, SavingsStatus::OverSavingsMinimum);
        assert!(result.substitutions.is_empty());
    }

    #[test]
    fn test_rollback_when_protein_variety_collapses() {
        let salmon = food("salmon", "Salmon fillet", FoodCategory::Protein, 19.0, 20.0);
        let hake = food("hake", "Frozen hake", FoodCategory::Protein, 8.5, 17.0);
        let catalog = FoodCatalog::new(vec![salmon.clone(), hake.clone()]);
        let mut graph = SubstitutionGraph::empty();
        graph.insert("Salmon fillet", vec!["Frozen hake".to_string()]);

        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());
        let items = vec![line(&salmon, 1.0), line(&hake, 1.0)];
        let result = optimizer.optimize(items.clone(), 27.5, 10.0, &[]);

        assert_eq!(result.status, SavingsStatus::OverSavingsMinimum);
        assert_eq!(result.items, items);
        assert_eq!(result.total_estimated_cost, 27.5);
    }

    #[test]
    fn test_protein_swaps_are_capped() {
        let names = ["P1", "P2", "P3", "P4"];
        let mut catalog_items = Vec::new();
        let mut graph = SubstitutionGraph::empty();
        let mut items = Vec::new();
        for name in names {
            let pricey = food(name, name, FoodCategory::Protein, 20.0, 20.0);
            let cheap_name = format!("{name} cheap");
            let cheap = food(&cheap_name, &cheap_name, FoodCategory::Protein, 5.0, 20.0);
            graph.insert(name, vec![cheap_name]);
            items.push(line(&pricey, 1.0));
            catalog_items.push(pricey);
            catalog_items.push(cheap);
        }
        let catalog = FoodCatalog::new(catalog_items);
        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());
        let result = optimizer.optimize(items, 80.0, 10.0, &[]);

        assert_eq!(result.substitutions.len(), MAX_PROTEIN_SUBSTITUTIONS);
        assert_eq!(result.total_estimated_cost, 50.0);
        assert_eq!(result.status, SavingsStatus::OverSavingsMinimum);
    }

    #[test]
    fn test_rounded_cost_never_exceeds_input_total() {
        let chicken = food("chicken", "Chicken breast", FoodCategory::Protein, 1.0, 31.0);
        let catalog = FoodCatalog::new(vec![chicken.clone()]);
        let graph = SubstitutionGraph::empty();
        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());

        for target in [0.1, 0.2] {
            let result = optimizer.optimize(vec![line(&chicken, 0.125)], 0.125, target, &[]);
            assert!(
                result.total_estimated_cost <= 0.125,
                "target {target} reported {}",
                result.total_estimated_cost
            );
            assert!(result.total_savings >= 0.0);
        }
    }

    #[test]
    fn test_unit_conversion_on_swap() {
        let oil = FoodItem::catalog(
            "olive", "Extra virgin olive oil", FoodCategory::Fats, Unit::L, 9.0,
            Macros::new(0.0, 0.0, 100.0), CostLevel::Medium,
        );
        let cheap = FoodItem::catalog(
            "sun", "Sunflower oil", FoodCategory::Fats, Unit::Ml, 0.0025,
            Macros::new(0.0, 0.0, 100.0), CostLevel::Low,
        );
        let catalog = FoodCatalog::new(vec![oil.clone(), cheap]);
        let graph = SubstitutionGraph::default();
        let optimizer = SavingsOptimizer::new(&graph, &catalog, SavingsSettings::default());

        let result = optimizer.optimize(vec![line(&oil, 0.5)], 4.5, 2.0, &[]);
        assert_eq!(result.items[0].unit, Unit::Ml);
        assert_eq!(result.items[0].quantity, 500.0);
        assert!(result.total_estimated_cost <= 2.0);
    }
}
