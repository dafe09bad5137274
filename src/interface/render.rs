use crate::models::{SavingsStatus, ShoppingListResult, WeeklyPlan};
use crate::planner::targets::NutritionTargets;
use crate::shopping::aggregate::AggregatedItem;

/// Display daily nutrition targets.
pub fn display_targets(targets: &NutritionTargets) {
    println!();
    println!("=== Daily Targets ===");
    println!("BMR:        {} kcal", targets.bmr);
    println!("Activity:   x{:.2}", targets.activity_multiplier);
    println!("TDEE:       {} kcal", targets.tdee);
    println!("Calories:   {} kcal", targets.calories_per_day);
    println!("Protein:    {} g", targets.protein_per_day);
    println!("Carbs:      {} g", targets.carbs_per_day);
    println!("Fat:        {} g", targets.fat_per_day);
    println!();
}

/// Display a weekly plan day by day.
pub fn display_plan(plan: &WeeklyPlan) {
    if plan.days.is_empty() {
        println!("No meals planned.");
        return;
    }

    display_targets(&plan.targets);
    println!("=== Weekly Plan ({} tier, seed {}) ===", plan.cost_tier, plan.seed);

    for day in &plan.days {
        println!();
        println!("Day {}", day.day);
        for meal in &day.meals {
            println!(
                "  {:<10} {:<55} {:>5.0} kcal | P {:>5.1} C {:>5.1} F {:>5.1}",
                meal.meal_type.label(),
                meal.name,
                meal.totals.calories,
                meal.totals.protein,
                meal.totals.carbs,
                meal.totals.fat
            );
            let portions: Vec<String> = meal
                .foods
                .iter()
                .map(|f| format!("{} {}g", f.name, f.grams))
                .collect();
            println!("  {:<10} {}", "", portions.join(", "));
        }
    }

    let v = &plan.variety;
    println!();
    println!("--- Variety ---");
    println!("Unique proteins:   {}", v.unique_proteins);
    println!("Unique vegetables: {}", v.unique_vegetables);
    println!("Fish meals:        {}", v.fish_meals);
    println!("Red meat meals:    {}", v.red_meat_meals);
    if !v.meets_minimum {
        println!("Note: this week is below the recommended variety.");
    }
    println!();
}

/// Display the raw shopping list with totals and substitutions.
pub fn display_shopping_list(list: &ShoppingListResult) {
    if list.items.is_empty() {
        println!("Shopping list is empty.");
        return;
    }

    let width = list.items.iter().map(|i| i.name.len()).max().unwrap_or(10);

    println!();
    println!("=== Shopping List ({} items) ===", list.items.len());
    println!();

    let mut current = None;
    for item in &list.items {
        if current != Some(item.category) {
            current = Some(item.category);
            println!("[{}]", item.category);
        }
        println!(
            "  {:<width$}  {:>8.2} {:<6} {:>8.2}  {}",
            item.name,
            item.quantity,
            item.unit.as_str(),
            item.line_price(),
            item.reason.as_deref().unwrap_or(""),
            width = width
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Total cost:    {:.2}", list.total_estimated_cost);
    println!("Total protein: {:.0} g", list.total_protein);
    println!("Efficiency:    {:.2} g protein per unit cost", list.efficiency_score);
    println!("List size:     {}", list.cost_tier);
    match (list.savings_status, list.savings_target) {
        (SavingsStatus::WithinSavings, _) => println!("Savings:       within budget"),
        (status, Some(target)) => println!("Savings:       {status} (target {target:.2})"),
        (status, None) => println!("Savings:       {status}"),
    }

    if !list.substitutions.is_empty() {
        println!();
        println!("--- Substitutions ---");
        for sub in &list.substitutions {
            let sign = if sub.protein_delta >= 0.0 { "+" } else { "" };
            println!(
                "  {} -> {}: saves {:.2}, protein {}{:.1} g",
                sub.from, sub.to, sub.savings, sign, sub.protein_delta
            );
        }
    }
    println!();
}

/// Display the merged view with coverage sentences.
pub fn display_aggregated(items: &[AggregatedItem]) {
    if items.is_empty() {
        return;
    }

    let width = items.iter().map(|i| i.item.name.len()).max().unwrap_or(10);

    println!("=== Aggregated ===");
    for entry in items {
        let item = &entry.item;
        println!(
            "  {:<width$}  {:>8.2} {:<6} {}",
            item.name,
            item.quantity,
            item.unit.as_str(),
            entry.coverage.as_deref().unwrap_or(""),
            width = width
        );
    }
    println!();
}
