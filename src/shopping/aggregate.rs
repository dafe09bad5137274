use std::collections::HashMap;

use serde::Serialize;

use crate::models::{FoodItem, Unit, UnitDimension};
use crate::planner::constants::round2;

/// Separator between distinct reasons on a merged line.
pub const REASON_SEPARATOR: &str = " • ";

const MAX_COVERAGE_DAYS: u32 = 7;

/// A merged shopping line plus the "This covers N days of X" sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedItem {
    #[serde(flatten)]
    pub item: FoodItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
}

/// Lines are mergeable when they share a name and a dimension; count units
/// additionally need the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MergeKey {
    name: String,
    dimension: UnitDimension,
    count_unit: Option<Unit>,
}

impl MergeKey {
    fn of(item: &FoodItem) -> Self {
        let dimension = item.unit.dimension();
        Self {
            name: item.key(),
            dimension,
            count_unit: (dimension == UnitDimension::Count).then_some(item.unit),
        }
    }
}

/// Merge duplicate lines for the same food into one.
///
/// Mass and volume are summed in g/ml and re-expressed in kg/L from 1000 up.
/// Output keeps the order of first appearance. Aggregating an aggregated
/// list again changes nothing.
pub fn aggregate(items: &[FoodItem]) -> Vec<AggregatedItem> {
    let mut index: HashMap<MergeKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&FoodItem>> = Vec::new();

    for item in items {
        let key = MergeKey::of(item);
        match index.get(&key) {
            Some(&i) => groups[i].push(item),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![item]);
            }
        }
    }

    groups
        .into_iter()
        .map(|lines| {
            let item = merge(&lines);
            let coverage = item.reason.as_deref().and_then(|r| coverage_sentence(r, &item));
            AggregatedItem { item, coverage }
        })
        .collect()
}

fn merge(lines: &[&FoodItem]) -> FoodItem {
    let first = lines[0];
    let price_per_100 = first.price_per_100();
    let total_price: f64 = lines.iter().map(|l| l.line_price()).sum();

    let (unit, quantity) = match first.unit.dimension() {
        UnitDimension::Count => (first.unit, lines.iter().map(|l| l.quantity).sum::<f64>()),
        dimension => {
            // Round before choosing the unit so 999.996 g and its re-aggregation agree.
            let base = round2(lines.iter().map(|l| l.quantity_in_base()).sum());
            normalize(dimension, base)
        }
    };

    let mut reasons: Vec<&str> = Vec::new();
    for reason in lines.iter().filter_map(|l| l.reason.as_deref()) {
        for part in reason.split(REASON_SEPARATOR) {
            if !part.is_empty() && !reasons.contains(&part) {
                reasons.push(part);
            }
        }
    }

    FoodItem {
        unit,
        quantity: round2(quantity),
        price_per_unit: price_per_100 * unit.base_amount() / 100.0,
        // Sum of the merged line prices, not rounded quantity × unit price.
        estimated_price: Some(round2(total_price)),
        reason: (!reasons.is_empty()).then(|| reasons.join(REASON_SEPARATOR)),
        ..first.clone()
    }
}

/// Pick kg/L at or above 1000 base units, else g/ml.
fn normalize(dimension: UnitDimension, base: f64) -> (Unit, f64) {
    let (small, large) = match dimension {
        UnitDimension::Volume => (Unit::Ml, Unit::L),
        _ => (Unit::G, Unit::Kg),
    };
    if base >= large.base_amount() {
        (large, base / large.base_amount())
    } else {
        (small, base)
    }
}

/// Meal-type count and meal count parsed from one reason, e.g.
/// "Breakfast, Dinner protein for 4 meals" -> (2, 4).
pub fn parse_reason(reason: &str) -> Option<(u32, u32)> {
    let (head, tail) = reason.rsplit_once(" for ")?;
    let meals: u32 = tail.split_whitespace().next()?.parse().ok()?;
    let labels = head.rsplit_once(' ').map_or(head, |(labels, _)| labels);
    let meal_types = labels.split(", ").filter(|s| !s.trim().is_empty()).count() as u32;
    Some((meal_types.max(1), meals))
}

/// "This covers N days of X" from the largest meal count among the reasons.
pub fn coverage_sentence(reason: &str, item: &FoodItem) -> Option<String> {
    let days = reason
        .split(REASON_SEPARATOR)
        .filter_map(parse_reason)
        .map(|(meal_types, meals)| meals.div_ceil(meal_types))
        .max()?
        .min(MAX_COVERAGE_DAYS);
    if days == 0 {
        return None;
    }
    let unit = if days == 1 { "day" } else { "days" };
    Some(format!("This covers {days} {unit} of {}", item.category))
}
