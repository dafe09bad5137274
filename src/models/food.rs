use std::fmt;

use serde::{Deserialize, Serialize};

/// Shelf category of a food. `grains` is accepted as an alias for `carbs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    #[serde(alias = "grains")]
    Carbs,
    Vegetables,
    Fruits,
    Dairy,
    Fats,
    Legumes,
    Snacks,
    Supplements,
    Others,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Carbs => "carbs",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Fats => "fats",
            FoodCategory::Legumes => "legumes",
            FoodCategory::Snacks => "snacks",
            FoodCategory::Supplements => "supplements",
            FoodCategory::Others => "others",
        }
    }

    /// Position in the shelf-friendly shopping order:
    /// protein, grains, vegetables, fruits, dairy, fats, then everything else.
    pub fn shelf_rank(&self) -> u8 {
        match self {
            FoodCategory::Protein => 0,
            FoodCategory::Carbs => 1,
            FoodCategory::Vegetables => 2,
            FoodCategory::Fruits => 3,
            FoodCategory::Dairy => 4,
            FoodCategory::Fats => 5,
            FoodCategory::Legumes
            | FoodCategory::Snacks
            | FoodCategory::Supplements
            | FoodCategory::Others => 6,
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase unit of a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    L,
    Ml,
    Can,
    Pack,
    Jar,
    Unit,
    Bag,
    Bottle,
}

/// Physical dimension of a unit; only units of the same dimension can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitDimension {
    Mass,
    Volume,
    Count,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "L",
            Unit::Ml => "ml",
            Unit::Can => "can",
            Unit::Pack => "pack",
            Unit::Jar => "jar",
            Unit::Unit => "unit",
            Unit::Bag => "bag",
            Unit::Bottle => "bottle",
        }
    }

    pub fn dimension(&self) -> UnitDimension {
        match self {
            Unit::Kg | Unit::G => UnitDimension::Mass,
            Unit::L | Unit::Ml => UnitDimension::Volume,
            _ => UnitDimension::Count,
        }
    }

    /// Grams (or millilitres) contained in one unit.
    ///
    /// Count units use typical supermarket package sizes.
    pub fn base_amount(&self) -> f64 {
        match self {
            Unit::Kg | Unit::L => 1000.0,
            Unit::G | Unit::Ml => 1.0,
            Unit::Can => 160.0,
            Unit::Pack => 720.0,
            Unit::Jar => 350.0,
            Unit::Unit => 150.0,
            Unit::Bag => 500.0,
            Unit::Bottle => 1000.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse price band. Used both as a food classification and as the
/// user's price sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CostLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CostLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostLevel::Low => "low",
            CostLevel::Medium => "medium",
            CostLevel::High => "high",
        }
    }
}

impl fmt::Display for CostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Macronutrients per 100g (or 100ml).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    /// Energy in kcal using 4/4/9.
    pub fn calories(&self) -> f64 {
        self.protein * 4.0 + self.carbs * 4.0 + self.fat * 9.0
    }
}

/// A catalog entry or a shopping-list line.
///
/// `quantity` is 0 in the catalog and positive on a shopping line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    pub unit: Unit,
    pub price_per_unit: f64,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_level: Option<CostLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
}

impl FoodItem {
    /// Catalog entry with macros and a cost classification.
    pub fn catalog(
        id: &str,
        name: &str,
        category: FoodCategory,
        unit: Unit,
        price_per_unit: f64,
        macros: Macros,
        cost_level: CostLevel,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            unit,
            price_per_unit,
            quantity: 0.0,
            macros: Some(macros),
            cost_level: Some(cost_level),
            reason: None,
            estimated_price: None,
        }
    }

    #[inline]
    pub fn protein(&self) -> f64 {
        self.macros.map_or(0.0, |m| m.protein)
    }

    #[inline]
    pub fn carbs(&self) -> f64 {
        self.macros.map_or(0.0, |m| m.carbs)
    }

    #[inline]
    pub fn fat(&self) -> f64 {
        self.macros.map_or(0.0, |m| m.fat)
    }

    pub fn is_high_cost(&self) -> bool {
        self.cost_level == Some(CostLevel::High)
    }

    /// Price of 100g (or 100ml) of this food.
    pub fn price_per_100(&self) -> f64 {
        self.price_per_unit * 100.0 / self.unit.base_amount()
    }

    /// Quantity of this line expressed in grams (or millilitres).
    pub fn quantity_in_base(&self) -> f64 {
        self.quantity * self.unit.base_amount()
    }

    /// Explicit estimate if present, otherwise quantity × unit price.
    pub fn line_price(&self) -> f64 {
        self.estimated_price
            .unwrap_or(self.quantity * self.price_per_unit)
    }

    /// Grams of protein contained in this line.
    pub fn line_protein(&self) -> f64 {
        self.quantity_in_base() * self.protein() / 100.0
    }

    /// Non-negative quantity and macros.
    pub fn is_valid(&self) -> bool {
        self.quantity >= 0.0
            && self.price_per_unit >= 0.0
            && self
                .macros
                .map_or(true, |m| m.protein >= 0.0 && m.carbs >= 0.0 && m.fat >= 0.0)
    }

    /// Name with any parenthetical qualifier removed, e.g.
    /// "Chicken breast (skinless)" -> "Chicken breast".
    pub fn display_name(&self) -> String {
        strip_qualifier(&self.name)
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive containment check against a list of excluded terms.
    pub fn matches_any(&self, terms: &[String]) -> bool {
        let name = self.key();
        terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .any(|t| !t.is_empty() && name.contains(&t))
    }
}

/// Remove every "(...)" group from a name and tidy the whitespace.
pub fn strip_qualifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
