use crate::models::{CostLevel, FoodCategory, FoodItem, Macros, Unit};

use CostLevel::{High, Low, Medium};
use FoodCategory::*;

/// (id, name, category, unit, price per unit, protein, carbs, fat, cost)
type Row = (
    &'static str,
    &'static str,
    FoodCategory,
    Unit,
    f64,
    f64,
    f64,
    f64,
    CostLevel,
);

// Macros per 100g/100ml; prices are typical supermarket prices per unit.
const FOODS: &[Row] = &[
    ("chicken-breast", "Chicken breast (skinless)", Protein, Unit::Kg, 7.50, 31.0, 0.0, 3.6, Medium),
    ("chicken-thighs", "Chicken thighs", Protein, Unit::Kg, 5.20, 24.0, 0.0, 9.0, Low),
    ("turkey-mince", "Turkey mince", Protein, Unit::Kg, 8.00, 22.0, 0.0, 7.0, Medium),
    ("ground-beef", "Ground beef (5% fat)", Protein, Unit::Kg, 9.50, 21.0, 0.0, 5.0, Medium),
    ("beef-steak", "Beef steak", Protein, Unit::Kg, 22.00, 26.0, 0.0, 10.0, High),
    ("pork-loin", "Pork loin", Protein, Unit::Kg, 7.00, 22.0, 0.0, 6.0, Low),
    ("salmon-fillet", "Salmon fillet", Protein, Unit::Kg, 19.00, 20.0, 0.0, 13.0, High),
    ("frozen-hake", "Frozen hake", Protein, Unit::Kg, 8.50, 17.0, 0.0, 2.0, Medium),
    ("canned-tuna", "Canned tuna", Protein, Unit::Can, 1.20, 26.0, 0.0, 1.0, Low),
    ("canned-sardines", "Canned sardines", Protein, Unit::Can, 1.10, 24.0, 0.0, 11.0, Low),
    ("eggs", "Eggs", Protein, Unit::Pack, 3.20, 13.0, 1.1, 11.0, Low),
    ("firm-tofu", "Firm tofu", Protein, Unit::Kg, 6.00, 16.0, 2.0, 9.0, Medium),
    ("seitan", "Seitan", Protein, Unit::Kg, 11.00, 25.0, 4.0, 2.0, Medium),
    ("tempeh", "Tempeh", Protein, Unit::Kg, 14.00, 19.0, 9.0, 11.0, High),
    ("shrimp", "Shrimp", Protein, Unit::Kg, 16.00, 24.0, 0.2, 0.3, High),
    ("lentils", "Lentils (dry)", Legumes, Unit::Kg, 2.50, 24.0, 60.0, 1.0, Low),
    ("chickpeas", "Chickpeas (dry)", Legumes, Unit::Kg, 2.80, 19.0, 61.0, 6.0, Low),
    ("white-rice", "White rice", Carbs, Unit::Kg, 1.60, 7.0, 80.0, 0.6, Low),
    ("brown-rice", "Brown rice", Carbs, Unit::Kg, 2.40, 7.5, 76.0, 2.7, Low),
    ("pasta", "Pasta", Carbs, Unit::Kg, 1.50, 12.0, 72.0, 1.5, Low),
    ("whole-wheat-pasta", "Whole wheat pasta", Carbs, Unit::Kg, 2.20, 13.0, 66.0, 2.5, Medium),
    ("quinoa", "Quinoa", Carbs, Unit::Kg, 7.50, 14.0, 64.0, 6.0, High),
    ("potatoes", "Potatoes", Carbs, Unit::Kg, 1.20, 2.0, 17.0, 0.1, Low),
    ("sweet-potato", "Sweet potato", Carbs, Unit::Kg, 2.60, 1.6, 20.0, 0.1, Medium),
    ("rolled-oats", "Rolled oats", Carbs, Unit::Kg, 1.80, 13.0, 66.0, 7.0, Low),
    ("broccoli", "Broccoli", Vegetables, Unit::Kg, 3.00, 2.8, 7.0, 0.4, Low),
    ("fresh-spinach", "Fresh spinach", Vegetables, Unit::Kg, 5.00, 2.9, 3.6, 0.4, Medium),
    ("frozen-spinach", "Frozen spinach", Vegetables, Unit::Kg, 2.20, 2.9, 3.6, 0.4, Low),
    ("carrots", "Carrots", Vegetables, Unit::Kg, 1.10, 0.9, 10.0, 0.2, Low),
    ("zucchini", "Zucchini", Vegetables, Unit::Kg, 2.30, 1.2, 3.1, 0.3, Low),
    ("bell-peppers", "Bell peppers", Vegetables, Unit::Kg, 3.50, 1.0, 6.0, 0.3, Medium),
    ("green-beans", "Green beans", Vegetables, Unit::Kg, 3.20, 1.8, 7.0, 0.2, Low),
    ("tomatoes", "Tomatoes", Vegetables, Unit::Kg, 2.50, 0.9, 3.9, 0.2, Low),
    ("asparagus", "Asparagus", Vegetables, Unit::Kg, 9.00, 2.2, 3.9, 0.1, High),
    ("cauliflower", "Cauliflower", Vegetables, Unit::Kg, 2.40, 1.9, 5.0, 0.3, Low),
    ("bananas", "Bananas", Fruits, Unit::Kg, 1.40, 1.1, 23.0, 0.3, Low),
    ("apples", "Apples", Fruits, Unit::Kg, 2.00, 0.3, 14.0, 0.2, Low),
    ("blueberries", "Blueberries", Fruits, Unit::Kg, 12.00, 0.7, 14.0, 0.3, High),
    ("oranges", "Oranges", Fruits, Unit::Kg, 1.80, 0.9, 12.0, 0.1, Low),
    ("greek-yogurt", "Greek yogurt", Dairy, Unit::Kg, 5.50, 10.0, 3.6, 0.4, Medium),
    ("plain-yogurt", "Plain yogurt", Dairy, Unit::Kg, 2.00, 3.5, 4.7, 3.3, Low),
    ("semi-skimmed-milk", "Semi-skimmed milk", Dairy, Unit::L, 1.00, 3.4, 4.8, 1.6, Low),
    ("cottage-cheese", "Cottage cheese", Dairy, Unit::Kg, 6.00, 11.0, 3.4, 4.3, Medium),
    ("olive-oil", "Extra virgin olive oil", Fats, Unit::L, 9.00, 0.0, 0.0, 100.0, Medium),
    ("sunflower-oil", "Sunflower oil", Fats, Unit::L, 2.50, 0.0, 0.0, 100.0, Low),
    ("almonds", "Almonds", Fats, Unit::Kg, 14.00, 21.0, 22.0, 52.0, High),
    ("peanut-butter", "Peanut butter", Fats, Unit::Jar, 2.80, 25.0, 20.0, 51.0, Medium),
    ("walnuts", "Walnuts", Fats, Unit::Kg, 16.00, 15.0, 14.0, 65.0, High),
];

/// The foods shipped with the planner.
pub fn default_catalog() -> Vec<FoodItem> {
    FOODS
        .iter()
        .map(|&(id, name, category, unit, price, p, c, f, cost)| {
            FoodItem::catalog(id, name, category, unit, price, Macros::new(p, c, f), cost)
        })
        .collect()
}
