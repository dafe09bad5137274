use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse food family used to bias selection toward underused groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationGroup {
    Chicken,
    Beef,
    Fish,
    Eggs,
    Vegetarian,
    Rice,
    Pasta,
    Oats,
    Potatoes,
}

impl fmt::Display for RotationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotationGroup::Chicken => "chicken",
            RotationGroup::Beef => "beef",
            RotationGroup::Fish => "fish",
            RotationGroup::Eggs => "eggs",
            RotationGroup::Vegetarian => "vegetarian",
            RotationGroup::Rice => "rice",
            RotationGroup::Pasta => "pasta",
            RotationGroup::Oats => "oats",
            RotationGroup::Potatoes => "potatoes",
        };
        f.write_str(s)
    }
}

/// Name-based food classification.
///
/// The default implementation matches keywords; a catalog with explicit
/// tags can supply its own.
pub trait FoodClassifier: Send + Sync {
    fn is_fish(&self, name: &str) -> bool;
    fn is_red_meat(&self, name: &str) -> bool;
    fn is_poultry(&self, name: &str) -> bool;
    fn is_egg(&self, name: &str) -> bool;
    fn rotation_group(&self, name: &str) -> Option<RotationGroup>;

    fn is_meat(&self, name: &str) -> bool {
        self.is_red_meat(name) || self.is_poultry(name)
    }
}

pub const FISH_KEYWORDS: &[&str] = &[
    "fish", "salmon", "tuna", "cod", "hake", "sardine", "mackerel", "trout", "tilapia", "shrimp",
    "prawn", "sea bass", "anchov",
];

pub const RED_MEAT_KEYWORDS: &[&str] = &[
    "beef", "steak", "pork", "lamb", "veal", "mutton", "venison", "chorizo", "ham",
];

pub const POULTRY_KEYWORDS: &[&str] = &["chicken", "turkey", "duck"];

pub const EGG_KEYWORDS: &[&str] = &["egg"];

pub const VEGETARIAN_PROTEIN_KEYWORDS: &[&str] = &[
    "tofu", "tempeh", "seitan", "lentil", "chickpea", "bean", "cottage", "quark", "yogurt",
];

pub const RICE_KEYWORDS: &[&str] = &["rice"];
pub const PASTA_KEYWORDS: &[&str] = &["pasta", "spaghetti", "macaroni", "noodle", "penne"];
pub const OAT_KEYWORDS: &[&str] = &["oat"];
pub const POTATO_KEYWORDS: &[&str] = &["potato"];

/// Case-insensitive substring match against a keyword list.
pub fn matches_keyword(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Keyword-table classifier.
///
/// Known limitation: substring matching can misclassify, e.g. a
/// "tuna-flavoured snack" counts as fish.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl FoodClassifier for KeywordClassifier {
    fn is_fish(&self, name: &str) -> bool {
        matches_keyword(name, FISH_KEYWORDS)
    }

    fn is_red_meat(&self, name: &str) -> bool {
        matches_keyword(name, RED_MEAT_KEYWORDS)
    }

    fn is_poultry(&self, name: &str) -> bool {
        matches_keyword(name, POULTRY_KEYWORDS)
    }

    fn is_egg(&self, name: &str) -> bool {
        matches_keyword(name, EGG_KEYWORDS)
    }

    fn rotation_group(&self, name: &str) -> Option<RotationGroup> {
        // Order matters: "sweet potato" is a potato, "chicken rice bowl" is chicken.
        if self.is_fish(name) {
            Some(RotationGroup::Fish)
        } else if self.is_red_meat(name) {
            Some(RotationGroup::Beef)
        } else if self.is_poultry(name) {
            Some(RotationGroup::Chicken)
        } else if self.is_egg(name) {
            Some(RotationGroup::Eggs)
        } else if matches_keyword(name, VEGETARIAN_PROTEIN_KEYWORDS) {
            Some(RotationGroup::Vegetarian)
        } else if matches_keyword(name, RICE_KEYWORDS) {
            Some(RotationGroup::Rice)
        } else if matches_keyword(name, PASTA_KEYWORDS) {
            Some(RotationGroup::Pasta)
        } else if matches_keyword(name, OAT_KEYWORDS) {
            Some(RotationGroup::Oats)
        } else if matches_keyword(name, POTATO_KEYWORDS) {
            Some(RotationGroup::Potatoes)
        } else {
            None
        }
    }
}
