use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::food::strip_qualifier;

/// Expensive food name -> cheaper, macro-similar alternatives in preference order.
///
/// Keys are matched case-insensitively, with or without a parenthetical qualifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionGraph {
    edges: HashMap<String, Vec<String>>,
}

const DEFAULT_EDGES: &[(&str, &[&str])] = &[
    ("salmon fillet", &["Frozen hake", "Canned sardines", "Canned tuna"]),
    ("beef steak", &["Ground beef (5% fat)", "Pork loin"]),
    ("chicken breast", &["Chicken thighs", "Turkey mince"]),
    ("turkey mince", &["Chicken thighs"]),
    ("shrimp", &["Frozen hake", "Canned tuna"]),
    ("tempeh", &["Firm tofu"]),
    ("seitan", &["Firm tofu"]),
    ("quinoa", &["Brown rice", "White rice"]),
    ("brown rice", &["White rice"]),
    ("sweet potato", &["Potatoes"]),
    ("whole wheat pasta", &["Pasta"]),
    ("fresh spinach", &["Frozen spinach"]),
    ("asparagus", &["Green beans", "Broccoli"]),
    ("bell peppers", &["Carrots", "Tomatoes"]),
    ("blueberries", &["Bananas", "Apples"]),
    ("greek yogurt", &["Plain yogurt"]),
    ("cottage cheese", &["Plain yogurt"]),
    ("extra virgin olive oil", &["Sunflower oil"]),
    ("almonds", &["Peanut butter"]),
    ("walnuts", &["Peanut butter"]),
];

impl Default for SubstitutionGraph {
    fn default() -> Self {
        let mut graph = Self::empty();
        for (from, to) in DEFAULT_EDGES {
            graph.insert(from, to.iter().map(|s| s.to_string()).collect());
        }
        graph
    }
}

impl SubstitutionGraph {
    pub fn empty() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    pub fn insert(&mut self, from: &str, alternatives: Vec<String>) {
        self.edges.insert(from.trim().to_lowercase(), alternatives);
    }

    /// Alternatives for `name`; empty when none are defined.
    pub fn alternatives(&self, name: &str) -> &[String] {
        let full = name.trim().to_lowercase();
        self.edges
            .get(&full)
            .or_else(|| self.edges.get(&strip_qualifier(&full)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Load a replacement graph from a JSON object of name -> [names].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        let mut graph = Self::empty();
        for (from, to) in raw {
            graph.insert(&from, to);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lookup_ignores_case_and_qualifier() {
        let graph = SubstitutionGraph::default();
        assert_eq!(graph.alternatives("Salmon Fillet")[0], "Frozen hake");
        assert_eq!(graph.alternatives("Chicken breast (skinless)")[0], "Chicken thighs");
        assert!(graph.alternatives("White rice").is_empty());
    }

    #[test]
    fn test_default_targets_exist_in_builtin_catalog() {
        let catalog = FoodCatalog::new(crate::catalog::default_catalog());
        for (_, to) in DEFAULT_EDGES {
            for name in *to {
                assert!(catalog.find_by_name(name).is_ok(), "{name} missing");
            }
        }
    }

    #[test]
    fn test_load_replaces_graph() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"Quinoa": ["Pasta"]}"#).unwrap();
        let graph = SubstitutionGraph::load(file.path()).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.alternatives("quinoa"), ["Pasta".to_string()]);
    }
}
