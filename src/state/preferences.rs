use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::planner::selection::PreferenceScorer;

/// Score contributed by one selection, and the cap on the total.
const SELECTION_WEIGHT: f64 = 0.05;
const SELECTION_CAP: f64 = 0.5;

/// Learned per-user food preferences. Keys are lowercase food names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub liked: BTreeSet<String>,
    pub disliked: BTreeSet<String>,
    pub selection_counts: BTreeMap<String, u32>,
}

impl UserPreferences {
    pub fn like(&mut self, name: &str) {
        let key = name.trim().to_lowercase();
        self.disliked.remove(&key);
        self.liked.insert(key);
    }

    pub fn dislike(&mut self, name: &str) {
        let key = name.trim().to_lowercase();
        self.liked.remove(&key);
        self.disliked.insert(key);
    }

    /// Forget the like/dislike and the selection history of a food.
    pub fn clear(&mut self, name: &str) {
        let key = name.trim().to_lowercase();
        self.liked.remove(&key);
        self.disliked.remove(&key);
        self.selection_counts.remove(&key);
    }

    pub fn record_selection(&mut self, name: &str) {
        *self
            .selection_counts
            .entry(name.trim().to_lowercase())
            .or_insert(0) += 1;
    }

    pub fn selections(&self, name: &str) -> u32 {
        self.selection_counts
            .get(&name.trim().to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty() && self.selection_counts.is_empty()
    }
}

impl PreferenceScorer for UserPreferences {
    /// +1 liked, −1 disliked, plus a small capped bonus per past selection.
    fn score(&self, food_name: &str) -> f64 {
        let key = food_name.trim().to_lowercase();
        let mut score = 0.0;
        if self.liked.contains(&key) {
            score += 1.0;
        }
        if self.disliked.contains(&key) {
            score -= 1.0;
        }
        let history = f64::from(self.selections(&key)) * SELECTION_WEIGHT;
        score + history.min(SELECTION_CAP)
    }
}
