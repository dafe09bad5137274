use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::FoodItem;
use crate::planner::classify::{FoodClassifier, KeywordClassifier, RotationGroup};
use crate::planner::constants::*;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash of a string.
pub fn fnv1a(input: &str) -> u64 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic pseudo-random value in [0, 1) for a seed and a salt.
///
/// Identical inputs always give identical outputs.
pub fn seeded_noise(seed: &str, salt: &str) -> f64 {
    let hash = fnv1a(&format!("{seed}:{salt}"));
    // Top 53 bits give a uniformly spaced f64 in [0, 1).
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    pub max_uses_per_food: u32,
    pub group_bonus: f64,
    pub noise_weight: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            max_uses_per_food: MAX_USES_PER_FOOD,
            group_bonus: ROTATION_GROUP_BONUS,
            noise_weight: ROTATION_NOISE_WEIGHT,
        }
    }
}

/// Per-food usage limits and rotation-group balancing for one week.
///
/// The seed (e.g. user + week) makes tie-breaks reproducible for the same
/// seed while letting different seeds diverge.
#[derive(Clone)]
pub struct FoodRotationEngine {
    seed: String,
    settings: RotationSettings,
    classifier: Arc<dyn FoodClassifier>,
    food_uses: HashMap<String, u32>,
    group_uses: HashMap<RotationGroup, u32>,
    draws: u64,
}

impl FoodRotationEngine {
    pub fn new(seed: impl Into<String>, settings: RotationSettings) -> Self {
        Self::with_classifier(seed, settings, Arc::new(KeywordClassifier))
    }

    pub fn with_classifier(
        seed: impl Into<String>,
        settings: RotationSettings,
        classifier: Arc<dyn FoodClassifier>,
    ) -> Self {
        Self {
            seed: seed.into(),
            settings,
            classifier,
            food_uses: HashMap::new(),
            group_uses: HashMap::new(),
            draws: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn uses_of(&self, food: &FoodItem) -> u32 {
        self.food_uses.get(&food.key()).copied().unwrap_or(0)
    }

    pub fn can_use_food(&self, food: &FoodItem) -> bool {
        self.uses_of(food) < self.settings.max_uses_per_food
    }

    pub fn group_uses(&self, group: RotationGroup) -> u32 {
        self.group_uses.get(&group).copied().unwrap_or(0)
    }

    pub fn record_food(&mut self, food: &FoodItem) {
        *self.food_uses.entry(food.key()).or_insert(0) += 1;
        if let Some(group) = self.classifier.rotation_group(&food.name) {
            *self.group_uses.entry(group).or_insert(0) += 1;
        }
        self.draws += 1;
    }

    /// Least-used group among `groups`; equal counts are broken by seeded noise.
    pub fn least_used_group(&self, groups: &[RotationGroup]) -> Option<RotationGroup> {
        groups.iter().copied().min_by(|a, b| {
            self.group_uses(*a).cmp(&self.group_uses(*b)).then_with(|| {
                let na = self.noise(&a.to_string());
                let nb = self.noise(&b.to_string());
                na.total_cmp(&nb)
            })
        })
    }

    /// Noise for the current draw; changes after every recorded food.
    pub fn noise(&self, salt: &str) -> f64 {
        seeded_noise(&self.seed, &format!("{}:{salt}", self.draws))
    }

    /// Drop foods over the per-food cap, unless that would leave nothing.
    pub fn filter_available<'a>(&self, candidates: Vec<&'a FoodItem>) -> Vec<&'a FoodItem> {
        let fresh: Vec<&FoodItem> = candidates
            .iter()
            .copied()
            .filter(|f| self.can_use_food(f))
            .collect();
        if fresh.is_empty() { candidates } else { fresh }
    }

    /// Multiplicative score adjustment: bonus for the least-used group among
    /// the candidates, plus a small seeded perturbation.
    pub fn score_multipliers(&self, candidates: &[&FoodItem]) -> Vec<f64> {
        let groups: Vec<Option<RotationGroup>> = candidates
            .iter()
            .map(|f| self.classifier.rotation_group(&f.name))
            .collect();

        let mut distinct: Vec<RotationGroup> = groups.iter().flatten().copied().collect();
        distinct.sort();
        distinct.dedup();
        let favoured = if distinct.len() > 1 {
            self.least_used_group(&distinct)
        } else {
            None
        };

        candidates
            .iter()
            .zip(groups)
            .map(|(food, group)| {
                let bonus = if group.is_some() && group == favoured {
                    1.0 + self.settings.group_bonus
                } else {
                    1.0
                };
                bonus * (1.0 + self.settings.noise_weight * self.noise(&food.key()))
            })
            .collect()
    }
}

impl std::fmt::Debug for FoodRotationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodRotationEngine")
            .field("seed", &self.seed)
            .field("settings", &self.settings)
            .field("food_uses", &self.food_uses)
            .field("group_uses", &self.group_uses)
            .field("draws", &self.draws)
            .finish()
    }
}
