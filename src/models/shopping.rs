use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::food::{CostLevel, FoodItem};

/// Outcome of the savings pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsStatus {
    /// Cost was already at or under the target; nothing changed.
    WithinSavings,
    /// Substitutions brought the cost to or under the target.
    AdjustedToSavings,
    /// Options ran out (or the diversity floor blocked) before the target was reached.
    OverSavingsMinimum,
}

impl fmt::Display for SavingsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SavingsStatus::WithinSavings => "within_savings",
            SavingsStatus::AdjustedToSavings => "adjusted_to_savings",
            SavingsStatus::OverSavingsMinimum => "over_savings_minimum",
        })
    }
}

/// One ingredient swap applied by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionRecord {
    pub from: String,
    pub to: String,
    pub reason: String,
    pub savings: f64,
    pub protein_delta: f64,
}

/// Shopping list derived from a weekly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResult {
    pub items: Vec<FoodItem>,
    /// Size label recomputed from the item count, independent of the input tier.
    pub cost_tier: CostLevel,
    pub total_estimated_cost: f64,
    pub total_protein: f64,
    pub efficiency_score: f64,
    pub savings_status: SavingsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_target: Option<f64>,
    pub substitutions: Vec<SubstitutionRecord>,
}
