use thiserror::Error;

use crate::planner::selection::FoodRole;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("No qualifying {role} source available after applying tier, exclusion and variety filters")]
    UnsatisfiableMeal { role: FoodRole },

    #[error("Food '{0}' is referenced by the plan but missing from the catalog")]
    MissingCatalogReference(String),

    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        field: &'static str,
        message: String,
    },

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
