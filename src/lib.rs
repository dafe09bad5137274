pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod shopping;
pub mod state;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use models::{FoodItem, PlanInput, ShoppingListResult, WeeklyPlan};
