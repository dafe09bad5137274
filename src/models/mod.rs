pub mod food;
pub mod plan;
pub mod profile;
pub mod shopping;

pub use food::{CostLevel, FoodCategory, FoodItem, Macros, Unit, UnitDimension};
pub use plan::{DayPlan, MacroBreakdown, Meal, MealFood, MealType, VarietySummary, WeeklyPlan};
pub use profile::{DietStyle, Goal, PlanInput, Sex};
pub use shopping::{SavingsStatus, ShoppingListResult, SubstitutionRecord};
