pub mod aggregate;
pub mod generator;
pub mod savings;
pub mod substitutions;

pub use aggregate::{AggregatedItem, aggregate};
pub use generator::{ShoppingListGenerator, generate_shopping_list, list_tier};
pub use savings::{OptimizationResult, SavingsOptimizer, SavingsSettings};
pub use substitutions::SubstitutionGraph;
