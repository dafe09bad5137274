pub mod export;
pub mod prompts;
pub mod render;

pub use export::{export_shopping_csv, write_shopping_csv};
pub use prompts::{collect_profile, fuzzy_matches, prompt_exclusions, prompt_yes_no};
pub use render::{display_aggregated, display_plan, display_shopping_list, display_targets};
