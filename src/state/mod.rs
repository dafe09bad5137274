mod persistence;
mod preferences;

pub use persistence::{
    load_plan, load_preferences, load_profile, save_plan, save_preferences, save_shopping_list,
};
pub use preferences::UserPreferences;
