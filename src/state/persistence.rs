use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::{PlanInput, ShoppingListResult, WeeklyPlan};
use crate::state::preferences::UserPreferences;

/// Load preferences; a missing file means a fresh store.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<UserPreferences> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no preference file, starting empty");
        return Ok(UserPreferences::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_preferences<P: AsRef<Path>>(path: P, prefs: &UserPreferences) -> Result<()> {
    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load and validate a profile.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<PlanInput> {
    let content = fs::read_to_string(path)?;
    let profile: PlanInput = serde_json::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<WeeklyPlan> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_plan<P: AsRef<Path>>(path: P, plan: &WeeklyPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn save_shopping_list<P: AsRef<Path>>(path: P, list: &ShoppingListResult) -> Result<()> {
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json)?;
    Ok(())
}
