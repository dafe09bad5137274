use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::{CostLevel, DietStyle, Goal, PlanInput, Sex};

/// Similarity a catalog name needs to be offered as a match.
pub const FUZZY_THRESHOLD: f64 = 0.7;

/// Catalog names similar to `input`, best first (at most five).
pub fn fuzzy_matches<'a>(input: &str, names: &[&'a str]) -> Vec<(&'a str, f64)> {
    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&str, f64)> = names
        .iter()
        .map(|name| (*name, jaro_winkler(&name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(5);
    candidates
}

fn parse_number<T: std::str::FromStr>(input: &str, what: &str) -> Result<T> {
    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid {what}: '{input}'")))
}

fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?)
}

fn prompt_choice(prompt: &str, options: &[&str], default: usize) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()?)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for excluded foods, resolving each entry against the catalog.
///
/// An exact (case-insensitive) name is taken as is; otherwise close names are
/// offered, and the typed term can be kept as a substring exclusion.
pub fn prompt_exclusions(catalog_names: &[&str]) -> Result<Vec<String>> {
    let mut excluded = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Exclude a food (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if let Some(name) = catalog_names
            .iter()
            .find(|n| n.to_lowercase() == input.to_lowercase())
        {
            excluded.push(name.to_string());
            println!("Excluded: {name}");
            continue;
        }

        let candidates = fuzzy_matches(input, catalog_names);
        let mut options: Vec<String> = candidates.iter().map(|(n, _)| n.to_string()).collect();
        options.push(format!("Anything containing '{input}'"));
        options.push("Skip".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < candidates.len() {
            excluded.push(options[selection].clone());
            println!("Excluded: {}", options[selection]);
        } else if selection == candidates.len() {
            excluded.push(input.to_string());
            println!("Excluded anything containing '{input}'");
        }
    }

    Ok(excluded)
}

/// Interactive profile wizard.
pub fn collect_profile(catalog_names: &[&str]) -> Result<PlanInput> {
    let sex = match prompt_choice("Sex", &["male", "female"], 0)? {
        0 => Sex::Male,
        _ => Sex::Female,
    };
    let age: u32 = parse_number(&prompt_text("Age (years)", "30")?, "age")?;
    let weight: f64 = parse_number(&prompt_text("Weight (kg)", "75")?, "weight")?;
    let height: f64 = parse_number(&prompt_text("Height (cm)", "175")?, "height")?;
    let trains = prompt_yes_no("Do you train regularly?", true)?;
    let meals_per_day: u8 =
        parse_number(&prompt_text("Meals per day (3-6)", "4")?, "meals per day")?;

    let goal = match prompt_choice("Goal", &["cutting", "maintenance", "bulking"], 1)? {
        0 => Goal::Cutting,
        2 => Goal::Bulking,
        _ => Goal::Maintenance,
    };
    let diet_style = match prompt_choice(
        "Diet style",
        &["omnivore", "pescatarian", "vegetarian", "vegan"],
        0,
    )? {
        1 => DietStyle::Pescatarian,
        2 => DietStyle::Vegetarian,
        3 => DietStyle::Vegan,
        _ => DietStyle::Omnivore,
    };
    let cost_tier = match prompt_choice("Budget", &["low", "medium", "high"], 1)? {
        0 => CostLevel::Low,
        2 => CostLevel::High,
        _ => CostLevel::Medium,
    };

    let protein_input = prompt_text("Protein target in g/day (0 for automatic)", "0")?;
    let protein: f64 = parse_number(&protein_input, "protein target")?;

    let excluded_foods = prompt_exclusions(catalog_names)?;

    let profile = PlanInput {
        sex,
        age,
        weight,
        height,
        trains,
        meals_per_day,
        diet_style,
        cost_tier,
        restrictions: Vec::new(),
        protein_target: (protein > 0.0).then_some(protein),
        goal: Some(goal),
        excluded_foods,
    };
    profile.validate()?;
    Ok(profile)
}
