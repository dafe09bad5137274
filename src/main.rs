use clap::Parser;
use std::path::{Path, PathBuf};

use smart_meal_planner_rs::catalog::FoodCatalog;
use smart_meal_planner_rs::cli::{Cli, Command, PrefsAction, SourceArgs};
use smart_meal_planner_rs::config::PlannerConfig;
use smart_meal_planner_rs::error::{PlanError, Result};
use smart_meal_planner_rs::interface::{
    collect_profile, display_aggregated, display_plan, display_shopping_list, display_targets,
    export_shopping_csv, fuzzy_matches,
};
use smart_meal_planner_rs::logging;
use smart_meal_planner_rs::models::{ShoppingListResult, WeeklyPlan};
use smart_meal_planner_rs::planner::{calculate, generate_weekly_plan};
use smart_meal_planner_rs::shopping::{SubstitutionGraph, aggregate, generate_shopping_list};
use smart_meal_planner_rs::state::{
    load_plan, load_preferences, load_profile, save_plan, save_preferences, save_shopping_list,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Targets { profile } => cmd_targets(&profile),
        Command::Plan {
            profile,
            interactive,
            seed,
            sources,
            preferences,
            output,
            csv,
        } => cmd_plan(PlanArgs {
            profile: if interactive { None } else { profile },
            seed,
            sources,
            preferences,
            output,
            csv,
        }),
        Command::Shopping {
            plan,
            sources,
            excluded,
            csv,
        } => cmd_shopping(&plan, &sources, &excluded, csv.as_deref()),
        Command::Prefs {
            file,
            catalog,
            action,
        } => cmd_prefs(&file, catalog.as_deref(), action),
    }
}

struct PlanArgs {
    profile: Option<PathBuf>,
    seed: String,
    sources: SourceArgs,
    preferences: PathBuf,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
}

/// Catalog, policy and substitution graph named by the source flags.
fn load_sources(sources: &SourceArgs) -> Result<(FoodCatalog, PlannerConfig, SubstitutionGraph)> {
    let catalog = FoodCatalog::load_or_builtin(sources.catalog.as_deref())?;
    if catalog.is_empty() {
        return Err(PlanError::InvalidInput("the food catalog is empty".to_string()));
    }
    let config = PlannerConfig::load_or_default(sources.config.as_deref())?;
    let graph = match &sources.substitutions {
        Some(path) => SubstitutionGraph::load(path)?,
        None => SubstitutionGraph::default(),
    };
    Ok((catalog, config, graph))
}

/// Print daily nutrition targets for a saved profile.
fn cmd_targets(profile_path: &Path) -> Result<()> {
    let profile = load_profile(profile_path)?;
    display_targets(&calculate(&profile));
    Ok(())
}

/// Generate a weekly plan plus its shopping list.
fn cmd_plan(args: PlanArgs) -> Result<()> {
    let (catalog, config, graph) = load_sources(&args.sources)?;
    println!("Loaded {} foods", catalog.len());

    let profile = match &args.profile {
        Some(path) => load_profile(path)?,
        None => collect_profile(&catalog.names())?,
    };

    let mut preferences = load_preferences(&args.preferences)?;

    let plan = generate_weekly_plan(&profile, catalog.foods(), &preferences, &config, &args.seed)?;
    let list = generate_shopping_list(
        &plan,
        &catalog,
        &graph,
        config.savings,
        &profile.exclusions(),
    )?;

    display_plan(&plan);
    display_shopping_list(&list);
    display_aggregated(&aggregate(&list.items));

    if let Some(path) = &args.output {
        write_outputs(path, &plan, &list)?;
    }
    if let Some(path) = &args.csv {
        export_shopping_csv(&list, path)?;
        println!("Shopping list CSV written to {}", path.display());
    }

    for meal in plan.meals() {
        for food in &meal.foods {
            preferences.record_selection(&food.name);
        }
    }
    save_preferences(&args.preferences, &preferences)?;

    Ok(())
}

/// The plan goes to `path`; the list goes next to it as `<stem>.shopping.json`.
fn write_outputs(path: &Path, plan: &WeeklyPlan, list: &ShoppingListResult) -> Result<()> {
    save_plan(path, plan)?;
    let list_path = path.with_extension("shopping.json");
    save_shopping_list(&list_path, list)?;
    println!(
        "Plan written to {}, shopping list to {}",
        path.display(),
        list_path.display()
    );
    Ok(())
}

/// Rebuild the shopping list for a saved plan.
fn cmd_shopping(
    plan_path: &Path,
    sources: &SourceArgs,
    excluded: &[String],
    csv: Option<&Path>,
) -> Result<()> {
    let (catalog, config, graph) = load_sources(sources)?;
    let plan = load_plan(plan_path)?;

    let list = generate_shopping_list(&plan, &catalog, &graph, config.savings, excluded)?;
    display_shopping_list(&list);
    display_aggregated(&aggregate(&list.items));

    if let Some(path) = csv {
        export_shopping_csv(&list, path)?;
        println!("Shopping list CSV written to {}", path.display());
    }
    Ok(())
}

/// Edit or print the preference store.
fn cmd_prefs(file: &Path, catalog_path: Option<&Path>, action: PrefsAction) -> Result<()> {
    let mut preferences = load_preferences(file)?;

    let food = match action {
        PrefsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&preferences)?);
            return Ok(());
        }
        PrefsAction::Like { ref food }
        | PrefsAction::Dislike { ref food }
        | PrefsAction::Clear { ref food } => food.clone(),
    };

    let catalog = FoodCatalog::load_or_builtin(catalog_path)?;
    let name = resolve_food_name(&catalog, &food)?;

    match action {
        PrefsAction::Like { .. } => {
            preferences.like(&name);
            println!("Liked: {}", name);
        }
        PrefsAction::Dislike { .. } => {
            preferences.dislike(&name);
            println!("Disliked: {}", name);
        }
        PrefsAction::Clear { .. } => {
            preferences.clear(&name);
            println!("Cleared: {}", name);
        }
        PrefsAction::Show => {}
    }

    save_preferences(file, &preferences)?;
    Ok(())
}

/// Exact catalog name, or an error listing the closest names.
fn resolve_food_name(catalog: &FoodCatalog, input: &str) -> Result<String> {
    if let Ok(food) = catalog.find_by_name(input) {
        return Ok(food.name.clone());
    }

    let names = catalog.names();
    let suggestions: Vec<&str> = fuzzy_matches(input, &names)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    if suggestions.is_empty() {
        Err(PlanError::FoodNotFound(input.to_string()))
    } else {
        Err(PlanError::FoodNotFound(format!(
            "{} (did you mean: {}?)",
            input,
            suggestions.join(", ")
        )))
    }
}
