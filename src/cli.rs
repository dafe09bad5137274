use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Meal planner: nutrition targets, a varied weekly plan and a priced shopping list.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Catalog and policy sources shared by the planning commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Food catalog JSON file. Defaults to the built-in catalog.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Planner config JSON file. Defaults to the built-in policy.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Substitution graph JSON file replacing the built-in one.
    #[arg(long)]
    pub substitutions: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print daily nutrition targets for a profile.
    Targets {
        /// Profile JSON file.
        #[arg(long)]
        profile: PathBuf,
    },

    /// Generate a weekly plan and its shopping list.
    Plan {
        /// Profile JSON file.
        #[arg(long, conflicts_with = "interactive", required_unless_present = "interactive")]
        profile: Option<PathBuf>,

        /// Collect the profile interactively.
        #[arg(short, long)]
        interactive: bool,

        /// Rotation seed, e.g. user and week. Same seed, same plan.
        #[arg(long, default_value = "default")]
        seed: String,

        #[command(flatten)]
        sources: SourceArgs,

        /// Preference store JSON file; chosen foods are recorded into it.
        #[arg(long, default_value = "preferences.json")]
        preferences: PathBuf,

        /// Write the plan as JSON to this path; the list goes beside it as *.shopping.json.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the aggregated shopping list as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Regenerate the shopping list for a saved plan.
    Shopping {
        /// Plan JSON file written by `plan --output`.
        #[arg(long)]
        plan: PathBuf,

        #[command(flatten)]
        sources: SourceArgs,

        /// Foods the savings pass must not substitute in (repeatable).
        #[arg(long = "exclude")]
        excluded: Vec<String>,

        /// Write the aggregated shopping list as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Edit the preference store.
    Prefs {
        /// Preference store JSON file.
        #[arg(long, default_value = "preferences.json")]
        file: PathBuf,

        /// Food catalog JSON file used to resolve names.
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Mark a food as liked.
    Like { food: String },
    /// Mark a food as disliked.
    Dislike { food: String },
    /// Forget everything about a food.
    Clear { food: String },
    /// Print the store.
    Show,
}
