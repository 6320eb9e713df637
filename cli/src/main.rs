mod commands;
mod config;
mod spoonacular;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_enrich, cmd_import, cmd_plan_add, cmd_plan_delete, cmd_plan_edit, cmd_plan_list,
    cmd_recipe_add, cmd_recipe_delete, cmd_recipe_edit, cmd_recipe_list, cmd_recipe_show,
    cmd_search,
};
use crate::config::Config;
use crate::spoonacular::SpoonacularClient;
use mealmate_core::service::{DEFAULT_SEARCH_LIMIT, MealMateService};

#[derive(Parser)]
#[command(
    name = "mealmate",
    version,
    about = "A recipe catalog and weekly meal planner CLI"
)]
struct Cli {
    /// User id to act as (the web front end supplies this from the session)
    #[arg(long, global = true, default_value_t = 1)]
    user: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage the weekly meal plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Search the external recipe catalog
    Search {
        /// Search query (blank falls back to a default term)
        #[arg(default_value = "")]
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a catalog search result as a stub recipe
    Import {
        /// Catalog id from `search`
        external_id: String,
        /// Recipe title
        title: String,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch full catalog details for an imported recipe and fill in
    /// ingredients and calories
    Enrich {
        /// Local recipe id (must have been imported from the catalog)
        recipe_id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store the Spoonacular API key in the data directory
    SetKey {
        /// The API key
        key: String,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// List recipes (the shared feed by default)
    List {
        /// Only show your own recipes
        #[arg(long)]
        mine: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a recipe manually
    Add {
        /// Recipe name
        name: String,
        /// Ingredients, one per line (use \n or quote a multi-line string)
        #[arg(long)]
        ingredients: String,
        /// Calories per portion
        #[arg(long)]
        calories: i64,
        /// Category (e.g. Soup, Dessert)
        #[arg(long)]
        category: String,
        /// Mark as vegetarian
        #[arg(long)]
        vegetarian: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one recipe
    Show {
        /// Recipe id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a recipe (full validation applies to the merged record)
    Edit {
        /// Recipe id
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New ingredients
        #[arg(long)]
        ingredients: Option<String>,
        /// New calories per portion
        #[arg(long)]
        calories: Option<i64>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// Set or clear the vegetarian flag
        #[arg(long)]
        vegetarian: Option<bool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a recipe
    Delete {
        /// Recipe id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Show the weekly plan, Monday through Sunday
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Schedule a recipe
    Add {
        /// Recipe id (must be one of your own recipes)
        recipe_id: i64,
        /// Day of week: monday-sunday or mon-sun
        day: String,
        /// Meal: breakfast, lunch, dinner, snack
        meal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a plan entry
    Edit {
        /// Plan entry id
        id: i64,
        /// New recipe id
        #[arg(long)]
        recipe: Option<i64>,
        /// New day of week
        #[arg(long)]
        day: Option<String>,
        /// New meal type
        #[arg(long)]
        meal: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a plan entry
    Delete {
        /// Plan entry id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let svc = MealMateService::new(&config.db_path)?;
    let user = cli.user;

    match cli.command {
        Commands::Recipe { command } => match command {
            RecipeCommands::List { mine, json } => cmd_recipe_list(&svc, user, mine, json),
            RecipeCommands::Add {
                name,
                ingredients,
                calories,
                category,
                vegetarian,
                json,
            } => cmd_recipe_add(
                &svc,
                user,
                &name,
                &ingredients,
                calories,
                &category,
                vegetarian,
                json,
            ),
            RecipeCommands::Show { id, json } => cmd_recipe_show(&svc, user, id, json),
            RecipeCommands::Edit {
                id,
                name,
                ingredients,
                calories,
                category,
                vegetarian,
                json,
            } => cmd_recipe_edit(
                &svc,
                user,
                id,
                name,
                ingredients,
                calories,
                category,
                vegetarian,
                json,
            ),
            RecipeCommands::Delete { id, json } => cmd_recipe_delete(&svc, user, id, json),
        },
        Commands::Plan { command } => match command {
            PlanCommands::List { json } => cmd_plan_list(&svc, user, json),
            PlanCommands::Add {
                recipe_id,
                day,
                meal,
                json,
            } => cmd_plan_add(&svc, user, recipe_id, &day, &meal, json),
            PlanCommands::Edit {
                id,
                recipe,
                day,
                meal,
                json,
            } => cmd_plan_edit(&svc, user, id, recipe, day, meal, json),
            PlanCommands::Delete { id, json } => cmd_plan_delete(&svc, user, id, json),
        },
        Commands::Search { query, limit, json } => {
            let client = SpoonacularClient::new(config.spoonacular_api_key()?);
            cmd_search(&svc, &client, &query, limit, json)
        }
        Commands::Import {
            external_id,
            title,
            image,
            json,
        } => cmd_import(&svc, user, &external_id, &title, image, json),
        Commands::Enrich { recipe_id, json } => {
            let client = SpoonacularClient::new(config.spoonacular_api_key()?);
            cmd_enrich(&svc, &client, user, recipe_id, json)
        }
        Commands::SetKey { key } => {
            config.store_api_key(&key)?;
            println!("API key stored in {}", config.data_dir.display());
            Ok(())
        }
    }
}
