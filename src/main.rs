use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{ConfigCommand, GroceryCommand, PlanCommand, RecipeCommand};
use config::Config;
use recipebox_core::{
    Backend, FilePreferences, FileStore, GroceryChecklist, HttpStore, MealPlanRepository,
    RecipeRepository,
};

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(version)]
#[command(about = "Recipe manager and weekly meal planner", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage recipes
    Recipe(RecipeCommand),

    /// Plan meals for the week
    Plan(PlanCommand),

    /// Grocery list for a week's plan
    Grocery(GroceryCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Document store selected by configuration: the remote service when a
/// server URL is set, local files otherwise.
fn open_store(config: &Config) -> Backend {
    let backend: Backend = match &config.store.server_url {
        Some(url) => HttpStore::new(url.as_str(), config.store.api_key.clone()).into(),
        None => FileStore::new(config.store_dir()).into(),
    };
    tracing::debug!("Using {} store", backend.describe());
    backend
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_config_path);
    let config = Config::load(Some(config_path.clone()))?;

    match cli.command {
        Some(Commands::Recipe(cmd)) => {
            let repo = RecipeRepository::new(open_store(&config));
            cmd.run(&repo).await?;
        }
        Some(Commands::Plan(cmd)) => {
            let store = open_store(&config);
            let plan_repo = MealPlanRepository::new(store.clone());
            let recipe_repo = RecipeRepository::new(store);
            cmd.run(&plan_repo, &recipe_repo, &config).await?;
        }
        Some(Commands::Grocery(cmd)) => {
            let store = open_store(&config);
            let plan_repo = MealPlanRepository::new(store.clone());
            let recipe_repo = RecipeRepository::new(store);
            let prefs = FilePreferences::in_dir(&config.data_dir.value);
            let mut checklist = GroceryChecklist::load(prefs)?;
            cmd.run(&plan_repo, &recipe_repo, &mut checklist, &config)
                .await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, &config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
