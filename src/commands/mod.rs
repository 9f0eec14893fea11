mod config_cmd;
mod grocery;
mod plan;
mod recipe;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use grocery::GroceryCommand;
pub use plan::PlanCommand;
pub use recipe::RecipeCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
