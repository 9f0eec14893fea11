//! Grocery list CLI commands.
//!
//! The list is derived from a week's meal plan; checked marks are kept
//! locally and shared by every week.

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use recipebox_core::{
    derive_grocery_list, DocumentStore, GroceryChecklist, MealPlanRepository, PlanKey,
    PreferenceStore, RecipeRepository,
};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct GroceryCommand {
    #[command(subcommand)]
    pub command: GrocerySubcommand,
}

#[derive(Subcommand)]
pub enum GrocerySubcommand {
    /// List groceries needed for a week's plan
    List {
        /// Plan key (YYYY-Www, "default" or "current")
        #[arg(long, short)]
        week: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark an item as checked (purchased)
    Check {
        /// Item, exactly as listed
        item: String,
    },

    /// Uncheck a previously checked item
    Uncheck {
        /// Item, exactly as listed
        item: String,
    },

    /// Uncheck all items
    Clear,
}

impl GroceryCommand {
    pub async fn run<S: DocumentStore, P: PreferenceStore>(
        &self,
        plan_repo: &MealPlanRepository<S>,
        recipe_repo: &RecipeRepository<S>,
        checklist: &mut GroceryChecklist<P>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GrocerySubcommand::List { week, format } => {
                let key = config.plan_key(week.as_deref())?;
                let plan = plan_repo.load(&key).await?;
                let recipes = recipe_repo.list_all().await?;
                let items = derive_grocery_list(&plan, &recipes);

                match format {
                    OutputFormat::Json => {
                        let output = grocery_json(&key, &items, checklist);
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        let title = format!("Grocery List - {}", key);
                        println!("{}", title);
                        println!("{}", "=".repeat(title.chars().count()));

                        if items.is_empty() {
                            println!("No items.");
                            println!("\nNothing is planned for this week.");
                            return Ok(());
                        }

                        for item in &items {
                            println!("{}", item_line(item, checklist.is_checked(item)));
                        }
                        let checked = items
                            .iter()
                            .filter(|item| checklist.is_checked(item))
                            .count();
                        println!("\n{} item(s), {} checked", items.len(), checked);
                    }
                }
                Ok(())
            }

            GrocerySubcommand::Check { item } => {
                checklist.set(item, true)?;
                println!("Checked: {}", item);
                Ok(())
            }

            GrocerySubcommand::Uncheck { item } => {
                checklist.set(item, false)?;
                println!("Unchecked: {}", item);
                Ok(())
            }

            GrocerySubcommand::Clear => {
                let count = checklist.checked_count();
                checklist.clear()?;
                println!("Cleared {} checked item(s)", count);
                Ok(())
            }
        }
    }
}

/// One checklist row of the text view.
fn item_line(item: &str, checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{} {}", mark, item)
}

/// JSON view of a week's grocery list with checklist marks.
fn grocery_json<P: PreferenceStore>(
    key: &PlanKey,
    items: &[String],
    checklist: &GroceryChecklist<P>,
) -> Value {
    json!({
        "week": key.to_string(),
        "items": items
            .iter()
            .map(|item| json!({
                "name": item,
                "checked": checklist.is_checked(item),
            }))
            .collect::<Vec<_>>(),
    })
}
