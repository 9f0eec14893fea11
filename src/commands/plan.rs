use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use recipebox_core::{
    picker_candidates, Day, DocumentStore, MealPlan, MealPlanRepository, MealSlot, PlanKey, Recipe,
    RecipeRepository, PICKER_LIMIT,
};

use super::recipe::{find_recipe, truncate};
use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the planner grid for a week
    Show {
        /// Plan key (YYYY-Www, "default" or "current")
        #[arg(long, short)]
        week: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a recipe to a meal slot
    Add {
        /// Day (monday..sunday)
        day: Day,

        /// Meal slot (breakfast, lunch, dinner, evening)
        slot: MealSlot,

        /// Recipe ID or name
        recipe: String,

        /// Plan key (YYYY-Www, "default" or "current")
        #[arg(long, short)]
        week: Option<String>,
    },

    /// Remove a recipe from a meal slot
    Remove {
        /// Day (monday..sunday)
        day: Day,

        /// Meal slot (breakfast, lunch, dinner, evening)
        slot: MealSlot,

        /// Recipe ID or name
        recipe: String,

        /// Plan key (YYYY-Www, "default" or "current")
        #[arg(long, short)]
        week: Option<String>,
    },

    /// Put exactly one recipe in a meal slot, or clear it
    Set {
        /// Day (monday..sunday)
        day: Day,

        /// Meal slot (breakfast, lunch, dinner, evening)
        slot: MealSlot,

        /// Recipe ID or name; omit to clear the slot
        recipe: Option<String>,

        /// Plan key (YYYY-Www, "default" or "current")
        #[arg(long, short)]
        week: Option<String>,
    },

    /// Suggest recipes to plan
    Pick {
        /// Search text; without it the first few recipes are offered
        #[arg(long, short)]
        search: Option<String>,
    },
}

impl PlanCommand {
    pub async fn run<S: DocumentStore>(
        &self,
        plan_repo: &MealPlanRepository<S>,
        recipe_repo: &RecipeRepository<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlanSubcommand::Show { week, format } => {
                let key = config.plan_key(week.as_deref())?;
                let plan = plan_repo.load(&key).await?;
                let recipes = recipe_repo.list_all().await?;

                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&plan_json(&key, &plan, &recipes))?
                        );
                    }
                    OutputFormat::Text => print_grid(&key, &plan, &recipes),
                }
                Ok(())
            }

            PlanSubcommand::Add {
                day,
                slot,
                recipe,
                week,
            } => {
                let key = config.plan_key(week.as_deref())?;
                let recipe = find_recipe(recipe_repo, recipe).await?;
                plan_repo.add_dish(&key, *day, *slot, &recipe.id).await?;
                println!("Added '{}' to {} {} ({})", recipe.name, day, slot, key);
                Ok(())
            }

            PlanSubcommand::Remove {
                day,
                slot,
                recipe,
                week,
            } => {
                let key = config.plan_key(week.as_deref())?;
                let (id, label) = planned_id(recipe_repo, recipe).await?;
                let before = plan_repo.load(&key).await?;
                if !before.dishes(*day, *slot).contains(&id) {
                    return Err(format!("'{}' is not planned for {} {}", label, day, slot).into());
                }
                plan_repo.remove_dish(&key, *day, *slot, &id).await?;
                println!("Removed '{}' from {} {} ({})", label, day, slot, key);
                Ok(())
            }

            PlanSubcommand::Set {
                day,
                slot,
                recipe,
                week,
            } => {
                let key = config.plan_key(week.as_deref())?;
                match recipe {
                    Some(identifier) => {
                        let recipe = find_recipe(recipe_repo, identifier).await?;
                        plan_repo
                            .set_dish(&key, *day, *slot, Some(recipe.id.as_str()))
                            .await?;
                        println!("Set {} {} to '{}' ({})", day, slot, recipe.name, key);
                    }
                    None => {
                        plan_repo.set_dish(&key, *day, *slot, None).await?;
                        println!("Cleared {} {} ({})", day, slot, key);
                    }
                }
                Ok(())
            }

            PlanSubcommand::Pick { search } => {
                let recipes = recipe_repo.list_all().await?;
                let candidates =
                    picker_candidates(&recipes, search.as_deref().unwrap_or(""), PICKER_LIMIT);

                if candidates.is_empty() {
                    println!("No recipes found");
                    return Ok(());
                }
                for recipe in candidates {
                    println!(
                        "{:<32}  {:<30}  {}",
                        recipe.id,
                        truncate(&recipe.name, 30),
                        recipe.category
                    );
                }
                Ok(())
            }
        }
    }
}

/// Resolves the id to remove from a plan.
///
/// A recipe that no longer exists can still be removed by its id.
async fn planned_id<S: DocumentStore>(
    repo: &RecipeRepository<S>,
    identifier: &str,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    Ok(match repo.find(identifier).await? {
        Some(recipe) => (recipe.id, recipe.name),
        None => (identifier.to_string(), identifier.to_string()),
    })
}

/// Recipes named in a slot, skipping ids with no recipe.
fn slot_recipes<'a>(
    plan: &MealPlan,
    by_id: &HashMap<&str, &'a Recipe>,
    day: Day,
    slot: MealSlot,
) -> Vec<&'a Recipe> {
    plan.dishes(day, slot)
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}

fn index(recipes: &[Recipe]) -> HashMap<&str, &Recipe> {
    recipes.iter().map(|r| (r.id.as_str(), r)).collect()
}

fn print_grid(key: &PlanKey, plan: &MealPlan, recipes: &[Recipe]) {
    let by_id = index(recipes);

    let title = match key.week_start() {
        Some(monday) => format!("Meal Plan {} - week of {}", key, monday.format("%b %d, %Y")),
        None => format!("Meal Plan {}", key),
    };
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));

    for day in Day::ALL {
        println!("\n{}", day);
        for slot in MealSlot::ALL {
            let names: Vec<&str> = slot_recipes(plan, &by_id, day, slot)
                .into_iter()
                .map(|r| r.name.as_str())
                .collect();
            let shown = if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            };
            println!("  {:<10} {}", slot, shown);
        }
    }
}

fn plan_json(key: &PlanKey, plan: &MealPlan, recipes: &[Recipe]) -> Value {
    let by_id = index(recipes);

    let mut days = Map::new();
    for day in Day::ALL {
        let mut slots = Map::new();
        for slot in MealSlot::ALL {
            let entries: Vec<Value> = slot_recipes(plan, &by_id, day, slot)
                .into_iter()
                .map(|r| json!({"id": r.id, "name": r.name}))
                .collect();
            if !entries.is_empty() {
                slots.insert(slot.to_string(), Value::Array(entries));
            }
        }
        if !slots.is_empty() {
            days.insert(day.to_string(), Value::Object(slots));
        }
    }

    json!({
        "week": key.to_string(),
        "week_start": key.week_start().map(|d| d.to_string()),
        "days": days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::{Category, MemoryStore, RecipeDraft};
    use tempfile::TempDir;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Lunch,
            description: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            created: 0,
        }
    }

    fn config(temp_dir: &TempDir) -> Config {
        Config::load(Some(temp_dir.path().join("none.yaml"))).unwrap()
    }

    #[test]
    fn test_plan_json_omits_dangling_ids() {
        let key: PlanKey = "2026-W43".parse().unwrap();
        let mut plan = MealPlan::new();
        plan.add_dish(Day::Monday, MealSlot::Lunch, "r1");
        plan.add_dish(Day::Monday, MealSlot::Lunch, "gone");
        plan.add_dish(Day::Friday, MealSlot::Dinner, "gone");

        let value = plan_json(&key, &plan, &[recipe("r1", "Salad")]);
        assert_eq!(value["week"], json!("2026-W43"));
        assert_eq!(value["week_start"], json!("2026-10-19"));
        assert_eq!(
            value["days"],
            json!({"Monday": {"Lunch": [{"id": "r1", "name": "Salad"}]}})
        );
    }

    #[tokio::test]
    async fn test_add_and_remove_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let store = MemoryStore::new();
        let recipes = RecipeRepository::new(store.clone());
        let plans = MealPlanRepository::new(store);
        let id = recipes.create(&RecipeDraft::new("Salad")).await.unwrap();

        let add = PlanCommand {
            command: PlanSubcommand::Add {
                day: Day::Tuesday,
                slot: MealSlot::Lunch,
                recipe: "salad".to_string(),
                week: Some("2026-W43".to_string()),
            },
        };
        add.run(&plans, &recipes, &config).await.unwrap();

        let key: PlanKey = "2026-W43".parse().unwrap();
        let plan = plans.load(&key).await.unwrap();
        assert_eq!(plan.dishes(Day::Tuesday, MealSlot::Lunch), [id.clone()]);

        let remove = PlanCommand {
            command: PlanSubcommand::Remove {
                day: Day::Tuesday,
                slot: MealSlot::Lunch,
                recipe: "Salad".to_string(),
                week: Some("2026-W43".to_string()),
            },
        };
        remove.run(&plans, &recipes, &config).await.unwrap();
        assert!(plans.load(&key).await.unwrap().is_empty());

        let err = remove.run(&plans, &recipes, &config).await.unwrap_err();
        assert!(err.to_string().contains("is not planned"));
    }

    #[tokio::test]
    async fn test_remove_dangling_id() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let store = MemoryStore::new();
        let recipes = RecipeRepository::new(store.clone());
        let plans = MealPlanRepository::new(store);
        let key = PlanKey::Default;
        plans
            .add_dish(&key, Day::Sunday, MealSlot::Evening, "deleted-recipe")
            .await
            .unwrap();

        let remove = PlanCommand {
            command: PlanSubcommand::Remove {
                day: Day::Sunday,
                slot: MealSlot::Evening,
                recipe: "deleted-recipe".to_string(),
                week: Some("default".to_string()),
            },
        };
        remove.run(&plans, &recipes, &config).await.unwrap();
        assert!(plans.load(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_recipe_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let store = MemoryStore::new();
        let recipes = RecipeRepository::new(store.clone());
        let plans = MealPlanRepository::new(store);

        let add = PlanCommand {
            command: PlanSubcommand::Add {
                day: Day::Monday,
                slot: MealSlot::Dinner,
                recipe: "Nothing".to_string(),
                week: None,
            },
        };
        let err = add.run(&plans, &recipes, &config).await.unwrap_err();
        assert_eq!(err.to_string(), "Recipe not found: Nothing");
    }
}
