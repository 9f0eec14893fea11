use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use recipebox_core::{Category, DocumentStore, Recipe, RecipeDraft, RecipeQuery, RecipeRepository};

use super::OutputFormat;

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// Create a new recipe
    Create {
        /// Name of the recipe
        name: String,

        /// Category (breakfast, lunch, dinner, snacks, juice)
        #[arg(long, short)]
        category: Option<Category>,

        /// Short description
        #[arg(long, short)]
        description: Option<String>,

        /// Ingredients, one per line
        #[arg(long, conflicts_with = "ingredients_file")]
        ingredients: Option<String>,

        /// Read ingredients from a file, one per line
        #[arg(long, value_name = "FILE")]
        ingredients_file: Option<PathBuf>,

        /// Steps, one per line
        #[arg(long, conflicts_with = "steps_file")]
        steps: Option<String>,

        /// Read steps from a file, one per line
        #[arg(long, value_name = "FILE")]
        steps_file: Option<PathBuf>,
    },

    /// List recipes
    List {
        /// Only recipes whose name or ingredients contain this text
        #[arg(long, short)]
        search: Option<String>,

        /// Only recipes in this category
        #[arg(long, short)]
        category: Option<Category>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing recipe; omitted fields keep their value
    Update {
        /// Recipe ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New category
        #[arg(long, short)]
        category: Option<Category>,

        /// New description
        #[arg(long, short)]
        description: Option<String>,

        /// Replace ingredients, one per line
        #[arg(long, conflicts_with = "ingredients_file")]
        ingredients: Option<String>,

        /// Replace ingredients from a file
        #[arg(long, value_name = "FILE")]
        ingredients_file: Option<PathBuf>,

        /// Replace steps, one per line
        #[arg(long, conflicts_with = "steps_file")]
        steps: Option<String>,

        /// Replace steps from a file
        #[arg(long, value_name = "FILE")]
        steps_file: Option<PathBuf>,
    },

    /// Delete a recipe
    Delete {
        /// Recipe ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RecipeCommand {
    pub async fn run<S: DocumentStore>(
        &self,
        repo: &RecipeRepository<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::Create {
                name,
                category,
                description,
                ingredients,
                ingredients_file,
                steps,
                steps_file,
            } => {
                let mut draft = RecipeDraft::new(name.as_str());
                if let Some(category) = category {
                    draft = draft.with_category(*category);
                }
                if let Some(description) = description {
                    draft = draft.with_description(description.as_str());
                }
                if let Some(text) = read_text(ingredients, ingredients_file)? {
                    draft = draft.with_ingredients(text);
                }
                if let Some(text) = read_text(steps, steps_file)? {
                    draft = draft.with_steps(text);
                }

                let id = repo.create(&draft).await?;
                let created = find_recipe(repo, &id).await?;
                println!("Created recipe ({}):", created.id);
                println!("{}", created);
                Ok(())
            }

            RecipeSubcommand::List {
                search,
                category,
                format,
            } => {
                let mut query = RecipeQuery::new();
                if let Some(text) = search {
                    query = query.with_text(text.as_str());
                }
                if let Some(category) = category {
                    query = query.with_category(*category);
                }

                let all = repo.list_all().await?;
                let recipes = query.filter(&all);

                if recipes.is_empty() {
                    println!("No recipes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<32}  {:<30}  CATEGORY", "ID", "NAME");
                        println!("{}", "-".repeat(76));
                        for recipe in &recipes {
                            println!(
                                "{:<32}  {:<30}  {}",
                                recipe.id,
                                truncate(&recipe.name, 30),
                                recipe.category
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { identifier, format } => {
                let recipe = find_recipe(repo, identifier).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipe)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", recipe);
                        if let Some(created) = recipe.created_at() {
                            println!("Created: {}", created.format("%Y-%m-%d %H:%M UTC"));
                        }
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Update {
                identifier,
                name,
                category,
                description,
                ingredients,
                ingredients_file,
                steps,
                steps_file,
            } => {
                let ingredients = read_text(ingredients, ingredients_file)?;
                let steps = read_text(steps, steps_file)?;

                let has_updates = name.is_some()
                    || category.is_some()
                    || description.is_some()
                    || ingredients.is_some()
                    || steps.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let recipe = find_recipe(repo, identifier).await?;
                let mut draft = recipe.to_draft();
                if let Some(name) = name {
                    draft.name = name.clone();
                }
                if let Some(category) = category {
                    draft.category = Some(*category);
                }
                if let Some(description) = description {
                    draft.description = description.clone();
                }
                if let Some(text) = ingredients {
                    draft.ingredients = text;
                }
                if let Some(text) = steps {
                    draft.steps = text;
                }

                repo.update(&recipe.id, &draft).await?;
                let updated = find_recipe(repo, &recipe.id).await?;
                println!("Updated recipe:");
                println!("{}", updated);
                Ok(())
            }

            RecipeSubcommand::Delete { identifier, force } => {
                let recipe = find_recipe(repo, identifier).await?;

                if !force {
                    print!("Delete recipe '{}'? [y/N] ", recipe.name);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                repo.delete(&recipe.id).await?;
                println!("Deleted recipe: {}", recipe.name);
                Ok(())
            }
        }
    }
}

/// Looks a recipe up by id or name, failing if there is none.
pub(crate) async fn find_recipe<S: DocumentStore>(
    repo: &RecipeRepository<S>,
    identifier: &str,
) -> Result<Recipe, Box<dyn std::error::Error>> {
    repo.find(identifier)
        .await?
        .ok_or_else(|| format!("Recipe not found: {}", identifier).into())
}

/// Multi-line text given inline or read from a file.
fn read_text(
    inline: &Option<String>,
    file: &Option<PathBuf>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text.clone())),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e).into()),
        (None, None) => Ok(None),
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::MemoryStore;
    use tempfile::TempDir;

    fn create(name: &str, ingredients: Option<&str>) -> RecipeCommand {
        RecipeCommand {
            command: RecipeSubcommand::Create {
                name: name.to_string(),
                category: Some(Category::Dinner),
                description: None,
                ingredients: ingredients.map(str::to_string),
                ingredients_file: None,
                steps: None,
                steps_file: None,
            },
        }
    }

    #[tokio::test]
    async fn test_create_then_update_by_name() {
        let repo = RecipeRepository::new(MemoryStore::new());
        create("Chili", Some("beans\n\ntomato")).run(&repo).await.unwrap();

        let update = RecipeCommand {
            command: RecipeSubcommand::Update {
                identifier: "chili".to_string(),
                name: None,
                category: None,
                description: Some("Spicy".to_string()),
                ingredients: None,
                ingredients_file: None,
                steps: Some("Simmer".to_string()),
                steps_file: None,
            },
        };
        update.run(&repo).await.unwrap();

        let recipe = find_recipe(&repo, "Chili").await.unwrap();
        assert_eq!(recipe.category, Category::Dinner);
        assert_eq!(recipe.description, "Spicy");
        assert_eq!(recipe.ingredients, vec!["beans", "tomato"]);
        assert_eq!(recipe.steps, vec!["Simmer"]);
    }

    #[tokio::test]
    async fn test_create_blank_name_fails() {
        let repo = RecipeRepository::new(MemoryStore::new());
        let err = create(" ", None).run(&repo).await.unwrap_err();
        assert_eq!(err.to_string(), "Recipe name cannot be empty");
    }

    #[tokio::test]
    async fn test_update_without_options_fails() {
        let repo = RecipeRepository::new(MemoryStore::new());
        create("Chili", None).run(&repo).await.unwrap();

        let update = RecipeCommand {
            command: RecipeSubcommand::Update {
                identifier: "Chili".to_string(),
                name: None,
                category: None,
                description: None,
                ingredients: None,
                ingredients_file: None,
                steps: None,
                steps_file: None,
            },
        };
        let err = update.run(&repo).await.unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn test_forced_delete() {
        let repo = RecipeRepository::new(MemoryStore::new());
        create("Chili", None).run(&repo).await.unwrap();

        let delete = RecipeCommand {
            command: RecipeSubcommand::Delete {
                identifier: "Chili".to_string(),
                force: true,
            },
        };
        delete.run(&repo).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());

        let err = delete.run(&repo).await.unwrap_err();
        assert_eq!(err.to_string(), "Recipe not found: Chili");
    }

    #[test]
    fn test_read_text_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ingredients.txt");
        std::fs::write(&path, "egg\nmilk\n").unwrap();

        let text = read_text(&None, &Some(path)).unwrap();
        assert_eq!(text.as_deref(), Some("egg\nmilk\n"));
        assert_eq!(read_text(&None, &None).unwrap(), None);
        assert!(read_text(&None, &Some(temp_dir.path().join("missing"))).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Soup", 30), "Soup");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
