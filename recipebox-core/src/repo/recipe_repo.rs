use chrono::Utc;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::RepoError;
use crate::models::{Category, Recipe, RecipeDraft, RecipeFields};
use crate::store::{Document, DocumentStore, Fields};

/// Collection holding recipe documents.
pub const RECIPES: &str = "recipes";

/// Recipe document body as found in the store.
///
/// Missing optional fields take their defaults. An unrecognised category is
/// read as the default category, and blank list entries are dropped.
#[derive(Deserialize)]
struct StoredRecipe {
    name: String,
    #[serde(default, deserialize_with = "lenient_category")]
    category: Category,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    created: i64,
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn decode(doc: Document) -> Result<Recipe, RepoError> {
    let stored: StoredRecipe =
        serde_json::from_value(Value::Object(doc.fields)).map_err(|e| RepoError::Malformed {
            collection: RECIPES,
            id: doc.id.clone(),
            reason: e.to_string(),
        })?;

    Ok(Recipe {
        id: doc.id,
        name: stored.name,
        category: stored.category,
        description: stored.description,
        ingredients: stored
            .ingredients
            .into_iter()
            .filter(|i| !i.is_empty())
            .collect(),
        steps: stored.steps.into_iter().filter(|s| !s.is_empty()).collect(),
        created: stored.created,
    })
}

fn encode(fields: &RecipeFields) -> Fields {
    let lines = |entries: &[String]| Value::from(entries.to_vec());

    let mut doc = Fields::new();
    doc.insert("name".to_string(), Value::from(fields.name.as_str()));
    doc.insert("category".to_string(), Value::from(fields.category.as_str()));
    doc.insert(
        "description".to_string(),
        Value::from(fields.description.as_str()),
    );
    doc.insert("ingredients".to_string(), lines(&fields.ingredients));
    doc.insert("steps".to_string(), lines(&fields.steps));
    doc
}

/// CRUD over the `recipes` collection.
pub struct RecipeRepository<S> {
    store: S,
}

impl<S: DocumentStore> RecipeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All recipes in the store's enumeration order.
    ///
    /// Documents that cannot be read as recipes are logged and skipped.
    pub async fn list_all(&self) -> Result<Vec<Recipe>, RepoError> {
        let docs = self.store.list(RECIPES).await?;

        let mut recipes = Vec::with_capacity(docs.len());
        for doc in docs {
            match decode(doc) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        Ok(recipes)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Recipe>, RepoError> {
        match self.store.get(RECIPES, id).await? {
            Some(doc) => decode(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Looks a recipe up by id, falling back to a case-insensitive name match.
    pub async fn find(&self, identifier: &str) -> Result<Option<Recipe>, RepoError> {
        if crate::store::validate_name(identifier).is_ok() {
            if let Some(recipe) = self.get(identifier).await? {
                return Ok(Some(recipe));
            }
        }

        let wanted = identifier.trim().to_lowercase();
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|r| r.name.to_lowercase() == wanted))
    }

    /// Validates the draft and stores a new recipe. Returns the new id.
    pub async fn create(&self, draft: &RecipeDraft) -> Result<String, RepoError> {
        let fields = draft.validate()?;

        let mut doc = encode(&fields);
        doc.insert(
            "created".to_string(),
            Value::from(Utc::now().timestamp_millis()),
        );

        let id = self.store.create(RECIPES, doc).await?;
        tracing::debug!("Created recipe {} ({})", id, fields.name);
        Ok(id)
    }

    /// Overwrites every mutable field of an existing recipe.
    ///
    /// `created` is left untouched. Fails with a not-found store error if the
    /// recipe does not exist.
    pub async fn update(&self, id: &str, draft: &RecipeDraft) -> Result<(), RepoError> {
        let fields = draft.validate()?;
        self.store.update(RECIPES, id, encode(&fields)).await?;
        tracing::debug!("Updated recipe {}", id);
        Ok(())
    }

    /// Removes a recipe. Deleting an absent recipe succeeds.
    ///
    /// Meal plans referencing the recipe are not touched.
    pub async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let existed = self.store.delete(RECIPES, id).await?;
        if !existed {
            tracing::debug!("Recipe {} was already absent", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn setup() -> (RecipeRepository<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (RecipeRepository::new(store.clone()), store)
    }

    fn pancakes() -> RecipeDraft {
        RecipeDraft::new("Pancakes")
            .with_category(Category::Breakfast)
            .with_description("Sunday classic")
            .with_ingredients("flour\n\negg\nmilk\n")
            .with_steps("Whisk\n  \nFry")
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let (repo, _store) = setup();
        let draft = pancakes();

        let id = repo.create(&draft).await.unwrap();
        let recipe = repo.get(&id).await.unwrap().unwrap();

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.name, "Pancakes");
        assert_eq!(recipe.category, Category::Breakfast);
        assert_eq!(recipe.description, "Sunday classic");
        assert_eq!(recipe.ingredients, vec!["flour", "egg", "milk"]);
        assert_eq!(recipe.steps, vec!["Whisk", "Fry"]);
        assert!(recipe.created > 0);
    }

    #[tokio::test]
    async fn test_create_blank_name_is_rejected() {
        let (repo, store) = setup();

        let err = repo.create(&RecipeDraft::new("  ")).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::BlankName)
        ));
        assert_eq!(store.len(RECIPES).await, 0);
    }

    #[tokio::test]
    async fn test_update_keeps_created() {
        let (repo, _store) = setup();
        let id = repo.create(&pancakes()).await.unwrap();
        let before = repo.get(&id).await.unwrap().unwrap();

        let draft = RecipeDraft::new("Crepes")
            .with_category(Category::Snacks)
            .with_ingredients("flour\nmilk");
        repo.update(&id, &draft).await.unwrap();

        let after = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(after.name, "Crepes");
        assert_eq!(after.category, Category::Snacks);
        assert_eq!(after.description, "");
        assert_eq!(after.ingredients, vec!["flour", "milk"]);
        assert!(after.steps.is_empty());
        assert_eq!(after.created, before.created);
        assert_eq!(after.id, before.id);
    }

    #[tokio::test]
    async fn test_update_missing_recipe_fails() {
        let (repo, _store) = setup();
        let err = repo.update("missing", &pancakes()).await.unwrap_err();
        assert!(matches!(err, RepoError::Store(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_update_blank_name_is_rejected() {
        let (repo, _store) = setup();
        let id = repo.create(&pancakes()).await.unwrap();

        let err = repo.update(&id, &RecipeDraft::new("")).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(repo.get(&id).await.unwrap().unwrap().name, "Pancakes");
    }

    #[tokio::test]
    async fn test_delete_twice_is_ok() {
        let (repo, _store) = setup();
        let keep = repo.create(&RecipeDraft::new("Keep")).await.unwrap();
        let id = repo.create(&pancakes()).await.unwrap();

        repo.delete(&id).await.unwrap();
        let after_first = repo.list_all().await.unwrap();

        repo.delete(&id).await.unwrap();
        let after_second = repo.list_all().await.unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.len(), 1);
        assert_eq!(after_second[0].id, keep);
    }

    #[tokio::test]
    async fn test_list_all_skips_malformed_documents() {
        let (repo, store) = setup();
        repo.create(&pancakes()).await.unwrap();
        store
            .set(RECIPES, "broken", json!({"category": "Lunch"}).as_object().unwrap().clone())
            .await
            .unwrap();

        let recipes = repo.list_all().await.unwrap();
        assert_eq!(recipes.len(), 1);

        let err = repo.get("broken").await.unwrap_err();
        assert!(matches!(err, RepoError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_reads_sparse_documents_with_defaults() {
        let (repo, store) = setup();
        store
            .set(
                RECIPES,
                "legacy",
                json!({"name": "Lemonade", "category": "Smoothie", "ingredients": ["lemon", ""]})
                    .as_object()
                    .unwrap()
                    .clone(),
            )
            .await
            .unwrap();

        let recipe = repo.get("legacy").await.unwrap().unwrap();
        assert_eq!(recipe.category, Category::Breakfast);
        assert_eq!(recipe.description, "");
        assert_eq!(recipe.ingredients, vec!["lemon"]);
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.created, 0);
    }

    #[tokio::test]
    async fn test_find_by_id_or_name() {
        let (repo, _store) = setup();
        let id = repo.create(&pancakes()).await.unwrap();

        assert_eq!(repo.find(&id).await.unwrap().unwrap().id, id);
        assert_eq!(repo.find("pancakes").await.unwrap().unwrap().id, id);
        assert_eq!(repo.find("Pan Cakes!").await.unwrap(), None);
    }
}
