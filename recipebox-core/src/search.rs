//! Recipe filtering for list views and the planner's recipe picker.

use crate::models::{Category, Recipe};

/// Number of recipes the picker offers when no search text is entered.
pub const PICKER_LIMIT: usize = 5;

/// Filter over a recipe list.
///
/// Text matches case-insensitively against the name or the space-joined
/// ingredients. Category, when set, must match exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeQuery {
    pub text: Option<String>,
    pub category: Option<Category>,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text. Blank text matches everything.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(category) = self.category {
            if recipe.category != category {
                return false;
            }
        }
        match &self.text {
            Some(text) => recipe.matches_text(text),
            None => true,
        }
    }

    /// Recipes passing the filter, in input order.
    pub fn filter<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Candidates for the planner's recipe picker.
///
/// Blank search text offers the first `limit` recipes; otherwise every
/// recipe whose name contains the text (case-insensitively) is returned.
/// Unlike [`RecipeQuery`], ingredients are not searched.
pub fn picker_candidates<'a>(
    recipes: &'a [Recipe],
    search: &str,
    limit: usize,
) -> Vec<&'a Recipe> {
    if search.trim().is_empty() {
        return recipes.iter().take(limit).collect();
    }
    let needle = search.to_lowercase();
    recipes
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str, category: Category, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            category,
            description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: Vec::new(),
            created: 0,
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("r1", "Pancakes", Category::Breakfast, &["flour", "egg"]),
            recipe("r2", "Tomato Soup", Category::Dinner, &["tomato", "cream"]),
            recipe("r3", "Green Juice", Category::Juice, &["kale", "apple"]),
            recipe("r4", "Omelette", Category::Breakfast, &["egg", "cheese"]),
        ]
    }

    fn ids(recipes: Vec<&Recipe>) -> Vec<&str> {
        recipes.into_iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let recipes = sample();
        assert_eq!(RecipeQuery::new().filter(&recipes).len(), 4);
        assert_eq!(RecipeQuery::new().with_text("  ").filter(&recipes).len(), 4);
    }

    #[test]
    fn test_text_matches_name_or_ingredients() {
        let recipes = sample();
        assert_eq!(
            ids(RecipeQuery::new().with_text("EGG").filter(&recipes)),
            vec!["r1", "r4"]
        );
        assert_eq!(
            ids(RecipeQuery::new().with_text("soup").filter(&recipes)),
            vec!["r2"]
        );
        assert_eq!(
            ids(RecipeQuery::new().with_text("kale apple").filter(&recipes)),
            vec!["r3"]
        );
    }

    #[test]
    fn test_category_filter() {
        let recipes = sample();
        let query = RecipeQuery::new()
            .with_category(Category::Breakfast)
            .with_text("cheese");
        assert_eq!(ids(query.filter(&recipes)), vec!["r4"]);

        let query = RecipeQuery::new().with_category(Category::Lunch);
        assert!(query.filter(&recipes).is_empty());
    }

    #[test]
    fn test_picker_limits_blank_search() {
        let mut recipes = sample();
        recipes.push(recipe("r5", "Toast", Category::Breakfast, &["bread"]));
        recipes.push(recipe("r6", "Salad", Category::Lunch, &["lettuce"]));

        assert_eq!(
            ids(picker_candidates(&recipes, "", PICKER_LIMIT)),
            vec!["r1", "r2", "r3", "r4", "r5"]
        );
    }

    #[test]
    fn test_picker_search_is_not_limited() {
        let mut recipes = sample();
        recipes.push(recipe("r5", "Pancake Stack", Category::Breakfast, &["syrup"]));
        assert_eq!(
            ids(picker_candidates(&recipes, "PANCAKE", 1)),
            vec!["r1", "r5"]
        );
    }

    #[test]
    fn test_picker_search_ignores_ingredients() {
        let recipes = sample();
        assert!(picker_candidates(&recipes, "egg", PICKER_LIMIT).is_empty());
        assert_eq!(ids(picker_candidates(&recipes, "omel", PICKER_LIMIT)), vec!["r4"]);
    }
}
