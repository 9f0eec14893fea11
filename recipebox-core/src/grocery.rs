//! Grocery list derivation.
//!
//! The grocery list is computed from a meal plan and the current recipe set
//! every time it is shown; it is never stored.

use std::collections::{HashMap, HashSet};

use crate::models::{MealPlan, Recipe};

/// Collects the ingredients of every recipe referenced by `plan`.
///
/// Entries are de-duplicated by exact string equality and kept in first-seen
/// order, walking days Monday to Sunday, then slots in meal order, then each
/// slot's list order. Ids with no matching recipe contribute nothing.
pub fn derive_grocery_list(plan: &MealPlan, recipes: &[Recipe]) -> Vec<String> {
    let by_id: HashMap<&str, &Recipe> = recipes.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for id in plan.recipe_ids() {
        let Some(recipe) = by_id.get(id) else {
            tracing::debug!("Skipping unknown recipe {} in grocery list", id);
            continue;
        };
        for ingredient in &recipe.ingredients {
            if seen.insert(ingredient.as_str()) {
                items.push(ingredient.clone());
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Day, MealSlot};

    fn recipe(id: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: Category::default(),
            description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: Vec::new(),
            created: 0,
        }
    }

    #[test]
    fn test_single_recipe() {
        let mut plan = MealPlan::new();
        plan.add_dish(Day::Monday, MealSlot::Breakfast, "r1");
        let recipes = vec![recipe("r1", &["egg", "milk"])];

        assert_eq!(derive_grocery_list(&plan, &recipes), vec!["egg", "milk"]);
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let mut plan = MealPlan::new();
        plan.add_dish(Day::Monday, MealSlot::Breakfast, "r1");
        plan.add_dish(Day::Monday, MealSlot::Lunch, "r2");
        let recipes = vec![
            recipe("r1", &["egg", "milk"]),
            recipe("r2", &["milk", "bread"]),
        ];

        assert_eq!(
            derive_grocery_list(&plan, &recipes),
            vec!["egg", "milk", "bread"]
        );
    }

    #[test]
    fn test_walks_days_then_slots() {
        let mut plan = MealPlan::new();
        // Inserted out of grid order on purpose.
        plan.add_dish(Day::Sunday, MealSlot::Breakfast, "r3");
        plan.add_dish(Day::Monday, MealSlot::Evening, "r2");
        plan.add_dish(Day::Monday, MealSlot::Breakfast, "r1");
        let recipes = vec![
            recipe("r1", &["oats"]),
            recipe("r2", &["tea"]),
            recipe("r3", &["jam"]),
        ];

        assert_eq!(
            derive_grocery_list(&plan, &recipes),
            vec!["oats", "tea", "jam"]
        );
    }

    #[test]
    fn test_dangling_reference_is_skipped() {
        let mut plan = MealPlan::new();
        plan.add_dish(Day::Tuesday, MealSlot::Dinner, "gone");
        plan.add_dish(Day::Tuesday, MealSlot::Dinner, "r1");
        let recipes = vec![recipe("r1", &["rice"])];

        assert_eq!(derive_grocery_list(&plan, &recipes), vec!["rice"]);
    }

    #[test]
    fn test_exact_string_equality() {
        let mut plan = MealPlan::new();
        plan.add_dish(Day::Monday, MealSlot::Lunch, "r1");
        plan.add_dish(Day::Monday, MealSlot::Dinner, "r2");
        let recipes = vec![recipe("r1", &["Milk"]), recipe("r2", &["milk"])];

        assert_eq!(derive_grocery_list(&plan, &recipes), vec!["Milk", "milk"]);
    }

    #[test]
    fn test_empty_plan() {
        let recipes = vec![recipe("r1", &["egg"])];
        assert!(derive_grocery_list(&MealPlan::new(), &recipes).is_empty());
    }
}
