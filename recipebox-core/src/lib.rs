//! Recipebox Core Library
//!
//! Recipe and meal plan models, the repositories that keep them in a
//! document store, grocery list derivation and the local grocery checklist.

pub mod checklist;
pub mod grocery;
pub mod models;
pub mod repo;
pub mod search;
pub mod store;

pub use checklist::{
    FilePreferences, GroceryChecklist, MemoryPreferences, PreferenceError, PreferenceStore,
    CHECKLIST_KEY,
};
pub use grocery::derive_grocery_list;
pub use models::{
    Category, Day, DayPlan, MealPlan, MealSlot, PlanKey, PlanKeyError, Recipe, RecipeDraft,
    RecipeFields, ValidationError,
};
pub use repo::{MealPlanRepository, RecipeRepository, RepoError, MEAL_PLANS, RECIPES};
pub use search::{picker_candidates, RecipeQuery, PICKER_LIMIT};
pub use store::{
    Backend, Document, DocumentStore, Fields, FileStore, HttpStore, MemoryStore, StoreError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
