//! Repositories over the document store.
//!
//! Repositories hold no state between calls beyond their store handle. Each
//! operation is one or two store round trips awaited in sequence.

mod mealplan_repo;
mod recipe_repo;

use thiserror::Error;

use crate::models::ValidationError;
use crate::store::StoreError;

pub use mealplan_repo::{MealPlanRepository, MEAL_PLANS};
pub use recipe_repo::{RecipeRepository, RECIPES};

/// Errors returned by repository operations.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Malformed {collection} document '{id}': {reason}")]
    Malformed {
        collection: &'static str,
        id: String,
        reason: String,
    },
}
