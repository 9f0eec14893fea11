mod category;
mod meal_plan;
mod meal_slot;
mod plan_key;
mod recipe;

pub use category::Category;
pub use meal_plan::{DayPlan, MealPlan};
pub use meal_slot::{Day, MealSlot};
pub use plan_key::{PlanKey, PlanKeyError, DEFAULT_PLAN_KEY};
pub use recipe::{split_lines, Recipe, RecipeDraft, RecipeFields, ValidationError};
