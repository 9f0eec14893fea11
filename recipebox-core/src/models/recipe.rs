use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::category::Category;

/// A recipe as stored in the `recipes` collection.
///
/// `id` is assigned by the store and `created` is stamped once on creation;
/// neither changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Creation time in epoch milliseconds
    pub created: i64,
}

impl Recipe {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created)
    }

    /// Case-insensitive match against the name or the space-joined ingredients.
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.ingredients.join(" ").to_lowercase().contains(&query)
    }

    /// Editable form of this recipe, with ingredients and steps joined back
    /// into multi-line text.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone(),
            category: Some(self.category),
            description: self.description.clone(),
            ingredients: self.ingredients.join("\n"),
            steps: self.steps.join("\n"),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "Category: {}", self.category)?;

        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.steps.is_empty() {
            writeln!(f, "\nSteps:")?;
            for (i, step) in self.steps.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, step)?;
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Recipe name cannot be empty")]
    BlankName,
}

/// Raw recipe input as a user enters it: ingredients and steps are
/// multi-line text with one entry per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub category: Option<Category>,
    pub description: String,
    pub ingredients: String,
    pub steps: String,
}

/// Validated recipe content, ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = ingredients.into();
        self
    }

    pub fn with_steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = steps.into();
        self
    }

    /// Checks the name and splits ingredients and steps into entries.
    pub fn validate(&self) -> Result<RecipeFields, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }

        Ok(RecipeFields {
            name: self.name.clone(),
            category: self.category.unwrap_or_default(),
            description: self.description.clone(),
            ingredients: split_lines(&self.ingredients),
            steps: split_lines(&self.steps),
        })
    }
}

/// Splits multi-line text into entries, one per non-blank line.
///
/// Line breaks may be `\n` or `\r\n`; lines holding only whitespace are
/// dropped. Kept lines are not otherwise trimmed.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
