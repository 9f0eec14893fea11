use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recipe category. Stored in documents by its capitalized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    Juice,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snacks,
        Category::Juice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Snacks => "Snacks",
            Category::Juice => "Juice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Category::Breakfast),
            "lunch" => Ok(Category::Lunch),
            "dinner" => Ok(Category::Dinner),
            "snacks" | "snack" => Ok(Category::Snacks),
            "juice" => Ok(Category::Juice),
            _ => Err(format!(
                "Invalid category '{}'. Valid options: breakfast, lunch, dinner, snacks, juice",
                s
            )),
        }
    }
}
