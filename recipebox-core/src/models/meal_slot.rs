use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the planner week. Ordering follows the planner grid, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Day::Monday),
            "tuesday" | "tue" => Ok(Day::Tuesday),
            "wednesday" | "wed" => Ok(Day::Wednesday),
            "thursday" | "thu" => Ok(Day::Thursday),
            "friday" | "fri" => Ok(Day::Friday),
            "saturday" | "sat" => Ok(Day::Saturday),
            "sunday" | "sun" => Ok(Day::Sunday),
            _ => Err(format!(
                "Invalid day '{}'. Valid options: monday through sunday",
                s
            )),
        }
    }
}

/// Meal slot within a day.
///
/// `Snack` is accepted as a legacy name for `Evening`: older single-dish plans
/// used it for the fourth column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    #[serde(alias = "Snack")]
    Evening,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Evening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Evening => "Evening",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "evening" | "snack" => Ok(MealSlot::Evening),
            _ => Err(format!(
                "Invalid meal slot '{}'. Valid options: breakfast, lunch, dinner, evening",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order_starts_monday() {
        assert_eq!(Day::ALL[0], Day::Monday);
        assert_eq!(Day::ALL[6], Day::Sunday);
        assert!(Day::Monday < Day::Sunday);
    }

    #[test]
    fn test_day_from_str() {
        assert_eq!(Day::from_str("monday").unwrap(), Day::Monday);
        assert_eq!(Day::from_str("Sat").unwrap(), Day::Saturday);
        assert!(Day::from_str("someday").is_err());
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!(MealSlot::from_str("LUNCH").unwrap(), MealSlot::Lunch);
        assert_eq!(MealSlot::from_str("snack").unwrap(), MealSlot::Evening);
        assert!(MealSlot::from_str("brunch").is_err());
    }

    #[test]
    fn test_slot_accepts_legacy_snack_name() {
        let parsed: MealSlot = serde_json::from_str("\"Snack\"").unwrap();
        assert_eq!(parsed, MealSlot::Evening);

        let json = serde_json::to_string(&MealSlot::Evening).unwrap();
        assert_eq!(json, "\"Evening\"");
    }
}
