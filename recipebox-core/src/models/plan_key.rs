//! Meal plan document keys.
//!
//! Plans are keyed by ISO week (`2026-W03`). The singleton key `default`
//! addresses plans written before week keys existed.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key of the legacy singleton plan document.
pub const DEFAULT_PLAN_KEY: &str = "default";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanKeyError {
    #[error("Invalid plan key '{0}'. Use YYYY-Www (e.g. 2026-W03) or 'default'")]
    InvalidFormat(String),

    #[error("Week {week} does not exist in {year}")]
    WeekOutOfRange { year: i32, week: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKey {
    Default,
    Week { year: i32, week: u32 },
}

impl PlanKey {
    /// Key of the ISO week containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        PlanKey::Week {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Key of the current local week.
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Monday of the week, or `None` for the singleton key.
    pub fn week_start(&self) -> Option<NaiveDate> {
        match self {
            PlanKey::Default => None,
            PlanKey::Week { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon),
        }
    }

    /// Document id used in the `mealPlans` collection.
    pub fn document_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKey::Default => f.write_str(DEFAULT_PLAN_KEY),
            PlanKey::Week { year, week } => write!(f, "{}-W{:02}", year, week),
        }
    }
}

impl FromStr for PlanKey {
    type Err = PlanKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(DEFAULT_PLAN_KEY) {
            return Ok(PlanKey::Default);
        }

        let invalid = || PlanKeyError::InvalidFormat(s.to_string());
        let (year, week) = s.split_once(['W', 'w']).ok_or_else(invalid)?;
        let year = year.strip_suffix('-').ok_or_else(invalid)?;

        // Digits only: integer parsing would also take signs.
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        let year_ok = year.len() == 4 && all_digits(year);
        let week_ok = (1..=2).contains(&week.len()) && all_digits(week);
        if !year_ok || !week_ok {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;

        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(PlanKeyError::WeekOutOfRange { year, week });
        }
        Ok(PlanKey::Week { year, week })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_key_is_zero_padded() {
        let key = PlanKey::Week {
            year: 2026,
            week: 3,
        };
        assert_eq!(key.to_string(), "2026-W03");
    }

    #[test]
    fn test_for_date_uses_iso_week_year() {
        // 2027-01-01 is a Friday and belongs to ISO week 53 of 2026
        let date = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        assert_eq!(PlanKey::for_date(date).to_string(), "2026-W53");

        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(PlanKey::for_date(date).to_string(), "2026-W43");
    }

    #[test]
    fn test_parse_roundtrip() {
        let key: PlanKey = "2026-W07".parse().unwrap();
        assert_eq!(
            key,
            PlanKey::Week {
                year: 2026,
                week: 7
            }
        );
        assert_eq!(key.to_string(), "2026-W07");

        let key: PlanKey = "DEFAULT".parse().unwrap();
        assert_eq!(key, PlanKey::Default);
        assert_eq!(key.document_id(), "default");
    }

    #[test]
    fn test_parse_rejects_signs_and_odd_widths() {
        let inputs = [
            "2026-W+3",
            "-2026-W01",
            "+2026-W01",
            "2026-W-1",
            "26-W03",
            "02026-W03",
            "2026-W003",
            "2026-W",
        ];
        for input in inputs {
            assert_eq!(
                input.parse::<PlanKey>(),
                Err(PlanKeyError::InvalidFormat(input.to_string())),
                "{}",
                input
            );
        }
        assert_eq!("2026-W3".parse::<PlanKey>().unwrap().to_string(), "2026-W03");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "2026-07".parse::<PlanKey>(),
            Err(PlanKeyError::InvalidFormat(_))
        ));
        assert!(matches!(
            "W07".parse::<PlanKey>(),
            Err(PlanKeyError::InvalidFormat(_))
        ));
        assert_eq!(
            "2025-W53".parse::<PlanKey>(),
            Err(PlanKeyError::WeekOutOfRange {
                year: 2025,
                week: 53
            })
        );
    }

    #[test]
    fn test_week_start_is_monday() {
        let key: PlanKey = "2026-W43".parse().unwrap();
        assert_eq!(
            key.week_start(),
            Some(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        );
        assert_eq!(PlanKey::Default.week_start(), None);
    }
}
