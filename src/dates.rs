//! Which day the caller means.
//!
//! Relative keywords are resolved against an injected [`Clock`] so the
//! result does not depend on when the tests run.

use crate::error::{Error, Result};
use chrono::{Duration, Local, NaiveDate};

/// Source of the current local calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The machine's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stopped on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Date choice as expressed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateSelection {
    #[default]
    Today,
    Tomorrow,
    Yesterday,
    DayAfter,
    /// A literal or keyword typed by the user, resolved by [`resolve_date`].
    Literal(String),
}

impl DateSelection {
    pub fn resolve(&self, clock: &dyn Clock) -> Result<NaiveDate> {
        let keyword = match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Yesterday => "yesterday",
            Self::DayAfter => "day-after",
            Self::Literal(s) => s.as_str(),
        };
        resolve_date(Some(keyword), clock.today())
    }
}

/// Map a keyword (`today`, `tomorrow`, `yesterday`, `day-after`) or a
/// `YYYY-MM-DD` literal to a date. `None` means today.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let Some(raw) = input.filter(|s| !s.is_empty()) else {
        return Ok(today);
    };

    match raw.to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Duration::days(1)),
        "yesterday" => Ok(today - Duration::days(1)),
        "day-after" => Ok(today + Duration::days(2)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| Error::InvalidDateFormat {
            input: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_keywords() {
        let today = date(2025, 6, 21);
        assert_eq!(resolve_date(None, today).unwrap(), today);
        assert_eq!(resolve_date(Some("today"), today).unwrap(), today);
        assert_eq!(resolve_date(Some("tomorrow"), today).unwrap(), date(2025, 6, 22));
        assert_eq!(resolve_date(Some("yesterday"), today).unwrap(), date(2025, 6, 20));
        assert_eq!(resolve_date(Some("day-after"), today).unwrap(), date(2025, 6, 23));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let today = date(2025, 6, 21);
        assert_eq!(resolve_date(Some("TOMORROW"), today).unwrap(), date(2025, 6, 22));
        assert_eq!(resolve_date(Some("Day-After"), today).unwrap(), date(2025, 6, 23));
    }

    #[test]
    fn test_month_and_year_boundaries() {
        assert_eq!(resolve_date(Some("tomorrow"), date(2025, 1, 31)).unwrap(), date(2025, 2, 1));
        assert_eq!(resolve_date(Some("day-after"), date(2024, 2, 28)).unwrap(), date(2024, 3, 1));
        assert_eq!(resolve_date(Some("day-after"), date(2025, 12, 31)).unwrap(), date(2026, 1, 2));
        assert_eq!(resolve_date(Some("yesterday"), date(2025, 1, 1)).unwrap(), date(2024, 12, 31));
        assert_eq!(resolve_date(Some("yesterday"), date(2025, 3, 1)).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_literal_date() {
        let today = date(2025, 6, 21);
        assert_eq!(resolve_date(Some("2025-12-25"), today).unwrap(), date(2025, 12, 25));
    }

    #[test]
    fn test_invalid_date() {
        let today = date(2025, 6, 21);
        for bad in ["next-week", "2025-13-01", "21/06/2025", "2025-02-30"] {
            match resolve_date(Some(bad), today) {
                Err(Error::InvalidDateFormat { input }) => assert_eq!(input, bad.to_lowercase()),
                other => panic!("expected InvalidDateFormat for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_error_message_names_vocabulary() {
        let err = resolve_date(Some("someday"), date(2025, 6, 21)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("someday"));
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("today, tomorrow, yesterday, day-after"));
    }

    #[test]
    fn test_selection_uses_injected_clock() {
        let clock = FixedClock(date(2025, 12, 31));
        assert_eq!(DateSelection::Today.resolve(&clock).unwrap(), date(2025, 12, 31));
        assert_eq!(DateSelection::Tomorrow.resolve(&clock).unwrap(), date(2026, 1, 1));
        assert_eq!(DateSelection::Yesterday.resolve(&clock).unwrap(), date(2025, 12, 30));
        assert_eq!(DateSelection::DayAfter.resolve(&clock).unwrap(), date(2026, 1, 2));
        assert_eq!(
            DateSelection::Literal("2025-06-21".into()).resolve(&clock).unwrap(),
            date(2025, 6, 21)
        );
    }
}
