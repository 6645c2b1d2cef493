//! Calendar month used as the dashboard's reporting window.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};

/// Rejection for a month string that is not `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("month must be formatted as YYYY-MM, got '{0}'")]
pub struct InvalidMonth(pub String);

/// A Gregorian calendar month, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Builds a month from its year and 1-based month number.
    ///
    /// Returns `None` when `month` is outside `1..=12` or the year is out of
    /// chrono's range.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The current month in UTC.
    #[must_use]
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// First calendar day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// Number of days in the month (28 to 31).
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        let next = if self.month() == 12 {
            NaiveDate::from_ymd_opt(self.year().saturating_add(1), 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year(), self.month().saturating_add(1), 1)
        };
        next.map_or(31, |next| {
            u32::try_from(next.signed_duration_since(self.first_day).num_days()).unwrap_or(31)
        })
    }

    /// Every day of the month in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first_day
            .iter_days()
            .take_while(move |day| day.month() == self.month())
    }

    /// Whether `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn month(s: &str) -> YearMonth {
        let Ok(m) = s.parse() else {
            panic!("invalid month {s}");
        };
        m
    }

    #[test]
    fn parses_and_displays() {
        let m = month("2024-03");
        assert_eq!((m.year(), m.month()), (2024, 3));
        assert_eq!(m.to_string(), "2024-03");
    }

    #[test]
    fn rejects_malformed_months() {
        for raw in [
            "2024-13", "2024-00", "2024-3", "24-03", "2024/03", "march", "", "2024-+3", "+024-03",
        ] {
            assert!(raw.parse::<YearMonth>().is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(month("2024-02").days_in_month(), 29);
        assert_eq!(month("2023-02").days_in_month(), 28);
        assert_eq!(month("2023-12").days_in_month(), 31);
        assert_eq!(month("2023-04").days_in_month(), 30);
    }

    #[test]
    fn days_cover_the_whole_month_in_order() {
        let days: Vec<NaiveDate> = month("2024-02").days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().map(|d| d.day()), Some(1));
        assert_eq!(days.last().map(|d| d.day()), Some(29));
        assert!(days.windows(2).all(|w| matches!(w, [a, b] if a < b)));
    }

    #[test]
    fn contains_checks_year_and_month() {
        let m = month("2024-03");
        let inside = NaiveDate::from_ymd_opt(2024, 3, 31);
        let other_year = NaiveDate::from_ymd_opt(2023, 3, 15);
        assert_eq!(inside.map(|d| m.contains(d)), Some(true));
        assert_eq!(other_year.map(|d| m.contains(d)), Some(false));
    }
}
