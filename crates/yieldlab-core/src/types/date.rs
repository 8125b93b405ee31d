//! Calendar date type for bond calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date with no time component.
///
/// Newtype over `chrono::NaiveDate`. Serializes as an ISO 8601 string
/// (`YYYY-MM-DD`).
///
/// # Example
///
/// ```rust
/// use yieldlab_core::types::Date;
///
/// let date = Date::from_ymd(2025, 8, 31).unwrap();
/// let back = date.add_months(-6).unwrap();
/// assert_eq!(back, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the combination is not a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        let last = self.days_in_month();
        // The last day of an existing month always exists.
        self.0.with_day(last).map_or(*self, Date)
    }

    /// Adds a number of calendar days.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months.
    ///
    /// A day that does not exist in the target month rolls back to the last
    /// valid day (Jan 31 + 1 month = Feb 28/29).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds months, keeping month-end dates on month end.
    ///
    /// Used to roll coupon dates off a month-end anchor: Aug 31 - 6 months
    /// lands on Feb 28, and Aug 31 - 12 months on Aug 31 again.
    pub fn add_months_eom(&self, months: i32) -> CoreResult<Self> {
        let rolled = self.add_months(months)?;
        if self.is_end_of_month() {
            Ok(rolled.end_of_month())
        } else {
            Ok(rolled)
        }
    }

    /// Number of calendar days from `self` to `other` (negative if `other` is earlier).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Moves forward by `days` business days on a weekend-only calendar.
    ///
    /// Zero days returns the date itself, even on a weekend.
    #[must_use]
    pub fn add_business_days(&self, days: u32) -> Self {
        let mut date = *self;
        let mut remaining = days;
        while remaining > 0 {
            date = date.add_days(1);
            if !date.is_weekend() {
                remaining -= 1;
            }
        }
        date
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

/// Days in a month of a given year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2030-01-15").unwrap();
        assert_eq!(date, d(2030, 1, 15));
        assert_eq!(date.to_string(), "2030-01-15");
        assert!(Date::parse("15/01/2030").is_err());
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(d(2025, 1, 31).add_months(1).unwrap(), d(2025, 2, 28));
        assert_eq!(d(2024, 1, 31).add_months(1).unwrap(), d(2024, 2, 29));
        assert_eq!(d(2025, 3, 15).add_months(-6).unwrap(), d(2024, 9, 15));
        assert_eq!(d(2025, 1, 15).add_months(-1).unwrap(), d(2024, 12, 15));
    }

    #[test]
    fn test_add_months_eom() {
        assert_eq!(d(2025, 2, 28).add_months_eom(6).unwrap(), d(2025, 8, 31));
        assert_eq!(d(2025, 8, 31).add_months_eom(-6).unwrap(), d(2025, 2, 28));
        // Not month end: plain roll
        assert_eq!(d(2025, 2, 27).add_months_eom(6).unwrap(), d(2025, 8, 27));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(d(2024, 1, 1).days_between(&d(2025, 1, 1)), 366);
        assert_eq!(d(2025, 1, 1).days_between(&d(2024, 1, 1)), -366);
    }

    #[test]
    fn test_business_days_skip_weekend() {
        // 2025-01-17 is a Friday
        let friday = d(2025, 1, 17);
        assert_eq!(friday.add_business_days(1), d(2025, 1, 20));
        assert_eq!(friday.add_business_days(2), d(2025, 1, 21));
        assert_eq!(friday.add_business_days(0), friday);
    }

    #[test]
    fn test_serde_is_iso_string() {
        let json = serde_json::to_string(&d(2025, 6, 30)).unwrap();
        assert_eq!(json, "\"2025-06-30\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d(2025, 6, 30));
    }
}
