//! Actual days over a fixed year basis: ACT/360 and ACT/365 Fixed.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn actual_over(start: Date, end: Date, basis: u32) -> Decimal {
    Decimal::from(start.days_between(&end)) / Decimal::from(basis)
}

/// Actual/360, the money-market basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        actual_over(start, end, 360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed. A leap year counts as 366/365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        actual_over(start, end, 365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_ninety_day_quarter() {
        let (start, end) = (d(2025, 1, 1), d(2025, 4, 1));
        assert_eq!(Act360.day_count(start, end), 90);
        assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
        assert_eq!(Act365Fixed.year_fraction(start, end), dec!(90) / dec!(365));
    }

    #[test]
    fn test_leap_year_exceeds_one() {
        let (start, end) = (d(2024, 1, 1), d(2025, 1, 1));
        assert_eq!(Act365Fixed.year_fraction(start, end), dec!(366) / dec!(365));
        assert!(Act360.year_fraction(start, end) > Act365Fixed.year_fraction(start, end));
    }

    #[test]
    fn test_semiannual_coupon_span() {
        // Jan 15 to Jul 15 is 181 days outside a leap year
        assert_eq!(Act365Fixed.day_count(d(2025, 1, 15), d(2025, 7, 15)), 181);
        assert_eq!(Act360.day_count(d(2024, 1, 15), d(2024, 7, 15)), 182);
    }
}
