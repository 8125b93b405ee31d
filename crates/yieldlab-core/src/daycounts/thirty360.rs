//! 30/360 bond basis.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 day count convention (bond basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 and D1 is now 30, change D2 to 30
///
/// Days = 360 × (Y2 − Y1) + 30 × (M2 − M1) + (D2 − D1), year fraction = Days / 360.
///
/// There is no special handling of the last day of February: Feb 28 to
/// Mar 31 counts as 33 days (D2 stays 31 because D1 is 28).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = self.day_count(start, end);
        Decimal::from(days) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let y1 = i64::from(start.year());
        let y2 = i64::from(end.year());
        let m1 = i64::from(start.month());
        let m2 = i64::from(end.month());
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
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
    fn test_regular_half_year() {
        let dc = Thirty360;
        assert_eq!(dc.day_count(d(2025, 1, 15), d(2025, 7, 15)), 180);
        assert_eq!(dc.year_fraction(d(2025, 1, 15), d(2025, 7, 15)), dec!(0.5));
    }

    #[test]
    fn test_day_31_adjustments() {
        let dc = Thirty360;
        // D1 = 31 -> 30, then D2 = 31 -> 30
        assert_eq!(dc.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
        // D1 stays 30, D2 31 -> 30
        assert_eq!(dc.day_count(d(2025, 4, 30), d(2025, 5, 31)), 30);
        // D1 < 30 so D2 keeps 31
        assert_eq!(dc.day_count(d(2025, 3, 15), d(2025, 3, 31)), 16);
    }

    #[test]
    fn test_no_february_month_end_rule() {
        let dc = Thirty360;
        assert_eq!(dc.day_count(d(2025, 2, 28), d(2025, 3, 31)), 33);
        assert_eq!(dc.day_count(d(2025, 2, 28), d(2025, 8, 28)), 180);
    }

    #[test]
    fn test_full_years() {
        let dc = Thirty360;
        assert_eq!(dc.year_fraction(d(2024, 2, 29), d(2034, 2, 28)), dec!(3599) / dec!(360));
        assert_eq!(dc.year_fraction(d(2020, 6, 15), d(2030, 6, 15)), dec!(10));
    }
}
