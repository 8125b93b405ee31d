//! Coupon date ladder generation.

use serde::{Deserialize, Serialize};

use yieldlab_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};
use crate::types::BondTerms;

/// One accrual period ending on a coupon payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPeriod {
    /// Accrual start (issue date or previous coupon date).
    pub start: Date,
    /// Accrual end and payment date.
    pub end: Date,
}

impl CouponPeriod {
    /// True when the period spans exactly one regular coupon interval.
    ///
    /// Either end may be the anchor, so the check is made in both
    /// directions (month-end rolling is not symmetric).
    #[must_use]
    pub fn is_regular(&self, frequency: Frequency) -> bool {
        let months = frequency.months_per_period() as i32;
        self.end.add_months_eom(-months).is_ok_and(|d| d == self.start)
            || self.start.add_months_eom(months).is_ok_and(|d| d == self.end)
    }
}

/// Generates the coupon periods of a bond.
///
/// With a first coupon date the ladder runs forward from it in steps of
/// `12 / frequency` months; the last period is cut short (or left long) to
/// end on maturity. Without one it runs backward from maturity to the first
/// date after issue, leaving any irregular period at the front. Every date
/// is computed from its anchor rather than from the previous date, and
/// month-end anchors generate month-end dates.
///
/// # Example
///
/// ```rust
/// use yieldlab_bonds::cashflows::coupon_periods;
/// use yieldlab_bonds::types::BondTerms;
/// use yieldlab_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .issuer("Acme")
///     .currency("USD")
///     .face_value(dec!(1000))
///     .issue_date(Date::from_ymd(2025, 3, 1).unwrap())
///     .maturity_date(Date::from_ymd(2027, 1, 15).unwrap())
///     .coupon_rate(dec!(0.05))
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// let periods = coupon_periods(&terms).unwrap();
/// assert_eq!(periods.len(), 4);
/// assert_eq!(periods[0].start, terms.issue_date());
/// assert_eq!(periods[0].end, Date::from_ymd(2025, 7, 15).unwrap());
/// ```
pub fn coupon_periods(terms: &BondTerms) -> BondResult<Vec<CouponPeriod>> {
    let dates = coupon_dates(terms)?;
    let mut start = terms.issue_date();
    let periods = dates
        .into_iter()
        .map(|end| {
            let period = CouponPeriod { start, end };
            start = end;
            period
        })
        .collect();
    Ok(periods)
}

/// Coupon payment dates in ascending order, maturity last.
pub fn coupon_dates(terms: &BondTerms) -> BondResult<Vec<Date>> {
    let months = terms.frequency().months_per_period() as i32;
    let issue = terms.issue_date();
    let maturity = terms.maturity_date();

    let mut dates = Vec::new();
    match terms.first_coupon_date() {
        Some(first) => {
            for k in 0.. {
                let date = first.add_months_eom(k * months)?;
                if date >= maturity {
                    dates.push(maturity);
                    break;
                }
                dates.push(date);
            }
        }
        None => {
            for k in 0.. {
                let date = maturity.add_months_eom(-k * months)?;
                if date <= issue {
                    break;
                }
                dates.push(date);
            }
            dates.reverse();
        }
    }

    if dates.is_empty() {
        return Err(BondError::schedule(format!(
            "no coupon dates between {issue} and {maturity}"
        )));
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn terms(issue: Date, maturity: Date, first: Option<Date>, frequency: Frequency) -> BondTerms {
        BondTerms::builder()
            .issuer("Acme")
            .currency("USD")
            .face_value(dec!(100))
            .issue_date(issue)
            .maturity_date(maturity)
            .first_coupon_date(first)
            .coupon_rate(dec!(0.05))
            .frequency(frequency)
            .build()
            .unwrap()
    }

    #[test]
    fn test_backward_regular() {
        let t = terms(d(2025, 1, 15), d(2030, 1, 15), None, Frequency::SemiAnnual);
        let dates = coupon_dates(&t).unwrap();
        assert_eq!(dates.len(), 10);
        assert_eq!(dates[0], d(2025, 7, 15));
        assert_eq!(*dates.last().unwrap(), d(2030, 1, 15));
        let periods = coupon_periods(&t).unwrap();
        assert!(periods.iter().all(|p| p.is_regular(Frequency::SemiAnnual)));
    }

    #[test]
    fn test_backward_short_front() {
        let t = terms(d(2025, 3, 1), d(2027, 1, 15), None, Frequency::SemiAnnual);
        let periods = coupon_periods(&t).unwrap();
        assert!(!periods[0].is_regular(Frequency::SemiAnnual));
        assert!(periods[1].is_regular(Frequency::SemiAnnual));
    }

    #[test]
    fn test_forward_from_first_coupon() {
        let t = terms(
            d(2025, 1, 1),
            d(2027, 3, 1),
            Some(d(2025, 6, 15)),
            Frequency::SemiAnnual,
        );
        let dates = coupon_dates(&t).unwrap();
        assert_eq!(
            dates,
            vec![
                d(2025, 6, 15),
                d(2025, 12, 15),
                d(2026, 6, 15),
                d(2026, 12, 15),
                d(2027, 3, 1),
            ]
        );
    }

    #[test]
    fn test_month_end_anchor_stays_on_month_end() {
        let t = terms(d(2025, 2, 28), d(2027, 8, 31), None, Frequency::Quarterly);
        let dates = coupon_dates(&t).unwrap();
        assert_eq!(dates[0], d(2025, 5, 31));
        assert!(dates.contains(&d(2026, 2, 28)));
        assert!(dates.contains(&d(2025, 11, 30)));
        assert!(dates.iter().all(|d| d.is_end_of_month()));
    }

    #[test]
    fn test_short_bond_single_period() {
        let t = terms(d(2025, 1, 15), d(2025, 4, 1), None, Frequency::SemiAnnual);
        let periods = coupon_periods(&t).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].start, d(2025, 1, 15));
        assert_eq!(periods[0].end, d(2025, 4, 1));
    }
}
