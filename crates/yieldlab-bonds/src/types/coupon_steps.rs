//! Step-up / step-down coupon schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yieldlab_core::Date;

use crate::error::{BondError, BondResult};

/// A change of the annual coupon rate from an effective date onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRateChange {
    /// First coupon payment date the new rate applies to.
    pub effective_date: Date,
    /// New annual rate as a decimal.
    pub rate: Decimal,
}

impl CouponRateChange {
    /// Creates a rate change.
    #[must_use]
    pub fn new(effective_date: Date, rate: Decimal) -> Self {
        Self {
            effective_date,
            rate,
        }
    }
}

/// Ordered coupon rate changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponSteps {
    changes: Vec<CouponRateChange>,
}

impl CouponSteps {
    /// Wraps a list of changes.
    #[must_use]
    pub fn new(changes: Vec<CouponRateChange>) -> Self {
        Self { changes }
    }

    /// Changes in date order.
    #[must_use]
    pub fn changes(&self) -> &[CouponRateChange] {
        &self.changes
    }

    /// Rate applying to a coupon paid on `payment_date`: the latest change
    /// effective on or before that date, else `base_rate`. Keyed on the
    /// payment date, so a change effective mid-period sets that period's
    /// whole coupon.
    #[must_use]
    pub fn rate_on(&self, payment_date: Date, base_rate: Decimal) -> Decimal {
        self.changes
            .iter()
            .take_while(|c| c.effective_date <= payment_date)
            .last()
            .map_or(base_rate, |c| c.rate)
    }

    /// Checks strictly increasing effective dates after issue and
    /// non-negative rates.
    pub fn validate(&self, issue: Date) -> BondResult<()> {
        let mut previous: Option<Date> = None;
        for change in &self.changes {
            if change.effective_date <= issue {
                return Err(BondError::validation(format!(
                    "coupon change effective {} must be after issue {issue}",
                    change.effective_date
                )));
            }
            if previous.is_some_and(|p| change.effective_date <= p) {
                return Err(BondError::validation(format!(
                    "coupon change dates must be strictly increasing at {}",
                    change.effective_date
                )));
            }
            if change.rate < Decimal::ZERO {
                return Err(BondError::validation(format!(
                    "coupon rate {} effective {} must not be negative",
                    change.rate, change.effective_date
                )));
            }
            previous = Some(change.effective_date);
        }
        Ok(())
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
    fn test_rate_on() {
        let steps = CouponSteps::new(vec![
            CouponRateChange::new(d(2027, 1, 15), dec!(0.04)),
            CouponRateChange::new(d(2029, 1, 15), dec!(0.06)),
        ]);
        assert_eq!(steps.rate_on(d(2026, 7, 15), dec!(0.03)), dec!(0.03));
        assert_eq!(steps.rate_on(d(2027, 1, 15), dec!(0.03)), dec!(0.04));
        assert_eq!(steps.rate_on(d(2028, 7, 15), dec!(0.03)), dec!(0.04));
        assert_eq!(steps.rate_on(d(2030, 1, 15), dec!(0.03)), dec!(0.06));
    }

    #[test]
    fn test_rate_on_mid_period_change() {
        let steps = CouponSteps::new(vec![CouponRateChange::new(d(2030, 3, 1), dec!(0.07))]);
        assert_eq!(steps.rate_on(d(2030, 1, 15), dec!(0.05)), dec!(0.05));
        assert_eq!(steps.rate_on(d(2030, 7, 15), dec!(0.05)), dec!(0.07));
    }

    #[test]
    fn test_validate() {
        let issue = d(2025, 1, 15);
        assert!(CouponSteps::new(vec![CouponRateChange::new(issue, dec!(0.05))])
            .validate(issue)
            .is_err());
        assert!(CouponSteps::new(vec![CouponRateChange::new(d(2026, 1, 15), dec!(-0.01))])
            .validate(issue)
            .is_err());
        assert!(CouponSteps::default().validate(issue).is_ok());
    }
}
