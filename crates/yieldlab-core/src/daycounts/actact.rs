//! Actual/Actual (ICMA).

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::{Date, Frequency};

/// Actual/Actual ICMA day count.
///
/// The span `[start, end]` is cut into quasi-coupon periods rolled backwards
/// from `end` by `12 / frequency` months (month-end anchors stay on month
/// end). Each piece contributes
///
/// ```text
/// days in piece / (frequency × days in quasi period)
/// ```
///
/// so a full regular period is exactly `1 / frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActActIcma {
    frequency: Frequency,
}

impl ActActIcma {
    /// Creates an ACT/ACT ICMA day count for a coupon frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    /// Coupon frequency used to size quasi periods.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Year fraction of `[start, end]` inside a known coupon period
    /// `[period_start, period_end]`.
    #[must_use]
    pub fn year_fraction_with_period(
        &self,
        start: Date,
        end: Date,
        period_start: Date,
        period_end: Date,
    ) -> Decimal {
        let period_days = period_start.days_between(&period_end);
        if period_days <= 0 {
            return Decimal::ZERO;
        }
        let days = start.days_between(&end);
        Decimal::from(days)
            / (Decimal::from(self.frequency.periods_per_year()) * Decimal::from(period_days))
    }
}

impl Default for ActActIcma {
    fn default() -> Self {
        Self::new(Frequency::SemiAnnual)
    }
}

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start >= end {
            return Decimal::ZERO;
        }

        let months = self.frequency.months_per_period() as i32;
        let mut total = Decimal::ZERO;
        let mut period_end = end;
        let mut k = 1;

        loop {
            let Ok(period_start) = end.add_months_eom(-k * months) else {
                break;
            };
            let piece_start = period_start.max(start);
            total += self.year_fraction_with_period(piece_start, period_end, period_start, period_end);

            if period_start <= start {
                break;
            }
            period_end = period_start;
            k += 1;
        }

        total
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
