//! Risk metrics at a solved yield.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::PricingSchedule;

/// One basis point as a decimal yield.
pub const BASIS_POINT: f64 = 0.0001;

/// Risk measures of a schedule at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration: Macaulay / (1 + y/f).
    pub modified_duration: f64,
    /// Convexity: second yield derivative of the dirty price over the price.
    pub convexity: f64,
    /// Price change of the whole position for a 1bp yield move, in currency.
    pub dv01: f64,
}

/// Risk calculator.
pub struct RiskCalculator;

impl RiskCalculator {
    /// Calculates all risk metrics at `annual_yield`.
    ///
    /// DV01 is `modified × dirty / 100 × face × 0.0001`, i.e. the currency
    /// value of one basis point on the bond's face.
    #[must_use]
    pub fn calculate(schedule: &PricingSchedule, annual_yield: f64) -> RiskMetrics {
        let dirty = schedule.dirty_price(annual_yield);
        let macaulay = schedule.macaulay_duration(annual_yield);
        let modified = macaulay / (1.0 + annual_yield / schedule.periods_per_year());
        let convexity = if dirty == 0.0 {
            0.0
        } else {
            schedule.dirty_price_second_derivative(annual_yield) / dirty
        };
        let dv01 = modified * dirty / 100.0 * schedule.face() * BASIS_POINT;

        RiskMetrics {
            macaulay_duration: macaulay,
            modified_duration: modified,
            convexity,
            dv01,
        }
    }
}

/// Spread of a yield over a benchmark, in basis points.
#[must_use]
pub fn spread_bp(annual_yield: f64, benchmark_yield: f64) -> f64 {
    (annual_yield - benchmark_yield) / BASIS_POINT
}

/// Yield implied by a benchmark and a spread in basis points.
#[must_use]
pub fn yield_from_spread(benchmark_yield: f64, spread_bp: f64) -> f64 {
    benchmark_yield + spread_bp * BASIS_POINT
}

/// Current yield: annual coupon over clean price, as a decimal.
/// `None` for a non-positive price.
#[must_use]
pub fn current_yield(coupon_rate: Decimal, clean_price: f64) -> Option<f64> {
    if clean_price <= 0.0 {
        return None;
    }
    coupon_rate.to_f64().map(|rate| rate * 100.0 / clean_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflows::CashFlowGenerator;
    use crate::types::{BondFeatures, BondTerms};
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use yieldlab_core::daycounts::DayCountConvention;
    use yieldlab_core::types::{Date, Frequency};

    fn par_schedule() -> PricingSchedule {
        let issue = Date::from_ymd(2025, 1, 15).unwrap();
        let terms = BondTerms::builder()
            .issuer("Acme")
            .currency("USD")
            .face_value(dec!(1000))
            .issue_date(issue)
            .maturity_date(Date::from_ymd(2035, 1, 15).unwrap())
            .coupon_rate(dec!(0.05))
            .frequency(Frequency::SemiAnnual)
            .day_count(DayCountConvention::Thirty360)
            .build()
            .unwrap();
        let flows = CashFlowGenerator::generate(&terms, &BondFeatures::default()).unwrap();
        PricingSchedule::new(&flows, issue, issue, dec!(1000), terms.day_count(), terms.frequency())
            .unwrap()
    }

    #[test]
    fn test_ten_year_par_bond() {
        let metrics = RiskCalculator::calculate(&par_schedule(), 0.05);
        assert_relative_eq!(metrics.modified_duration, 7.79, epsilon = 0.01);
        assert_relative_eq!(metrics.macaulay_duration, 7.99, epsilon = 0.01);
        assert_relative_eq!(metrics.dv01, 0.779, epsilon = 0.001);
        assert!(metrics.convexity > 70.0 && metrics.convexity < 80.0);
    }

    #[test]
    fn test_dv01_matches_bumped_price() {
        let s = par_schedule();
        let metrics = RiskCalculator::calculate(&s, 0.05);
        let bumped = (s.dirty_price(0.05 - BASIS_POINT) - s.dirty_price(0.05 + BASIS_POINT)) / 2.0;
        assert_relative_eq!(metrics.dv01, bumped / 100.0 * s.face(), max_relative = 1e-4);
    }

    #[test]
    fn test_spread_helpers() {
        assert_relative_eq!(spread_bp(0.0525, 0.04), 125.0, epsilon = 1e-9);
        assert_relative_eq!(yield_from_spread(0.04, 125.0), 0.0525, epsilon = 1e-12);
        assert_relative_eq!(current_yield(dec!(0.05), 80.0).unwrap(), 0.0625);
        assert!(current_yield(dec!(0.05), 0.0).is_none());
    }
}
