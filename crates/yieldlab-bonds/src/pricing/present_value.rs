//! Present value of a cash-flow schedule at a yield.
//!
//! Flows strictly after settlement are discounted with
//! `DF = (1 + y/f)^(-t·f)`, `t` being the day-count year fraction from
//! settlement to the payment date. Prices are percentages of face:
//!
//! ```text
//! dirty = 100 × Σ total·DF / face
//! clean = dirty − accrued
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yieldlab_core::daycounts::DayCountConvention;
use yieldlab_core::types::{CashFlow, Date, Frequency};

use crate::error::{BondError, BondResult};

/// Prices at one yield, all as % of face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// Full price including accrued interest.
    pub dirty_price: f64,
    /// Dirty price less accrued interest.
    pub clean_price: f64,
    /// Accrued interest.
    pub accrued: f64,
}

#[derive(Debug, Clone, Copy)]
struct TimedFlow {
    years: f64,
    amount: f64,
}

/// A schedule prepared for repeated pricing from one settlement date.
///
/// Year fractions and amounts are converted to `f64` once; every price,
/// derivative and duration evaluation afterwards is a plain loop.
#[derive(Debug, Clone)]
pub struct PricingSchedule {
    flows: Vec<TimedFlow>,
    face: f64,
    periods_per_year: f64,
    accrued: f64,
    accrued_amount: Decimal,
    current_coupon_rate: Decimal,
}

impl PricingSchedule {
    /// Prepares `flows` for pricing as of `settlement`.
    ///
    /// `issue_date` starts the accrual period when settlement precedes the
    /// first flow. Accrued interest is the next flow's coupon times the
    /// elapsed share of its period, measured in the convention's day count.
    ///
    /// # Errors
    ///
    /// `Validation` when no flow falls after settlement or the face is not
    /// positive.
    pub fn new(
        flows: &[CashFlow],
        settlement: Date,
        issue_date: Date,
        face_value: Decimal,
        day_count: DayCountConvention,
        frequency: Frequency,
    ) -> BondResult<Self> {
        if face_value <= Decimal::ZERO {
            return Err(BondError::validation("face value must be positive"));
        }
        let Some(next) = flows.iter().find(|cf| cf.date() > settlement) else {
            return Err(BondError::validation(format!(
                "no cash flows after settlement {settlement}"
            )));
        };

        let dc = day_count.to_day_count(frequency);

        let period_start = flows
            .iter()
            .rev()
            .map(CashFlow::date)
            .find(|d| *d <= settlement)
            .unwrap_or(issue_date);
        let elapsed_days = dc.day_count(period_start, settlement);
        let period_days = dc.day_count(period_start, next.date());
        let elapsed = if period_days > 0 {
            (Decimal::from(elapsed_days) / Decimal::from(period_days))
                .clamp(Decimal::ZERO, Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        let accrued_amount = next.coupon() * elapsed;
        let accrued = to_f64(accrued_amount * Decimal::ONE_HUNDRED / face_value)?;

        let timed = flows
            .iter()
            .filter(|cf| cf.date() > settlement)
            .map(|cf| {
                Ok(TimedFlow {
                    years: to_f64(dc.year_fraction(settlement, cf.date()))?,
                    amount: to_f64(cf.total())?,
                })
            })
            .collect::<BondResult<Vec<_>>>()?;

        Ok(Self {
            flows: timed,
            face: to_f64(face_value)?,
            periods_per_year: frequency.as_f64(),
            accrued,
            accrued_amount,
            current_coupon_rate: next.coupon_rate(),
        })
    }

    /// Replaces the accrued interest, e.g. with the full schedule's when
    /// pricing a truncated workout schedule.
    #[must_use]
    pub fn with_accrued(mut self, accrued: f64, accrued_amount: Decimal) -> Self {
        self.accrued = accrued;
        self.accrued_amount = accrued_amount;
        self
    }

    /// Accrued interest as % of face.
    #[must_use]
    pub fn accrued(&self) -> f64 {
        self.accrued
    }

    /// Accrued interest in currency.
    #[must_use]
    pub fn accrued_amount(&self) -> Decimal {
        self.accrued_amount
    }

    /// Coupon rate of the period in progress at settlement.
    #[must_use]
    pub fn current_coupon_rate(&self) -> Decimal {
        self.current_coupon_rate
    }

    /// Face value.
    #[must_use]
    pub fn face(&self) -> f64 {
        self.face
    }

    /// Coupon periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Number of flows after settlement.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Always false; construction requires at least one future flow.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// True when any future flow is negative, in which case price need not
    /// be monotonic in yield.
    #[must_use]
    pub fn has_negative_flows(&self) -> bool {
        self.flows.iter().any(|f| f.amount < 0.0)
    }

    fn base(&self, annual_yield: f64) -> f64 {
        1.0 + annual_yield / self.periods_per_year
    }

    fn discount_factor(&self, base: f64, years: f64) -> f64 {
        base.powf(-years * self.periods_per_year)
    }

    /// Dirty price (% of face).
    #[must_use]
    pub fn dirty_price(&self, annual_yield: f64) -> f64 {
        let base = self.base(annual_yield);
        let pv: f64 = self
            .flows
            .iter()
            .map(|f| f.amount * self.discount_factor(base, f.years))
            .sum();
        100.0 * pv / self.face
    }

    /// Clean price (% of face).
    #[must_use]
    pub fn clean_price(&self, annual_yield: f64) -> f64 {
        self.dirty_price(annual_yield) - self.accrued
    }

    /// Dirty, clean and accrued at a yield.
    #[must_use]
    pub fn price(&self, annual_yield: f64) -> PriceResult {
        let dirty_price = self.dirty_price(annual_yield);
        PriceResult {
            dirty_price,
            clean_price: dirty_price - self.accrued,
            accrued: self.accrued,
        }
    }

    /// First derivative of the dirty price with respect to the yield:
    /// `−100/face × Σ a·t·(1 + y/f)^(−t·f − 1)`.
    #[must_use]
    pub fn dirty_price_derivative(&self, annual_yield: f64) -> f64 {
        let base = self.base(annual_yield);
        let sum: f64 = self
            .flows
            .iter()
            .map(|f| f.amount * f.years * self.discount_factor(base, f.years) / base)
            .sum();
        -100.0 * sum / self.face
    }

    /// Second derivative of the dirty price with respect to the yield:
    /// `100/face × Σ a·t·(t + 1/f)·(1 + y/f)^(−t·f − 2)`.
    #[must_use]
    pub fn dirty_price_second_derivative(&self, annual_yield: f64) -> f64 {
        let base = self.base(annual_yield);
        let inv_f = 1.0 / self.periods_per_year;
        let sum: f64 = self
            .flows
            .iter()
            .map(|f| {
                f.amount * f.years * (f.years + inv_f) * self.discount_factor(base, f.years)
                    / (base * base)
            })
            .sum();
        100.0 * sum / self.face
    }

    /// Macaulay duration in years: `Σ a·t·DF / Σ a·DF`.
    #[must_use]
    pub fn macaulay_duration(&self, annual_yield: f64) -> f64 {
        let base = self.base(annual_yield);
        let (weighted, pv) = self.flows.iter().fold((0.0, 0.0), |(w, p), f| {
            let v = f.amount * self.discount_factor(base, f.years);
            (w + v * f.years, p + v)
        });
        if pv == 0.0 {
            0.0
        } else {
            weighted / pv
        }
    }
}

/// Prices a schedule at `annual_yield` in one call.
///
/// # Example
///
/// ```rust
/// use yieldlab_bonds::cashflows::CashFlowGenerator;
/// use yieldlab_bonds::pricing::present_value;
/// use yieldlab_bonds::types::{BondFeatures, BondTerms};
/// use yieldlab_core::daycounts::DayCountConvention;
/// use yieldlab_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let issue = Date::from_ymd(2025, 1, 15).unwrap();
/// let terms = BondTerms::builder()
///     .issuer("Acme")
///     .currency("USD")
///     .face_value(dec!(1000))
///     .issue_date(issue)
///     .maturity_date(Date::from_ymd(2035, 1, 15).unwrap())
///     .coupon_rate(dec!(0.05))
///     .build()
///     .unwrap();
/// let flows = CashFlowGenerator::generate(&terms, &BondFeatures::default()).unwrap();
///
/// let price = present_value(
///     &flows,
///     issue,
///     issue,
///     dec!(1000),
///     DayCountConvention::Thirty360,
///     Frequency::SemiAnnual,
///     0.05,
/// )
/// .unwrap();
/// assert!((price.clean_price - 100.0).abs() < 1e-9);
/// ```
pub fn present_value(
    flows: &[CashFlow],
    settlement: Date,
    issue_date: Date,
    face_value: Decimal,
    day_count: DayCountConvention,
    frequency: Frequency,
    annual_yield: f64,
) -> BondResult<PriceResult> {
    let schedule =
        PricingSchedule::new(flows, settlement, issue_date, face_value, day_count, frequency)?;
    Ok(schedule.price(annual_yield))
}

fn to_f64(value: Decimal) -> BondResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| BondError::validation(format!("{value} is not representable as f64")))
}
