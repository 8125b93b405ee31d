//! Cash-flow schedule construction and predefined-schedule validation.

use rust_decimal::Decimal;
use tracing::debug;

use yieldlab_core::types::{CashFlow, PaymentType};

use crate::cashflows::schedule::{coupon_periods, CouponPeriod};
use crate::error::{BondError, BondResult};
use crate::types::{BondFeatures, BondTerms};

/// Builds and checks cash-flow schedules.
pub struct CashFlowGenerator;

impl CashFlowGenerator {
    /// Materializes the dated cash flows of a bond.
    ///
    /// Per coupon date: the rate in effect is looked up from the coupon
    /// steps, the coupon is `outstanding × rate / frequency` (or
    /// `outstanding × rate × period fraction` for an irregular period),
    /// scheduled amortization is repaid, and maturity repays whatever is
    /// still outstanding. A schedule whose outstanding reaches zero early
    /// stops at that flow. Call and put windows never produce flows here.
    ///
    /// # Errors
    ///
    /// - `Validation` when a feature schedule is malformed or an
    ///   amortization date is not a coupon date
    /// - `Schedule` when amortization before maturity exceeds face
    pub fn generate(terms: &BondTerms, features: &BondFeatures) -> BondResult<Vec<CashFlow>> {
        features.validate(terms)?;

        let periods = coupon_periods(terms)?;
        Self::check_amortization_dates(&periods, features)?;

        let total_percent = features.amortization.total_percent();
        if total_percent > Decimal::ONE_HUNDRED {
            return Err(BondError::schedule(format!(
                "amortization before maturity totals {total_percent}% of face"
            )));
        }

        let face = terms.face_value();
        let maturity = terms.maturity_date();
        let frequency = terms.frequency();
        let periods_per_year = Decimal::from(frequency.periods_per_year());

        let mut outstanding = face;
        let mut flows = Vec::with_capacity(periods.len());

        for period in periods {
            let rate = features
                .coupon_changes
                .rate_on(period.end, terms.coupon_rate());

            let coupon = if period.is_regular(frequency) {
                outstanding * rate / periods_per_year
            } else {
                let fraction = terms
                    .day_count()
                    .period_fraction(period.start, period.end, frequency)?;
                outstanding * rate * fraction
            };

            let is_maturity = period.end == maturity;
            let principal = if is_maturity {
                outstanding
            } else {
                features
                    .amortization
                    .entry_on(period.end)
                    .map_or(Decimal::ZERO, |e| e.principal(face))
            };

            if principal > outstanding {
                return Err(BondError::schedule(format!(
                    "principal {principal} on {} exceeds outstanding {outstanding}",
                    period.end
                )));
            }
            outstanding -= principal;

            let is_final = is_maturity || outstanding.is_zero();
            let payment_type = if is_final {
                PaymentType::Maturity
            } else if principal > Decimal::ZERO {
                PaymentType::Amortization
            } else {
                PaymentType::Coupon
            };

            flows.push(CashFlow::new(
                period.end,
                coupon,
                principal,
                outstanding,
                payment_type,
                rate,
            ));

            if is_final {
                if !is_maturity {
                    debug!(date = %period.end, "notional fully amortized before maturity");
                }
                break;
            }
        }

        debug!(flows = flows.len(), "cash-flow schedule generated");
        Ok(flows)
    }

    /// Accepts a caller-supplied schedule after checking its structure.
    ///
    /// The flows are returned unchanged so that pricing them gives exactly
    /// the same results as pricing the generated schedule they came from.
    ///
    /// # Errors
    ///
    /// `Schedule` when the list is empty, dates are not strictly increasing
    /// within `(issue, maturity]`, an amount is negative, a total is not
    /// coupon + principal, the outstanding ledger does not run down from
    /// face, or the final outstanding is not zero.
    pub fn accept_predefined(terms: &BondTerms, flows: &[CashFlow]) -> BondResult<Vec<CashFlow>> {
        let issue = terms.issue_date();
        let maturity = terms.maturity_date();

        let Some(last) = flows.last() else {
            return Err(BondError::schedule("predefined schedule is empty"));
        };

        let mut previous_date = issue;
        let mut outstanding = terms.face_value();

        for cf in flows {
            let date = cf.date();
            if date <= previous_date {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date} is not after {previous_date}"
                )));
            }
            if date > maturity {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date} is after maturity {maturity}"
                )));
            }
            if cf.coupon() < Decimal::ZERO
                || cf.principal() < Decimal::ZERO
                || cf.outstanding_after() < Decimal::ZERO
            {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date} has a negative amount"
                )));
            }
            if cf.total() != cf.coupon() + cf.principal() {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date}: total {} is not coupon {} + principal {}",
                    cf.total(),
                    cf.coupon(),
                    cf.principal()
                )));
            }
            if cf.outstanding_after() > outstanding {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date}: outstanding increases to {}",
                    cf.outstanding_after()
                )));
            }
            if cf.outstanding_after() != outstanding - cf.principal() {
                return Err(BondError::schedule(format!(
                    "predefined flow on {date}: outstanding {} does not equal {outstanding} - {}",
                    cf.outstanding_after(),
                    cf.principal()
                )));
            }
            outstanding = cf.outstanding_after();
            previous_date = date;
        }

        if !last.outstanding_after().is_zero() {
            return Err(BondError::schedule(format!(
                "predefined schedule leaves {} outstanding after its final flow",
                last.outstanding_after()
            )));
        }

        debug!(flows = flows.len(), "predefined schedule accepted");
        Ok(flows.to_vec())
    }

    fn check_amortization_dates(periods: &[CouponPeriod], features: &BondFeatures) -> BondResult<()> {
        for entry in features.amortization.entries() {
            if !periods.iter().any(|p| p.end == entry.date) {
                return Err(BondError::validation(format!(
                    "amortization date {} is not a coupon date",
                    entry.date
                )));
            }
        }
        Ok(())
    }
}
