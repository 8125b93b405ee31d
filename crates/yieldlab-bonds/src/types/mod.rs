//! Bond domain types.

mod amortization;
mod coupon_steps;
mod options;
mod terms;

pub use amortization::{AmortizationEntry, AmortizationSchedule};
pub use coupon_steps::{CouponRateChange, CouponSteps};
pub use options::{CallSchedule, ExerciseStyle, ExerciseWindow, OptionKind, OptionSchedule, PutSchedule};
pub use terms::{BondTerms, BondTermsBuilder};

use serde::{Deserialize, Serialize};

use crate::error::BondResult;

/// Optional feature schedules attached to a bond. All default to empty,
/// which describes a plain fixed-coupon bullet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BondFeatures {
    /// Scheduled principal repayments.
    pub amortization: AmortizationSchedule,
    /// Issuer call windows.
    pub calls: CallSchedule,
    /// Holder put windows.
    pub puts: PutSchedule,
    /// Coupon rate changes.
    pub coupon_changes: CouponSteps,
}

impl BondFeatures {
    /// Checks each schedule against the bond's terms.
    pub fn validate(&self, terms: &BondTerms) -> BondResult<()> {
        let issue = terms.issue_date();
        let maturity = terms.maturity_date();
        self.amortization.validate(issue, maturity)?;
        self.calls.validate(issue, maturity)?;
        self.puts.validate(issue, maturity)?;
        self.coupon_changes.validate(issue)?;
        Ok(())
    }

    /// True when there is at least one call or put window.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.calls.is_empty() || !self.puts.is_empty()
    }
}
