//! Scheduled principal repayments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yieldlab_core::Date;

use crate::error::{BondError, BondResult};

/// A single scheduled principal repayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    /// Payment date; must coincide with a coupon date.
    pub date: Date,
    /// Principal repaid as a percentage of original face (10 = 10%).
    pub percent: Decimal,
}

impl AmortizationEntry {
    /// Creates a new amortization entry.
    #[must_use]
    pub fn new(date: Date, percent: Decimal) -> Self {
        Self { date, percent }
    }

    /// Principal amount for a given original face.
    #[must_use]
    pub fn principal(&self, face_value: Decimal) -> Decimal {
        face_value * self.percent / Decimal::ONE_HUNDRED
    }
}

/// Ordered amortization schedule. Whatever is not repaid by the entries
/// amortizes at maturity.
///
/// # Example
///
/// ```rust
/// use yieldlab_bonds::types::{AmortizationEntry, AmortizationSchedule};
/// use yieldlab_core::Date;
/// use rust_decimal_macros::dec;
///
/// let schedule = AmortizationSchedule::new(vec![
///     AmortizationEntry::new(Date::from_ymd(2028, 6, 15).unwrap(), dec!(25)),
///     AmortizationEntry::new(Date::from_ymd(2029, 6, 15).unwrap(), dec!(25)),
/// ]);
/// assert_eq!(schedule.total_percent(), dec!(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule {
    entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    /// Wraps a list of entries.
    #[must_use]
    pub fn new(entries: Vec<AmortizationEntry>) -> Self {
        Self { entries }
    }

    /// Entries in date order.
    #[must_use]
    pub fn entries(&self) -> &[AmortizationEntry] {
        &self.entries
    }

    /// True when the bond is a bullet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry percentages.
    #[must_use]
    pub fn total_percent(&self) -> Decimal {
        self.entries.iter().map(|e| e.percent).sum()
    }

    /// Entry scheduled on `date`, if any.
    #[must_use]
    pub fn entry_on(&self, date: Date) -> Option<&AmortizationEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Checks entry-level constraints: strictly increasing dates strictly
    /// inside `(issue, maturity)` and percentages in `(0, 100]`.
    ///
    /// An oversubscribed total is a schedule problem and is reported by
    /// the cash-flow builder instead.
    pub fn validate(&self, issue: Date, maturity: Date) -> BondResult<()> {
        let mut previous: Option<Date> = None;
        for entry in &self.entries {
            if entry.date <= issue || entry.date >= maturity {
                return Err(BondError::validation(format!(
                    "amortization date {} must lie strictly between issue {issue} and maturity {maturity}",
                    entry.date
                )));
            }
            if previous.is_some_and(|p| entry.date <= p) {
                return Err(BondError::validation(format!(
                    "amortization dates must be strictly increasing at {}",
                    entry.date
                )));
            }
            if entry.percent <= Decimal::ZERO || entry.percent > Decimal::ONE_HUNDRED {
                return Err(BondError::validation(format!(
                    "amortization percent {} on {} must be in (0, 100]",
                    entry.percent, entry.date
                )));
            }
            previous = Some(entry.date);
        }
        Ok(())
    }
}
