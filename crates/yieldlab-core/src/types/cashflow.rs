//! Dated cash flow type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Kind of payment a cash flow represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Regular coupon payment, no principal
    Coupon,
    /// Principal-only repayment
    Principal,
    /// Final payment: last coupon plus remaining principal
    Maturity,
    /// Redemption on an issuer call
    Call,
    /// Redemption on a holder put
    Put,
    /// Scheduled partial principal repayment alongside a coupon
    Amortization,
}

impl PaymentType {
    /// Returns true if this payment retires the bond early.
    #[must_use]
    pub fn is_early_redemption(&self) -> bool {
        matches!(self, PaymentType::Call | PaymentType::Put)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentType::Coupon => "COUPON",
            PaymentType::Principal => "PRINCIPAL",
            PaymentType::Maturity => "MATURITY",
            PaymentType::Call => "CALL",
            PaymentType::Put => "PUT",
            PaymentType::Amortization => "AMORTIZATION",
        };
        write!(f, "{name}")
    }
}

/// A single dated payment of a bond.
///
/// Amounts are in currency units of the bond's face value and are exact
/// decimals, so a principal ledger sums back to the face value without drift.
/// `outstanding_after` is the notional remaining once this payment is made.
///
/// # Example
///
/// ```rust
/// use yieldlab_core::types::{CashFlow, Date, PaymentType};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::new(
///     Date::from_ymd(2030, 6, 15).unwrap(),
///     dec!(25),
///     dec!(1000),
///     dec!(0),
///     PaymentType::Maturity,
///     dec!(0.05),
/// );
/// assert_eq!(cf.total(), dec!(1025));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    date: Date,
    coupon: Decimal,
    principal: Decimal,
    total: Decimal,
    outstanding_after: Decimal,
    payment_type: PaymentType,
    coupon_rate: Decimal,
}

impl CashFlow {
    /// Creates a cash flow; `total` is derived from coupon and principal.
    #[must_use]
    pub fn new(
        date: Date,
        coupon: Decimal,
        principal: Decimal,
        outstanding_after: Decimal,
        payment_type: PaymentType,
        coupon_rate: Decimal,
    ) -> Self {
        Self {
            date,
            coupon,
            principal,
            total: coupon + principal,
            outstanding_after,
            payment_type,
            coupon_rate,
        }
    }

    /// Payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Coupon (interest) portion.
    #[must_use]
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Principal portion.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Total payment as recorded. Equals coupon + principal for any flow
    /// built by [`CashFlow::new`]; externally supplied flows are checked.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Notional outstanding after this payment.
    #[must_use]
    pub fn outstanding_after(&self) -> Decimal {
        self.outstanding_after
    }

    /// Payment type.
    #[must_use]
    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    /// Annual coupon rate (decimal) applied to the period ending here.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} coupon={} principal={} outstanding={}",
            self.date, self.payment_type, self.coupon, self.principal, self.outstanding_after
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_is_coupon_plus_principal() {
        let cf = CashFlow::new(
            Date::from_ymd(2028, 1, 15).unwrap(),
            dec!(12.5),
            dec!(500),
            dec!(500),
            PaymentType::Amortization,
            dec!(0.025),
        );
        assert_eq!(cf.total(), dec!(512.5));
        assert!(!cf.payment_type().is_early_redemption());
    }

    #[test]
    fn test_wire_format() {
        let cf = CashFlow::new(
            Date::from_ymd(2028, 1, 15).unwrap(),
            dec!(25),
            dec!(0),
            dec!(1000),
            PaymentType::Coupon,
            dec!(0.05),
        );
        let json = serde_json::to_value(cf).unwrap();
        assert_eq!(json["paymentType"], "COUPON");
        assert_eq!(json["date"], "2028-01-15");
        assert!(json.get("outstandingAfter").is_some());

        let back: CashFlow = serde_json::from_value(json).unwrap();
        assert_eq!(back, cf);
    }
}
