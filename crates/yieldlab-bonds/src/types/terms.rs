//! Contractual bond terms.

use rust_decimal::Decimal;
use serde::Serialize;

use yieldlab_core::daycounts::DayCountConvention;
use yieldlab_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Immutable contractual terms of a fixed-coupon bond.
///
/// Built through [`BondTermsBuilder`], which enforces:
///
/// - `face_value > 0`
/// - `maturity_date > issue_date`
/// - `issue_date < first_coupon_date < maturity_date` when a first coupon date is set
/// - `coupon_rate >= 0` (decimal, 0.05 = 5%)
/// - a three-letter uppercase ISO-4217 currency code
///
/// # Example
///
/// ```rust
/// use yieldlab_bonds::types::BondTerms;
/// use yieldlab_core::types::{Date, Frequency};
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::builder()
///     .issuer("Acme Corp")
///     .currency("USD")
///     .face_value(dec!(1000))
///     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
///     .maturity_date(Date::from_ymd(2035, 1, 15).unwrap())
///     .coupon_rate(dec!(0.05))
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.face_value(), dec!(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondTerms {
    issuer: String,
    currency: String,
    face_value: Decimal,
    issue_date: Date,
    maturity_date: Date,
    first_coupon_date: Option<Date>,
    coupon_rate: Decimal,
    frequency: Frequency,
    day_count: DayCountConvention,
    settlement_lag_days: u32,
}

impl BondTerms {
    /// Starts a validating builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::default()
    }

    /// Issuer name.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// ISO-4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Face value in currency units.
    #[must_use]
    pub fn face_value(&self) -> Decimal {
        self.face_value
    }

    /// Issue (dated) date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// First coupon date, if the ladder is anchored forward from it.
    #[must_use]
    pub fn first_coupon_date(&self) -> Option<Date> {
        self.first_coupon_date
    }

    /// Base annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Settlement lag in business days.
    #[must_use]
    pub fn settlement_lag_days(&self) -> u32 {
        self.settlement_lag_days
    }

    /// Settlement date for a trade date: `trade_date` plus the settlement
    /// lag in weekend-skipping business days.
    #[must_use]
    pub fn settlement_from_trade(&self, trade_date: Date) -> Date {
        trade_date.add_business_days(self.settlement_lag_days)
    }

    /// Checks that `settlement` lies in `[issue, maturity)`.
    pub fn check_settlement(&self, settlement: Date) -> BondResult<()> {
        if settlement < self.issue_date {
            return Err(BondError::validation(format!(
                "settlement {settlement} is before issue {}",
                self.issue_date
            )));
        }
        if settlement >= self.maturity_date {
            return Err(BondError::validation(format!(
                "settlement {settlement} is not before maturity {}",
                self.maturity_date
            )));
        }
        Ok(())
    }
}

/// Builder for [`BondTerms`].
///
/// Day count defaults to 30/360, frequency to semi-annual, settlement lag
/// to zero. Everything else is required.
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    issuer: Option<String>,
    currency: Option<String>,
    face_value: Option<Decimal>,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    first_coupon_date: Option<Date>,
    coupon_rate: Option<Decimal>,
    frequency: Frequency,
    day_count: DayCountConvention,
    settlement_lag_days: u32,
}

impl BondTermsBuilder {
    /// Sets the issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: Decimal) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the first coupon date.
    #[must_use]
    pub fn first_coupon_date(mut self, date: Option<Date>) -> Self {
        self.first_coupon_date = date;
        self
    }

    /// Sets the base annual coupon rate (decimal).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the settlement lag in business days.
    #[must_use]
    pub fn settlement_lag_days(mut self, days: u32) -> Self {
        self.settlement_lag_days = days;
        self
    }

    /// Validates and builds the terms.
    pub fn build(self) -> BondResult<BondTerms> {
        let issuer = self.issuer.ok_or_else(|| BondError::missing_field("issuer"))?;
        let currency = self
            .currency
            .ok_or_else(|| BondError::missing_field("currency"))?;
        let face_value = self
            .face_value
            .ok_or_else(|| BondError::missing_field("faceValue"))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| BondError::missing_field("issueDate"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturityDate"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("couponRate"))?;

        if issuer.trim().is_empty() {
            return Err(BondError::validation("issuer must not be empty"));
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(BondError::validation(format!(
                "currency must be a three-letter ISO-4217 code, got '{currency}'"
            )));
        }
        if face_value <= Decimal::ZERO {
            return Err(BondError::validation(format!(
                "face value must be positive, got {face_value}"
            )));
        }
        if maturity_date <= issue_date {
            return Err(BondError::validation(format!(
                "maturity {maturity_date} must be after issue {issue_date}"
            )));
        }
        if let Some(first) = self.first_coupon_date {
            if first <= issue_date || first >= maturity_date {
                return Err(BondError::validation(format!(
                    "first coupon date {first} must lie strictly between issue {issue_date} and maturity {maturity_date}"
                )));
            }
        }
        if coupon_rate < Decimal::ZERO {
            return Err(BondError::validation(format!(
                "coupon rate must not be negative, got {coupon_rate}"
            )));
        }

        Ok(BondTerms {
            issuer,
            currency,
            face_value,
            issue_date,
            maturity_date,
            first_coupon_date: self.first_coupon_date,
            coupon_rate,
            frequency: self.frequency,
            day_count: self.day_count,
            settlement_lag_days: self.settlement_lag_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn base() -> BondTermsBuilder {
        BondTerms::builder()
            .issuer("Acme")
            .currency("EUR")
            .face_value(dec!(1000))
            .issue_date(d(2025, 1, 15))
            .maturity_date(d(2030, 1, 15))
            .coupon_rate(dec!(0.04))
    }

    #[test]
    fn test_defaults() {
        let terms = base().build().unwrap();
        assert_eq!(terms.frequency(), Frequency::SemiAnnual);
        assert_eq!(terms.day_count(), DayCountConvention::Thirty360);
        assert_eq!(terms.settlement_lag_days(), 0);
        assert!(terms.first_coupon_date().is_none());
    }

    #[test]
    fn test_missing_field() {
        let err = BondTerms::builder().issuer("Acme").build().unwrap_err();
        assert_eq!(err, BondError::missing_field("currency"));
    }

    #[test]
    fn test_rejects_bad_terms() {
        assert!(base().face_value(dec!(0)).build().is_err());
        assert!(base().currency("usd").build().is_err());
        assert!(base().currency("USDX").build().is_err());
        assert!(base().coupon_rate(dec!(-0.01)).build().is_err());
        assert!(base().maturity_date(d(2025, 1, 15)).build().is_err());
        assert!(base().first_coupon_date(Some(d(2030, 1, 15))).build().is_err());
        assert!(base().first_coupon_date(Some(d(2025, 6, 1))).build().is_ok());
    }

    #[test]
    fn test_settlement_window() {
        let terms = base().build().unwrap();
        assert!(terms.check_settlement(d(2025, 1, 15)).is_ok());
        assert!(terms.check_settlement(d(2025, 1, 14)).is_err());
        assert!(terms.check_settlement(d(2030, 1, 15)).is_err());
    }

    #[test]
    fn test_settlement_from_trade_skips_weekend() {
        let terms = base().settlement_lag_days(2).build().unwrap();
        // 2025-03-14 is a Friday
        assert_eq!(terms.settlement_from_trade(d(2025, 3, 14)), d(2025, 3, 18));
    }
}
