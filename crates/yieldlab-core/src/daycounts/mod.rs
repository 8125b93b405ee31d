//! Day count conventions.
//!
//! A day count convention turns a calendar span into a year fraction. The
//! engine supports four:
//!
//! - [`Thirty360`]: 30/360 bond basis
//! - [`ActActIcma`]: Actual/Actual, ICMA (ISMA) period-based variant
//! - [`Act360`]: Actual/360
//! - [`Act365Fixed`]: Actual/365 Fixed
//!
//! # ACT/ACT variant
//!
//! ACT/ACT is the ICMA rule: a span is measured in quasi-coupon periods
//! anchored on its end date, and each piece counts
//! `days / (frequency × days in the quasi period)`. A full regular coupon
//! period is therefore exactly `1 / frequency` regardless of leap years. The
//! ISDA calendar-year split is not offered.
//!
//! # Usage
//!
//! ```rust
//! use yieldlab_core::daycounts::DayCountConvention;
//! use yieldlab_core::types::{Date, Frequency};
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let yf = DayCountConvention::ActAct
//!     .period_fraction(start, end, Frequency::SemiAnnual)
//!     .unwrap();
//! assert_eq!(yf, rust_decimal_macros::dec!(0.5));
//!
//! assert!(DayCountConvention::Act360
//!     .period_fraction(end, start, Frequency::SemiAnnual)
//!     .is_err());
//! ```

mod actact;
mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed};
pub use actact::ActActIcma;
pub use thirty360::Thirty360;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// Trait for day count conventions.
///
/// `year_fraction` is unchecked; callers that need the ordering guarantee go
/// through [`DayCountConvention::period_fraction`].
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under the convention's day rules.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Supported day count conventions, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// 30/360 bond basis
    #[default]
    #[serde(rename = "30/360", alias = "THIRTY_360", alias = "30_360")]
    Thirty360,
    /// Actual/Actual (ICMA)
    #[serde(rename = "ACT/ACT", alias = "ACT_ACT", alias = "ACTUAL/ACTUAL")]
    ActAct,
    /// Actual/360
    #[serde(rename = "ACT/360", alias = "ACT_360")]
    Act360,
    /// Actual/365 Fixed
    #[serde(rename = "ACT/365", alias = "ACT_365", alias = "ACT/365F")]
    Act365,
}

impl DayCountConvention {
    /// Creates a boxed implementation. ACT/ACT needs the coupon frequency to
    /// size its quasi-coupon periods; the other conventions ignore it.
    #[must_use]
    pub fn to_day_count(&self, frequency: Frequency) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Thirty360 => Box::new(Thirty360),
            DayCountConvention::ActAct => Box::new(ActActIcma::new(frequency)),
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365 => Box::new(Act365Fixed),
        }
    }

    /// Checked year fraction between two dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DateRange` when `start > end`.
    pub fn period_fraction(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
    ) -> CoreResult<Decimal> {
        if start > end {
            return Err(CoreError::date_range(start, end));
        }
        Ok(self.to_day_count(frequency).year_fraction(start, end))
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ActAct => "ACT/ACT",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360,
            DayCountConvention::ActAct,
            DayCountConvention::Act360,
            DayCountConvention::Act365,
        ]
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', ' '], "/");
        match normalized.as_str() {
            "30/360" | "THIRTY360" | "30/360/US" => Ok(DayCountConvention::Thirty360),
            "ACT/ACT" | "ACTUAL/ACTUAL" | "ACT/ACT/ICMA" => Ok(DayCountConvention::ActAct),
            "ACT/360" | "ACTUAL/360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACTUAL/365" => Ok(DayCountConvention::Act365),
            _ => Err(CoreError::UnknownDayCount {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_period_fraction_rejects_reversed_dates() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 6, 1).unwrap();
        for dc in DayCountConvention::all() {
            let err = dc.period_fraction(b, a, Frequency::SemiAnnual).unwrap_err();
            assert!(matches!(err, CoreError::DateRange { .. }));
            assert_eq!(
                dc.period_fraction(a, a, Frequency::SemiAnnual).unwrap(),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn test_full_year_is_one_for_period_conventions() {
        let a = Date::from_ymd(2024, 3, 15).unwrap();
        let b = Date::from_ymd(2025, 3, 15).unwrap();
        let yf = |dc: DayCountConvention| dc.period_fraction(a, b, Frequency::Quarterly).unwrap();
        assert_eq!(yf(DayCountConvention::Thirty360), dec!(1));
        assert_eq!(yf(DayCountConvention::ActAct), dec!(1));
        assert_eq!(yf(DayCountConvention::Act365), dec!(1));
        assert_eq!(yf(DayCountConvention::Act360), dec!(365) / dec!(360));
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            "act/act".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActAct
        );
        assert_eq!(
            "30_360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert!("BUS/252".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DayCountConvention::Act365).unwrap();
        assert_eq!(json, "\"ACT/365\"");
        let parsed: DayCountConvention = serde_json::from_str("\"30/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Thirty360);
    }
}
