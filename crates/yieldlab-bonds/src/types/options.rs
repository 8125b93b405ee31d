//! Embedded call and put schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use yieldlab_core::Date;

use crate::error::{BondError, BondResult};

/// When an embedded option may be exercised inside its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseStyle {
    /// Any date in the window; coupon dates in the window plus the window start are tested
    American,
    /// Only on the window start
    European,
    /// On listed dates, or on coupon dates in the window when none are listed
    #[serde(alias = "BERMUDAN")]
    Bermuda,
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::American => write!(f, "AMERICAN"),
            ExerciseStyle::European => write!(f, "EUROPEAN"),
            ExerciseStyle::Bermuda => write!(f, "BERMUDA"),
        }
    }
}

/// Which side holds the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionKind {
    /// Issuer may redeem early
    Call,
    /// Holder may demand early redemption
    Put,
}

/// One exercise window of a call or put schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWindow {
    /// First exercisable date.
    pub start: Date,
    /// Last exercisable date.
    pub end: Date,
    /// Redemption price as a percentage of outstanding face (102 = 102%).
    pub strike: Decimal,
    /// Exercise style.
    pub style: ExerciseStyle,
    /// Explicit Bermuda exercise dates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercise_dates: Vec<Date>,
}

impl ExerciseWindow {
    /// Creates a window with no explicit exercise dates.
    #[must_use]
    pub fn new(start: Date, end: Date, strike: Decimal, style: ExerciseStyle) -> Self {
        Self {
            start,
            end,
            strike,
            style,
            exercise_dates: Vec::new(),
        }
    }

    /// Sets explicit Bermuda exercise dates.
    #[must_use]
    pub fn with_exercise_dates(mut self, dates: Vec<Date>) -> Self {
        self.exercise_dates = dates;
        self
    }

    /// True when `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }

    /// Exercise dates to test for this window, before filtering against
    /// settlement and maturity.
    #[must_use]
    pub fn exercise_candidates(&self, coupon_dates: &[Date]) -> Vec<Date> {
        let in_window = || coupon_dates.iter().copied().filter(|d| self.contains(*d));
        match self.style {
            ExerciseStyle::European => vec![self.start],
            ExerciseStyle::American => std::iter::once(self.start).chain(in_window()).collect(),
            ExerciseStyle::Bermuda if !self.exercise_dates.is_empty() => self.exercise_dates.clone(),
            ExerciseStyle::Bermuda => in_window().collect(),
        }
    }

    fn validate(&self, issue: Date, maturity: Date) -> BondResult<()> {
        if self.start > self.end {
            return Err(BondError::validation(format!(
                "exercise window starts {} after it ends {}",
                self.start, self.end
            )));
        }
        if self.start <= issue || self.end > maturity {
            return Err(BondError::validation(format!(
                "exercise window {}..{} must lie within ({issue}, {maturity}]",
                self.start, self.end
            )));
        }
        if self.strike <= Decimal::ZERO {
            return Err(BondError::validation(format!(
                "strike {} must be positive",
                self.strike
            )));
        }
        if !self.exercise_dates.is_empty() {
            if self.style != ExerciseStyle::Bermuda {
                return Err(BondError::validation(format!(
                    "explicit exercise dates are only valid for BERMUDA windows, not {}",
                    self.style
                )));
            }
            if self.exercise_dates.windows(2).any(|w| w[1] <= w[0]) {
                return Err(BondError::validation(
                    "bermuda exercise dates must be strictly increasing",
                ));
            }
            if let Some(outside) = self.exercise_dates.iter().find(|d| !self.contains(**d)) {
                return Err(BondError::validation(format!(
                    "bermuda exercise date {outside} is outside its window"
                )));
            }
        }
        Ok(())
    }
}

/// An ordered list of exercise windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSchedule {
    windows: Vec<ExerciseWindow>,
}

/// Issuer call schedule.
pub type CallSchedule = OptionSchedule;

/// Holder put schedule.
pub type PutSchedule = OptionSchedule;

impl OptionSchedule {
    /// Wraps a list of windows.
    #[must_use]
    pub fn new(windows: Vec<ExerciseWindow>) -> Self {
        Self { windows }
    }

    /// Windows in order.
    #[must_use]
    pub fn windows(&self) -> &[ExerciseWindow] {
        &self.windows
    }

    /// True when there is nothing to exercise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// All `(date, strike)` exercise scenarios strictly after `settlement`
    /// and strictly before `maturity`, sorted by date. When windows
    /// overlap, the first window listing a date wins.
    #[must_use]
    pub fn exercise_scenarios(
        &self,
        coupon_dates: &[Date],
        settlement: Date,
        maturity: Date,
    ) -> Vec<(Date, Decimal)> {
        let mut scenarios: Vec<(Date, Decimal)> = Vec::new();
        for window in &self.windows {
            for date in window.exercise_candidates(coupon_dates) {
                if date > settlement
                    && date < maturity
                    && !scenarios.iter().any(|(d, _)| *d == date)
                {
                    scenarios.push((date, window.strike));
                }
            }
        }
        scenarios.sort_by_key(|(d, _)| *d);
        scenarios
    }

    /// Checks every window against the bond's life.
    pub fn validate(&self, issue: Date, maturity: Date) -> BondResult<()> {
        self.windows
            .iter()
            .try_for_each(|w| w.validate(issue, maturity))
    }
}
