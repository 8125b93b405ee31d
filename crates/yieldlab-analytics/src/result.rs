//! Calculation results and the JSON response envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yieldlab_bonds::pricing::{WorkoutKind, WorkoutResult};
use yieldlab_core::types::{CashFlow, Date};

use crate::engine::CalculationState;
use crate::error::{AnalyticsError, ErrorKind};
use crate::request::CashFlowDto;

/// Outcome of one calculation. Yields are decimal fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    /// Clean price, % of face.
    pub clean_price: f64,
    /// Dirty price, % of face.
    pub dirty_price: f64,
    /// Accrued interest, % of face.
    pub accrued_interest: f64,
    /// Accrued interest in currency.
    pub accrued_amount: Decimal,
    /// Yield to maturity.
    pub yield_to_maturity: f64,
    /// Yield-to-worst analysis, when the bond has call or put windows.
    pub workout: Option<WorkoutResult>,
    /// Modified duration.
    pub modified_duration: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// DV01 in currency for the bond's face.
    pub dv01: f64,
    /// Spread to the benchmark in basis points, when a benchmark was given.
    pub spread_to_benchmark: Option<f64>,
    /// Annual coupon over clean price; `None` at a zero price.
    pub current_yield: Option<f64>,
    /// Yield solver iterations (0 when the yield was given).
    pub iterations: u32,
    /// Whether the locked input was met within tolerance.
    pub converged: bool,
    /// State transitions of the calculation.
    pub trace: Vec<CalculationState>,
    /// Schedule the figures were computed from.
    pub cash_flows: Vec<CashFlow>,
}

impl AnalyticsResult {
    /// Yield-to-worst, when computed.
    #[must_use]
    pub fn yield_to_worst(&self) -> Option<f64> {
        self.workout.as_ref().map(|w| w.yield_to_worst)
    }
}

/// One workout scenario on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutYieldDto {
    /// Scenario kind.
    pub kind: WorkoutKind,
    /// Redemption date.
    pub date: Date,
    /// Redemption price, % of outstanding face.
    pub strike: Decimal,
    /// Yield, percent.
    #[serde(rename = "yield")]
    pub yield_pct: f64,
}

/// Calculation result on the wire. Yields are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResultDto {
    /// Clean price, % of face.
    pub clean_price: f64,
    /// Dirty price, % of face.
    pub dirty_price: f64,
    /// Accrued interest, % of face.
    pub accrued_interest: f64,
    /// Accrued interest in currency.
    pub accrued_amount: Decimal,
    /// Yield to maturity, percent.
    pub yield_to_maturity: f64,
    /// Yield-to-worst, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_to_worst: Option<f64>,
    /// Redemption date of the worst scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_date: Option<Date>,
    /// Kind of the worst scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_kind: Option<WorkoutKind>,
    /// Every workout scenario.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workouts: Vec<WorkoutYieldDto>,
    /// Modified duration.
    pub modified_duration: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// DV01 in currency for the bond's face.
    pub dv01: f64,
    /// Spread to benchmark, basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread_to_benchmark: Option<f64>,
    /// Current yield, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_yield: Option<f64>,
    /// Yield solver iterations.
    pub iterations: u32,
    /// Convergence flag.
    pub converged: bool,
    /// State transitions.
    pub trace: Vec<CalculationState>,
    /// Schedule used, in the form accepted back as a predefined schedule.
    pub cash_flows: Vec<CashFlowDto>,
}

impl From<&AnalyticsResult> for AnalyticsResultDto {
    fn from(result: &AnalyticsResult) -> Self {
        let workout = result.workout.as_ref();
        Self {
            clean_price: result.clean_price,
            dirty_price: result.dirty_price,
            accrued_interest: result.accrued_interest,
            accrued_amount: result.accrued_amount,
            yield_to_maturity: result.yield_to_maturity * 100.0,
            yield_to_worst: workout.map(|w| w.yield_to_worst * 100.0),
            worst_date: workout.map(|w| w.worst_date),
            worst_kind: workout.map(|w| w.worst_kind),
            workouts: workout
                .map(|w| {
                    w.scenarios
                        .iter()
                        .map(|s| WorkoutYieldDto {
                            kind: s.kind,
                            date: s.date,
                            strike: s.strike,
                            yield_pct: s.yield_value * 100.0,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            modified_duration: result.modified_duration,
            macaulay_duration: result.macaulay_duration,
            convexity: result.convexity,
            dv01: result.dv01,
            spread_to_benchmark: result.spread_to_benchmark,
            current_yield: result.current_yield.map(|y| y * 100.0),
            iterations: result.iterations,
            converged: result.converged,
            trace: result.trace.clone(),
            cash_flows: result.cash_flows.iter().map(CashFlowDto::from).collect(),
        }
    }
}

/// Error body of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl From<&AnalyticsError> for ErrorBody {
    fn from(err: &AnalyticsError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// JSON response envelope.
///
/// ```json
/// { "status": "success", "result": { ... } }
/// { "status": "error", "error": { "kind": "NoSolutionError", "message": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalculationResponse {
    /// The calculation succeeded.
    Success {
        /// Figures.
        result: Box<AnalyticsResultDto>,
    },
    /// The calculation failed.
    Error {
        /// What went wrong.
        error: ErrorBody,
    },
}

impl CalculationResponse {
    /// True for a success envelope.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResponse::Success { .. })
    }
}

impl From<Result<AnalyticsResult, AnalyticsError>> for CalculationResponse {
    fn from(outcome: Result<AnalyticsResult, AnalyticsError>) -> Self {
        match outcome {
            Ok(result) => CalculationResponse::Success {
                result: Box::new(AnalyticsResultDto::from(&result)),
            },
            Err(err) => CalculationResponse::Error {
                error: ErrorBody::from(&err),
            },
        }
    }
}

/// Envelope of a schedule-only request.
///
/// ```json
/// { "status": "success", "cashFlows": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScheduleResponse {
    /// The schedule was built.
    Success {
        /// Cash flows in date order.
        #[serde(rename = "cashFlows")]
        cash_flows: Vec<CashFlowDto>,
    },
    /// Schedule construction failed.
    Error {
        /// What went wrong.
        error: ErrorBody,
    },
}

impl ScheduleResponse {
    /// True for a success envelope.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ScheduleResponse::Success { .. })
    }
}

impl From<Result<Vec<CashFlow>, AnalyticsError>> for ScheduleResponse {
    fn from(outcome: Result<Vec<CashFlow>, AnalyticsError>) -> Self {
        match outcome {
            Ok(flows) => ScheduleResponse::Success {
                cash_flows: flows.iter().map(CashFlowDto::from).collect(),
            },
            Err(err) => ScheduleResponse::Error {
                error: ErrorBody::from(&err),
            },
        }
    }
}
