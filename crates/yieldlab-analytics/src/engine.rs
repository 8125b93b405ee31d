//! The analytics engine.
//!
//! A calculation walks a fixed state machine:
//!
//! ```text
//! RECEIVED ─> SCHEDULE_READY ─┬─> PRICED  (yield given)   ─┬─> METRICS_READY ─> RETURNED
//!                             └─> SOLVED  (price/spread)  ─┘
//!
//! any state ─> FAILED
//! ```
//!
//! Each transition is appended to the result's trace and emitted as a
//! `tracing` debug event. A failure ends the calculation with the error of
//! the component that raised it; nothing is retried.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use yieldlab_bonds::cashflows::CashFlowGenerator;
use yieldlab_bonds::pricing::{
    yield_to_worst, PricingSchedule, WorkoutContext, YieldResult, YieldSolver,
};
use yieldlab_bonds::risk::{current_yield, spread_bp, yield_from_spread, RiskCalculator};
use yieldlab_core::types::CashFlow;

use crate::config::EngineConfig;
use crate::error::{AnalyticsError, EngineResult};
use crate::request::{CalculationRequest, CalculationRequestDto, Locked};
use crate::result::{AnalyticsResult, CalculationResponse, ScheduleResponse};

/// State of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationState {
    /// Request accepted and validated.
    Received,
    /// Cash-flow schedule generated or adopted.
    ScheduleReady,
    /// Price computed from a given yield.
    Priced,
    /// Yield solved from a price, or derived from a spread.
    Solved,
    /// Risk metrics computed.
    MetricsReady,
    /// Result handed back.
    Returned,
    /// Calculation aborted.
    Failed,
}

impl fmt::Display for CalculationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculationState::Received => "RECEIVED",
            CalculationState::ScheduleReady => "SCHEDULE_READY",
            CalculationState::Priced => "PRICED",
            CalculationState::Solved => "SOLVED",
            CalculationState::MetricsReady => "METRICS_READY",
            CalculationState::Returned => "RETURNED",
            CalculationState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Records transitions of one calculation.
struct Trace {
    states: Vec<CalculationState>,
}

impl Trace {
    fn new() -> Self {
        let mut trace = Self { states: Vec::with_capacity(6) };
        trace.enter(CalculationState::Received);
        trace
    }

    fn enter(&mut self, state: CalculationState) {
        debug!(from = ?self.states.last(), to = %state, "calculation state");
        self.states.push(state);
    }

    fn current(&self) -> CalculationState {
        self.states.last().copied().unwrap_or(CalculationState::Received)
    }
}

/// Stateless bond analytics engine.
///
/// Holds only its settings, so one engine can serve any number of
/// calculations from any number of threads.
///
/// # Example
///
/// ```rust
/// use yieldlab_analytics::{AnalyticsEngine, CalculationRequest};
///
/// let request = CalculationRequest::from_json(r#"{
///     "bond": {
///         "issuer": "Acme", "currency": "USD", "faceValue": 1000,
///         "issueDate": "2025-01-15", "maturityDate": "2035-01-15",
///         "couponRate": 5.0, "frequency": 2, "dayCount": "30/360"
///     },
///     "settlementDate": "2025-01-15",
///     "marketPrice": 100.0
/// }"#).unwrap();
///
/// let result = AnalyticsEngine::new().calculate(&request).unwrap();
/// assert!((result.yield_to_maturity - 0.05).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    config: EngineConfig,
    solver: YieldSolver,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEngine {
    /// Creates an engine with default settings.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            solver: config.yield_solver(),
            config,
        }
    }

    /// Creates an engine with the given settings.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::Config` when the settings fail validation.
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            solver: config.yield_solver(),
            config,
        })
    }

    /// Settings in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one calculation.
    pub fn calculate(&self, request: &CalculationRequest) -> EngineResult<AnalyticsResult> {
        let mut trace = Trace::new();
        match self.run(request, &mut trace) {
            Ok(mut result) => {
                trace.enter(CalculationState::Returned);
                result.trace = trace.states;
                Ok(result)
            }
            Err(err) => {
                let failed_in = trace.current();
                trace.enter(CalculationState::Failed);
                debug!(state = %failed_in, kind = %err.kind(), error = %err, "calculation failed");
                Err(err)
            }
        }
    }

    /// Runs independent calculations, in parallel with the `parallel` feature.
    pub fn calculate_batch(
        &self,
        requests: &[CalculationRequest],
    ) -> Vec<EngineResult<AnalyticsResult>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests.par_iter().map(|r| self.calculate(r)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|r| self.calculate(r)).collect()
        }
    }

    /// Evaluates requests that may already have failed conversion, keeping
    /// their order. Parallel with the `parallel` feature.
    pub fn respond_batch(
        &self,
        requests: Vec<EngineResult<CalculationRequest>>,
    ) -> Vec<CalculationResponse> {
        let respond = |request: EngineResult<CalculationRequest>| -> CalculationResponse {
            request.and_then(|r| self.calculate(&r)).into()
        };
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests.into_par_iter().map(respond).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            requests.into_iter().map(respond).collect()
        }
    }

    /// Builds the cash-flow schedule of a wire request without pricing it.
    ///
    /// No locked input or settlement date is needed. A predefined schedule in
    /// the request is checked and returned as adopted.
    pub fn schedule(&self, request: &CalculationRequestDto) -> EngineResult<Vec<CashFlow>> {
        let terms = request.to_terms()?;
        let features = request.to_features();
        features.validate(&terms)?;
        match request.to_predefined_schedule()? {
            Some(flows) => Ok(CashFlowGenerator::accept_predefined(&terms, &flows)?),
            None => Ok(CashFlowGenerator::generate(&terms, &features)?),
        }
    }

    /// Parses a JSON request and responds with its schedule envelope.
    pub fn schedule_json(&self, json: &str) -> ScheduleResponse {
        serde_json::from_str::<CalculationRequestDto>(json)
            .map_err(AnalyticsError::from)
            .and_then(|dto| self.schedule(&dto))
            .into()
    }

    /// Converts a wire request, runs it, and wraps the outcome in the envelope.
    pub fn respond(&self, request: CalculationRequestDto) -> CalculationResponse {
        CalculationRequest::try_from(request)
            .and_then(|r| self.calculate(&r))
            .into()
    }

    /// Parses a JSON request and responds with the envelope. Parse failures
    /// are reported as validation errors inside the envelope.
    pub fn respond_json(&self, json: &str) -> CalculationResponse {
        CalculationRequest::from_json(json)
            .and_then(|r| self.calculate(&r))
            .into()
    }

    fn run(&self, request: &CalculationRequest, trace: &mut Trace) -> EngineResult<AnalyticsResult> {
        let terms = &request.terms;
        terms.check_settlement(request.settlement)?;
        request.features.validate(terms)?;
        if let (Locked::Spread(_), None) = (request.locked, &request.benchmark) {
            return Err(AnalyticsError::validation(
                "targetSpread requires a benchmark yield",
            ));
        }

        // Schedule
        let flows = match &request.predefined_schedule {
            Some(flows) => {
                debug!(flows = flows.len(), "adopting predefined schedule");
                CashFlowGenerator::accept_predefined(terms, flows)?
            }
            None => CashFlowGenerator::generate(terms, &request.features)?,
        };
        trace.enter(CalculationState::ScheduleReady);

        let schedule = PricingSchedule::new(
            &flows,
            request.settlement,
            terms.issue_date(),
            terms.face_value(),
            terms.day_count(),
            terms.frequency(),
        )?;

        // Price or solve
        let ytm = match request.locked {
            Locked::Price(clean) => {
                let solved = self.solver.solve(&schedule, clean)?;
                trace.enter(CalculationState::Solved);
                solved
            }
            Locked::Yield(y) => {
                self.check_yield(y, "targetYield")?;
                trace.enter(CalculationState::Priced);
                given_yield(y)
            }
            Locked::Spread(bp) => {
                let benchmark = request
                    .benchmark
                    .as_ref()
                    .map_or(0.0, |b| b.yield_value);
                let y = yield_from_spread(benchmark, bp);
                self.check_yield(y, "benchmark yield plus targetSpread")?;
                trace.enter(CalculationState::Solved);
                given_yield(y)
            }
        };
        let price = schedule.price(ytm.yield_value);

        let workout = if request.features.has_options() {
            let ctx = WorkoutContext {
                flows: &flows,
                settlement: request.settlement,
                issue_date: terms.issue_date(),
                face_value: terms.face_value(),
                day_count: terms.day_count(),
                frequency: terms.frequency(),
            };
            Some(yield_to_worst(
                &ctx,
                &schedule,
                &self.solver,
                price.clean_price,
                &ytm,
                &request.features.calls,
                &request.features.puts,
            )?)
        } else {
            None
        };

        // Metrics
        let risk = RiskCalculator::calculate(&schedule, ytm.yield_value);
        if !risk.modified_duration.is_finite() || !risk.convexity.is_finite() {
            warn!(
                yield_value = ytm.yield_value,
                "risk metrics are not finite at the solved yield"
            );
        }
        let spread_to_benchmark = request
            .benchmark
            .as_ref()
            .map(|b| spread_bp(ytm.yield_value, b.yield_value));
        trace.enter(CalculationState::MetricsReady);

        debug!(
            yield_value = ytm.yield_value,
            clean = price.clean_price,
            iterations = ytm.iterations,
            "calculation complete"
        );

        Ok(AnalyticsResult {
            clean_price: price.clean_price,
            dirty_price: price.dirty_price,
            accrued_interest: price.accrued,
            accrued_amount: schedule.accrued_amount(),
            yield_to_maturity: ytm.yield_value,
            workout,
            modified_duration: risk.modified_duration,
            macaulay_duration: risk.macaulay_duration,
            convexity: risk.convexity,
            dv01: risk.dv01,
            spread_to_benchmark,
            current_yield: current_yield(schedule.current_coupon_rate(), price.clean_price),
            iterations: ytm.iterations,
            converged: ytm.converged,
            trace: Vec::new(),
            cash_flows: flows,
        })
    }

    fn check_yield(&self, y: f64, what: &str) -> EngineResult<()> {
        let (lo, hi) = self.solver.bounds();
        if y.is_finite() && y >= lo && y <= hi {
            Ok(())
        } else {
            Err(AnalyticsError::validation(format!(
                "{what} gives yield {:.6}%, outside [{}%, {}%]",
                y * 100.0,
                lo * 100.0,
                hi * 100.0
            )))
        }
    }
}

fn given_yield(y: f64) -> YieldResult {
    YieldResult {
        yield_value: y,
        iterations: 0,
        residual: 0.0,
        converged: true,
        used_fallback: false,
    }
}
