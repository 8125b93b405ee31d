//! Price-to-yield inversion.
//!
//! Newton-Raphson on the dirty price with the analytic derivative
//! `dP/dy = −ModDur·P`, every iterate clamped into the yield domain
//! (default `[−0.99, 10.0]`). Oscillation, derivative underflow, repeated
//! boundary clamps, non-finite values or an exhausted iteration budget
//! hand over to bisection over the whole domain.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use yieldlab_math::solvers::{hybrid, SolverConfig, SolverMethod};

use crate::error::{BondError, BondResult};
use crate::pricing::present_value::PricingSchedule;

/// Seed used when the schedule has no usable coupon rate.
pub const DEFAULT_SEED: f64 = 0.10;

/// Default price tolerance per 100 face.
pub const DEFAULT_PRICE_TOLERANCE: f64 = 1e-9;

/// Loosest price tolerance accepted (0.005% of face).
pub const MAX_PRICE_TOLERANCE: f64 = 0.005;

/// Default yield domain.
pub const DEFAULT_YIELD_BOUNDS: (f64, f64) = (-0.99, 10.0);

const MONOTONICITY_SAMPLES: usize = 64;

/// Outcome of a yield solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldResult {
    /// Annual yield as a decimal.
    pub yield_value: f64,
    /// Newton plus bisection iterations.
    pub iterations: u32,
    /// Dirty price error at the solution (% of face).
    pub residual: f64,
    /// Whether the price tolerance was met.
    pub converged: bool,
    /// True when the root came from the bisection fallback.
    pub used_fallback: bool,
}

/// Yield solver configuration and entry point.
#[derive(Debug, Clone, Copy)]
pub struct YieldSolver {
    config: SolverConfig,
    bounds: (f64, f64),
    seed_fallback: f64,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a solver with a 1e-9 price tolerance, 50 Newton iterations,
    /// the `[−0.99, 10]` domain and a 10% fallback seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::new(DEFAULT_PRICE_TOLERANCE, 50),
            bounds: DEFAULT_YIELD_BOUNDS,
            seed_fallback: DEFAULT_SEED,
        }
    }

    /// Sets the price tolerance, capped at 0.005 per 100 face.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance.min(MAX_PRICE_TOLERANCE);
        self
    }

    /// Sets the Newton iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets how many boundary clamps Newton tolerates.
    #[must_use]
    pub fn with_max_clamp_hits(mut self, max_clamp_hits: u32) -> Self {
        self.config.max_clamp_hits = max_clamp_hits;
        self
    }

    /// Sets the bisection fallback's iteration cap.
    #[must_use]
    pub fn with_max_bisection_iterations(mut self, max_iterations: u32) -> Self {
        self.config.bisection_max_iterations = max_iterations;
        self
    }

    /// Sets the yield domain.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = (lower, upper);
        self
    }

    /// Sets the seed used when there is no current coupon rate.
    #[must_use]
    pub fn with_seed_fallback(mut self, seed: f64) -> Self {
        self.seed_fallback = seed;
        self
    }

    /// Price tolerance in use.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Yield domain in use.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Solves for the yield that reprices `schedule` to `target_clean`.
    ///
    /// The seed is the schedule's current coupon rate, or the fallback seed
    /// when that rate is zero.
    ///
    /// # Errors
    ///
    /// `NoSolution` when the target lies outside the prices achievable over
    /// the domain, the price is not monotonic in yield, or neither Newton
    /// nor bisection converges.
    pub fn solve(&self, schedule: &PricingSchedule, target_clean: f64) -> BondResult<YieldResult> {
        if !target_clean.is_finite() {
            return Err(BondError::validation(format!(
                "target price {target_clean} is not finite"
            )));
        }
        let (lower, upper) = self.bounds;
        let target_dirty = target_clean + schedule.accrued();
        let objective = |y: f64| schedule.dirty_price(y) - target_dirty;
        let derivative = |y: f64| schedule.dirty_price_derivative(y);

        let highest = schedule.clean_price(lower);
        let lowest = schedule.clean_price(upper);
        if !(lowest - self.config.tolerance..=highest + self.config.tolerance).contains(&target_clean)
        {
            return Err(BondError::no_solution(format!(
                "clean price {target_clean} is outside the achievable range [{lowest:.6}, {highest:.6}] for yields in [{lower}, {upper}]"
            )));
        }
        if schedule.has_negative_flows() && !self.is_monotonic(schedule) {
            return Err(BondError::no_solution(
                "price is not monotonic in yield over the solver domain",
            ));
        }

        let seed = schedule
            .current_coupon_rate()
            .to_f64()
            .filter(|r| *r > 0.0)
            .unwrap_or(self.seed_fallback);

        let result = hybrid(objective, derivative, seed, self.bounds, &self.config)
            .map_err(|e| BondError::no_solution(format!("yield solver failed: {e}")))?;

        if let Some(reason) = &result.fallback_reason {
            warn!(%reason, seed, "newton failed, yield found by bisection");
        }
        debug!(
            yield_value = result.root,
            iterations = result.iterations,
            method = %result.method,
            "yield solved"
        );

        Ok(YieldResult {
            yield_value: result.root,
            iterations: result.iterations,
            residual: result.residual,
            converged: result.residual.abs() < self.config.tolerance,
            used_fallback: result.method == SolverMethod::Bisection,
        })
    }

    fn is_monotonic(&self, schedule: &PricingSchedule) -> bool {
        let (lower, upper) = self.bounds;
        let step = (upper - lower) / MONOTONICITY_SAMPLES as f64;
        let prices: Vec<f64> = (0..=MONOTONICITY_SAMPLES)
            .map(|i| schedule.dirty_price(lower + step * i as f64))
            .collect();
        prices.windows(2).all(|w| w[1] <= w[0])
    }
}
