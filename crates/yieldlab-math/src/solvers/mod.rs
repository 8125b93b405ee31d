//! Root-finding algorithms.
//!
//! | Solver | Convergence | Requires |
//! |--------|-------------|----------|
//! | [`bounded_newton`] | Quadratic, stays in a domain | Derivative, domain |
//! | [`bisection`] | Linear, guaranteed | Sign-changing bracket |
//! | [`hybrid`] | Newton speed, bisection safety | Derivative, domain |
//!
//! # Example: yield from price
//!
//! ```rust
//! use yieldlab_math::solvers::{hybrid, SolverConfig, SolverMethod};
//!
//! // 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv + 100.0 / (1.0 + y).powi(5) - 95.0
//! };
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= f64::from(t) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv - 500.0 / (1.0 + y).powi(6)
//! };
//!
//! let result = hybrid(price_fn, d_price_fn, 0.05, (-0.99, 10.0), &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);
//! assert_eq!(result.method, SolverMethod::Newton);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::hybrid;
pub use newton::bounded_newton;

use std::fmt;

use crate::error::MathError;

/// Default residual tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default step (argument) tolerance.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-14;

/// Default maximum Newton iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Default number of boundary clamps tolerated before Newton gives up.
pub const DEFAULT_MAX_CLAMP_HITS: u32 = 3;

/// Default iteration cap for the bisection fallback.
pub const BISECTION_MAX_ITERATIONS: u32 = 200;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Residual tolerance: `|f(x)| < tolerance` ends the search.
    pub tolerance: f64,
    /// Argument tolerance: a step (or half-bracket) below this ends the search.
    pub step_tolerance: f64,
    /// Maximum number of Newton iterations.
    pub max_iterations: u32,
    /// Boundary clamps allowed before bounded Newton reports failure.
    pub max_clamp_hits: u32,
    /// Maximum number of bisection halvings.
    pub bisection_max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_clamp_hits: DEFAULT_MAX_CLAMP_HITS,
            bisection_max_iterations: BISECTION_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default step tolerance and clamp limit.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the boundary clamp limit.
    #[must_use]
    pub fn with_max_clamp_hits(mut self, max_clamp_hits: u32) -> Self {
        self.max_clamp_hits = max_clamp_hits;
        self
    }

    /// Sets the bisection iteration cap.
    #[must_use]
    pub fn with_bisection_max_iterations(mut self, max_iterations: u32) -> Self {
        self.bisection_max_iterations = max_iterations;
        self
    }
}

/// Which method produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMethod {
    /// Newton-Raphson (possibly bounded)
    Newton,
    /// Bisection
    Bisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMethod::Newton => write!(f, "newton"),
            SolverMethod::Bisection => write!(f, "bisection"),
        }
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Total iterations across all methods tried.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
    /// Method that produced the root.
    pub method: SolverMethod,
    /// Why Newton was abandoned, if the root came from the fallback.
    pub fallback_reason: Option<MathError>,
}

impl SolverResult {
    pub(crate) fn newton(root: f64, iterations: u32, residual: f64) -> Self {
        Self {
            root,
            iterations,
            residual,
            method: SolverMethod::Newton,
            fallback_reason: None,
        }
    }

    pub(crate) fn bisection(root: f64, iterations: u32, residual: f64) -> Self {
        Self {
            root,
            iterations,
            residual,
            method: SolverMethod::Bisection,
            fallback_reason: None,
        }
    }
}
