//! Bounded Newton with a bisection safety net.

use tracing::debug;

use crate::error::MathResult;
use crate::solvers::{bisection, bounded_newton, SolverConfig, SolverResult};

/// Hybrid root-finding algorithm.
///
/// 1. Run [`bounded_newton`] from `initial_guess`, iterates clamped to `bounds`
/// 2. If Newton fails for any reason (boundary pinning, derivative
///    underflow, non-finite values, iteration budget), bisect over `bounds`
///
/// The reported iteration count is Newton's plus the bisection's, and the
/// Newton failure is kept in [`SolverResult::fallback_reason`].
///
/// # Example
///
/// ```rust
/// use yieldlab_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match bounded_newton(&f, &df, initial_guess, bounds, config) {
        Ok(result) => Ok(result),
        Err(newton_err) => {
            debug!(
                reason = %newton_err,
                newton_iterations = newton_err.iterations(),
                "newton abandoned, falling back to bisection"
            );
            let mut result = bisection(&f, bounds.0, bounds.1, config)?;
            result.iterations += newton_err.iterations();
            result.fallback_reason = Some(newton_err);
            Ok(result)
        }
    }
}
