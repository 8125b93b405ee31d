//! Newton-Raphson root finding.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Smallest derivative magnitude a Newton step will divide by.
const MIN_DERIVATIVE: f64 = 1e-12;

/// Newton-Raphson with every iterate clamped into `[lo, hi]`.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// # Example
///
/// ```rust
/// use yieldlab_math::solvers::{bounded_newton, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = bounded_newton(f, df, 1.5, (0.0, 10.0), &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
///
/// Fails with:
/// - [`MathError::BoundaryStuck`] once the iterate has been clamped
///   `config.max_clamp_hits` times
/// - [`MathError::DerivativeUnderflow`] when `|f'(x)| < 1e-12`
/// - [`MathError::NonFinite`] on NaN or infinity
/// - [`MathError::ConvergenceFailed`] after `config.max_iterations`
///
/// Each failure carries the number of iterations spent, so a fallback can
/// report the total.
pub fn bounded_newton<F, DF>(
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
    let (lo, hi) = bounds;
    if lo > hi || lo.is_nan() || hi.is_nan() {
        return Err(MathError::invalid_input(format!(
            "empty Newton domain [{lo}, {hi}]"
        )));
    }

    let mut x = initial_guess.clamp(lo, hi);
    let mut clamp_hits = 0;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::NonFinite { iterations: iteration });
        }
        if fx.abs() < config.tolerance {
            return Ok(SolverResult::newton(x, iteration, fx));
        }

        let dfx = df(x);
        if !dfx.is_finite() {
            return Err(MathError::NonFinite { iterations: iteration });
        }
        if dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DerivativeUnderflow {
                iterations: iteration,
                value: dfx,
            });
        }

        let mut next = x - fx / dfx;
        if !next.is_finite() {
            return Err(MathError::NonFinite {
                iterations: iteration + 1,
            });
        }
        let clamped = next < lo || next > hi;
        if clamped {
            next = next.clamp(lo, hi);
            clamp_hits += 1;
            if clamp_hits >= config.max_clamp_hits {
                return Err(MathError::BoundaryStuck {
                    iterations: iteration + 1,
                    bound: next,
                });
            }
        }

        let step = next - x;
        x = next;

        if !clamped && step.abs() < config.step_tolerance {
            let final_fx = f(x);
            return Ok(SolverResult::newton(x, iteration + 1, final_fx));
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = bounded_newton(f, df, 1.5, (0.0, 10.0), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
        assert!(result.fallback_reason.is_none());
    }

    #[test]
    fn test_zero_derivative() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let err = bounded_newton(f, df, 0.0, (-5.0, 5.0), &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::DerivativeUnderflow { iterations: 0, .. }));
    }

    #[test]
    fn test_clamped_iterates_give_up() {
        // Root at 20 lies outside the domain; every step overshoots the upper bound.
        let f = |x: f64| x - 20.0;
        let df = |_x: f64| 1.0;

        let err = bounded_newton(f, df, 0.0, (-0.99, 10.0), &SolverConfig::default()).unwrap_err();
        match err {
            MathError::BoundaryStuck { bound, iterations } => {
                assert_relative_eq!(bound, 10.0);
                assert_eq!(iterations, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_single_clamp_recovers() {
        // The first step from 0.1 lands near 20 and is pulled back to 10;
        // Newton then converges from there.
        let f = |x: f64| x * x - 4.0;
        let df = |x: f64| 2.0 * x;

        let result = bounded_newton(f, df, 0.1, (0.0, 10.0), &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_non_convergence() {
        let f = |x: f64| x.atan();
        let df = |x: f64| 1.0 / (1.0 + x * x);
        let config = SolverConfig::default().with_max_iterations(3);

        // Far from the root Newton on atan oscillates with growing amplitude.
        let err = bounded_newton(f, df, 1.5, (f64::NEG_INFINITY, f64::INFINITY), &config).unwrap_err();
        assert!(matches!(
            err,
            MathError::ConvergenceFailed { .. } | MathError::NonFinite { .. }
        ));
    }
}
