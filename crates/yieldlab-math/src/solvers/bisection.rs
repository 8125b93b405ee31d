//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Requires `f(a)` and `f(b)` of opposite sign (or one of them zero).
/// Stops when `|f(mid)| < config.tolerance` or the half-bracket drops below
/// `config.step_tolerance`. Runs at most `config.bisection_max_iterations`
/// halvings; `config.max_iterations` budgets Newton only.
///
/// # Example
///
/// ```rust
/// use yieldlab_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(MathError::NonFinite { iterations: 0 });
    }
    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult::bisection(lo, 0, f_lo));
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult::bisection(hi, 0, f_hi));
    }

    for iteration in 0..config.bisection_max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.step_tolerance {
            return Ok(SolverResult::bisection(mid, iteration + 1, f_mid));
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.bisection_max_iterations,
        f(mid).abs(),
    ))
}
