//! Pricing: present value, yield solving and yield-to-worst.

mod present_value;
mod workout;
mod yield_solver;

pub use present_value::{present_value, PriceResult, PricingSchedule};
pub use workout::{yield_to_worst, WorkoutContext, WorkoutKind, WorkoutResult, WorkoutYield};
pub use yield_solver::{
    YieldResult, YieldSolver, DEFAULT_PRICE_TOLERANCE, DEFAULT_SEED, DEFAULT_YIELD_BOUNDS,
    MAX_PRICE_TOLERANCE,
};
