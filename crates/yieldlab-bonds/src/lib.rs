//! # Yieldlab Bonds
//!
//! Fixed-coupon bond mechanics for the Yieldlab analytics engine.
//!
//! - **Types**: [`types::BondTerms`] and the optional feature schedules
//!   (amortization, calls, puts, coupon steps)
//! - **Cash Flows**: coupon ladder and dated flow generation, or validation
//!   of a supplied schedule
//! - **Pricing**: present value, price-to-yield, yield-to-worst
//! - **Risk**: duration, convexity, DV01, spread
//!
//! Money amounts in schedules are exact decimals; pricing converts them to
//! `f64` once per calculation.
//!
//! ## Example
//!
//! ```rust
//! use yieldlab_bonds::prelude::*;
//! use yieldlab_core::types::{Date, Frequency};
//! use rust_decimal_macros::dec;
//!
//! let issue = Date::from_ymd(2025, 1, 15).unwrap();
//! let terms = BondTerms::builder()
//!     .issuer("Acme Corp")
//!     .currency("USD")
//!     .face_value(dec!(1000))
//!     .issue_date(issue)
//!     .maturity_date(Date::from_ymd(2035, 1, 15).unwrap())
//!     .coupon_rate(dec!(0.05))
//!     .frequency(Frequency::SemiAnnual)
//!     .build()
//!     .unwrap();
//!
//! let flows = CashFlowGenerator::generate(&terms, &BondFeatures::default()).unwrap();
//! let schedule = PricingSchedule::new(
//!     &flows,
//!     issue,
//!     issue,
//!     terms.face_value(),
//!     terms.day_count(),
//!     terms.frequency(),
//! )
//! .unwrap();
//!
//! let ytm = YieldSolver::new().solve(&schedule, 100.0).unwrap();
//! assert!((ytm.yield_value - 0.05).abs() < 1e-9);
//!
//! let risk = RiskCalculator::calculate(&schedule, ytm.yield_value);
//! assert!((risk.modified_duration - 7.79).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{coupon_periods, CashFlowGenerator, CouponPeriod};
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{
        present_value, yield_to_worst, PriceResult, PricingSchedule, WorkoutContext,
        WorkoutKind, WorkoutResult, WorkoutYield, YieldResult, YieldSolver,
    };
    pub use crate::risk::{current_yield, spread_bp, yield_from_spread, RiskCalculator, RiskMetrics};
    pub use crate::types::{
        AmortizationEntry, AmortizationSchedule, BondFeatures, BondTerms, CallSchedule,
        CouponRateChange, CouponSteps, ExerciseStyle, ExerciseWindow, OptionKind, OptionSchedule,
        PutSchedule,
    };
}

pub use error::{BondError, BondResult};
