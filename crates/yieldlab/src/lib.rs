//! # Yieldlab
//!
//! Bond valuation and yield analytics. This crate re-exports the workspace:
//!
//! - [`core`]: dates, frequencies, day counts, cash flows
//! - [`math`]: root finders
//! - [`bonds`]: terms, features, schedule generation, pricing, risk
//! - [`analytics`]: requests, the engine, and the response envelope
//!
//! ```rust
//! use yieldlab::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let terms = BondTerms::builder()
//!     .issuer("Acme")
//!     .currency("USD")
//!     .face_value(dec!(1000))
//!     .issue_date(Date::from_ymd(2025, 1, 15).unwrap())
//!     .maturity_date(Date::from_ymd(2030, 1, 15).unwrap())
//!     .coupon_rate(dec!(0.04))
//!     .build()
//!     .unwrap();
//!
//! let request = CalculationRequest::new(terms, Date::from_ymd(2025, 1, 15).unwrap(), Locked::Yield(0.04));
//! let result = AnalyticsEngine::new().calculate(&request).unwrap();
//! assert!((result.clean_price - 100.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub use yieldlab_analytics as analytics;
pub use yieldlab_bonds as bonds;
pub use yieldlab_core as core;
pub use yieldlab_math as math;

pub use yieldlab_analytics::{
    AnalyticsEngine, AnalyticsError, AnalyticsResult, CalculationRequest, CalculationRequestDto,
    CalculationResponse, EngineConfig, Locked,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use yieldlab_analytics::prelude::*;
    pub use yieldlab_bonds::types::{BondFeatures, BondTerms};
    pub use yieldlab_core::daycounts::DayCountConvention;
    pub use yieldlab_core::types::{CashFlow, Date, Frequency, PaymentType};
}
