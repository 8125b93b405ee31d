//! # Yieldlab Analytics
//!
//! The request/response façade of the Yieldlab bond analytics engine. It is
//! the only layer external callers talk to:
//!
//! - [`CalculationRequestDto`]: the JSON request, rates in percent
//! - [`CalculationRequest`]: the typed request, exactly one [`Locked`] input
//! - [`AnalyticsEngine`]: runs schedule, pricing or solving, and risk
//! - [`CalculationResponse`]: the `success | error` envelope
//! - [`EngineConfig`]: solver settings, loadable from TOML
//!
//! ## Example
//!
//! ```rust
//! use yieldlab_analytics::AnalyticsEngine;
//!
//! let response = AnalyticsEngine::new().respond_json(r#"{
//!     "bond": {
//!         "issuer": "Acme", "currency": "USD", "faceValue": 1000,
//!         "issueDate": "2025-01-15", "maturityDate": "2030-01-15",
//!         "couponRate": 4.0
//!     },
//!     "settlementDate": "2025-01-15",
//!     "targetYield": 4.0
//! }"#);
//! assert!(response.is_success());
//! ```
//!
//! ## Features
//!
//! - `parallel`: evaluate [`AnalyticsEngine::calculate_batch`] and
//!   [`AnalyticsEngine::respond_batch`] with rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod engine;
pub mod error;
pub mod request;
pub mod result;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{AnalyticsEngine, CalculationState};
    pub use crate::error::{AnalyticsError, EngineResult, ErrorKind};
    pub use crate::request::{Benchmark, CalculationRequest, CalculationRequestDto, Locked};
    pub use crate::result::{
        AnalyticsResult, AnalyticsResultDto, CalculationResponse, ScheduleResponse,
    };
}

pub use config::EngineConfig;
pub use engine::{AnalyticsEngine, CalculationState};
pub use error::{AnalyticsError, ConfigIssue, EngineResult, ErrorKind};
pub use request::{
    Benchmark, BenchmarkDto, BondTermsDto, CalculationRequest, CalculationRequestDto, CashFlowDto,
    CouponChangeDto, Locked,
};
pub use result::{
    AnalyticsResult, AnalyticsResultDto, CalculationResponse, ErrorBody, ScheduleResponse,
    WorkoutYieldDto,
};
