//! # Yieldlab Core
//!
//! Foundational types for the Yieldlab bond analytics engine.
//!
//! - **Types**: [`Date`], [`Frequency`], [`CashFlow`] and [`PaymentType`]
//! - **Day Count Conventions**: 30/360, ACT/ACT (ICMA), ACT/360 and ACT/365
//!
//! Everything in this crate is pure calendar arithmetic. Dates carry no time
//! component, so there is no timezone to get wrong.
//!
//! ## Example
//!
//! ```rust
//! use yieldlab_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let yf = DayCountConvention::Thirty360
//!     .period_fraction(start, end, Frequency::SemiAnnual)
//!     .unwrap();
//! assert_eq!(yf, rust_decimal_macros::dec!(0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, Date, Frequency, PaymentType};
}

pub use error::{CoreError, CoreResult};
pub use types::{CashFlow, Date, Frequency, PaymentType};
