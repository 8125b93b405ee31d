//! Cash-flow schedule construction.
//!
//! - [`coupon_periods`] / [`coupon_dates`]: the coupon date ladder
//! - [`CashFlowGenerator::generate`]: coupons, amortization and maturity flows
//! - [`CashFlowGenerator::accept_predefined`]: validation of a supplied schedule

mod builder;
mod schedule;

pub use builder::CashFlowGenerator;
pub use schedule::{coupon_dates, coupon_periods, CouponPeriod};
