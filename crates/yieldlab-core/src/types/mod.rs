//! Domain types.

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{CashFlow, PaymentType};
pub use date::Date;
pub use frequency::Frequency;
