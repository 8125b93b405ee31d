//! # Yieldlab Math
//!
//! Numerical root finding for the Yieldlab bond analytics engine.
//!
//! - [`solvers::bounded_newton`]: Newton with every iterate clamped to a domain
//! - [`solvers::bisection`]: bracketing fallback
//! - [`solvers::hybrid`]: bounded Newton first, bisection over the domain if it fails
//!
//! All solvers work on `f64`; callers convert exact decimal inputs once at
//! the boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, bounded_newton, hybrid, SolverConfig, SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
