//! Single-variable root finding for [`Function`]s.
//!
//! # Solvers
//!
//! - [`newton`]: Newton-Raphson refinement from a starting point, using an
//!   explicit derivative
//! - [`bracket`]: expanding search for an interval with a sign change
//! - [`brent`]: Brent's method on a sign-change bracket, via `roots`
//! - [`bisection`]: classic interval halving, recorded step by step
//! - [`bracketed`]: the bracket search, Brent and bisection combined. Brent
//!   supplies the root while bisection supplies the reported trace.
//!
//! Solvers that report progress return a trace of [`Step`]s, each rounded to
//! six decimal places.
//!
//! [`Function`]: rootlab_core::Function

mod config;
mod step;

pub mod bisection;
pub mod bracket;
pub mod bracketed;
pub mod brent;
pub mod newton;

pub use config::ConfigError;
pub use step::{REPORT_DECIMALS, Step, rounded};

/// Iteration cap shared by every solver's default configuration.
pub const DEFAULT_MAX_ITERS: usize = 100;
