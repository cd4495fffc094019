//! Core types for the Rootlab root finder.
//!
//! This crate defines the pieces that solvers and the service build on:
//!
//! - [`Function`]: a scalar function of one real variable that may fail
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`Expression`]: a parsed formula in one free variable, evaluable at a
//!   point and symbolically differentiable

pub mod expr;

mod function;
mod observer;

pub use expr::{EvalError, Expression, ParseError, compile};
pub use function::Function;
pub use observer::Observer;
