//! Bracket search, Brent root and bisection trace in one call.
//!
//! The reported root comes from [`brent`], which is robust and fast. The
//! reported steps come from an independent [`bisection`] run over the same
//! initial bracket, since its midpoints and half-widths are easy to follow.
//! The two are computed separately and may disagree in the last digits.

use thiserror::Error;

use rootlab_core::{Function, Observer};

use crate::{
    ConfigError, bisection,
    bracket::{self, Bracket},
    brent,
};

/// Configuration for each stage of a bracketed solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub search: bracket::Config,
    pub brent: brent::Config,
    pub trace: bisection::Config,
}

impl Config {
    /// Uses `tol` for both Brent and the trace, with the default search.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive.
    pub fn new(tol: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            search: bracket::Config::default(),
            brent: brent::Config::new(tol)?,
            trace: bisection::Config::new(tol)?,
        })
    }
}

/// Errors from any stage of a bracketed solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bracket(#[from] bracket::Error),

    #[error(transparent)]
    Brent(#[from] brent::Error),

    #[error("Brent's method did not converge after {iters} iterations (last estimate {x})")]
    NotConverged { iters: usize, x: f64 },

    #[error(transparent)]
    Trace(#[from] bisection::Error),
}

/// The result of a bracketed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Bracket found by the search.
    pub bracket: Bracket,

    /// Converged Brent solution; its `x` is the root.
    pub root: brent::Solution,

    /// Bisection trace over `bracket`.
    pub trace: bisection::Solution,
}

/// Finds a bracket around `x0`, solves it with Brent and traces bisection.
///
/// The observer receives the bisection events.
///
/// # Errors
///
/// Returns an error if no bracket is found, Brent fails or does not
/// converge, or the function fails during the trace.
pub fn solve<F, Obs>(
    function: &F,
    x0: f64,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    F: Function,
    Obs: Observer<bisection::Event, bisection::Action>,
{
    let (bracket, solution) = root(function, x0, config)?;
    let trace = bisection::solve(function, bracket.as_array(), &config.trace, observer)?;

    Ok(Solution {
        bracket,
        root: solution,
        trace,
    })
}

/// Finds a bracket around `x0` and solves it with Brent, without a trace.
///
/// # Errors
///
/// Returns an error if no bracket is found or Brent fails or does not
/// converge.
pub fn root<F: Function>(
    function: &F,
    x0: f64,
    config: &Config,
) -> Result<(Bracket, brent::Solution), Error> {
    let bracket = bracket::find(function, x0, &config.search)?;
    let solution = brent::solve(function, bracket.as_array(), &config.brent)?;
    if !solution.converged() {
        return Err(Error::NotConverged {
            iters: solution.iters,
            x: solution.x,
        });
    }
    Ok((bracket, solution))
}
