//! Newton-Raphson root refinement.
//!
//! Starting from `x0`, each iteration applies
//!
//! ```text
//! x_{i+1} = x_i - f(x_i) / f'(x_i)
//! ```
//!
//! and measures progress by the relative change `|(x_{i+1} - x_i) / x_{i+1}|`.
//! When `x_{i+1}` is exactly zero the absolute change is used instead.
//!
//! # Example
//!
//! ```ignore
//! use rootlab_core::compile;
//! use rootlab_solvers::newton;
//!
//! let function = compile("x**2 - 4")?;
//! let derivative = function.differentiate();
//! let config = newton::Config::new(1e-4)?;
//!
//! let solution = newton::solve_unobserved(&function, &derivative, 1.0, &config)?;
//! assert!(solution.converged());
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use std::error::Error as StdError;

use rootlab_core::{Function, Observer};

use crate::Step;

/// Refines `x0` toward a root of `function`.
///
/// # Observer
///
/// The observer receives an [`Event`] after each iteration and may return
/// [`Action::StopEarly`]. A converging iteration reports `Converged` even if
/// the observer asks to stop on it.
///
/// # Errors
///
/// Returns an error if `x0` is not finite, either function fails or returns
/// a non-finite value, the derivative vanishes, or an update overflows.
/// Exhausting the iteration cap is not an error: the last estimate is
/// returned with [`Status::MaxIters`].
#[allow(clippy::float_cmp)]
pub fn solve<F, D, Obs>(
    function: &F,
    derivative: &D,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: Function,
    D: Function,
    Obs: Observer<Event, Action>,
{
    if !x0.is_finite() {
        return Err(Error::NonFiniteGuess { x0 });
    }

    let mut x = x0;
    let mut steps = Vec::new();

    for iter in 1..=config.max_iters() {
        let fx = finite(x, function.call(x))
            .map_err(|err| err.into_error(|x, source| Error::Function { x, source }))?;
        let dfx = finite(x, derivative.call(x))
            .map_err(|err| err.into_error(|x, source| Error::Derivative { x, source }))?;
        if dfx == 0.0 {
            return Err(Error::ZeroDerivative { x });
        }

        let next = x - fx / dfx;
        if !next.is_finite() {
            return Err(Error::Diverged { x, next });
        }

        let error = if next == 0.0 {
            (next - x).abs()
        } else {
            ((next - x) / next).abs()
        };
        steps.push(Step::rounded(x, fx, error));

        let event = Event {
            iter,
            x,
            fx,
            dfx,
            next,
            error,
        };
        let action = observer.observe(&event);

        if error < config.tol() {
            return Ok(Solution {
                status: Status::Converged,
                x: next,
                iters: iter,
                steps,
            });
        }
        if let Some(Action::StopEarly) = action {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                x: next,
                iters: iter,
                steps,
            });
        }

        x = next;
    }

    Ok(Solution {
        status: Status::MaxIters,
        x,
        iters: config.max_iters(),
        steps,
    })
}

/// Refines `x0` toward a root of `function` without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F, D>(
    function: &F,
    derivative: &D,
    x0: f64,
    config: &Config,
) -> Result<Solution, Error>
where
    F: Function,
    D: Function,
{
    solve(function, derivative, x0, config, ())
}

type Source = Box<dyn StdError + Send + Sync>;

/// A failed evaluation, before it is attributed to the function or its
/// derivative.
enum EvalFailure {
    Call { x: f64, source: Source },
    NonFinite { x: f64, value: f64 },
}

impl EvalFailure {
    fn into_error(self, call: fn(f64, Source) -> Error) -> Error {
        match self {
            Self::Call { x, source } => call(x, source),
            Self::NonFinite { x, value } => Error::NonFiniteValue { x, value },
        }
    }
}

fn finite<E>(x: f64, result: Result<f64, E>) -> Result<f64, EvalFailure>
where
    E: StdError + Send + Sync + 'static,
{
    match result {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(EvalFailure::NonFinite { x, value }),
        Err(error) => Err(EvalFailure::Call {
            x,
            source: Box::new(error),
        }),
    }
}
