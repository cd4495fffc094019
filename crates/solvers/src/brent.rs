//! Brent's method for bracketed roots, backed by the `roots` crate.
//!
//! This module validates the bracket, checks the endpoints, and adapts a
//! fallible [`Function`] to the bare `f64 -> f64` closure the crate expects.
//! The first evaluation failure is kept and stops the search.

mod config;
mod error;
mod solution;

pub use config::{Config, MIN_REL_TOL};
pub use error::Error;
pub use solution::{Solution, Status};

use std::cell::{Cell, RefCell};

use roots::{Convergency, SearchError, find_root_brent};
use rootlab_core::Function;

/// Finds a root in `bracket` using Brent's method.
///
/// The endpoints may be given in either order. An endpoint where the
/// function is exactly zero is returned immediately.
///
/// # Errors
///
/// Returns an error if an endpoint is non-finite, the endpoint values share
/// a sign, or the function fails during evaluation. Running out of
/// iterations is not an error: check [`Solution::converged`].
#[allow(clippy::float_cmp)]
pub fn solve<F: Function>(function: &F, bracket: [f64; 2], config: &Config) -> Result<Solution, Error> {
    let [left, right] = bracket;
    for value in bracket {
        if !value.is_finite() {
            return Err(Error::NonFiniteBracket { value });
        }
    }

    let counted = Counted::new(function);
    let left_value = counted.eval(left)?;
    let right_value = counted.eval(right)?;

    if left_value == 0.0 {
        return Ok(counted.finish(Status::Converged, left, left_value, 0));
    }
    if right_value == 0.0 {
        return Ok(counted.finish(Status::Converged, right, right_value, 0));
    }
    let no_sign_change = || Error::NoSignChange {
        left,
        right,
        left_value,
        right_value,
    };
    if left_value.is_sign_negative() == right_value.is_sign_negative() {
        return Err(no_sign_change());
    }

    let checked = counted.calls.get();
    let mut tolerance = Tolerance {
        config,
        counted: &counted,
    };
    let result = find_root_brent(left, right, |x| counted.value(x), &mut tolerance);
    counted.check()?;

    // The crate evaluates both endpoints again, then once per iteration.
    let iters = (counted.calls.get() - checked).saturating_sub(2);

    match result {
        Ok(x) => {
            let residual = counted.eval(x)?;
            Ok(counted.finish(Status::Converged, x, residual, iters))
        }
        Err(SearchError::NoConvergency) => {
            let (x, residual) = counted.last.get();
            Ok(counted.finish(Status::MaxIters, x, residual, config.max_iters()))
        }
        Err(_) => Err(no_sign_change()),
    }
}

/// Wraps a function to count evaluations and reject non-finite values.
struct Counted<'f, F> {
    function: &'f F,
    calls: Cell<usize>,
    last: Cell<(f64, f64)>,
    failure: RefCell<Option<Error>>,
}

impl<'f, F: Function> Counted<'f, F> {
    fn new(function: &'f F) -> Self {
        Self {
            function,
            calls: Cell::new(0),
            last: Cell::new((f64::NAN, f64::NAN)),
            failure: RefCell::new(None),
        }
    }

    fn eval(&self, x: f64) -> Result<f64, Error> {
        self.calls.set(self.calls.get() + 1);
        let value = self.function.call(x).map_err(|error| Error::Function {
            x,
            source: Box::new(error),
        })?;
        if !value.is_finite() {
            return Err(Error::NonFiniteValue { x, value });
        }
        self.last.set((x, value));
        Ok(value)
    }

    /// Evaluates for the root finder, which only takes plain values.
    ///
    /// After the first failure every call returns NaN without evaluating.
    fn value(&self, x: f64) -> f64 {
        if self.failed() {
            return f64::NAN;
        }
        self.eval(x).unwrap_or_else(|error| {
            *self.failure.borrow_mut() = Some(error);
            f64::NAN
        })
    }

    fn failed(&self) -> bool {
        self.failure.borrow().is_some()
    }

    fn check(&self) -> Result<(), Error> {
        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn finish(&self, status: Status, x: f64, residual: f64, iters: usize) -> Solution {
        Solution {
            status,
            x,
            residual,
            iters,
            calls: self.calls.get(),
        }
    }
}

/// Stopping rules handed to the root finder.
///
/// A recorded evaluation failure counts as both a found root and a reached
/// limit, so the search ends on its next check.
struct Tolerance<'a, 'f, F> {
    config: &'a Config,
    counted: &'a Counted<'f, F>,
}

impl<F: Function> Convergency<f64> for Tolerance<'_, '_, F> {
    #[allow(clippy::float_cmp)]
    fn is_root_found(&mut self, y: f64) -> bool {
        y == 0.0 || self.counted.failed()
    }

    fn is_converged(&mut self, x1: f64, x2: f64) -> bool {
        let scale = x1.abs().min(x2.abs());
        (x1 - x2).abs() < self.config.x_abs_tol() + self.config.x_rel_tol() * scale
    }

    fn is_iteration_limit_reached(&mut self, iter: usize) -> bool {
        iter >= self.config.max_iters() || self.counted.failed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use rootlab_core::compile;

    /// f(x) = x³ - 2x - 5, the classic Wallis example.
    struct Wallis;

    impl Function for Wallis {
        type Error = Infallible;

        fn call(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(x.powi(3) - 2.0 * x - 5.0)
        }
    }

    const WALLIS_ROOT: f64 = 2.094_551_481_542_326_5;

    fn config(tol: f64) -> Config {
        Config::new(tol).expect("valid config")
    }

    #[test]
    fn finds_wallis_root() {
        let solution = solve(&Wallis, [2.0, 3.0], &config(1e-12)).expect("should solve");

        assert!(solution.converged());
        assert_relative_eq!(solution.x, WALLIS_ROOT, epsilon = 1e-10);
        assert!(solution.iters < 20);
        assert!(solution.calls >= solution.iters);
    }

    #[test]
    fn root_stays_inside_bracket() {
        let function = compile("cos(x) - x").expect("valid expression");
        let solution = solve(&function, [0.0, 1.0], &config(1e-10)).expect("should solve");

        assert!(solution.converged());
        assert!((0.0..=1.0).contains(&solution.x));
        assert_relative_eq!(solution.x, 0.739_085_133_215_160_6, epsilon = 1e-8);
    }

    #[test]
    fn accepts_reversed_bracket() {
        let solution = solve(&Wallis, [3.0, 2.0], &config(1e-12)).expect("should solve");

        assert!(solution.converged());
        assert_relative_eq!(solution.x, WALLIS_ROOT, epsilon = 1e-10);
    }

    #[test]
    fn coarse_tolerance_stops_early() {
        let loose = solve(&Wallis, [2.0, 3.0], &config(1e-2)).expect("should solve");
        let tight = solve(&Wallis, [2.0, 3.0], &config(1e-12)).expect("should solve");

        assert!(loose.converged());
        assert!(loose.iters <= tight.iters);
        assert!((loose.x - WALLIS_ROOT).abs() < 1e-2);
    }

    #[test]
    fn zero_endpoint_is_returned_immediately() {
        let function = compile("x**2 - 4").expect("valid expression");
        let solution = solve(&function, [1.0, 2.0], &config(1e-4)).expect("should solve");

        assert!(solution.converged());
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let solution = solve(&Wallis, [2.0, 3.0], &config(1e-12).with_max_iters(2))
            .expect("should return");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 2);
        assert!(!solution.converged());
    }

    #[test]
    fn errors_without_sign_change() {
        let result = solve(&Wallis, [3.0, 4.0], &config(1e-8));
        assert!(matches!(result, Err(Error::NoSignChange { .. })));
    }

    #[test]
    fn errors_on_non_finite_bracket() {
        let result = solve(&Wallis, [f64::NEG_INFINITY, 3.0], &config(1e-8));
        assert!(matches!(result, Err(Error::NonFiniteBracket { .. })));
    }

    #[test]
    fn propagates_evaluation_failures() {
        let function = compile("1/x - 1").expect("valid expression");
        let result = solve(&function, [0.0, 2.0], &config(1e-8));
        assert!(matches!(result, Err(Error::Function { x, .. }) if x == 0.0));
    }

    /// f(x) = x - 2, undefined strictly between 1 and 2.5.
    struct Gap {
        nan: bool,
    }

    impl Function for Gap {
        type Error = rootlab_core::EvalError;

        fn call(&self, x: f64) -> Result<f64, Self::Error> {
            if x > 1.0 && x < 2.5 {
                if self.nan {
                    return Ok(f64::NAN);
                }
                return Err(rootlab_core::EvalError::DivisionByZero);
            }
            Ok(x - 2.0)
        }
    }

    #[test]
    fn interior_failure_stops_the_search() {
        let result = solve(&Gap { nan: false }, [0.0, 3.0], &config(1e-8));
        assert!(matches!(result, Err(Error::Function { x, .. }) if x > 1.0 && x < 2.5));

        let result = solve(&Gap { nan: true }, [0.0, 3.0], &config(1e-8));
        assert!(matches!(result, Err(Error::NonFiniteValue { x, .. }) if x > 1.0 && x < 2.5));
    }

    #[test]
    fn rejects_small_relative_tolerance() {
        let result = config(1e-8).with_rel_tol(f64::EPSILON);
        assert!(matches!(
            result,
            Err(crate::ConfigError::RelativeTolerance { .. })
        ));
    }
}
