//! Expanding search for a sign-change bracket.
//!
//! Starting from `[x0, x0 + step]`, the interval grows by `step` on both
//! sides until the function takes opposite signs at its ends (or vanishes at
//! one of them). The search is deliberately simple and non-adaptive: it
//! assumes the function is defined across the swept range, and an evaluation
//! failure anywhere in the sweep ends the search.

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use rootlab_core::Function;

/// An interval whose endpoint values straddle zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_value: f64,
    right_value: f64,
}

impl Bracket {
    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the left endpoint.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Returns the right endpoint.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Returns the function values at the left and right endpoints.
    #[must_use]
    pub fn values(&self) -> [f64; 2] {
        [self.left_value, self.right_value]
    }

    /// Returns true if `x` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.left..=self.right).contains(&x)
    }
}

/// Searches outward from `x0` for a bracket.
///
/// # Errors
///
/// Returns [`Error::NotFound`] once a widened interval leaves
/// `[-limit, limit]`, or an evaluation error if the function fails anywhere
/// in the sweep. The seed interval is always tried, wherever it lies.
pub fn find<F: Function>(function: &F, x0: f64, config: &Config) -> Result<Bracket, Error> {
    if !x0.is_finite() {
        return Err(Error::NonFiniteStart { x0 });
    }

    let step = config.step();
    let limit = config.limit();
    let mut left = x0;
    let mut right = x0 + step;

    loop {
        let left_value = evaluate(function, left)?;
        let right_value = evaluate(function, right)?;
        if straddles(left_value, right_value) {
            return Ok(Bracket {
                left,
                right,
                left_value,
                right_value,
            });
        }

        left -= step;
        right += step;
        if left < -limit || right > limit {
            return Err(Error::NotFound { limit });
        }
    }
}

/// Returns true if the values have opposite signs or either is zero.
fn straddles(a: f64, b: f64) -> bool {
    a == 0.0 || b == 0.0 || a.is_sign_negative() != b.is_sign_negative()
}

fn evaluate<F: Function>(function: &F, x: f64) -> Result<f64, Error> {
    let value = function.call(x).map_err(|error| Error::Function {
        x,
        source: Box::new(error),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue { x, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use rootlab_core::compile;

    /// f(x) = x² - 4.
    struct Parabola;

    impl Function for Parabola {
        type Error = Infallible;

        fn call(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(x * x - 4.0)
        }
    }

    #[test]
    fn seed_interval_with_zero_endpoint_is_a_bracket() {
        let bracket = find(&Parabola, 1.0, &Config::default()).expect("bracket");

        assert_eq!(bracket.as_array(), [1.0, 2.0]);
        assert_relative_eq!(bracket.values()[1], 0.0);
    }

    #[test]
    fn expands_symmetrically() {
        // f(x) = x - 7.5 needs seven widenings from [0, 1].
        let function = compile("x - 7.5").expect("valid expression");
        let bracket = find(&function, 0.0, &Config::default()).expect("bracket");

        assert_eq!(bracket.as_array(), [-7.0, 8.0]);
        let [fa, fb] = bracket.values();
        assert!(fa * fb < 0.0);
        assert!(bracket.contains(7.5));
    }

    #[test]
    fn stays_within_search_radius() {
        let function = compile("x - 99.5").expect("valid expression");
        let bracket = find(&function, 0.0, &Config::default()).expect("bracket");

        assert!(bracket.left() >= -100.0);
        assert!(bracket.right() <= 100.0);
        assert_eq!(bracket.as_array(), [-99.0, 100.0]);
    }

    #[test]
    fn fails_without_real_root() {
        let function = compile("x**2 + 1").expect("valid expression");
        let result = find(&function, 0.0, &Config::default());

        assert!(matches!(result, Err(Error::NotFound { limit }) if limit == 100.0));
    }

    #[test]
    fn seed_interval_is_tried_outside_radius() {
        let function = compile("x - 100").expect("valid expression");
        let bracket = find(&function, 100.0, &Config::default()).expect("bracket");
        assert_eq!(bracket.as_array(), [100.0, 101.0]);

        let function = compile("x - 99.7").expect("valid expression");
        let bracket = find(&function, 99.5, &Config::default()).expect("bracket");
        assert_eq!(bracket.as_array(), [99.5, 100.5]);
    }

    #[test]
    fn widening_past_radius_fails() {
        let function = compile("x - 150").expect("valid expression");
        let result = find(&function, 140.0, &Config::default());
        assert!(matches!(result, Err(Error::NotFound { .. })));

        let function = compile("x**2 + 1").expect("valid expression");
        let result = find(&function, -150.5, &Config::default());
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn evaluation_failure_ends_the_sweep() {
        // [1, 2] has no sign change, so the next round evaluates 1/0.
        let function = compile("1/x").expect("valid expression");
        let result = find(&function, 1.0, &Config::default());

        assert!(matches!(result, Err(Error::Function { x, .. }) if x == 0.0));
    }

    #[test]
    fn honors_custom_config() {
        let config = Config::new(0.5, 3.0).expect("valid config");
        let function = compile("x - 2.75").expect("valid expression");
        let bracket = find(&function, 0.0, &config).expect("bracket");
        assert_eq!(bracket.as_array(), [-2.5, 3.0]);

        let function = compile("x - 3.25").expect("valid expression");
        assert!(matches!(
            find(&function, 0.0, &config),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_start() {
        assert!(matches!(
            find(&Parabola, f64::NAN, &Config::default()),
            Err(Error::NonFiniteStart { .. })
        ));
    }
}
