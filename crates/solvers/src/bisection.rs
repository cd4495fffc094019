//! Classic bisection, recorded step by step.
//!
//! Each iteration evaluates the midpoint `c` of `[a, b]`, records
//! `{c, f(c), |b - a| / 2}` and keeps the half whose ends still straddle
//! zero. The trace stops once the half-width drops below the tolerance or
//! `f(c)` is exactly zero.

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

use rootlab_core::{Function, Observer};

use crate::Step;

/// Halves `bracket` until the tolerance or the iteration cap is reached.
///
/// The endpoints may be given in either order. An endpoint where the
/// function is exactly zero counts as a sign change, and halving then keeps
/// that endpoint inside the interval.
///
/// # Errors
///
/// Returns an error if the bracket is non-finite, has zero width, shows no
/// sign change, or the function fails at an evaluated point.
#[allow(clippy::float_cmp)]
pub fn solve<F, Obs>(
    function: &F,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: Function,
    Obs: Observer<Event, Action>,
{
    for value in bracket {
        if !value.is_finite() {
            return Err(Error::NonFiniteBracket { value });
        }
    }
    let [mut a, mut b] = bracket;
    if a == b {
        return Err(Error::ZeroWidth { x: a });
    }
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    let mut fa = evaluate(function, a)?;
    let fb = evaluate(function, b)?;
    if fa != 0.0 && fb != 0.0 && fa.is_sign_negative() == fb.is_sign_negative() {
        return Err(Error::NoSignChange {
            left: a,
            right: b,
            left_value: fa,
            right_value: fb,
        });
    }

    let mut x = 0.5 * (a + b);
    let mut steps = Vec::new();

    for iter in 1..=config.max_iters() {
        x = 0.5 * (a + b);
        let fx = evaluate(function, x)?;
        let error = 0.5 * (b - a);
        steps.push(Step::rounded(x, fx, error));

        let event = Event {
            iter,
            bracket: [a, b],
            x,
            fx,
            error,
        };
        let action = observer.observe(&event);

        let status = if error < config.tol() {
            Some(Status::Converged)
        } else if fx == 0.0 {
            Some(Status::ExactRoot)
        } else if let Some(Action::StopEarly) = action {
            Some(Status::StoppedByObserver)
        } else {
            None
        };
        if let Some(status) = status {
            return Ok(Solution {
                status,
                x,
                iters: iter,
                steps,
            });
        }

        if fa == 0.0 || fa.is_sign_negative() != fx.is_sign_negative() {
            b = x;
        } else {
            a = x;
            fa = fx;
        }
    }

    Ok(Solution {
        status: Status::MaxIters,
        x,
        iters: config.max_iters(),
        steps,
    })
}

/// Traces bisection over `bracket` without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    function: &F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error> {
    solve(function, bracket, config, ())
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

    use approx::assert_relative_eq;
    use rootlab_core::{Expression, compile};

    fn parabola() -> Expression {
        compile("x**2 - 4").expect("valid expression")
    }

    fn config(tol: f64) -> Config {
        Config::new(tol).expect("valid config")
    }

    #[test]
    fn halves_until_tolerance() {
        let solution =
            solve_unobserved(&parabola(), [1.0, 2.0], &config(1e-4)).expect("should trace");

        // Half-widths run 0.5, 0.25, ... and first drop below 1e-4 at 2^-14.
        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 14);
        assert_eq!(solution.steps.len(), 14);
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-4);

        assert_eq!(
            solution.steps[0],
            Step {
                x: 1.5,
                fx: -1.75,
                error: 0.5,
            }
        );
        assert!(solution.steps.windows(2).all(|w| w[1].error < w[0].error));
    }

    #[test]
    fn stops_on_exact_root() {
        let solution =
            solve_unobserved(&parabola(), [1.0, 3.0], &config(1e-4)).expect("should trace");

        assert_eq!(solution.status, Status::ExactRoot);
        assert!(solution.converged());
        assert_eq!(solution.iters, 1);
        assert_eq!(solution.x, 2.0);
    }

    #[test]
    fn keeps_zero_left_endpoint_inside() {
        let solution =
            solve_unobserved(&parabola(), [2.0, 3.0], &config(1e-6)).expect("should trace");

        assert!(solution.converged());
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn orders_reversed_bracket() {
        let mut brackets = Vec::new();
        let observer = |event: &Event| -> Option<Action> {
            brackets.push(event.bracket);
            None
        };

        solve(&parabola(), [3.0, 1.5], &config(1e-3), observer).expect("should trace");

        assert_eq!(brackets[0], [1.5, 3.0]);
        assert!(brackets.iter().all(|[a, b]| a < b));
    }

    #[test]
    fn observer_can_stop_early() {
        let observer = |event: &Event| (event.iter == 3).then_some(Action::StopEarly);
        let solution =
            solve(&parabola(), [1.0, 2.0], &config(1e-8), observer).expect("should trace");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 3);
        assert!(!solution.converged());
    }

    #[test]
    fn iteration_cap_is_reported() {
        let solution = solve_unobserved(&parabola(), [1.0, 2.0], &config(1e-12).with_max_iters(5))
            .expect("should trace");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.steps.len(), 5);
    }

    #[test]
    fn rejects_invalid_brackets() {
        let function = parabola();

        assert!(matches!(
            solve_unobserved(&function, [1.0, 1.0], &config(1e-4)),
            Err(Error::ZeroWidth { .. })
        ));
        assert!(matches!(
            solve_unobserved(&function, [f64::NAN, 1.0], &config(1e-4)),
            Err(Error::NonFiniteBracket { .. })
        ));
        assert!(matches!(
            solve_unobserved(&function, [3.0, 4.0], &config(1e-4)),
            Err(Error::NoSignChange { .. })
        ));
    }

    #[test]
    fn propagates_evaluation_failures() {
        // The first midpoint of [-1, 1] is the pole.
        let function = compile("1/x").expect("valid expression");
        let result = solve_unobserved(&function, [-1.0, 1.0], &config(1e-4));

        assert!(matches!(result, Err(Error::Function { x, .. }) if x == 0.0));
    }
}
