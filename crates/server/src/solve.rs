//! The solve pipeline: request in, rounded result and trace out.

mod error;
mod method;
mod request;
mod result;

pub use error::SolveError;
pub use method::{Method, UnknownMethod};
pub use request::{NumberOrText, SolvePayload, SolveRequest};
pub use result::{Comparison, SolveResult};

use rootlab_core::{Expression, compile};
use rootlab_solvers::{bisection, bracketed, newton, rounded};
use tracing::{debug, trace};

/// Runs the requested method and, if asked, the comparison.
///
/// # Errors
///
/// Returns an error if the expression does not parse, or the selected
/// method fails. Comparison failures never fail the solve.
pub fn solve(request: &SolveRequest) -> Result<SolveResult, SolveError> {
    let function = compile(&request.expression)?;

    let (root, steps) = match request.method {
        Method::Newton => {
            let derivative = function.differentiate();
            debug!(%derivative, "differentiated");

            let config = newton::Config::new(request.tolerance)?;
            let solution = newton::solve(
                &function,
                &derivative,
                request.x0,
                &config,
                |event: &newton::Event| -> Option<newton::Action> {
                    trace!(
                        iter = event.iter,
                        x = event.x,
                        fx = event.fx,
                        dfx = event.dfx,
                        error = event.error,
                        "newton step"
                    );
                    None
                },
            )?;
            (solution.x, solution.steps)
        }
        Method::Bisection => {
            let config = bracketed::Config::new(request.tolerance)?;
            let solution = bracketed::solve(
                &function,
                request.x0,
                &config,
                |event: &bisection::Event| -> Option<bisection::Action> {
                    let [a, b] = event.bracket;
                    trace!(
                        iter = event.iter,
                        a,
                        b,
                        x = event.x,
                        fx = event.fx,
                        error = event.error,
                        "bisection step"
                    );
                    None
                },
            )?;
            debug!(
                left = solution.bracket.left(),
                right = solution.bracket.right(),
                brent_iters = solution.root.iters,
                "bracketed"
            );
            (solution.root.x, solution.trace.steps)
        }
    };

    let comparison = if request.compare {
        compare(&function, request.x0, request.tolerance)
    } else {
        None
    };

    Ok(SolveResult {
        root: rounded(root),
        iterations: steps.len(),
        steps,
        method: request.method,
        comparison,
    })
}

/// Cross-checks with a bracket search and Brent from `x0`.
///
/// Returns `None` if any stage fails.
pub fn compare(function: &Expression, x0: f64, tolerance: f64) -> Option<Comparison> {
    let config = bracketed::Config::new(tolerance).ok()?;
    compare_with(function, x0, &config)
}

fn compare_with(function: &Expression, x0: f64, config: &bracketed::Config) -> Option<Comparison> {
    match bracketed::root(function, x0, config) {
        Ok((_, solution)) => Some(Comparison {
            root: rounded(solution.x),
        }),
        Err(error) => {
            debug!(%error, "comparison omitted");
            None
        }
    }
}
