use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during Newton-Raphson iteration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("initial guess must be finite, got {x0}")]
    NonFiniteGuess { x0: f64 },

    #[error("derivative is zero at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("iteration diverged at x = {x}: next estimate is {next}")]
    Diverged { x: f64, next: f64 },

    #[error("evaluation failed at x = {x}: {source}")]
    Function {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("derivative evaluation failed at x = {x}: {source}")]
    Derivative {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("non-finite value {value} at x = {x}")]
    NonFiniteValue { x: f64, value: f64 },
}
