use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while tracing bisection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bracket contains non-finite value: {value}")]
    NonFiniteBracket { value: f64 },

    #[error("bracket has zero width at x = {x}")]
    ZeroWidth { x: f64 },

    #[error("no sign change in bracket: f({left})={left_value}, f({right})={right_value}")]
    NoSignChange {
        left: f64,
        right: f64,
        left_value: f64,
        right_value: f64,
    },

    #[error("evaluation failed at x = {x}: {source}")]
    Function {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("non-finite value {value} at x = {x}")]
    NonFiniteValue { x: f64, value: f64 },
}
