use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during the bracket search.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no sign change found within [-{limit}, {limit}]")]
    NotFound { limit: f64 },

    #[error("starting point must be finite, got {x0}")]
    NonFiniteStart { x0: f64 },

    #[error("evaluation failed at x = {x}: {source}")]
    Function {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("non-finite value {value} at x = {x}")]
    NonFiniteValue { x: f64, value: f64 },
}
