use std::error::Error as StdError;

use thiserror::Error;

use rootlab_core::ParseError;
use rootlab_solvers::{ConfigError, bracket, bracketed, newton};

use super::method::UnknownMethod;

/// Why a solve request failed.
///
/// The `Display` text is returned verbatim as the `error` field of the
/// failure response.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid expression: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Evaluation(#[source] Box<dyn StdError + Send + Sync>),

    #[error("Newton-Raphson cannot continue: derivative is zero at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("no sign change found within [-{limit}, {limit}]")]
    BracketNotFound { limit: f64 },

    #[error("Brent's method did not converge after {iters} iterations")]
    NotConverged { iters: usize },
}

impl From<ConfigError> for SolveError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

impl From<UnknownMethod> for SolveError {
    fn from(error: UnknownMethod) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

impl From<newton::Error> for SolveError {
    fn from(error: newton::Error) -> Self {
        match error {
            newton::Error::ZeroDerivative { x } => Self::ZeroDerivative { x },
            newton::Error::NonFiniteGuess { .. } => Self::InvalidRequest(error.to_string()),
            other => Self::Evaluation(Box::new(other)),
        }
    }
}

impl From<bracketed::Error> for SolveError {
    fn from(error: bracketed::Error) -> Self {
        match error {
            bracketed::Error::Bracket(bracket::Error::NotFound { limit }) => {
                Self::BracketNotFound { limit }
            }
            bracketed::Error::Bracket(bracket::Error::NonFiniteStart { .. }) => {
                Self::InvalidRequest(error.to_string())
            }
            bracketed::Error::NotConverged { iters, .. } => Self::NotConverged { iters },
            other => Self::Evaluation(Box::new(other)),
        }
    }
}
