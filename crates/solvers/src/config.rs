use thiserror::Error;

/// Errors that can occur when building a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),

    #[error("relative tolerance must be finite and at least {min}, got {got}")]
    RelativeTolerance { got: f64, min: f64 },

    #[error("search step must be finite and positive, got {0}")]
    SearchStep(f64),

    #[error("search limit must be finite and positive, got {0}")]
    SearchLimit(f64),
}

/// Checks that a convergence tolerance is usable.
pub(crate) fn positive_tolerance(tol: f64) -> Result<f64, ConfigError> {
    if tol.is_finite() && tol > 0.0 {
        Ok(tol)
    } else {
        Err(ConfigError::Tolerance(tol))
    }
}
