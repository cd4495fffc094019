use crate::{ConfigError, DEFAULT_MAX_ITERS, config::positive_tolerance};

/// Smallest accepted relative tolerance.
pub const MIN_REL_TOL: f64 = 4.0 * f64::EPSILON;

/// Configuration for Brent's method.
///
/// Convergence is declared once the root finder's two latest points are
/// closer than `x_abs_tol + x_rel_tol * |x|`, or the function is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
}

impl Config {
    /// Creates a config with the given absolute tolerance on `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x_abs_tol` is not finite and positive.
    pub fn new(x_abs_tol: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            max_iters: DEFAULT_MAX_ITERS,
            x_abs_tol: positive_tolerance(x_abs_tol)?,
            x_rel_tol: MIN_REL_TOL,
        })
    }

    /// Replaces the iteration cap.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Replaces the relative tolerance on `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x_rel_tol` is not finite or below [`MIN_REL_TOL`].
    pub fn with_rel_tol(self, x_rel_tol: f64) -> Result<Self, ConfigError> {
        if !x_rel_tol.is_finite() || x_rel_tol < MIN_REL_TOL {
            return Err(ConfigError::RelativeTolerance {
                got: x_rel_tol,
                min: MIN_REL_TOL,
            });
        }
        Ok(Self { x_rel_tol, ..self })
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the absolute tolerance on `x`.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    /// Returns the relative tolerance on `x`.
    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }
}
