use crate::{ConfigError, DEFAULT_MAX_ITERS, config::positive_tolerance};

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    tol: f64,
}

impl Config {
    /// Creates a config with the given tolerance on the relative step.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive.
    pub fn new(tol: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            max_iters: DEFAULT_MAX_ITERS,
            tol: positive_tolerance(tol)?,
        })
    }

    /// Replaces the iteration cap.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }
}
