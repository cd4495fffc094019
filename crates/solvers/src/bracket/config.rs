use crate::ConfigError;

/// Configuration for the expanding bracket search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step: f64,
    limit: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step: 1.0,
            limit: 100.0,
        }
    }
}

impl Config {
    /// Creates a search config.
    ///
    /// The seed interval is `[x0, x0 + step]`; each round widens it by `step`
    /// on both sides, and the search fails once either end leaves
    /// `[-limit, limit]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` or `limit` is not finite and positive.
    pub fn new(step: f64, limit: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::SearchStep(step));
        }
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ConfigError::SearchLimit(limit));
        }
        Ok(Self { step, limit })
    }

    /// Returns the widening applied to each side per round.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the search radius around the origin.
    #[must_use]
    pub fn limit(&self) -> f64 {
        self.limit
    }
}
