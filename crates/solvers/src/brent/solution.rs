/// Indicates whether Brent's method converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
}

/// The result of a Brent solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Best estimate of the root.
    pub x: f64,
    /// Function value at `x`.
    pub residual: f64,
    /// Iterations performed.
    pub iters: usize,
    /// Function evaluations performed.
    pub calls: usize,
}

impl Solution {
    /// Returns true if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}
