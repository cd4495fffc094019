use crate::Step;

/// Indicates how the Newton-Raphson solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The error estimate fell below the tolerance.
    Converged,

    /// Reached the iteration limit; `x` is the last computed estimate.
    MaxIters,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a Newton-Raphson solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the solver terminated.
    pub status: Status,

    /// Final estimate of the root.
    pub x: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// One rounded step per iteration, in order.
    pub steps: Vec<Step>,
}

impl Solution {
    /// Returns true if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}
