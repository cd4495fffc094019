use crate::Step;

/// Indicates how the bisection trace terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The half-width fell below the tolerance.
    Converged,

    /// The function vanished exactly at a midpoint.
    ExactRoot,

    /// Reached the iteration limit.
    MaxIters,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a bisection trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the trace terminated.
    pub status: Status,

    /// Last midpoint evaluated.
    pub x: f64,

    /// Number of halvings performed.
    pub iters: usize,

    /// One rounded step per halving, in order.
    pub steps: Vec<Step>,
}

impl Solution {
    /// Returns true if the trace ended on the tolerance or an exact root.
    #[must_use]
    pub fn converged(&self) -> bool {
        matches!(self.status, Status::Converged | Status::ExactRoot)
    }
}
