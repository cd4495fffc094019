/// Event emitted by the Newton-Raphson solver after each iteration.
///
/// Values are unrounded; the rounded copy lives in the solution's trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration number, starting at 1.
    pub iter: usize,

    /// Estimate the iteration started from.
    pub x: f64,

    /// Function value at `x`.
    pub fx: f64,

    /// Derivative value at `x`.
    pub dfx: f64,

    /// Estimate produced by the iteration.
    pub next: f64,

    /// Relative change between `x` and `next`.
    pub error: f64,
}
