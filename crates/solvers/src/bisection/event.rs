/// Event emitted by the bisection trace after each halving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration number, starting at 1.
    pub iter: usize,

    /// Interval the iteration started from, ordered `[left, right]`.
    pub bracket: [f64; 2],

    /// Midpoint of `bracket`.
    pub x: f64,

    /// Function value at the midpoint.
    pub fx: f64,

    /// Half-width of `bracket`.
    pub error: f64,
}
