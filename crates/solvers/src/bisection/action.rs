/// Control actions supported by the bisection trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop halving and return the trace so far.
    StopEarly,
}
