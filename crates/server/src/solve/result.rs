use serde::Serialize;

use rootlab_solvers::Step;

use super::Method;

/// Successful solve response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    /// Root rounded to six decimals.
    #[serde(rename = "raiz")]
    pub root: f64,

    #[serde(rename = "pasos")]
    pub steps: Vec<Step>,

    /// Number of recorded steps.
    #[serde(rename = "iteraciones")]
    pub iterations: usize,

    #[serde(rename = "metodo")]
    pub method: Method,

    #[serde(rename = "comparacion", skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

/// Root found by the cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    #[serde(rename = "raiz")]
    pub root: f64,
}
