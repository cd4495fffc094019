/// Decimal places kept in reported values.
pub const REPORT_DECIMALS: i32 = 6;

/// One recorded iteration of a solver trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Point evaluated during the iteration.
    pub x: f64,
    /// Function value at `x`.
    pub fx: f64,
    /// Error estimate after the iteration.
    pub error: f64,
}

impl Step {
    /// Creates a step with every value rounded for reporting.
    #[must_use]
    pub fn rounded(x: f64, fx: f64, error: f64) -> Self {
        Self {
            x: rounded(x),
            fx: rounded(fx),
            error: rounded(error),
        }
    }
}

/// Rounds `value` to [`REPORT_DECIMALS`] places.
///
/// Values too large to scale are returned unchanged.
#[must_use]
pub fn rounded(value: f64) -> f64 {
    let scale = 10_f64.powi(REPORT_DECIMALS);
    let scaled = (value * scale).round();
    if scaled.is_finite() {
        scaled / scale
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rounds_to_six_places() {
        assert_relative_eq!(rounded(2.000_000_4), 2.0);
        assert_relative_eq!(rounded(-1.234_567_89), -1.234_568);
        assert_relative_eq!(rounded(1e-9), 0.0);
    }

    #[test]
    fn huge_values_pass_through() {
        assert_eq!(rounded(1e305), 1e305);
        assert!(rounded(f64::NAN).is_nan());
    }

    #[test]
    fn step_rounds_every_field() {
        let step = Step::rounded(0.123_456_7, 9.876_543_21, 5e-8);
        assert_eq!(
            step,
            Step {
                x: 0.123_457,
                fx: 9.876_543,
                error: 0.0,
            }
        );
    }
}
