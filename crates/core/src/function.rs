/// A real-valued function of one real variable.
///
/// Evaluation may fail at specific points (division by zero, domain errors),
/// so [`call`](Function::call) returns a `Result`. Implementations must be
/// pure: calling twice with the same `x` yields the same outcome.
pub trait Function {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is undefined at `x`.
    fn call(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F: Function + ?Sized> Function for &F {
    type Error = F::Error;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).call(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Double;

    impl Function for Double {
        type Error = Infallible;

        fn call(&self, x: f64) -> Result<f64, Self::Error> {
            Ok(2.0 * x)
        }
    }

    fn call_twice<F: Function>(function: F, x: f64) -> Result<f64, F::Error> {
        let once = function.call(x)?;
        function.call(once)
    }

    #[test]
    fn references_are_functions() {
        let double = Double;
        assert_eq!(call_twice(&double, 1.5), Ok(6.0));
    }
}
