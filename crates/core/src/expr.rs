//! Textual math expressions in one free variable.
//!
//! An [`Expression`] is parsed once and then evaluated at arbitrary points.
//! Each parse carries its own variable name, so there is no shared parser
//! state between calls.
//!
//! Supported syntax: decimal and scientific literals, the free variable,
//! the constants `pi` and `E` (also `e`), `+ - * /`, powers written `**` or
//! `^`, parentheses, and the functions `sin cos tan asin acos atan sinh cosh
//! tanh exp log ln sqrt abs sign`. Multiplication is always explicit.

mod derive;
mod error;
mod node;
mod parse;
mod token;

use std::fmt;

pub use error::{EvalError, ParseError};

use crate::Function;

use node::{Node, Printer};

/// Name of the free variable used by [`compile`].
pub const DEFAULT_VARIABLE: &str = "x";

/// A parsed, immutable expression in a single free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Node,
    variable: String,
}

impl Expression {
    /// Parses `text` with `variable` as the only free variable.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed expression
    /// or uses a symbol other than `variable` and the known constants.
    pub fn parse(text: &str, variable: &str) -> Result<Self, ParseError> {
        let valid_name = variable
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && variable.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(ParseError::InvalidVariable(variable.to_owned()));
        }

        Ok(Self {
            root: parse::parse(text, variable)?,
            variable: variable.to_owned(),
        })
    }

    /// Returns the name of the free variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Evaluates the expression with the free variable bound to `x`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] if the expression is undefined at `x`.
    pub fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        self.root.eval(x)
    }

    /// Returns the symbolic first derivative with respect to the free variable.
    #[must_use]
    pub fn differentiate(&self) -> Self {
        Self {
            root: derive::derivative(&self.root),
            variable: self.variable.clone(),
        }
    }
}

impl Function for Expression {
    type Error = EvalError;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        self.evaluate(x)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer {
            node: &self.root,
            var: &self.variable,
        }
        .fmt(f)
    }
}

/// Parses `text` as an expression in [`DEFAULT_VARIABLE`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not a well-formed expression.
pub fn compile(text: &str) -> Result<Expression, ParseError> {
    Expression::parse(text, DEFAULT_VARIABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn compiles_and_evaluates() {
        let expr = compile("x**2 - 4").expect("valid expression");
        assert_relative_eq!(expr.evaluate(3.0).expect("defined"), 5.0);
        assert_eq!(expr.variable(), "x");
    }

    #[test]
    fn evaluation_is_repeatable() {
        let expr = compile("sin(x)/x + exp(-x**2)").expect("valid expression");
        let first = expr.evaluate(0.37).expect("defined");
        let second = expr.evaluate(0.37).expect("defined");
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn differentiates() {
        let expr = compile("x**2 - 4").expect("valid expression");
        let derivative = expr.differentiate();
        assert_eq!(derivative.to_string(), "2*x");
        assert_relative_eq!(derivative.call(1.5).expect("defined"), 3.0);
    }

    #[test]
    fn reports_point_failures() {
        let expr = compile("1/x").expect("valid expression");
        assert_eq!(expr.evaluate(0.0), Err(EvalError::DivisionByZero));
        assert_relative_eq!(expr.evaluate(4.0).expect("defined"), 0.25);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let expr = compile("-(x - 1)**2/(2*x) + sin(x)^2").expect("valid expression");
        let reparsed = compile(&expr.to_string()).expect("printed form parses");
        assert_eq!(reparsed, expr);
    }

    #[test]
    fn rejects_invalid_variable_names() {
        assert!(matches!(
            Expression::parse("x", "2x"),
            Err(ParseError::InvalidVariable(_))
        ));
        assert!(matches!(
            Expression::parse("x", ""),
            Err(ParseError::InvalidVariable(_))
        ));
    }
}
