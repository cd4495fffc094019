use thiserror::Error;

/// Errors that can occur when parsing an expression.
///
/// Positions are byte offsets into the source text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("unknown symbol '{name}' at position {pos}, the only variable is '{variable}'")]
    UnknownSymbol {
        name: String,
        pos: usize,
        variable: String,
    },

    #[error("expression nests deeper than {max} levels at position {pos}")]
    TooDeep { pos: usize, max: usize },

    #[error("invalid variable name '{0}'")]
    InvalidVariable(String),
}

/// Errors that can occur when evaluating an expression at a point.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("math domain error: {function}({arg}) is undefined")]
    Domain { function: &'static str, arg: f64 },

    #[error("complex result: ({base})**({exponent}) is not real")]
    NonReal { base: f64, exponent: f64 },

    #[error("result is not finite: {value}")]
    NonFinite { value: f64 },
}
