use std::fmt;

use super::EvalError;

/// A node of the expression tree over a single free variable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Num(f64),
    Var,
    Neg(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Pow(Box<Node>, Box<Node>),
    Call(Func, Box<Node>),
}

/// Elementary functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Sign,
}

impl Func {
    /// Looks up a function by the name used in expression text.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "exp" => Func::Exp,
            "log" | "ln" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "abs" | "Abs" => Func::Abs,
            "sign" => Func::Sign,
            _ => return None,
        };
        Some(func)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Ln => "log",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Sign => "sign",
        }
    }

    /// Applies the function, rejecting arguments outside its real domain.
    pub(crate) fn apply(self, arg: f64) -> Result<f64, EvalError> {
        let domain = || EvalError::Domain {
            function: self.name(),
            arg,
        };
        let value = match self {
            Func::Sin => arg.sin(),
            Func::Cos => arg.cos(),
            Func::Tan => arg.tan(),
            Func::Asin if arg.abs() > 1.0 => return Err(domain()),
            Func::Asin => arg.asin(),
            Func::Acos if arg.abs() > 1.0 => return Err(domain()),
            Func::Acos => arg.acos(),
            Func::Atan => arg.atan(),
            Func::Sinh => arg.sinh(),
            Func::Cosh => arg.cosh(),
            Func::Tanh => arg.tanh(),
            Func::Exp => arg.exp(),
            Func::Ln if arg <= 0.0 => return Err(domain()),
            Func::Ln => arg.ln(),
            Func::Sqrt if arg < 0.0 => return Err(domain()),
            Func::Sqrt => arg.sqrt(),
            Func::Abs => arg.abs(),
            Func::Sign if arg == 0.0 => 0.0,
            Func::Sign => arg.signum(),
        };
        finite(value)
    }
}

impl Node {
    /// Evaluates the tree with the free variable bound to `x`.
    pub(crate) fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Node::Num(value) => Ok(*value),
            Node::Var => Ok(x),
            Node::Neg(arg) => Ok(-arg.eval(x)?),
            Node::Add(lhs, rhs) => finite(lhs.eval(x)? + rhs.eval(x)?),
            Node::Sub(lhs, rhs) => finite(lhs.eval(x)? - rhs.eval(x)?),
            Node::Mul(lhs, rhs) => finite(lhs.eval(x)? * rhs.eval(x)?),
            Node::Div(lhs, rhs) => {
                let numerator = lhs.eval(x)?;
                let denominator = rhs.eval(x)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                finite(numerator / denominator)
            }
            Node::Pow(base, exponent) => pow(base.eval(x)?, exponent.eval(x)?),
            Node::Call(func, arg) => func.apply(arg.eval(x)?),
        }
    }

    /// Returns true if the free variable appears anywhere in the tree.
    pub(crate) fn has_var(&self) -> bool {
        match self {
            Node::Num(_) => false,
            Node::Var => true,
            Node::Neg(arg) | Node::Call(_, arg) => arg.has_var(),
            Node::Add(lhs, rhs)
            | Node::Sub(lhs, rhs)
            | Node::Mul(lhs, rhs)
            | Node::Div(lhs, rhs)
            | Node::Pow(lhs, rhs) => lhs.has_var() || rhs.has_var(),
        }
    }

    /// Binding strength used when printing, higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Node::Add(..) | Node::Sub(..) => 1,
            Node::Mul(..) | Node::Div(..) => 2,
            Node::Neg(_) => 3,
            Node::Num(value) if value.is_sign_negative() => 3,
            Node::Pow(..) => 4,
            Node::Num(_) | Node::Var | Node::Call(..) => 5,
        }
    }
}

fn pow(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::NonReal { base, exponent });
    }
    finite(base.powf(exponent))
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite { value })
    }
}

/// Prints a node with the free variable spelled as `var`.
pub(crate) struct Printer<'a> {
    pub(crate) node: &'a Node,
    pub(crate) var: &'a str,
}

impl Printer<'_> {
    fn child<'b>(&'b self, node: &'b Node) -> Printer<'b> {
        Printer {
            node,
            var: self.var,
        }
    }

    fn operand(&self, f: &mut fmt::Formatter<'_>, node: &Node, min: u8) -> fmt::Result {
        if node.precedence() < min {
            write!(f, "({})", self.child(node))
        } else {
            write!(f, "{}", self.child(node))
        }
    }
}

impl fmt::Display for Printer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Node::Num(value) => write!(f, "{value}"),
            Node::Var => f.write_str(self.var),
            Node::Neg(arg) => {
                f.write_str("-")?;
                self.operand(f, arg, 4)
            }
            Node::Add(lhs, rhs) => {
                self.operand(f, lhs, 1)?;
                f.write_str(" + ")?;
                self.operand(f, rhs, 2)
            }
            Node::Sub(lhs, rhs) => {
                self.operand(f, lhs, 1)?;
                f.write_str(" - ")?;
                self.operand(f, rhs, 2)
            }
            Node::Mul(lhs, rhs) => {
                self.operand(f, lhs, 2)?;
                f.write_str("*")?;
                self.operand(f, rhs, 3)
            }
            Node::Div(lhs, rhs) => {
                self.operand(f, lhs, 2)?;
                f.write_str("/")?;
                self.operand(f, rhs, 4)
            }
            Node::Pow(base, exponent) => {
                self.operand(f, base, 5)?;
                f.write_str("**")?;
                self.operand(f, exponent, 4)
            }
            Node::Call(func, arg) => write!(f, "{}({})", func.name(), self.child(arg)),
        }
    }
}
