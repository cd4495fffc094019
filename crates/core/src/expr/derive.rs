//! Symbolic differentiation with respect to the free variable.
//!
//! Derivatives are assembled through small constructors that fold constants
//! and drop additive and multiplicative identities, which keeps the result
//! compact without a general simplifier.

use super::node::{Func, Node};

/// Returns the first derivative of `node` with respect to the free variable.
pub(crate) fn derivative(node: &Node) -> Node {
    match node {
        Node::Num(_) => num(0.0),
        Node::Var => num(1.0),
        Node::Neg(arg) => neg(derivative(arg)),
        Node::Add(lhs, rhs) => add(derivative(lhs), derivative(rhs)),
        Node::Sub(lhs, rhs) => sub(derivative(lhs), derivative(rhs)),
        Node::Mul(lhs, rhs) => add(
            mul(derivative(lhs), (**rhs).clone()),
            mul((**lhs).clone(), derivative(rhs)),
        ),
        Node::Div(lhs, rhs) => div(
            sub(
                mul(derivative(lhs), (**rhs).clone()),
                mul((**lhs).clone(), derivative(rhs)),
            ),
            pow((**rhs).clone(), num(2.0)),
        ),
        Node::Pow(base, exponent) => power_rule(base, exponent),
        Node::Call(func, arg) => mul(outer(*func, arg), derivative(arg)),
    }
}

fn power_rule(base: &Node, exponent: &Node) -> Node {
    let base = base.clone();
    let exponent = exponent.clone();

    match (base.has_var(), exponent.has_var()) {
        (false, false) => num(0.0),
        // n * u**(n - 1) * u'
        (true, false) => {
            let reduced = sub(exponent.clone(), num(1.0));
            mul(
                mul(exponent, pow(base.clone(), reduced)),
                derivative(&base),
            )
        }
        // a**v * ln(a) * v'
        (false, true) => {
            let dv = derivative(&exponent);
            mul(
                mul(pow(base.clone(), exponent), call(Func::Ln, base)),
                dv,
            )
        }
        // u**v * (v' * ln(u) + v * u' / u)
        (true, true) => {
            let du = derivative(&base);
            let dv = derivative(&exponent);
            mul(
                pow(base.clone(), exponent.clone()),
                add(
                    mul(dv, call(Func::Ln, base.clone())),
                    div(mul(exponent, du), base),
                ),
            )
        }
    }
}

/// Derivative of the outer function evaluated at `arg`.
fn outer(func: Func, arg: &Node) -> Node {
    let u = arg.clone();
    match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => add(num(1.0), pow(call(Func::Tan, u), num(2.0))),
        Func::Asin => div(
            num(1.0),
            call(Func::Sqrt, sub(num(1.0), pow(u, num(2.0)))),
        ),
        Func::Acos => neg(div(
            num(1.0),
            call(Func::Sqrt, sub(num(1.0), pow(u, num(2.0)))),
        )),
        Func::Atan => div(num(1.0), add(num(1.0), pow(u, num(2.0)))),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => sub(num(1.0), pow(call(Func::Tanh, u), num(2.0))),
        Func::Exp => call(Func::Exp, u),
        Func::Ln => div(num(1.0), u),
        Func::Sqrt => div(num(1.0), mul(num(2.0), call(Func::Sqrt, u))),
        Func::Abs => call(Func::Sign, u),
        // Piecewise constant; the jump at zero is ignored.
        Func::Sign => num(0.0),
    }
}

fn num(value: f64) -> Node {
    Node::Num(value)
}

fn as_num(node: &Node) -> Option<f64> {
    match node {
        Node::Num(value) => Some(*value),
        _ => None,
    }
}

fn is(node: &Node, value: f64) -> bool {
    as_num(node) == Some(value)
}

fn neg(arg: Node) -> Node {
    match arg {
        Node::Num(value) => num(-value),
        Node::Neg(inner) => *inner,
        arg => Node::Neg(Box::new(arg)),
    }
}

fn add(lhs: Node, rhs: Node) -> Node {
    match (as_num(&lhs), as_num(&rhs)) {
        (Some(a), Some(b)) => num(a + b),
        (Some(a), _) if a == 0.0 => rhs,
        (_, Some(b)) if b == 0.0 => lhs,
        _ => Node::Add(Box::new(lhs), Box::new(rhs)),
    }
}

fn sub(lhs: Node, rhs: Node) -> Node {
    match (as_num(&lhs), as_num(&rhs)) {
        (Some(a), Some(b)) => num(a - b),
        (Some(a), _) if a == 0.0 => neg(rhs),
        (_, Some(b)) if b == 0.0 => lhs,
        _ => Node::Sub(Box::new(lhs), Box::new(rhs)),
    }
}

fn mul(lhs: Node, rhs: Node) -> Node {
    if is(&lhs, 0.0) || is(&rhs, 0.0) {
        return num(0.0);
    }
    match (as_num(&lhs), as_num(&rhs)) {
        (Some(a), Some(b)) => num(a * b),
        (Some(a), _) if a == 1.0 => rhs,
        (Some(a), _) if a == -1.0 => neg(rhs),
        (_, Some(b)) if b == 1.0 => lhs,
        (_, Some(b)) if b == -1.0 => neg(lhs),
        _ => Node::Mul(Box::new(lhs), Box::new(rhs)),
    }
}

fn div(lhs: Node, rhs: Node) -> Node {
    match (as_num(&lhs), as_num(&rhs)) {
        (Some(a), Some(b)) if b != 0.0 => num(a / b),
        (Some(a), _) if a == 0.0 && rhs.has_var() => num(0.0),
        (_, Some(b)) if b == 1.0 => lhs,
        _ => Node::Div(Box::new(lhs), Box::new(rhs)),
    }
}

fn pow(base: Node, exponent: Node) -> Node {
    match (as_num(&base), as_num(&exponent)) {
        (_, Some(b)) if b == 0.0 => num(1.0),
        (_, Some(b)) if b == 1.0 => base,
        (Some(a), Some(b)) if a.powf(b).is_finite() => num(a.powf(b)),
        _ => Node::Pow(Box::new(base), Box::new(exponent)),
    }
}

fn call(func: Func, arg: Node) -> Node {
    Node::Call(func, Box::new(arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::{node::Printer, parse::parse};

    fn d(text: &str) -> Node {
        derivative(&parse(text, "x").expect("valid expression"))
    }

    fn printed(text: &str) -> String {
        Printer {
            node: &d(text),
            var: "x",
        }
        .to_string()
    }

    /// Central difference for cross-checking symbolic results.
    fn numeric(text: &str, x: f64) -> f64 {
        let node = parse(text, "x").expect("valid expression");
        let h = 1e-6;
        let forward = node.eval(x + h).expect("defined");
        let backward = node.eval(x - h).expect("defined");
        (forward - backward) / (2.0 * h)
    }

    #[test]
    fn polynomial_derivatives_stay_compact() {
        assert_eq!(printed("x**2 - 4"), "2*x");
        assert_eq!(printed("3*x + 1"), "3");
        assert_eq!(printed("x**3"), "3*x**2");
        assert_eq!(printed("7"), "0");
    }

    #[test]
    fn matches_numeric_differentiation() {
        let cases = [
            ("x**3 - 2*x + 1", 1.3),
            ("sin(x)*exp(x)", 0.7),
            ("1/x", 2.0),
            ("x/(1 + x**2)", -0.4),
            ("log(x**2 + 1)", 1.5),
            ("sqrt(x)", 4.0),
            ("tan(x)", 0.3),
            ("asin(x) + acos(x/2) + atan(x)", 0.25),
            ("sinh(x) - cosh(2*x) + tanh(x)", 0.5),
            ("2**x", 1.1),
            ("x**x", 1.7),
            ("abs(x - 3)", 1.0),
            ("-(x - 1)**2", 2.5),
        ];

        for (text, x) in cases {
            let symbolic = d(text).eval(x).expect("derivative defined");
            assert_relative_eq!(symbolic, numeric(text, x), epsilon = 1e-5);
        }
    }

    #[test]
    fn derivative_of_reciprocal_never_vanishes() {
        let derivative = d("1/x");
        for x in [-5.0, -0.5, 0.25, 3.0, 100.0] {
            assert!(derivative.eval(x).expect("defined") != 0.0);
        }
    }

    #[test]
    fn abs_derivative_is_zero_at_kink() {
        assert_eq!(d("abs(x)").eval(0.0), Ok(0.0));
    }
}
