//! Recursive-descent parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | IDENT | IDENT '(' sum ')' | '(' sum ')'
//! ```
//!
//! Powers are right-associative and bind tighter than unary minus on their
//! left, so `-x**2` is `-(x**2)` while `2**-x` is accepted.
//!
//! Nesting is capped at [`MAX_DEPTH`]: every operand of a chain, every sign,
//! exponent, parenthesis and call counts one level. Evaluation and
//! differentiation recurse over the tree, so the cap bounds their stack use.

use std::f64::consts::{E, PI};

use super::{
    ParseError,
    node::{Func, Node},
    token::{Token, TokenKind, tokenize},
};

/// Deepest nesting accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// Parses `text` into a tree whose only free variable is named `var`.
pub(super) fn parse(text: &str, var: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
        var,
    };
    let node = parser.sum()?;

    match parser.peek() {
        None => Ok(node),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    var: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.cursor += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == *kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        let token = self.next()?;
        if token.kind == *kind {
            Ok(())
        } else {
            Err(unexpected(&token))
        }
    }

    /// Goes one level deeper, failing past [`MAX_DEPTH`].
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let pos = self
                .tokens
                .get(self.cursor.saturating_sub(1))
                .map_or(0, |token| token.pos);
            return Err(ParseError::TooDeep {
                pos,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    fn nested(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        self.descend()?;
        let node = rule(self)?;
        self.depth -= 1;
        Ok(node)
    }

    fn sum(&mut self) -> Result<Node, ParseError> {
        let depth = self.depth;
        let mut node = self.product()?;
        loop {
            let op: fn(Box<Node>, Box<Node>) -> Node = if self.eat(&TokenKind::Plus) {
                Node::Add
            } else if self.eat(&TokenKind::Minus) {
                Node::Sub
            } else {
                self.depth = depth;
                return Ok(node);
            };
            self.descend()?;
            node = op(Box::new(node), Box::new(self.product()?));
        }
    }

    fn product(&mut self) -> Result<Node, ParseError> {
        let depth = self.depth;
        let mut node = self.unary()?;
        loop {
            let op: fn(Box<Node>, Box<Node>) -> Node = if self.eat(&TokenKind::Star) {
                Node::Mul
            } else if self.eat(&TokenKind::Slash) {
                Node::Div
            } else {
                self.depth = depth;
                return Ok(node);
            };
            self.descend()?;
            node = op(Box::new(node), Box::new(self.unary()?));
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.nested(Self::unary)?;
            return Ok(Node::Neg(Box::new(operand)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.nested(Self::unary)?;
            return Ok(Node::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Token { kind, pos } = self.next()?;
        match kind {
            TokenKind::Number(value) => Ok(Node::Num(value)),
            TokenKind::LParen => {
                let node = self.nested(Self::sum)?;
                self.expect(&TokenKind::RParen)?;
                Ok(node)
            }
            TokenKind::Ident(name) => {
                if !self.eat(&TokenKind::LParen) {
                    return self.symbol(name, pos);
                }
                let func =
                    Func::from_name(&name).ok_or(ParseError::UnknownFunction { name, pos })?;
                let arg = self.nested(Self::sum)?;
                self.expect(&TokenKind::RParen)?;
                Ok(Node::Call(func, Box::new(arg)))
            }
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }

    /// Resolves a bare identifier: the free variable wins over constants.
    fn symbol(&self, name: String, pos: usize) -> Result<Node, ParseError> {
        if name == self.var {
            return Ok(Node::Var);
        }
        match name.as_str() {
            "pi" => Ok(Node::Num(PI)),
            "E" | "e" => Ok(Node::Num(E)),
            _ => Err(ParseError::UnknownSymbol {
                name,
                pos,
                variable: self.var.to_owned(),
            }),
        }
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        pos: token.pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eval(text: &str, x: f64) -> f64 {
        parse(text, "x")
            .expect("valid expression")
            .eval(x)
            .expect("defined at x")
    }

    #[test]
    fn respects_precedence() {
        assert_relative_eq!(eval("1 + 2*3", 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2)*3", 0.0), 9.0);
        assert_relative_eq!(eval("8/4/2", 0.0), 1.0);
        assert_relative_eq!(eval("2 - 3 - 4", 0.0), -5.0);
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_relative_eq!(eval("-x**2", 3.0), -9.0);
        assert_relative_eq!(eval("(-x)**2", 3.0), 9.0);
        assert_relative_eq!(eval("2**-1", 0.0), 0.5);
        assert_relative_eq!(eval("2**3**2", 0.0), 512.0);
        assert_relative_eq!(eval("x^2 - 4", 2.0), 0.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_relative_eq!(eval("sin(pi/2)", 0.0), 1.0);
        assert_relative_eq!(eval("log(E)", 0.0), 1.0);
        assert_relative_eq!(eval("exp(x) - 2", 2_f64.ln()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(abs(x))", -16.0), 4.0);
    }

    #[test]
    fn custom_variable_name() {
        let node = parse("t**2 - e", "t").expect("valid expression");
        assert_relative_eq!(node.eval(E.sqrt()).expect("defined"), 0.0, epsilon = 1e-12);

        // The free variable shadows the constant of the same name.
        let node = parse("e + 1", "e").expect("valid expression");
        assert_relative_eq!(node.eval(1.0).expect("defined"), 2.0);
    }

    #[test]
    fn reports_errors() {
        assert_eq!(parse("   ", "x"), Err(ParseError::Empty));
        assert_eq!(parse("x +", "x"), Err(ParseError::UnexpectedEnd));
        assert!(matches!(
            parse("2x", "x"),
            Err(ParseError::UnexpectedToken { pos: 1, .. })
        ));
        assert!(matches!(
            parse("(x + 1", "x"),
            Err(ParseError::UnexpectedEnd)
        ));
        assert!(matches!(
            parse("foo(x)", "x"),
            Err(ParseError::UnknownFunction { .. })
        ));
        assert!(matches!(
            parse("x + y", "x"),
            Err(ParseError::UnknownSymbol { pos: 4, .. })
        ));
        assert!(matches!(
            parse("x )", "x"),
            Err(ParseError::UnexpectedToken { pos: 2, .. })
        ));
    }

    #[test]
    fn rejects_deep_nesting() {
        let signs = format!("{}x", "-".repeat(100_000));
        assert!(matches!(
            parse(&signs, "x"),
            Err(ParseError::TooDeep { max: MAX_DEPTH, .. })
        ));

        let parens = "(".repeat(100_000);
        assert!(matches!(
            parse(&parens, "x"),
            Err(ParseError::TooDeep { .. })
        ));

        let powers = format!("x{}", "**x".repeat(10_000));
        assert!(matches!(
            parse(&powers, "x"),
            Err(ParseError::TooDeep { .. })
        ));

        let terms = format!("x{}", " + x".repeat(10_000));
        assert!(matches!(
            parse(&terms, "x"),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn accepts_nesting_up_to_the_cap() {
        let depth = MAX_DEPTH - 1;
        let text = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_relative_eq!(eval(&text, 3.0), 3.0);

        let text = format!("x{}", " + 1".repeat(100));
        assert_relative_eq!(eval(&text, 0.0), 100.0);

        // Each closed group gives its levels back.
        let text = vec!["((((x))))"; 100].join(" + ");
        assert_relative_eq!(eval(&text, 1.0), 100.0);
    }
}
