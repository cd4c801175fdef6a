//! Textual views of an expression tree
//!
//! [`AstPrinter`] writes the tree in parenthesized prefix form, marking
//! groupings explicitly. [`RpnPrinter`] writes it in reverse-Polish form,
//! where groupings disappear. Both are stateless, so printing the same tree
//! twice gives the same string.

use crate::lexer::{Token, TokenKind};
use crate::parser::{Expression, Value, Visitor};
use std::fmt;
use std::str::FromStr;

/// Prefix (Lisp-like) renderer: `(* (- 123) (group 45.67))`
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expression: &Expression) -> String {
        expression.accept(self)
    }

    fn parenthesize(&mut self, name: &str, items: &[&Expression]) -> String {
        let mut out = format!("({}", name);
        for item in items {
            out.push(' ');
            out.push_str(&item.accept(self));
        }
        out.push(')');
        out
    }
}

impl Visitor for AstPrinter {
    type Output = String;

    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> String {
        self.parenthesize(&operator.lexeme, &[right])
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        value.to_string()
    }

    fn visit_grouping(&mut self, inner: &Expression) -> String {
        self.parenthesize("group", &[inner])
    }
}

/// Postfix (reverse-Polish) renderer: `123 - 45.67 *`
#[derive(Debug, Default, Clone, Copy)]
pub struct RpnPrinter;

impl RpnPrinter {
    pub fn print(&mut self, expression: &Expression) -> String {
        expression.accept(self)
    }
}

impl Visitor for RpnPrinter {
    type Output = String;

    fn visit_binary(&mut self, left: &Expression, operator: &Token, right: &Expression) -> String {
        format!(
            "{} {} {}",
            left.accept(self),
            right.accept(self),
            operator.lexeme
        )
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> String {
        format!("{} {}", right.accept(self), operator.lexeme)
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        value.to_string()
    }

    fn visit_grouping(&mut self, inner: &Expression) -> String {
        inner.accept(self)
    }
}

/// Which renderer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Parenthesized prefix form
    #[default]
    Prefix,
    /// Reverse-Polish form
    Postfix,
}

impl Notation {
    pub fn render(self, expression: &Expression) -> String {
        match self {
            Notation::Prefix => AstPrinter.print(expression),
            Notation::Postfix => RpnPrinter.print(expression),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notation::Prefix => write!(f, "prefix"),
            Notation::Postfix => write!(f, "postfix"),
        }
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" | "lisp" => Ok(Notation::Prefix),
            "postfix" | "rpn" => Ok(Notation::Postfix),
            other => Err(format!(
                "unknown notation `{}` (expected prefix or postfix)",
                other
            )),
        }
    }
}

/// Hard-coded tree for exercising the renderers: `-123 * (45.67)`
pub fn sample_expression() -> Expression {
    Expression::binary(
        Expression::unary(
            Token::simple(TokenKind::Minus, "-", 1),
            Expression::literal(123.0),
        ),
        Token::simple(TokenKind::Star, "*", 1),
        Expression::grouping(Expression::literal(45.67)),
    )
}
