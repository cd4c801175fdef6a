use crate::lexer::{Literal, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value held by a literal expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Floating-point number
    Number(f64),
    /// String with the quotes stripped
    String(String),
    /// `true` or `false`
    Bool(bool),
    /// `nil`
    Nil,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Number(n) => Value::Number(n),
            Literal::String(s) => Value::String(s),
        }
    }
}

/// Expression tree node
///
/// Every child is owned by exactly one parent. Nodes are never mutated after
/// construction; walk them with [`Expression::accept`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Infix operation: `left operator right`
    Binary {
        /// Left operand
        left: Box<Expression>,
        /// Operator token
        operator: Token,
        /// Right operand
        right: Box<Expression>,
    },

    /// Prefix operation: `operator right`
    Unary {
        /// Operator token
        operator: Token,
        /// Operand
        right: Box<Expression>,
    },

    /// Literal value
    Literal(Value),

    /// Parenthesized sub-expression
    Grouping(Box<Expression>),
}

impl Expression {
    pub fn binary(left: Expression, operator: Token, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Token, right: Expression) -> Self {
        Expression::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    pub fn grouping(inner: Expression) -> Self {
        Expression::Grouping(Box::new(inner))
    }

    /// Dispatch to the visitor method for this node's variant
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expression::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expression::Literal(value) => visitor.visit_literal(value),
            Expression::Grouping(inner) => visitor.visit_grouping(inner),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// One method per expression variant
pub trait Visitor {
    /// What visiting a node produces
    type Output;

    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> Self::Output;

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> Self::Output;

    fn visit_literal(&mut self, value: &Value) -> Self::Output;

    fn visit_grouping(&mut self, inner: &Expression) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    /// Counts nodes, to check dispatch reaches every variant
    struct NodeCounter;

    impl Visitor for NodeCounter {
        type Output = usize;

        fn visit_binary(&mut self, left: &Expression, _: &Token, right: &Expression) -> usize {
            1 + left.accept(self) + right.accept(self)
        }

        fn visit_unary(&mut self, _: &Token, right: &Expression) -> usize {
            1 + right.accept(self)
        }

        fn visit_literal(&mut self, _: &Value) -> usize {
            1
        }

        fn visit_grouping(&mut self, inner: &Expression) -> usize {
            1 + inner.accept(self)
        }
    }

    #[test]
    fn test_accept_dispatches_every_variant() {
        let expr = Expression::binary(
            Expression::unary(
                Token::simple(TokenKind::Minus, "-", 1),
                Expression::literal(1.0),
            ),
            Token::simple(TokenKind::Plus, "+", 1),
            Expression::grouping(Expression::literal(true)),
        );
        assert_eq!(expr.accept(&mut NodeCounter), 5);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(45.67).to_string(), "45.67");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn test_value_from_literal() {
        assert_eq!(Value::from(Literal::Number(2.5)), Value::Number(2.5));
        assert_eq!(
            Value::from(Literal::String("s".into())),
            Value::String("s".into())
        );
    }
}
