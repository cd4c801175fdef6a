use super::ast::{Expression, Value};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Location, Result};
use crate::lexer::{Token, TokenKind};

/// Deepest chain of groupings and unary operators the parser accepts
pub const MAX_NESTING: usize = 200;

/// Recursive-descent parser for Lox expressions
///
/// Precedence, lowest first: equality, comparison, term, factor, unary,
/// primary. Binary levels are left-associative; unary is right-associative.
/// The first syntax error abandons the whole parse, there is no recovery.
/// Nesting deeper than [`MAX_NESTING`] is a syntax error.
pub struct Parser<'d> {
    tokens: Vec<Token>,
    current: usize,
    /// Open groupings and unary operators around the cursor
    depth: usize,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Parser<'d> {
    /// Creates a new parser over a scanned token sequence
    pub fn new(mut tokens: Vec<Token>, diagnostics: &'d mut Diagnostics) -> Self {
        // Cursor helpers rely on a trailing end marker
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }

        Parser {
            tokens,
            current: 0,
            depth: 0,
            diagnostics,
        }
    }

    /// Parses one expression, reporting a syntax error to the diagnostics
    ///
    /// Tokens after the expression are left unvisited.
    pub fn parse(&mut self) -> Option<Expression> {
        match self.try_parse() {
            Ok(expression) => Some(expression),
            Err(err) => {
                self.diagnostics.push(&err);
                None
            }
        }
    }

    /// Parses one expression, returning the syntax error instead of reporting it
    pub fn try_parse(&mut self) -> Result<Expression> {
        tracing::debug!(tokens = self.tokens.len(), "parsing expression");
        self.depth = 0;
        let result = self.expression();
        tracing::debug!(ok = result.is_ok(), position = self.current, "parse finished");
        result
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.current
    }

    /// True when every token before the end marker was consumed
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn expression(&mut self) -> Result<Expression> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expression> {
        let mut expression = self.comparison()?;

        while self.match_kinds(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expression = Expression::binary(expression, operator, right);
        }

        Ok(expression)
    }

    fn comparison(&mut self) -> Result<Expression> {
        let mut expression = self.term()?;

        while self.match_kinds(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            expression = Expression::binary(expression, operator, right);
        }

        Ok(expression)
    }

    fn term(&mut self) -> Result<Expression> {
        let mut expression = self.factor()?;

        while self.match_kinds(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous();
            let right = self.factor()?;
            expression = Expression::binary(expression, operator, right);
        }

        Ok(expression)
    }

    fn factor(&mut self) -> Result<Expression> {
        let mut expression = self.unary()?;

        while self.match_kinds(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous();
            let right = self.unary()?;
            expression = Expression::binary(expression, operator, right);
        }

        Ok(expression)
    }

    fn unary(&mut self) -> Result<Expression> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous();
            self.enter_nested()?;
            let right = self.unary()?;
            self.depth -= 1;
            return Ok(Expression::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expression> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expression::Literal(Value::Bool(false)));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expression::Literal(Value::Bool(true)));
        }
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expression::Literal(Value::Nil));
        }

        if self.match_kinds(&[TokenKind::Number, TokenKind::String]) {
            let token = self.previous();
            return match token.literal {
                Some(literal) => Ok(Expression::Literal(Value::from(literal))),
                None => Err(Self::error_at(&token, "Literal token carries no value")),
            };
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            self.enter_nested()?;
            let expression = self.expression()?;
            self.consume(TokenKind::RightParen, "Expected `)` after expression")?;
            self.depth -= 1;
            return Ok(Expression::grouping(expression));
        }

        Err(self.error_at_current("Expected an expression"))
    }

    // Helper methods

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn enter_nested(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error_at_current("Too much nesting"));
        }
        Ok(())
    }

    fn error_at_current(&self, message: &str) -> Error {
        Self::error_at(self.peek(), message)
    }

    fn error_at(token: &Token, message: &str) -> Error {
        let location = if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::AtLexeme(token.lexeme.clone())
        };
        Error::syntax(token.line, location, message)
    }
}
