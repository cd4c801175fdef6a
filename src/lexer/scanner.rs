use super::token::{Literal, Token, TokenKind};
use crate::diagnostics::Diagnostics;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Position counters of a scanner, for debug output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Length of the source in characters
    pub source_len: usize,
    /// Start of the most recently scanned lexeme
    pub start: usize,
    /// Current position in source
    pub current: usize,
    /// Current line number (1-indexed)
    pub lines: usize,
}

/// Scanner for Lox source text
///
/// Produces tokens on demand through [`Iterator`]. The sequence always ends
/// with exactly one [`TokenKind::Eof`] token, after which the scanner is
/// exhausted. Lexical problems are reported to the borrowed [`Diagnostics`]
/// and scanning carries on with the next character.
pub struct Scanner<'d> {
    /// Source code as character vector
    source: Vec<char>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Line on which the current token started
    start_line: usize,
    /// Set once the end marker has been handed out
    finished: bool,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Scanner<'d> {
    /// Creates a new scanner over the source code
    pub fn new(source: &str, diagnostics: &'d mut Diagnostics) -> Self {
        Scanner {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            finished: false,
            diagnostics,
        }
    }

    /// Scans all remaining tokens and returns them as a vector
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Snapshot of the position counters
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            source_len: self.source.len(),
            start: self.start,
            current: self.current,
            lines: self.line,
        }
    }

    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            '-' => self.make_token(TokenKind::Minus),
            '+' => self.make_token(TokenKind::Plus),
            ';' => self.make_token(TokenKind::Semicolon),
            '*' => self.make_token(TokenKind::Star),

            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::BangEqual)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqualEqual)
                } else {
                    self.make_token(TokenKind::Equal)
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LessEqual)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GreaterEqual)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                    None
                } else if self.match_char('*') {
                    self.skip_block_comment();
                    None
                } else {
                    self.make_token(TokenKind::Slash)
                }
            }

            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }

            '"' => self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(),

            // `-` never gets here on its own; it is matched as Minus above
            c if is_identifier_start(c) => self.scan_identifier_or_keyword(),

            _ => {
                self.report(Error::UnexpectedCharacter {
                    line: self.line,
                    character: c,
                });
                None
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        let mut depth = 1usize;

        while depth > 0 {
            if self.is_at_end() {
                self.report(Error::UnterminatedComment { line: self.line });
                return;
            }

            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                depth -= 1;
            } else if self.peek() == '/' && self.peek_next() == '*' {
                self.advance();
                self.advance();
                depth += 1;
            } else {
                if self.peek() == '\n' {
                    self.line += 1;
                }
                self.advance();
            }
        }
    }

    fn scan_string(&mut self) -> Option<Token> {
        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.report(Error::UnterminatedString { line: self.line });
            return None;
        }

        self.advance(); // Closing "

        let value: String = self.source[self.start + 1..self.current - 1]
            .iter()
            .collect();
        self.make_literal(TokenKind::String, Literal::String(value))
    }

    fn scan_number(&mut self) -> Option<Token> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume .
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(value) => self.make_literal(TokenKind::Number, Literal::Number(value)),
            Err(_) => {
                self.report(Error::InvalidNumber {
                    line: self.start_line,
                    lexeme: text,
                });
                None
            }
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> Option<Token> {
        while is_identifier_char(self.peek()) {
            self.advance();
        }

        let text = self.lexeme();
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn make_token(&self, kind: TokenKind) -> Option<Token> {
        Some(Token::simple(kind, self.lexeme(), self.start_line))
    }

    fn make_literal(&self, kind: TokenKind, literal: Literal) -> Option<Token> {
        Some(Token::new(kind, self.lexeme(), Some(literal), self.start_line))
    }

    fn report(&mut self, err: Error) {
        self.diagnostics.push(&err);
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            if let Some(token) = self.scan_token() {
                tracing::trace!(kind = %token.kind, line = token.line, "token");
                return Some(token);
            }
        }

        self.finished = true;
        Some(Token::eof(self.line))
    }
}

impl FusedIterator for Scanner<'_> {}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
        (tokens, diagnostics)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_operators() {
        let (tokens, diagnostics) = scan("(){},.-+;*! != = == < <= > >= /");
        assert!(!diagnostics.had_error());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_decimal_number() {
        let (tokens, _) = scan("3.14");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].literal, Some(Literal::Number(3.14)));
    }

    #[test]
    fn test_trailing_dot_is_separate() {
        let (tokens, _) = scan("3.");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
        assert_eq!(tokens[0].lexeme, "3");
        assert_eq!(tokens[0].literal, Some(Literal::Number(3.0)));
    }

    #[test]
    fn test_string_literal() {
        let (tokens, diagnostics) = scan("\"hello\"");
        assert!(!diagnostics.had_error());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello".into())));
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let (tokens, _) = scan("\"a\nb\nc\" x");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = scan("\"abc");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(diagnostics.len(), 1);
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.to_string(), "[line 1] Error: Unterminated string");
    }

    #[test]
    fn test_nested_block_comment() {
        let (tokens, diagnostics) = scan("/* a /* b */ c */");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, diagnostics) = scan("/* a\n");
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);
        assert_eq!(diagnostics.len(), 1);
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.line, 2);
        assert!(first.message.contains("Unterminated comment"));
    }

    #[test]
    fn test_line_comment() {
        let (tokens, _) = scan("// ignored\n1");
        assert_eq!(kinds(&tokens), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_unexpected_character_continues() {
        let (tokens, diagnostics) = scan("@1");
        assert_eq!(kinds(&tokens), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(diagnostics.len(), 1);
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.to_string(), "[line 1] Error: Unexpected character: @");
    }

    #[test]
    fn test_keywords_and_hyphenated_identifiers() {
        let (tokens, _) = scan("var foo-bar _x nil");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Nil,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "foo-bar");
    }

    #[test]
    fn test_unicode_identifiers() {
        // Arabic-Indic digit three and superscript two continue an identifier
        let (tokens, diagnostics) = scan("caf\u{e9}\u{663} x\u{b2}");
        assert!(!diagnostics.had_error());
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
        assert_eq!(tokens[0].lexeme, "caf\u{e9}\u{663}");
        assert_eq!(tokens[1].lexeme, "x\u{b2}");
    }

    #[test]
    fn test_lone_minus_is_operator() {
        let (tokens, _) = scan("a - b");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::Minus,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_eof_line_and_exhaustion() {
        let mut diagnostics = Diagnostics::new();
        let mut scanner = Scanner::new("1\n2\n", &mut diagnostics);
        let tokens = scanner.scan_tokens();
        assert_eq!(tokens.last().map(|t| (t.kind, t.line)), Some((TokenKind::Eof, 3)));
        assert!(scanner.next().is_none());
        assert_eq!(scanner.stats().lines, 3);
        assert_eq!(scanner.stats().source_len, 4);
    }
}
