//! Error types for the Treewalk front end

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where on a line a diagnostic points
///
/// Rendered directly after the word `Error` in a diagnostic line, so the
/// textual forms carry their own leading space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Location {
    /// No position beyond the line number
    #[default]
    Nowhere,
    /// At the end-of-input marker
    AtEnd,
    /// At a specific token, identified by its lexeme
    AtLexeme(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Location::Nowhere => Ok(()),
            Location::AtEnd => write!(f, " at end"),
            Location::AtLexeme(lexeme) => write!(f, " at \"{}\"", lexeme),
        }
    }
}

/// Front-end errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lex errors
    /// String literal still open when the input ran out
    ///
    /// **Triggered by:** a `"` with no matching closing quote
    /// **Example:** `"hello`
    #[error("Unterminated string")]
    UnterminatedString {
        /// Line at which the input ended
        line: usize,
    },

    /// Block comment still open when the input ran out
    ///
    /// **Triggered by:** more `/*` than `*/` before end of input
    /// **Example:** `/* a /* b */`
    #[error("Unterminated comment")]
    UnterminatedComment {
        /// Line at which the input ended
        line: usize,
    },

    /// Character that starts no token
    ///
    /// **Example:** `@`, `#`, `%`
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter {
        /// Line of the offending character
        line: usize,
        /// The character itself
        character: char,
    },

    /// Number lexeme that does not decode to a float
    #[error("Invalid number: {lexeme}")]
    InvalidNumber {
        /// Line of the lexeme
        line: usize,
        /// The digits as scanned
        lexeme: String,
    },

    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** a token where no expression can start, or a missing `)`
    /// **Example:** `(1 + 2`, `* 3`
    #[error("{message}")]
    Syntax {
        /// Line of the token the parser stopped at
        line: usize,
        /// Position of that token
        location: Location,
        /// Error description
        message: String,
    },
}

/// Which stage of the front end raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised by the scanner; scanning continues afterwards
    Lex,
    /// Raised by the parser; the current parse is abandoned
    Parse,
}

impl Error {
    /// Create a syntax error pointing at a location on a line
    pub fn syntax(line: usize, location: Location, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            location,
            message: message.into(),
        }
    }

    /// Source line the error refers to
    pub fn line(&self) -> usize {
        match self {
            Error::UnterminatedString { line }
            | Error::UnterminatedComment { line }
            | Error::UnexpectedCharacter { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::Syntax { line, .. } => *line,
        }
    }

    /// Position on the line, if the error carries one
    pub fn location(&self) -> Location {
        match self {
            Error::Syntax { location, .. } => location.clone(),
            _ => Location::Nowhere,
        }
    }

    /// Classify the error by the stage that produced it
    pub fn classify(&self) -> ErrorKind {
        match self {
            Error::UnterminatedString { .. }
            | Error::UnterminatedComment { .. }
            | Error::UnexpectedCharacter { .. }
            | Error::InvalidNumber { .. } => ErrorKind::Lex,
            Error::Syntax { .. } => ErrorKind::Parse,
        }
    }
}

/// Result type for front-end operations
pub type Result<T> = std::result::Result<T, Error>;
