//! # Treewalk - the front end of a Lox tree-walking interpreter
//!
//! Turns Lox source text into an expression tree and renders that tree as
//! text. Statements, evaluation and environments are not part of this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use treewalk::{AstPrinter, Diagnostics, Parser, RpnPrinter, Scanner};
//!
//! let mut diagnostics = Diagnostics::new();
//!
//! // Tokenize (scan)
//! let tokens = Scanner::new("1 + 2 * 3", &mut diagnostics).scan_tokens();
//!
//! // Parse into an expression tree
//! let expression = Parser::new(tokens, &mut diagnostics)
//!     .parse()
//!     .expect("valid expression");
//!
//! assert!(!diagnostics.had_error());
//! assert_eq!(AstPrinter.print(&expression), "(+ 1 (* 2 3))");
//! assert_eq!(RpnPrinter.print(&expression), "1 2 3 * +");
//! ```
//!
//! ## Error Handling
//!
//! Problems are collected in a [`Diagnostics`] value owned by the caller,
//! never printed from inside the scanner or parser:
//!
//! ```rust
//! use treewalk::{Diagnostics, Parser, Scanner};
//!
//! let mut diagnostics = Diagnostics::new();
//! let tokens = Scanner::new("(1 + 2", &mut diagnostics).scan_tokens();
//! assert!(Parser::new(tokens, &mut diagnostics).parse().is_none());
//!
//! let report = diagnostics.iter().next().unwrap().to_string();
//! assert_eq!(report, "[line 1] Error at end: Expected `)` after expression");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → Expression → Printer → String
//! ```
//!
//! - [`Scanner`] - Tokenizes source code, lazily, one token per `next()`
//! - [`Parser`] - Parses tokens into an [`Expression`] by recursive descent
//! - [`AstPrinter`] / [`RpnPrinter`] - Prefix and reverse-Polish renderings
//! - [`Diagnostics`] - Per-run record of lexical and syntax errors
//! - [`Lox`] - Session that runs all of the above on a source string

/// Version of the Treewalk front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;

// Re-export main types
pub use config::Config;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, ErrorKind, Location, Result};
pub use interpreter::{Lox, RunOutcome};
pub use lexer::{Literal, ScanStats, Scanner, Token, TokenKind};
pub use parser::{Expression, Parser, Value, Visitor, MAX_NESTING};
pub use printer::{sample_expression, AstPrinter, Notation, RpnPrinter};
