//! Lexical analysis
//!
//! Converts source text into a stream of tokens ending in a single end marker.

mod scanner;
mod token;

pub use scanner::{ScanStats, Scanner};
pub use token::{Literal, Token, TokenKind};
