//! Expression parser
//!
//! Parses a token sequence into an expression tree by recursive descent.

mod ast;
mod expr_parser;

pub use ast::{Expression, Value, Visitor};
pub use expr_parser::{Parser, MAX_NESTING};
