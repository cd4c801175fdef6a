//! Diagnostics collector
//!
//! Lexical and syntax problems are recorded here instead of being printed
//! from deep inside the scanner or parser. One [`Diagnostics`] value belongs
//! to one run; the caller decides when to print and when to clear it.

use crate::error::{Error, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source line (1-indexed)
    pub line: usize,
    /// Position on the line
    pub location: Location,
    /// Error description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

/// Per-run sink for diagnostics
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    reports: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic at a position on a line
    pub fn report(&mut self, line: usize, location: Location, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            line,
            location,
            message: message.into(),
        };
        tracing::debug!(%diagnostic, "reported");
        self.reports.push(diagnostic);
    }

    /// Records a diagnostic that only carries a line
    pub fn error(&mut self, line: usize, message: impl Into<String>) {
        self.report(line, Location::Nowhere, message);
    }

    /// Records a front-end error
    pub fn push(&mut self, err: &Error) {
        self.report(err.line(), err.location(), err.to_string());
    }

    /// True once anything has been reported since the last clear
    pub fn had_error(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reports.iter()
    }

    /// Forgets everything reported so far
    pub fn clear(&mut self) {
        self.reports.clear();
    }

    /// Removes and returns everything reported so far
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.reports)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}
