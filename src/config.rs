//! Front-end settings
//!
//! Controls what a run echoes besides the rendered tree. Built from the
//! command line by the binary; library users start from [`Config::default`].

use crate::printer::Notation;

/// Settings for a [`crate::Lox`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Renderer used for the parsed tree
    pub notation: Notation,
    /// Print every token before parsing
    pub echo_tokens: bool,
    /// Print scanner position counters after scanning
    pub echo_stats: bool,
    /// Print tokens and tree as JSON instead of text
    pub emit_json: bool,
}

impl Config {
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    pub fn with_tokens(mut self, echo: bool) -> Self {
        self.echo_tokens = echo;
        self
    }

    pub fn with_stats(mut self, echo: bool) -> Self {
        self.echo_stats = echo;
        self
    }

    pub fn with_json(mut self, emit: bool) -> Self {
        self.emit_json = emit;
        self
    }
}
