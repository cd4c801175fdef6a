//! Run driver
//!
//! Ties the scanner, parser and printers together for one source text at a
//! time. A [`Lox`] session keeps its own [`Diagnostics`], so separate
//! sessions never see each other's errors.

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::lexer::{ScanStats, Scanner, Token};
use crate::parser::{Expression, Parser};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Full token sequence, end marker included
    pub tokens: Vec<Token>,
    /// Scanner counters after the last token
    pub stats: ScanStats,
    /// Parsed tree, absent when parsing failed
    pub expression: Option<Expression>,
}

impl RunOutcome {
    /// Render the outcome as the text a run prints to stdout
    pub fn render(&self, config: &Config) -> anyhow::Result<String> {
        if config.emit_json {
            return serde_json::to_string_pretty(self).context("serializing run outcome");
        }

        let mut out = String::new();
        if config.echo_tokens {
            for token in &self.tokens {
                writeln!(out, "{}", token)?;
            }
        }
        if config.echo_stats {
            writeln!(out, "Debug Stats:")?;
            writeln!(out, "\tTotal Length: {}", self.stats.source_len)?;
            writeln!(out, "\tFinal start value: {}", self.stats.start)?;
            writeln!(out, "\tFinal current value: {}", self.stats.current)?;
            writeln!(out, "\tTotal Lines: {}", self.stats.lines)?;
        }
        match &self.expression {
            Some(expression) => writeln!(out, "{}", config.notation.render(expression))?,
            None => writeln!(out, "Had parse error!")?,
        }
        Ok(out)
    }
}

/// Front-end session
#[derive(Debug, Default)]
pub struct Lox {
    config: Config,
    diagnostics: Diagnostics,
}

impl Lox {
    pub fn new(config: Config) -> Self {
        Lox {
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan and parse one source text
    ///
    /// Diagnostics accumulate across runs until [`Lox::reset_errors`].
    pub fn run(&mut self, source: &str) -> RunOutcome {
        let mut scanner = Scanner::new(source, &mut self.diagnostics);
        let tokens = scanner.scan_tokens();
        let stats = scanner.stats();
        tracing::debug!(tokens = tokens.len(), lines = stats.lines, "scanned");

        let expression = Parser::new(tokens.clone(), &mut self.diagnostics).parse();

        RunOutcome {
            tokens,
            stats,
            expression,
        }
    }

    /// Read a script from disk and run it
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<RunOutcome> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Ok(self.run(&source))
    }

    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Clear diagnostics between independent inputs
    pub fn reset_errors(&mut self) {
        self.diagnostics.clear();
    }
}
