use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;
use treewalk::{sample_expression, Config, Lox, Notation, RunOutcome};

/// Exit status for a script that reported lexical or syntax errors
const EXIT_DATA_ERROR: u8 = 65;

/// treewalk scans and parses Lox source, then prints the expression tree.
/// Without a script it starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(name = "treewalk", version, about, long_about = None)]
struct Args {
    /// Script to run
    script: Option<PathBuf>,

    /// Print every token before the tree
    #[arg(short, long)]
    tokens: bool,

    /// Print scanner position counters
    #[arg(short, long)]
    stats: bool,

    /// Print tokens and tree as JSON
    #[arg(long)]
    json: bool,

    /// Tree rendering: prefix (lisp) or postfix (rpn)
    #[arg(short, long, default_value_t = Notation::Prefix)]
    notation: Notation,

    /// Render a built-in sample tree and exit
    #[arg(long)]
    debug_expression: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_notation(self.notation)
            .with_tokens(self.tokens)
            .with_stats(self.stats)
            .with_json(self.json)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treewalk=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.debug_expression {
        println!("{}", args.notation.render(&sample_expression()));
        return Ok(ExitCode::SUCCESS);
    }

    let mut lox = Lox::new(args.config());
    match &args.script {
        Some(script) => run_file(&mut lox, script),
        None => {
            run_prompt(&mut lox)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_file(lox: &mut Lox, script: &Path) -> anyhow::Result<ExitCode> {
    let outcome = lox.run_file(script)?;
    finish_script(lox, &outcome, &mut io::stdout(), &mut io::stderr())
}

/// Print a script's outcome and pick the exit status
///
/// With JSON output the failure notice goes to `err` so `out` stays valid JSON.
fn finish_script(
    lox: &Lox,
    outcome: &RunOutcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    emit_to(lox, outcome, out, err)?;

    if lox.had_error() {
        if lox.config().emit_json {
            writeln!(err, "Errors found.")?;
        } else {
            writeln!(out, "Errors found.")?;
        }
        return Ok(ExitCode::from(EXIT_DATA_ERROR));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_prompt(lox: &mut Lox) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new().context("failed to start line editor")?;

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if line.is_empty() {
                    break;
                }
                rl.add_history_entry(line.as_str())?;

                let outcome = lox.run(&line);
                emit_to(lox, &outcome, &mut io::stdout(), &mut io::stderr())?;
                lox.reset_errors();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read line"),
        }
    }

    Ok(())
}

/// Diagnostics go to `err`, the rendered outcome to `out`
fn emit_to(
    lox: &Lox,
    outcome: &RunOutcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    for diagnostic in lox.diagnostics() {
        writeln!(err, "{}", diagnostic)?;
    }
    write!(out, "{}", outcome.render(lox.config())?)?;
    Ok(())
}
