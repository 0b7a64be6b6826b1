mod error;

use calc_compute::{calculate, eval_rpn, format_number, to_infix, CalcError};
use calc_parser::{to_postfix, tokenize, Token};
use clap::Parser;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, BufRead, IsTerminal}, path::PathBuf, process::ExitCode};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Evaluates arithmetic expressions.
///
/// With no expression or file, reads expressions line by line from stdin, or starts an
/// interactive prompt if stdin is a terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// An expression to evaluate once.
    expression: Option<String>,

    /// Evaluate each non-empty line of this file.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Also print the tokens of each expression.
    #[arg(long)]
    tokens: bool,

    /// Also print the postfix form of each expression, and the infix form rebuilt from it.
    #[arg(long)]
    rpn: bool,

    /// Log filter to use when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log: String,
}

/// Installs a subscriber that writes log events to stderr.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Joins the lexemes of the given tokens with spaces.
fn join_lexemes(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.lexeme.as_ref()).collect::<Vec<_>>().join(" ")
}

/// Calculates the given expression, printing the intermediate stages that were asked for.
fn calculate_verbose(input: &str, args: &Args) -> Result<f64, CalcError> {
    if !args.tokens && !args.rpn {
        return calculate(input);
    }

    let tokens = tokenize(input).map_err(CalcError::Lex)?;
    if args.tokens {
        println!("tokens: {}", join_lexemes(&tokens));
    }

    let rpn = to_postfix(&tokens).map_err(CalcError::Syntax)?;
    if args.rpn {
        println!("rpn: {}", join_lexemes(&rpn));
        println!("infix: {}", to_infix(&rpn).map_err(CalcError::Eval)?);
    }

    eval_rpn(&rpn).map_err(CalcError::Eval)
}

/// Calculates the given expression and prints the result, or reports the error. Returns true if
/// the calculation succeeded.
fn read_eval(input: &str, args: &Args) -> bool {
    match calculate_verbose(input, args) {
        Ok(result) => {
            println!("{}", format_number(result));
            true
        },
        Err(err) => {
            debug!(stage = err.stage(), %err, "calculation failed");
            Error::from(err).report_to_stderr(input);
            false
        },
    }
}

/// Evaluates every non-empty line from the given reader. Returns true if every line succeeded.
fn eval_lines(reader: impl BufRead, args: &Args) -> Result<bool, Error> {
    let mut all_ok = true;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        all_ok &= read_eval(&line, args);
    }
    Ok(all_ok)
}

/// Runs the interactive prompt until the user exits.
fn repl(args: &Args) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, args: &Args) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_eval(&input, args);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, args) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log);

    if let Some(expression) = &args.expression {
        exit_code(read_eval(expression, &args))
    } else if let Some(path) = &args.file {
        let result = fs::File::open(path)
            .map_err(Error::from)
            .and_then(|file| eval_lines(io::BufReader::new(file), &args));
        match result {
            Ok(all_ok) => exit_code(all_ok),
            Err(err) => {
                warn!(path = %path.display(), "could not read file");
                err.report_to_stderr("");
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        match eval_lines(io::stdin().lock(), &args) {
            Ok(all_ok) => exit_code(all_ok),
            Err(err) => {
                err.report_to_stderr("");
                ExitCode::FAILURE
            },
        }
    } else {
        match repl(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        }
    }
}
