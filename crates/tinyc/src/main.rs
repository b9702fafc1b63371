mod cli;
mod compiler;

#[cfg(test)]
mod tests;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use cli::{Cli, TargetArg};
use tinyc_backend::Target;
use tinyc_session::diagnostics::PrettyDiagnosticEmitter;
use tinyc_session::{ErrorsEmitted, Session};
use tracing::Level;

/// Exit status of every failed run.
const FAILURE: u8 = 69;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("couldn't read `{}`: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("no input is provided")]
    NoInput,

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("targets listed, nothing compiled")]
    TargetsListed,

    #[error("errors while compiling")]
    HadErrors,
}

impl From<ErrorsEmitted> for CompilerError {
    fn from(_: ErrorsEmitted) -> Self {
        CompilerError::HadErrors
    }
}

impl CompilerError {
    /// The text printed to stderr for this error, unless it was already
    /// reported as it happened.
    fn message(&self) -> Option<String> {
        match self {
            CompilerError::HadErrors | CompilerError::TargetsListed => None,
            // clap renders its own `error:` prefix and usage
            CompilerError::Cli(err) => Some(err.to_string()),
            err => Some(format!("error: {err}\n")),
        }
    }
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(message) = err.message() {
                eprint!("{message}");
            }

            ExitCode::from(FAILURE)
        }
    }
}

fn run() -> CompilerResult<()> {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        // `--help` and `--version`
        Err(err) if !err.use_stderr() => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    init_logging(cli.verbose);

    let target = match cli.target {
        TargetArg::List => {
            let mut stdout = io::stdout().lock();
            for target in Target::ALL {
                writeln!(stdout, "{target}")?;
            }
            return Err(CompilerError::TargetsListed);
        }
        TargetArg::Target(target) => target,
    };

    let input = cli.input.ok_or(CompilerError::NoInput)?;
    let source = std::fs::read_to_string(&input).map_err(|source| CompilerError::ReadInput {
        path: input.clone(),
        source,
    })?;

    let mut session = Session::new(PrettyDiagnosticEmitter::default());
    let output = compiler::compile(&mut session, input.display().to_string(), source, target)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}
