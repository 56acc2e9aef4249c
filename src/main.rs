//! autoanchor CLI entry point.

mod args;

use autoanchor::{
    Error, InputController, NativeBackend, OperationOutcome, dispatch, validate_command,
};
use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use tracing::error;

use crate::args::Cli;

fn main() {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => finish(&OperationOutcome::failure(&Error::InvalidArgument(
            clap_message(&e),
        ))),
    };

    init_tracing(cli.verbose);
    finish(&run(&cli));
}

/// Log to stderr only; stdout carries nothing but the result line.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(cli: &Cli) -> OperationOutcome {
    let command = match validate_command(cli.command.name(), &cli.command.positionals()) {
        Ok(command) => command,
        Err(e) => return OperationOutcome::failure(&e),
    };

    let mut controller = InputController::new(NativeBackend::new(), cli.command.settings());
    dispatch(&mut controller, command)
}

/// Emit the outcome and exit with its status.
fn finish(outcome: &OperationOutcome) -> ! {
    if let Err(e) = outcome.emit(io::stdout().lock()) {
        error!("failed to write result: {}", e);
        std::process::exit(1);
    }
    std::process::exit(outcome.exit_code());
}

/// A clap error folded onto one line, without the `error: ` prefix and the
/// closing `--help` hint.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let folded = rendered
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("For more information"))
        .collect::<Vec<_>>()
        .join(" ");
    folded
        .strip_prefix("error: ")
        .unwrap_or(&folded)
        .to_string()
}
