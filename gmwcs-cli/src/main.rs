//! `gmwcs` binary.
//!
//! Exit status: 0 on success, 2 when an input file cannot be read or parsed,
//! 3 when the engine configuration is rejected, and 1 for anything else.
//! Diagnostics go through `tracing` on stderr; results go to stdout.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use gmwcs_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

const INPUT_FAILURE: u8 = 2;
const CONFIG_FAILURE: u8 = 3;

fn run(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("command failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("failed to write results")?;
    out.flush().context("failed to flush stdout")
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Core(core)) if core.is_configuration() => ExitCode::from(CONFIG_FAILURE),
        Some(
            CliError::Io { .. }
            | CliError::MalformedLine { .. }
            | CliError::InvalidWeight { .. }
            | CliError::DuplicateNode { .. }
            | CliError::UnknownNode { .. },
        ) => ExitCode::from(INPUT_FAILURE),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<CliError>() {
                Some(CliError::Core(core)) => Some(field::display(core.code().as_str())),
                _ => None,
            };
            let message = format!("{err:#}");
            error!(error = %message, code, "gmwcs failed");
            exit_code(&err)
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available until logging is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("gmwcs: cannot initialize logging: {err}");
}
