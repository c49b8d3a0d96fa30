//! Command-line runtime for rxlint.
//!
//! [`run`] parses arguments, installs telemetry, loads settings, discovers
//! TypeScript files, checks them in parallel and renders the findings. It
//! takes its output streams as parameters so tests can drive it in-process.
//!
//! Exit codes: `0` when nothing was found, `1` when findings were reported
//! and `2` for usage, configuration or I/O errors.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rxlint::{CheckRegistry, FileReport, Linter, Settings, SourceFile};
use rxlint_core::{AnalysisLimits, DiagnosticReport};
use rxlint_semantics::Prelude;
use tracing::{debug, info};

mod cli;
mod discovery;
mod errors;
pub mod output;
pub mod telemetry;

use cli::Cli;
pub use cli::LogFormat;
use discovery::discover;
use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};

const CLI_TARGET: &str = "rxlint::cli";

const EXIT_FINDINGS: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Runs the CLI with `args`, writing findings to `stdout` and diagnostics
/// to `stderr`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_clap(&error, stdout, stderr),
    };
    match execute(&cli, stdout, stderr, stdout_is_terminal) {
        Ok(code) => code,
        Err(error) => {
            if let Err(write_error) = writeln!(stderr, "rxlint: {error}") {
                debug!(target: CLI_TARGET, %write_error, "failed to write error");
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn report_clap<W: Write, E: Write>(error: &clap::Error, stdout: &mut W, stderr: &mut E) -> ExitCode {
    let rendered = error.render();
    let written = if error.use_stderr() {
        write!(stderr, "{rendered}")
    } else {
        write!(stdout, "{rendered}")
    };
    if let Err(write_error) = written {
        debug!(target: CLI_TARGET, %write_error, "failed to write usage");
    }
    if error.use_stderr() {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::SUCCESS
    }
}

fn execute<W: Write, E: Write>(
    cli: &Cli,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> Result<ExitCode, AppError> {
    telemetry::initialise(&cli.log_filter, cli.log_format)?;
    let format = cli.format.resolve(stdout_is_terminal);
    let registry = CheckRegistry::builtin();

    if cli.list_checks {
        let checks: Vec<_> = registry.iter().map(|check| check.metadata()).collect();
        output::render_checks(&checks, format, stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let limits = cli
        .max_resolution_depth
        .map_or_else(AnalysisLimits::default, |depth| {
            AnalysisLimits::default().with_max_resolution_depth(depth)
        });
    let prelude = Arc::new(Prelude::rxjs()?);
    let activation = Linter::activate(&registry, &settings, limits, prelude);
    write_diagnostics(&activation.errors, stderr)?;

    let files = load_sources(&cli.paths)?;
    info!(target: CLI_TARGET, files = files.len(), "checking files");
    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
    let mut failed = !activation.errors.is_empty();
    for result in activation.linter.check_sources(&files) {
        match result {
            Ok(report) => reports.push(report),
            Err(error) => {
                writeln!(stderr, "rxlint: {error}")?;
                failed = true;
            }
        }
    }

    output::render_warnings(&reports, stderr)?;
    match format {
        ResolvedOutputFormat::Human => output::render_human(&reports, stdout)?,
        ResolvedOutputFormat::Json => output::render_json(&reports, stdout)?,
    }

    let findings: usize = reports.iter().map(|report| report.findings.len()).sum();
    debug!(target: CLI_TARGET, findings, failed, "run finished");
    Ok(if failed {
        ExitCode::from(EXIT_ERROR)
    } else if findings > 0 {
        ExitCode::from(EXIT_FINDINGS)
    } else {
        ExitCode::SUCCESS
    })
}

fn load_sources(paths: &[std::path::PathBuf]) -> Result<Vec<SourceFile>, AppError> {
    discover(paths)?
        .into_iter()
        .map(|target| {
            let source =
                std::fs::read_to_string(&target.path).map_err(|error| AppError::ReadPath {
                    path: target.path.to_string(),
                    source: error,
                })?;
            Ok(SourceFile::new(target.path.as_str(), target.language, source))
        })
        .collect()
}

fn write_diagnostics<E: Write>(report: &DiagnosticReport, stderr: &mut E) -> Result<(), AppError> {
    for diagnostic in report.diagnostics() {
        match diagnostic.origin() {
            Some(origin) => writeln!(
                stderr,
                "rxlint: {}: {origin}: {}",
                diagnostic.code().as_str(),
                diagnostic.message()
            )?,
            None => writeln!(
                stderr,
                "rxlint: {}: {}",
                diagnostic.code().as_str(),
                diagnostic.message()
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
