//! Rendering of file reports and check listings.

use std::io::{self, Write};

use clap::ValueEnum;
use rxlint::{CheckMetadata, FileReport};

/// Output format selection for findings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// One line per finding.
    Human,
    /// A JSON array of file reports.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// One line per finding.
    Human,
    /// A JSON array of file reports.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Writes `<path>:<line>:<col>: <check-id>: <message>` for every finding.
///
/// Positions are one-based and point at the finding's primary span.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render_human<W: Write>(reports: &[FileReport], out: &mut W) -> io::Result<()> {
    for report in reports {
        for finding in &report.findings {
            let (line, column) = finding.primary_span().start.one_based();
            writeln!(
                out,
                "{}:{line}:{column}: {}: {}",
                report.uri, finding.check_id, finding.message
            )?;
        }
    }
    Ok(())
}

/// Writes parse problems and stopped checks, which do not affect the exit
/// code, as warnings.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render_warnings<W: Write>(reports: &[FileReport], out: &mut W) -> io::Result<()> {
    for report in reports {
        for issue in &report.syntax_errors {
            writeln!(
                out,
                "{}:{}:{}: warning: syntax error: {}",
                report.uri, issue.line, issue.column, issue.message
            )?;
        }
        for failure in &report.failures {
            let position = failure
                .span
                .map(|span| {
                    let (line, column) = span.start.one_based();
                    format!(":{line}:{column}")
                })
                .unwrap_or_default();
            writeln!(
                out,
                "{}{position}: warning: check {} stopped: {}",
                report.uri, failure.check_id, failure.message
            )?;
        }
    }
    Ok(())
}

/// Writes the reports as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialisation or writing fails.
pub fn render_json<W: Write>(reports: &[FileReport], out: &mut W) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Writes one line per check with its identifier and description.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialisation or writing fails.
pub fn render_checks<W: Write>(
    checks: &[&CheckMetadata],
    format: ResolvedOutputFormat,
    out: &mut W,
) -> Result<(), serde_json::Error> {
    match format {
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, checks)?;
            writeln!(out).map_err(serde_json::Error::io)
        }
        ResolvedOutputFormat::Human => {
            let width = checks
                .iter()
                .map(|metadata| metadata.id.len())
                .max()
                .unwrap_or_default();
            for metadata in checks {
                writeln!(
                    out,
                    "{:<width$}  {}",
                    metadata.id, metadata.description
                )
                .map_err(serde_json::Error::io)?;
            }
            Ok(())
        }
    }
}
