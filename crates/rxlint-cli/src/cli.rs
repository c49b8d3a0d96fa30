//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

/// Log line layout on stderr.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Structured JSON, one object per line.
    Json,
    /// Human-readable single line output.
    #[default]
    Compact,
}

/// Static checks for misused rxjs observables in TypeScript sources.
#[derive(Parser, Debug)]
#[command(name = "rxlint", version)]
pub(crate) struct Cli {
    /// Files or directories to check. Directories are searched for
    /// `.ts`, `.tsx`, `.mts` and `.cts` files.
    #[arg(value_name = "PATH", required_unless_present = "list_checks")]
    pub(crate) paths: Vec<PathBuf>,
    /// JSON settings file selecting checks and their options.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// Controls how findings are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) format: OutputFormat,
    /// Tracing filter directive for diagnostics on stderr.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub(crate) log_filter: String,
    /// Layout of diagnostic log lines.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
    /// Maximum number of alias, generic and supertype steps followed when
    /// classifying a type.
    #[arg(long, value_name = "STEPS")]
    pub(crate) max_resolution_depth: Option<usize>,
    /// Prints the available checks and exits.
    #[arg(long)]
    pub(crate) list_checks: bool,
}
