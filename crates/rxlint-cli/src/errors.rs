//! Error types for the CLI runtime.

use std::io;

use rxlint::{LintError, SettingsError};
use rxlint_semantics::SemanticsError;
use rxlint_syntax::SyntaxError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that end a run with exit code 2.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to load the rxjs declarations: {0}")]
    Prelude(#[from] SemanticsError),
    #[error("failed to read {path}: {source}")]
    ReadPath {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot check {path}: {source}")]
    UnsupportedFile {
        path: String,
        #[source]
        source: SyntaxError,
    },
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },
    #[error(transparent)]
    Lint(#[from] LintError),
    #[error("failed to serialise the report: {0}")]
    Serialise(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}
