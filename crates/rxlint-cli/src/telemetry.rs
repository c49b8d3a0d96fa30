//! Installs the process-wide `tracing` subscriber.
//!
//! Log events go to stderr so they never mix with findings on stdout.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogFormat;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Reasons logging could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `--log-filter` is not a valid `EnvFilter` directive list.
    #[error("invalid --log-filter `{directives}`: {reason}")]
    Filter {
        /// Directives as given.
        directives: String,
        /// Parser message.
        reason: String,
    },
    /// Another global subscriber was installed first.
    #[error("cannot install the log subscriber: {0}")]
    Install(#[source] SetGlobalDefaultError),
}

/// Installs the subscriber on first use; later calls keep the first one.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for malformed directives and
/// [`TelemetryError::Install`] when a foreign subscriber is already global.
pub fn initialise(filter: &str, format: LogFormat) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| install(filter, format))
        .map(|&()| ())
}

fn install(filter: &str, format: LogFormat) -> Result<(), TelemetryError> {
    let directives = EnvFilter::try_new(filter).map_err(|error| TelemetryError::Filter {
        directives: filter.to_owned(),
        reason: error.to_string(),
    })?;
    let base = fmt::Subscriber::builder()
        .with_env_filter(directives)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(base.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(base.compact().finish()),
    };
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Install)
}
