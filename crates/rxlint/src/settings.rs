//! Session settings: which checks run and with which options.

use std::collections::BTreeMap;
use std::path::Path;

use rxlint_core::{DiagnosticCode, DiagnosticReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Settings for every check in a session.
///
/// Checks that are not mentioned run with their default options.
///
/// # Example
///
/// ```
/// use rxlint::Settings;
///
/// let settings = Settings::from_json(
///     r#"{ "checks": { "no-unsafe-first": { "options": { "observable": "epic\\$$" } } } }"#,
/// )?;
/// let unsafe_first = settings.check("no-unsafe-first").expect("configured");
/// assert!(unsafe_first.enabled);
/// assert_eq!(unsafe_first.options["observable"], "epic\\$$");
/// # Ok::<(), rxlint::SettingsError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Per-check settings keyed by check identifier.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckSettings>,
}

/// Settings for one check.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSettings {
    /// Whether the check runs.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// The check's options record; `null` selects the defaults.
    #[serde(default)]
    pub options: Value,
}

const fn enabled_by_default() -> bool {
    true
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            options: Value::Null,
        }
    }
}

impl CheckSettings {
    /// Settings that turn a check off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Settings that run a check with `options`.
    #[must_use]
    pub const fn with_options(options: Value) -> Self {
        Self {
            enabled: true,
            options,
        }
    }
}

impl Settings {
    /// Parses settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] if the text is not valid settings.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(text).map_err(|source| SettingsError::Parse { source })
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Read`] if the file cannot be read and
    /// [`SettingsError::Parse`] if its content is not valid settings.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns the settings for check `id`, if any were given.
    #[must_use]
    pub fn check(&self, id: &str) -> Option<&CheckSettings> {
        self.checks.get(id)
    }

    /// Returns these settings with `id` configured by `check`.
    #[must_use]
    pub fn with_check(mut self, id: impl Into<String>, check: CheckSettings) -> Self {
        self.checks.insert(id.into(), check);
        self
    }
}

/// Settings could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Read {
        /// The file path.
        path: String,
        /// The I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid.
    #[error("invalid settings: {source}")]
    Parse {
        /// The JSON failure.
        #[source]
        source: serde_json::Error,
    },
}

impl From<SettingsError> for DiagnosticReport {
    fn from(error: SettingsError) -> Self {
        let origin = match &error {
            SettingsError::Read { path, .. } => Some(path.clone()),
            SettingsError::Parse { .. } => None,
        };
        Self::single(
            DiagnosticCode::SettingsParse,
            error.to_string(),
            origin.as_deref(),
        )
    }
}
