//! Errors raised while configuring or running checks.

use rxlint_core::{DiagnosticCode, DiagnosticReport};
use thiserror::Error;

use crate::pattern::PatternError;

/// A check rejected its configuration at activation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckConfigError {
    /// The options record does not match the check's schema.
    #[error("invalid options for `{check}`: {message}")]
    InvalidOption {
        /// Check identifier.
        check: String,
        /// What was wrong.
        message: String,
    },

    /// A regular-expression option failed to compile.
    #[error("invalid regular expression in `{check}` option `{option}`: {source}")]
    InvalidRegex {
        /// Check identifier.
        check: String,
        /// Option name.
        option: String,
        /// The compile failure.
        #[source]
        source: regex::Error,
    },

    /// A pattern the check declared can never match.
    #[error("`{check}` declares an unusable pattern: {source}")]
    Pattern {
        /// Check identifier.
        check: String,
        /// The compile failure.
        #[source]
        source: PatternError,
    },
}

impl CheckConfigError {
    pub(crate) fn invalid_option(check: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            check: check.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_regex(check: &str, option: &str, source: regex::Error) -> Self {
        Self::InvalidRegex {
            check: check.to_owned(),
            option: option.to_owned(),
            source,
        }
    }

    pub(crate) fn pattern(check: &str, source: PatternError) -> Self {
        Self::Pattern {
            check: check.to_owned(),
            source,
        }
    }

    /// Returns the identifier of the check that failed.
    #[must_use]
    pub fn check(&self) -> &str {
        match self {
            Self::InvalidOption { check, .. }
            | Self::InvalidRegex { check, .. }
            | Self::Pattern { check, .. } => check,
        }
    }

    /// Returns the stable diagnostic code for this error.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        match self {
            Self::InvalidOption { .. } => DiagnosticCode::InvalidOption,
            Self::InvalidRegex { .. } => DiagnosticCode::InvalidRegex,
            Self::Pattern { .. } => DiagnosticCode::UnsatisfiablePattern,
        }
    }
}

impl From<CheckConfigError> for DiagnosticReport {
    fn from(error: CheckConfigError) -> Self {
        Self::single(error.code(), error.to_string(), Some(error.check()))
    }
}

/// A check handler failed while processing a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HandlerError {
    /// The handler reported a message key its metadata does not declare.
    #[error("`{check}` has no message `{key}`")]
    UnknownMessage {
        /// Check identifier.
        check: String,
        /// The undeclared key.
        key: String,
    },

    /// The handler could not continue.
    #[error("`{check}` failed: {message}")]
    Failed {
        /// Check identifier.
        check: String,
        /// What went wrong.
        message: String,
    },
}

impl HandlerError {
    /// Creates a [`HandlerError::Failed`].
    #[must_use]
    pub fn failed(check: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            check: check.to_owned(),
            message: message.into(),
        }
    }
}
