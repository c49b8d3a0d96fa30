//! Configuration problems found while activating checks.
//!
//! Anything that stops a check from running at all is reported once per
//! session as a [`Diagnostic`] with a stable [`DiagnosticCode`]. Findings
//! about analysed code are a separate type owned by the check host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable, machine-readable diagnostic codes.
///
/// ```
/// use rxlint_core::DiagnosticCode;
///
/// assert_eq!(DiagnosticCode::InvalidRegex.to_string(), "E_RXLINT_INVALID_REGEX");
/// assert_eq!("E_RXLINT_UNKNOWN_CHECK".parse(), Ok(DiagnosticCode::UnknownCheck));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticCode {
    /// The settings file could not be read or parsed.
    SettingsParse,
    /// The settings name a check that is not registered.
    UnknownCheck,
    /// An options record has the wrong shape.
    InvalidOption,
    /// A regular-expression option does not compile.
    InvalidRegex,
    /// A check declared a pattern no node kind can satisfy.
    UnsatisfiablePattern,
}

impl DiagnosticCode {
    const ALL: [Self; 5] = [
        Self::SettingsParse,
        Self::UnknownCheck,
        Self::InvalidOption,
        Self::InvalidRegex,
        Self::UnsatisfiablePattern,
    ];

    /// The `E_RXLINT_*` spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SettingsParse => "E_RXLINT_SETTINGS_PARSE",
            Self::UnknownCheck => "E_RXLINT_UNKNOWN_CHECK",
            Self::InvalidOption => "E_RXLINT_INVALID_OPTION",
            Self::InvalidRegex => "E_RXLINT_INVALID_REGEX",
            Self::UnsatisfiablePattern => "E_RXLINT_UNSATISFIABLE_PATTERN",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not an `E_RXLINT_*` code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagnostic code `{0}`")]
pub struct UnknownCode(String);

impl FromStr for DiagnosticCode {
    type Err = UnknownCode;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == input)
            .ok_or_else(|| UnknownCode(input.to_owned()))
    }
}

/// One configuration problem.
///
/// ```
/// use rxlint_core::{Diagnostic, DiagnosticCode};
///
/// let diagnostic = Diagnostic::new(DiagnosticCode::InvalidOption, "unknown option `observables`")
///     .with_origin("no-unsafe-first");
/// assert_eq!(
///     diagnostic.to_string(),
///     "E_RXLINT_INVALID_OPTION: no-unsafe-first: unknown option `observables`"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    code: DiagnosticCode,
    message: String,
    /// Check identifier or settings path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
}

impl Diagnostic {
    /// A diagnostic with no origin and no notes.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            notes: Vec::new(),
        }
    }

    /// Names the check or settings file the problem concerns.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Adds a hint for fixing the problem.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Stable code.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check identifier or settings path, when known.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Hints attached with [`Diagnostic::with_note`].
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code)?;
        if let Some(origin) = &self.origin {
            write!(f, "{origin}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Every configuration problem found during one activation, in the order
/// they were found.
///
/// Displays as its first diagnostic.
///
/// ```
/// use rxlint_core::{DiagnosticCode, DiagnosticReport};
///
/// let report = DiagnosticReport::single(
///     DiagnosticCode::UnknownCheck,
///     "no check named `no-such-check`",
///     Some("no-such-check"),
/// );
/// assert_eq!(report.len(), 1);
/// assert!(report.to_string().starts_with("E_RXLINT_UNKNOWN_CHECK"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostics.first() {
            Some(first) => fmt::Display::fmt(first, f),
            None => f.write_str("no diagnostics"),
        }
    }
}

impl DiagnosticReport {
    /// A report holding one diagnostic.
    #[must_use]
    pub fn single(code: DiagnosticCode, message: impl Into<String>, origin: Option<&str>) -> Self {
        let diagnostic = Diagnostic::new(code, message);
        Self {
            diagnostics: vec![match origin {
                Some(name) => diagnostic.with_origin(name),
                None => diagnostic,
            }],
        }
    }

    /// Appends one diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Appends every diagnostic from `other`.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Diagnostics in the order they were added.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether activation found no problems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl FromIterator<Diagnostic> for DiagnosticReport {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}
