//! Static descriptions of checks.

use serde::Serialize;

/// Whether a check flags likely bugs or stylistic issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Code that is probably wrong.
    Problem,
    /// Code that could be better.
    Suggestion,
}

/// One documented option of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSchema {
    /// Option name as it appears in the options record.
    pub name: &'static str,
    /// JSON type of the value.
    pub value_type: &'static str,
    /// What the option controls.
    pub description: &'static str,
    /// Default value, rendered.
    pub default: Option<&'static str>,
}

/// Identity, documentation and messages of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckMetadata {
    /// Stable identifier, for example `no-ignored-subscribe`.
    pub id: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Grouping shown in listings.
    pub category: &'static str,
    /// Whether the check belongs in a recommended preset.
    pub recommended: bool,
    /// Problem or suggestion.
    pub kind: CheckKind,
    /// Message templates keyed by message key.
    pub messages: &'static [(&'static str, &'static str)],
    /// Documented options.
    pub options: &'static [OptionSchema],
}

impl CheckMetadata {
    /// Returns the message registered under `key`.
    #[must_use]
    pub fn message(&self, key: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, message)| *message)
    }

    /// Returns the schema of option `name`.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&'static OptionSchema> {
        self.options.iter().find(|option| option.name == name)
    }
}
