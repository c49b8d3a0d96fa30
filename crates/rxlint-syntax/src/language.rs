//! Mapping from file names to the TypeScript grammar that parses them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::error::SyntaxError;

/// TypeScript dialects the checker can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`, `.d.ts`).
    #[default]
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl SupportedLanguage {
    /// Maps an extension, without its leading dot, to a dialect.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        if ["ts", "mts", "cts"]
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
        {
            Some(Self::TypeScript)
        } else if extension.eq_ignore_ascii_case("tsx") {
            Some(Self::Tsx)
        } else {
            None
        }
    }

    /// Maps a path to a dialect, or `None` when rxlint does not check it.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::detect(path).ok()
    }

    /// Like [`SupportedLanguage::from_path`], but says why a path was
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnsupportedExtension`] or
    /// [`SyntaxError::MissingExtension`].
    pub fn detect(path: &Path) -> Result<Self, SyntaxError> {
        let Some(raw) = path.extension() else {
            return Err(SyntaxError::MissingExtension {
                path: path.to_path_buf(),
            });
        };
        let extension = raw.to_string_lossy();
        Self::from_extension(&extension)
            .ok_or_else(|| SyntaxError::unsupported_extension(extension.as_ref()))
    }

    pub(crate) fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Name used in messages and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dialect name that is neither `typescript`/`ts` nor `tsx`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown TypeScript dialect '{0}'")]
pub struct UnknownDialect(String);

impl UnknownDialect {
    /// The rejected name, trimmed and lower-cased.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = UnknownDialect;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let name = input.trim().to_ascii_lowercase();
        match name.as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            _ => Err(UnknownDialect(name)),
        }
    }
}
