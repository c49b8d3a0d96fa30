//! Failures raised before a source file reaches the lowering stage.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Reasons a TypeScript source could not be turned into a syntax tree.
///
/// Recoverable syntax errors inside a file are not represented here; they
/// are reported through [`crate::ParseResult::errors`] and the tree is
/// still produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The tree-sitter grammar was rejected by the runtime.
    #[error("{language} grammar could not be loaded: {reason}")]
    GrammarLoad {
        /// Grammar that was being loaded.
        language: SupportedLanguage,
        /// Message reported by tree-sitter.
        reason: String,
    },

    /// A path names a file rxlint does not check.
    #[error("unsupported file extension: {extension}")]
    UnsupportedExtension {
        /// Extension without the leading dot.
        extension: String,
    },

    /// A path has no extension to select a grammar from.
    #[error("{} has no extension to select a grammar from", path.display())]
    MissingExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// Tree-sitter returned no tree, for example after cancellation.
    #[error("tree-sitter produced no tree for {language} source")]
    NoTree {
        /// Grammar in use.
        language: SupportedLanguage,
    },

    /// The source cannot be addressed with 32-bit offsets.
    #[error("source of {bytes} bytes exceeds the supported size")]
    SourceTooLarge {
        /// Size of the rejected source in bytes.
        bytes: usize,
    },
}

impl SyntaxError {
    /// Builds a [`SyntaxError::GrammarLoad`].
    #[must_use]
    pub fn grammar_load(language: SupportedLanguage, reason: impl Into<String>) -> Self {
        Self::GrammarLoad {
            language,
            reason: reason.into(),
        }
    }

    /// Builds a [`SyntaxError::UnsupportedExtension`].
    #[must_use]
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }
}
