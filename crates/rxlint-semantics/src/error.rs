//! Error types for building semantic models.

use rxlint_syntax::SyntaxError;
use thiserror::Error;

/// Errors raised while building a semantic model or prelude.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SemanticsError {
    /// Ambient declarations could not be parsed.
    #[error("failed to parse ambient declarations: {source}")]
    Prelude {
        /// The underlying parse failure.
        #[from]
        source: SyntaxError,
    },

    /// A type identifier does not belong to the table it was used with.
    #[error("type {id} is not defined in this table")]
    UnknownType {
        /// The raw identifier.
        id: u32,
    },
}
