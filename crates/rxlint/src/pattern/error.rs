//! Errors raised while compiling patterns.

use thiserror::Error;

use super::selector::Selector;

/// Errors raised while compiling a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// No syntax node kind can satisfy the selector.
    #[error("pattern `{selector}` can never match")]
    Unsatisfiable {
        /// The selector, rendered in selector syntax.
        selector: String,
    },
}

impl PatternError {
    pub(crate) fn unsatisfiable(selector: &Selector) -> Self {
        Self::Unsatisfiable {
            selector: selector.to_string(),
        }
    }
}
