//! What a handler sees while a file is being checked.

use rxlint_syntax::{NodeId, SyntaxTree};

use crate::oracle::TypeOracle;
use crate::pattern::{CompiledPattern, PatternError, Selector};
use crate::reporter::{Finding, Reporter};

use super::error::HandlerError;
use super::metadata::CheckMetadata;

/// Per-node access to the tree, the oracle and the reporter.
pub struct CheckContext<'a> {
    tree: &'a SyntaxTree,
    oracle: &'a TypeOracle<'a>,
    metadata: &'a CheckMetadata,
    reporter: &'a mut dyn Reporter,
}

impl<'a> CheckContext<'a> {
    /// Creates a context for one check on one file.
    #[must_use]
    pub fn new(
        tree: &'a SyntaxTree,
        oracle: &'a TypeOracle<'a>,
        metadata: &'a CheckMetadata,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            tree,
            oracle,
            metadata,
            reporter,
        }
    }

    /// Returns the tree being checked.
    #[must_use]
    pub const fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Returns the type oracle for the file.
    #[must_use]
    pub const fn oracle(&self) -> &'a TypeOracle<'a> {
        self.oracle
    }

    /// Returns the identifier of the running check.
    #[must_use]
    pub const fn check_id(&self) -> &'static str {
        self.metadata.id
    }

    /// Reports `node` with the message registered under `key`.
    ///
    /// `location` narrows the reported position to another node, such as
    /// the operator inside a call.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnknownMessage`] if the check's metadata has
    /// no message for `key`, or [`HandlerError::Failed`] if a node is not
    /// part of the tree.
    pub fn report(
        &mut self,
        node: NodeId,
        key: &str,
        location: Option<NodeId>,
    ) -> Result<(), HandlerError> {
        let message = self
            .metadata
            .message(key)
            .ok_or_else(|| HandlerError::UnknownMessage {
                check: self.metadata.id.to_owned(),
                key: key.to_owned(),
            })?;
        let span = self
            .tree
            .span(node)
            .ok_or_else(|| HandlerError::failed(self.metadata.id, "reported node is not in the tree"))?;
        let location_span = location.and_then(|target| self.tree.span(target));
        self.reporter.report(Finding {
            check_id: self.metadata.id.to_owned(),
            message_key: key.to_owned(),
            message: message.to_owned(),
            node,
            span,
            location: location_span,
        });
        Ok(())
    }
}

/// Logic run for every node a pattern matches.
pub trait Handler: Send + Sync {
    /// Handles one matched node.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the node cannot be processed; the
    /// check is then skipped for the rest of the file.
    fn handle(&self, node: NodeId, cx: &mut CheckContext<'_>) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(NodeId, &mut CheckContext<'_>) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, node: NodeId, cx: &mut CheckContext<'_>) -> Result<(), HandlerError> {
        self(node, cx)
    }
}

/// A compiled pattern paired with its handler.
pub struct Listener {
    pattern: CompiledPattern,
    handler: Box<dyn Handler>,
}

impl Listener {
    /// Compiles `selector` and pairs it with `handler`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the selector can never match.
    pub fn new(selector: Selector, handler: impl Handler + 'static) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: CompiledPattern::compile(selector)?,
            handler: Box::new(handler),
        })
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Splits the listener into its pattern and handler.
    #[must_use]
    pub fn into_parts(self) -> (CompiledPattern, Box<dyn Handler>) {
        (self.pattern, self.handler)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
