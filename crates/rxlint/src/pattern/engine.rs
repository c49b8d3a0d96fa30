//! Single-pass dispatch of compiled patterns.

use rxlint_syntax::{NodeId, SyntaxKind, SyntaxTree};

use super::error::PatternError;
use super::selector::{KindSet, Selector};

/// A selector that has been checked and indexed by node kind.
///
/// # Example
///
/// ```
/// use rxlint::pattern::{CompiledPattern, PatternError, Selector};
/// use rxlint_syntax::{Field, SyntaxKind};
///
/// let ok = CompiledPattern::compile(Selector::kind(SyntaxKind::CallExpression));
/// assert!(ok.is_ok());
///
/// // A property is always an identifier, never a call.
/// let impossible = Selector::field(
///     Field::Property,
///     Selector::kind(SyntaxKind::CallExpression),
/// );
/// assert!(matches!(
///     CompiledPattern::compile(impossible),
///     Err(PatternError::Unsatisfiable { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    selector: Selector,
    kinds: KindSet,
}

impl CompiledPattern {
    /// Compiles `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Unsatisfiable`] if no node kind can match.
    pub fn compile(selector: Selector) -> Result<Self, PatternError> {
        let kinds = selector.possible_kinds();
        if kinds.is_empty() {
            return Err(PatternError::unsatisfiable(&selector));
        }
        Ok(Self { selector, kinds })
    }

    /// Returns the source selector.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Returns the kinds this pattern can match.
    #[must_use]
    pub const fn kinds(&self) -> KindSet {
        self.kinds
    }

    /// Tests `node`, skipping the selector when its kind cannot match.
    #[must_use]
    pub fn matches(&self, tree: &SyntaxTree, node: NodeId, budget: usize) -> bool {
        tree.syntax_kind(node)
            .is_some_and(|kind| self.kinds.contains(kind))
            && self.selector.matches(tree, node, budget)
    }
}

/// Registered patterns and their handlers, indexed for traversal.
///
/// Patterns are registered up front; [`PatternEngine::traverse`] then walks
/// a tree once in pre-order and, at each node, hands every matching
/// handler to the dispatch callback in registration order.
#[derive(Debug)]
pub struct PatternEngine<H> {
    entries: Vec<(CompiledPattern, H)>,
    by_kind: Vec<Vec<usize>>,
    descendant_budget: usize,
}

impl<H> PatternEngine<H> {
    /// Creates an empty engine. `descendant_budget` bounds each
    /// existential descendant search.
    #[must_use]
    pub fn new(descendant_budget: usize) -> Self {
        Self {
            entries: Vec::new(),
            by_kind: vec![Vec::new(); SyntaxKind::ALL.len()],
            descendant_budget,
        }
    }

    /// Adds a pattern and the handler to run when it matches.
    pub fn register(&mut self, pattern: CompiledPattern, handler: H) {
        let index = self.entries.len();
        for kind in pattern.kinds().iter() {
            if let Some(bucket) = self.by_kind.get_mut(kind.ordinal() as usize) {
                bucket.push(index);
            }
        }
        self.entries.push((pattern, handler));
    }

    /// Returns the number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the registered handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &H> {
        self.entries.iter().map(|(_, handler)| handler)
    }

    /// Walks `tree` in pre-order, calling `dispatch` for each match.
    ///
    /// The walk uses an explicit stack, so tree depth is not limited by the
    /// call stack.
    pub fn traverse<F>(&self, tree: &SyntaxTree, mut dispatch: F)
    where
        F: FnMut(NodeId, &H),
    {
        if tree.is_empty() {
            return;
        }
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            self.dispatch_node(tree, node, &mut dispatch);
            stack.extend(tree.children(node).into_iter().rev());
        }
    }

    fn dispatch_node<F>(&self, tree: &SyntaxTree, node: NodeId, dispatch: &mut F)
    where
        F: FnMut(NodeId, &H),
    {
        let Some(kind) = tree.syntax_kind(node) else {
            return;
        };
        let Some(candidates) = self.by_kind.get(kind.ordinal() as usize) else {
            return;
        };
        for index in candidates {
            let Some((pattern, handler)) = self.entries.get(*index) else {
                continue;
            };
            if pattern.selector().matches(tree, node, self.descendant_budget) {
                dispatch(node, handler);
            }
        }
    }
}
