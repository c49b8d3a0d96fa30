//! An annotation-driven semantic model built directly from a syntax tree.
//!
//! [`DeclarationModel`] is what the checker uses when no external type
//! checker is available. It hoists class, interface and alias declarations,
//! binds values in lexical scopes and infers expression types from
//! annotations, initialisers and function bodies. It is deliberately local:
//! imports resolve only through the [`Prelude`], and anything it cannot see
//! stays unresolved so that checks skip it.

mod binder;
mod infer;
mod resolve;

use rustc_hash::FxHashMap;
use rxlint_core::AnalysisLimits;
use rxlint_syntax::{NodeId, SyntaxTree};
use tracing::debug;

use crate::model::{SemanticModel, SymbolId};
use crate::prelude::Prelude;
use crate::types::{TypeId, TypeTable};

use self::binder::Binder;

pub(crate) const SEMANTICS_TARGET: &str = "rxlint::semantics";

/// A semantic model inferred from declarations in one file.
///
/// # Example
///
/// ```
/// use rxlint_core::AnalysisLimits;
/// use rxlint_semantics::{DeclarationModel, Prelude, SemanticModel, TypeData};
/// use rxlint_syntax::{SupportedLanguage, parse};
///
/// let prelude = Prelude::rxjs()?;
/// let tree = parse("const n$ = of(1);\nn$;", SupportedLanguage::TypeScript)?;
/// let model = DeclarationModel::build(&tree, &prelude, &AnalysisLimits::default());
///
/// let last = tree.preorder().into_iter().last().expect("identifier");
/// assert!(model.resolve_type(last).is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeclarationModel {
    table: TypeTable,
    node_types: FxHashMap<NodeId, TypeId>,
    node_symbols: FxHashMap<NodeId, SymbolId>,
    symbols: Vec<TypeId>,
}

impl DeclarationModel {
    /// Builds the model for `tree` on top of `prelude`.
    #[must_use]
    pub fn build(tree: &SyntaxTree, prelude: &Prelude, limits: &AnalysisLimits) -> Self {
        let mut binder = Binder::new(tree, prelude, limits.max_resolution_depth());
        binder.run();

        let node_types: FxHashMap<NodeId, TypeId> = binder
            .inferred
            .iter()
            .filter_map(|(node, ty)| ty.map(|resolved| (*node, resolved)))
            .collect();
        debug!(
            target: SEMANTICS_TARGET,
            nodes = tree.len(),
            typed = node_types.len(),
            symbols = binder.symbols.len(),
            "built declaration model"
        );

        Self {
            table: binder.table,
            node_types,
            node_symbols: binder.node_symbols,
            symbols: binder.symbols,
        }
    }

    /// Builds the value and type namespaces exported by an ambient file.
    pub(crate) fn bind_prelude(
        tree: &SyntaxTree,
        base: &Prelude,
    ) -> (TypeTable, FxHashMap<String, TypeId>, FxHashMap<String, TypeId>) {
        let mut binder = Binder::new(tree, base, AnalysisLimits::default().max_resolution_depth());
        binder.run();
        let values = binder.top_level_values();
        (binder.table, binder.type_names, values)
    }
}

impl SemanticModel for DeclarationModel {
    fn resolve_type(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    fn symbol_of(&self, node: NodeId) -> Option<SymbolId> {
        self.node_symbols.get(&node).copied()
    }

    fn resolve_symbol_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.symbols.get(symbol.index()).copied()
    }

    fn types(&self) -> &TypeTable {
        &self.table
    }
}
