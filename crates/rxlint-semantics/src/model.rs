//! The read-only semantic model interface and a host-built implementation.

use rustc_hash::FxHashMap;
use rxlint_syntax::NodeId;

use crate::types::{TypeData, TypeId, TypeTable};

/// Opaque handle to a bound name in a semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Returns the index of this symbol.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Statically inferred types for one syntax tree.
///
/// A model is immutable once built. Analysis code receives it as
/// `&dyn SemanticModel` and never stores it beyond one file.
pub trait SemanticModel {
    /// Returns the inferred type of an expression or declaration name.
    fn resolve_type(&self, node: NodeId) -> Option<TypeId>;

    /// Returns the symbol an identifier refers to.
    fn symbol_of(&self, node: NodeId) -> Option<SymbolId>;

    /// Returns the declared or inferred type of a symbol.
    fn resolve_symbol_type(&self, symbol: SymbolId) -> Option<TypeId>;

    /// Returns the table that owns every [`TypeId`] this model hands out.
    fn types(&self) -> &TypeTable;

    /// Returns the data behind `ty`.
    fn type_data(&self, ty: TypeId) -> Option<&TypeData> {
        self.types().get(ty)
    }
}

/// A semantic model assembled directly by a host.
///
/// Embedders that already run a type checker translate its answers into a
/// `StaticModel`; tests use it to construct precise type shapes.
///
/// # Example
///
/// ```
/// use rxlint_semantics::{SemanticModel, StaticModel, TypeData, TypeId};
/// use rxlint_syntax::{SupportedLanguage, parse};
///
/// let tree = parse("count;", SupportedLanguage::TypeScript)?;
/// let ident = tree.preorder().into_iter().last().expect("identifier");
///
/// let mut model = StaticModel::new();
/// model.set_node_type(ident, TypeId::NUMBER);
/// assert_eq!(model.resolve_type(ident), Some(TypeId::NUMBER));
/// assert!(matches!(model.type_data(TypeId::ANY), Some(TypeData::Any)));
/// # Ok::<(), rxlint_syntax::SyntaxError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticModel {
    table: TypeTable,
    node_types: FxHashMap<NodeId, TypeId>,
    node_symbols: FxHashMap<NodeId, SymbolId>,
    symbols: Vec<TypeId>,
}

impl StaticModel {
    /// Creates an empty model with only intrinsic types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty model over an existing table.
    #[must_use]
    pub fn with_table(table: TypeTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// Returns the table for allocating and defining types.
    pub const fn table_mut(&mut self) -> &mut TypeTable {
        &mut self.table
    }

    /// Shorthand for [`TypeTable::alloc`].
    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        self.table.alloc(data)
    }

    /// Records the type of `node`.
    pub fn set_node_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    /// Declares a symbol of type `ty`.
    pub fn add_symbol(&mut self, ty: TypeId) -> SymbolId {
        let id = SymbolId::from_index(self.symbols.len());
        self.symbols.push(ty);
        id
    }

    /// Records that `node` refers to `symbol`.
    pub fn bind_symbol(&mut self, node: NodeId, symbol: SymbolId) {
        self.node_symbols.insert(node, symbol);
    }
}

impl SemanticModel for StaticModel {
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
