//! Decides whether expressions are observable-like.
//!
//! The [`TypeOracle`] answers two questions about a node by walking the type
//! a [`SemanticModel`] assigns to it:
//!
//! - [`TypeOracle::could_be_observable`]: does any constituent of the type
//!   look like an rxjs observable?
//! - [`TypeOracle::is_reference_type`]: is the value an object rather than a
//!   primitive?
//!
//! Both walks follow aliases, generic instantiations, type-parameter bounds,
//! unions, intersections and supertype chains, and both give up with `false`
//! once the resolution depth is exceeded. Answers are cached per node and per
//! type for the lifetime of the oracle, which is created for one file.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use rxlint_semantics::{DeclaredType, Member, SemanticModel, TypeData, TypeId};
use rxlint_syntax::{MemberKind, NodeId};
use tracing::trace;

const ORACLE_TARGET: &str = "rxlint::oracle";

/// Library types that are observable by name.
pub const OBSERVABLE_TYPE_NAMES: [&str; 7] = [
    "Observable",
    "Subject",
    "BehaviorSubject",
    "ReplaySubject",
    "AsyncSubject",
    "ConnectableObservable",
    "GroupedObservable",
];

/// A generic parameter bound to its argument for the current walk.
type Binding = (TypeId, TypeId);

/// Per-file type queries with memoisation.
///
/// # Example
///
/// ```
/// use rxlint::TypeOracle;
/// use rxlint_semantics::{StaticModel, TypeData, TypeId};
/// use rxlint_syntax::{SupportedLanguage, parse};
///
/// let tree = parse("source$;", SupportedLanguage::TypeScript)?;
/// let ident = tree.preorder().into_iter().last().expect("identifier");
///
/// let mut model = StaticModel::new();
/// let observable = model.alloc(TypeData::Opaque {
///     name: String::from("Observable"),
///     arguments: vec![TypeId::NUMBER],
/// });
/// model.set_node_type(ident, observable);
///
/// let oracle = TypeOracle::new(&model, 32);
/// assert!(oracle.could_be_observable(ident));
/// assert!(oracle.is_reference_type(ident));
/// # Ok::<(), rxlint_syntax::SyntaxError>(())
/// ```
pub struct TypeOracle<'a> {
    model: &'a dyn SemanticModel,
    max_depth: usize,
    observable_nodes: RefCell<FxHashMap<NodeId, bool>>,
    reference_nodes: RefCell<FxHashMap<NodeId, bool>>,
    observable_types: RefCell<FxHashMap<TypeId, bool>>,
}

impl<'a> TypeOracle<'a> {
    /// Creates an oracle over `model` that follows at most `max_depth`
    /// resolution steps.
    #[must_use]
    pub fn new(model: &'a dyn SemanticModel, max_depth: usize) -> Self {
        Self {
            model,
            max_depth,
            observable_nodes: RefCell::default(),
            reference_nodes: RefCell::default(),
            observable_types: RefCell::default(),
        }
    }

    /// Returns the model this oracle reads.
    #[must_use]
    pub fn model(&self) -> &'a dyn SemanticModel {
        self.model
    }

    /// Returns `true` when the type of `node` could be an observable.
    ///
    /// Nodes without a resolvable type are not observable.
    #[must_use]
    pub fn could_be_observable(&self, node: NodeId) -> bool {
        if let Some(cached) = self.observable_nodes.borrow().get(&node) {
            return *cached;
        }
        let answer = self
            .node_type(node)
            .is_some_and(|ty| self.type_could_be_observable(ty));
        self.observable_nodes.borrow_mut().insert(node, answer);
        answer
    }

    /// Returns `true` when the type of `node` denotes an object rather than
    /// a primitive.
    #[must_use]
    pub fn is_reference_type(&self, node: NodeId) -> bool {
        if let Some(cached) = self.reference_nodes.borrow().get(&node) {
            return *cached;
        }
        let answer = self
            .node_type(node)
            .is_some_and(|ty| self.reference(ty, &[], 0));
        self.reference_nodes.borrow_mut().insert(node, answer);
        answer
    }

    /// Type-level form of [`Self::could_be_observable`].
    #[must_use]
    pub fn type_could_be_observable(&self, ty: TypeId) -> bool {
        self.observable(ty, &[], 0)
    }

    fn node_type(&self, node: NodeId) -> Option<TypeId> {
        let resolved = self.model.resolve_type(node).or_else(|| {
            self.model
                .symbol_of(node)
                .and_then(|symbol| self.model.resolve_symbol_type(symbol))
        });
        if resolved.is_none() {
            trace!(target: ORACLE_TARGET, node = node.index(), "no type for node");
        }
        resolved
    }

    fn exceeded(&self, ty: TypeId, depth: usize) -> bool {
        if depth <= self.max_depth {
            return false;
        }
        trace!(
            target: ORACLE_TARGET,
            ty = ty.index(),
            depth,
            "resolution depth exceeded"
        );
        true
    }

    fn observable(&self, ty: TypeId, bindings: &[Binding], depth: usize) -> bool {
        if self.exceeded(ty, depth) {
            return false;
        }
        let cacheable = bindings.is_empty();
        if cacheable {
            if let Some(cached) = self.observable_types.borrow().get(&ty) {
                return *cached;
            }
        }
        let answer = self.observable_uncached(ty, bindings, depth + 1);
        // Answers below the root depend on the remaining depth budget.
        if cacheable && depth == 0 {
            self.observable_types.borrow_mut().insert(ty, answer);
        }
        answer
    }

    fn observable_uncached(&self, ty: TypeId, bindings: &[Binding], depth: usize) -> bool {
        let Some(data) = self.model.type_data(ty) else {
            trace!(target: ORACLE_TARGET, ty = ty.index(), "type not in table");
            return false;
        };
        match data {
            TypeData::Declared(declared) => self.declared_observable(declared, &[], depth),
            TypeData::Opaque { name, .. } => is_observable_name(name),
            TypeData::Reference { target, arguments } => {
                let scoped = self.instantiate(*target, arguments, bindings);
                match self.model.type_data(*target) {
                    Some(TypeData::Declared(declared)) => {
                        self.declared_observable(declared, &scoped, depth)
                    }
                    Some(TypeData::Alias { target: aliased, .. }) => {
                        self.observable(*aliased, &scoped, depth)
                    }
                    _ => self.observable(*target, bindings, depth),
                }
            }
            TypeData::Alias { target, .. } => self.observable(*target, bindings, depth),
            TypeData::Union(members) | TypeData::Intersection(members) => members
                .iter()
                .any(|member| self.observable(*member, bindings, depth)),
            TypeData::Object { members } => has_subscribe_method(members),
            TypeData::TypeParameter { constraint, .. } => {
                match (bound_argument(bindings, ty), constraint) {
                    (Some(argument), _) => self.observable(argument, &[], depth),
                    (None, Some(bound)) => self.observable(*bound, bindings, depth),
                    (None, None) => false,
                }
            }
            TypeData::Any
            | TypeData::Unknown
            | TypeData::Never
            | TypeData::Primitive(_)
            | TypeData::Array(_)
            | TypeData::Tuple(_)
            | TypeData::Function { .. } => false,
        }
    }

    fn declared_observable(&self, declared: &DeclaredType, bindings: &[Binding], depth: usize) -> bool {
        if is_observable_name(&declared.name) || has_subscribe_method(&declared.members) {
            return true;
        }
        declared
            .supertypes
            .iter()
            .any(|supertype| self.observable(*supertype, bindings, depth))
    }

    fn reference(&self, ty: TypeId, bindings: &[Binding], depth: usize) -> bool {
        if self.exceeded(ty, depth) {
            return false;
        }
        let next = depth + 1;
        let Some(data) = self.model.type_data(ty) else {
            return false;
        };
        match data {
            TypeData::Declared(_)
            | TypeData::Array(_)
            | TypeData::Tuple(_)
            | TypeData::Function { .. }
            | TypeData::Object { .. }
            | TypeData::Opaque { .. } => true,
            TypeData::Reference { target, arguments } => match self.model.type_data(*target) {
                Some(TypeData::Alias {
                    target: aliased, ..
                }) => {
                    let scoped = self.instantiate(*target, arguments, bindings);
                    self.reference(*aliased, &scoped, next)
                }
                _ => true,
            },
            TypeData::Alias { target, .. } => self.reference(*target, bindings, next),
            TypeData::Union(members) => {
                let mut concrete = members
                    .iter()
                    .filter(|member| !self.is_nullish(**member))
                    .peekable();
                concrete.peek().is_some()
                    && concrete.all(|member| self.reference(*member, bindings, next))
            }
            TypeData::Intersection(members) => members
                .iter()
                .any(|member| self.reference(*member, bindings, next)),
            TypeData::TypeParameter { constraint, .. } => {
                match (bound_argument(bindings, ty), constraint) {
                    (Some(argument), _) => self.reference(argument, &[], next),
                    (None, Some(bound)) => self.reference(*bound, bindings, next),
                    (None, None) => false,
                }
            }
            TypeData::Any | TypeData::Unknown | TypeData::Never | TypeData::Primitive(_) => false,
        }
    }

    fn is_nullish(&self, ty: TypeId) -> bool {
        matches!(
            self.model.type_data(ty),
            Some(TypeData::Primitive(primitive)) if primitive.is_nullish()
        )
    }

    /// Pairs the generic parameters of `target` with `arguments`.
    ///
    /// Arguments that are themselves bound parameters are replaced by what
    /// they are bound to, so bindings never refer to an outer scope.
    fn instantiate(&self, target: TypeId, arguments: &[TypeId], outer: &[Binding]) -> Vec<Binding> {
        let params: &[TypeId] = match self.model.type_data(target) {
            Some(TypeData::Declared(declared)) => &declared.type_params,
            Some(TypeData::Alias { type_params, .. }) => type_params,
            _ => &[],
        };
        params
            .iter()
            .zip(arguments)
            .map(|(param, argument)| {
                (*param, bound_argument(outer, *argument).unwrap_or(*argument))
            })
            .collect()
    }
}

fn bound_argument(bindings: &[Binding], param: TypeId) -> Option<TypeId> {
    bindings
        .iter()
        .find(|(bound, _)| *bound == param)
        .map(|(_, argument)| *argument)
}

fn is_observable_name(name: &str) -> bool {
    OBSERVABLE_TYPE_NAMES.contains(&name)
}

fn has_subscribe_method(members: &[Member]) -> bool {
    members
        .iter()
        .any(|member| member.name == "subscribe" && member.kind == MemberKind::Method)
}
