//! Declaration hoisting and lexical binding.

use rustc_hash::{FxHashMap, FxHashSet};
use rxlint_syntax::{Field, MemberKind, NodeId, NodeKind, SyntaxKind, SyntaxTree, TypeExpr};
use tracing::trace;

use crate::model::SymbolId;
use crate::prelude::Prelude;
use crate::types::{DeclarationKind, DeclaredType, Member, TypeData, TypeId, TypeTable};

use super::SEMANTICS_TARGET;

/// Work deferred until the whole file is bound.
#[derive(Debug, Clone, Copy)]
pub(super) enum Pending {
    /// The type of an initialiser or default expression.
    Expression(NodeId),
    /// The return type of a function body.
    Body(NodeId),
}

/// Mutable state used while building a model for one tree.
pub(super) struct Binder<'a> {
    pub(super) tree: &'a SyntaxTree,
    pub(super) prelude: &'a Prelude,
    pub(super) table: TypeTable,
    pub(super) type_names: FxHashMap<String, TypeId>,
    pub(super) type_params: FxHashMap<NodeId, Vec<(String, TypeId)>>,
    pub(super) scopes: FxHashMap<NodeId, FxHashMap<String, SymbolId>>,
    pub(super) symbols: Vec<TypeId>,
    pub(super) node_symbols: FxHashMap<NodeId, SymbolId>,
    pub(super) classes: FxHashMap<NodeId, TypeId>,
    pub(super) pending: FxHashMap<TypeId, Pending>,
    pub(super) inferred: FxHashMap<NodeId, Option<TypeId>>,
    pub(super) in_progress: FxHashSet<NodeId>,
    pub(super) max_depth: usize,
}

impl<'a> Binder<'a> {
    pub(super) fn new(tree: &'a SyntaxTree, prelude: &'a Prelude, max_depth: usize) -> Self {
        Self {
            tree,
            prelude,
            table: prelude.table().clone(),
            type_names: FxHashMap::default(),
            type_params: FxHashMap::default(),
            scopes: FxHashMap::default(),
            symbols: Vec::new(),
            node_symbols: FxHashMap::default(),
            classes: FxHashMap::default(),
            pending: FxHashMap::default(),
            inferred: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            max_depth,
        }
    }

    /// Runs every phase in order.
    pub(super) fn run(&mut self) {
        let order = self.tree.preorder();
        let declarations = self.declare_types(&order);
        self.define_type_parameters(&order);
        self.define_types(&declarations);
        self.bind_values(&order);
        // Operands before the expressions that use them, so each link of a
        // long chain finds its receiver already cached. Declared names go
        // last since they settle their initialiser.
        let (names, operands): (Vec<NodeId>, Vec<NodeId>) = postorder(self.tree)
            .into_iter()
            .filter(|node| is_expression(self.tree.syntax_kind(*node)))
            .partition(|node| self.is_declared_name(*node));
        for node in operands.into_iter().chain(names) {
            self.infer(node, 0);
        }
        self.settle_all();
    }

    fn is_declared_name(&self, node: NodeId) -> bool {
        self.tree
            .parent(node)
            .is_some_and(|parent| self.tree.field(parent, Field::Name) == Some(node))
    }

    /// Returns the top-level bindings of the tree with their types.
    pub(super) fn top_level_values(&self) -> FxHashMap<String, TypeId> {
        self.scopes
            .get(&self.tree.root())
            .map(|scope| {
                scope
                    .iter()
                    .filter_map(|(name, symbol)| {
                        self.symbols
                            .get(symbol.index())
                            .map(|ty| (name.clone(), *ty))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn declare_types(&mut self, order: &[NodeId]) -> Vec<(NodeId, TypeId)> {
        let tree = self.tree;
        let mut declarations = Vec::new();
        for node in order {
            let (name, type_parameters) = match tree.kind(*node) {
                Some(
                    NodeKind::ClassDeclaration {
                        name: Some(name),
                        type_parameters,
                        ..
                    }
                    | NodeKind::InterfaceDeclaration {
                        name,
                        type_parameters,
                        ..
                    }
                    | NodeKind::TypeAliasDeclaration {
                        name,
                        type_parameters,
                        ..
                    },
                ) => (tree.identifier_name(*name), type_parameters),
                Some(NodeKind::ClassDeclaration { type_parameters, .. })
                | Some(NodeKind::FunctionDeclaration {
                    type_parameters, ..
                }) => (None, type_parameters),
                _ => continue,
            };

            let params: Vec<(String, TypeId)> = type_parameters
                .iter()
                .map(|param| {
                    let id = self.table.alloc(TypeData::TypeParameter {
                        name: param.name.clone(),
                        constraint: None,
                    });
                    (param.name.clone(), id)
                })
                .collect();
            if !params.is_empty() {
                self.type_params.insert(*node, params);
            }

            let is_class = tree.syntax_kind(*node) == Some(SyntaxKind::ClassDeclaration);
            let id = match name {
                Some(type_name) => match self.type_names.get(type_name) {
                    // Interfaces with the same name merge into one declaration.
                    Some(existing) => *existing,
                    None => {
                        let reserved = self.table.reserve();
                        self.type_names.insert(type_name.to_owned(), reserved);
                        reserved
                    }
                },
                None if is_class => self.table.reserve(),
                None => continue,
            };
            if is_class {
                self.classes.insert(*node, id);
            }
            declarations.push((*node, id));
        }
        declarations
    }

    fn define_type_parameters(&mut self, order: &[NodeId]) {
        let tree = self.tree;
        for node in order {
            let Some(params) = self.type_params.get(node).cloned() else {
                continue;
            };
            let declared = match tree.kind(*node) {
                Some(
                    NodeKind::ClassDeclaration {
                        type_parameters, ..
                    }
                    | NodeKind::InterfaceDeclaration {
                        type_parameters, ..
                    }
                    | NodeKind::TypeAliasDeclaration {
                        type_parameters, ..
                    }
                    | NodeKind::FunctionDeclaration {
                        type_parameters, ..
                    },
                ) => type_parameters.clone(),
                _ => continue,
            };
            for ((name, id), syntax) in params.into_iter().zip(declared) {
                let Some(constraint) = syntax.constraint else {
                    continue;
                };
                let bound = self.resolve_type_expr(&constraint, *node);
                self.define(id, TypeData::TypeParameter {
                    name,
                    constraint: Some(bound),
                });
            }
        }
    }

    fn define_types(&mut self, declarations: &[(NodeId, TypeId)]) {
        let tree = self.tree;
        for (node, id) in declarations {
            let Some(kind) = tree.kind(*node).cloned() else {
                continue;
            };
            let params = self.params_of(*node);
            let data = match kind {
                NodeKind::ClassDeclaration {
                    name,
                    extends,
                    implements,
                    members,
                    ..
                } => {
                    let supertypes = extends
                        .iter()
                        .chain(implements.iter())
                        .map(|ty| self.resolve_type_expr(ty, *node))
                        .collect();
                    TypeData::Declared(DeclaredType {
                        name: name
                            .and_then(|ident| tree.identifier_name(ident))
                            .unwrap_or_default()
                            .to_owned(),
                        kind: DeclarationKind::Class,
                        type_params: params,
                        supertypes,
                        members: self.collect_members(&members),
                    })
                }
                NodeKind::InterfaceDeclaration {
                    name,
                    extends,
                    members,
                    ..
                } => {
                    let supertypes: Vec<TypeId> = extends
                        .iter()
                        .map(|ty| self.resolve_type_expr(ty, *node))
                        .collect();
                    let own_members = self.collect_members(&members);
                    match self.table.get(*id).cloned() {
                        Some(TypeData::Declared(mut merged)) => {
                            merged.supertypes.extend(supertypes);
                            merged.members.extend(own_members);
                            TypeData::Declared(merged)
                        }
                        _ => TypeData::Declared(DeclaredType {
                            name: tree.identifier_name(name).unwrap_or_default().to_owned(),
                            kind: DeclarationKind::Interface,
                            type_params: params,
                            supertypes,
                            members: own_members,
                        }),
                    }
                }
                NodeKind::TypeAliasDeclaration { name, value, .. } => {
                    let target = self.resolve_type_expr(&value, *node);
                    if target == *id {
                        TypeData::Unknown
                    } else {
                        TypeData::Alias {
                            name: tree.identifier_name(name).unwrap_or_default().to_owned(),
                            type_params: params,
                            target,
                        }
                    }
                }
                _ => continue,
            };
            self.define(*id, data);
        }
    }

    fn params_of(&self, node: NodeId) -> Vec<TypeId> {
        self.type_params
            .get(&node)
            .map(|params| params.iter().map(|(_, id)| *id).collect())
            .unwrap_or_default()
    }

    fn collect_members(&mut self, members: &[NodeId]) -> Vec<Member> {
        let tree = self.tree;
        let mut collected = Vec::new();
        for member in members {
            let Some(kind) = tree.kind(*member).cloned() else {
                continue;
            };
            match kind {
                NodeKind::PropertyDefinition {
                    name,
                    annotation,
                    value,
                } => {
                    let Some(member_name) = tree.identifier_name(name) else {
                        continue;
                    };
                    let ty = self.declared_or_pending(
                        annotation.as_ref(),
                        value.map(Pending::Expression),
                        *member,
                    );
                    collected.push(Member {
                        name: member_name.to_owned(),
                        kind: MemberKind::Property,
                        ty,
                    });
                }
                NodeKind::MethodDefinition {
                    name,
                    params,
                    return_type,
                    body,
                } => {
                    let Some(member_name) = tree.identifier_name(name) else {
                        continue;
                    };
                    if member_name == "constructor" {
                        collected.extend(self.parameter_properties(&params));
                        continue;
                    }
                    let ty = self.declared_or_pending(
                        return_type.as_ref(),
                        body.map(Pending::Body),
                        *member,
                    );
                    collected.push(Member {
                        name: member_name.to_owned(),
                        kind: MemberKind::Method,
                        ty,
                    });
                }
                _ => {}
            }
        }
        collected
    }

    fn parameter_properties(&mut self, params: &[NodeId]) -> Vec<Member> {
        let tree = self.tree;
        let mut members = Vec::new();
        for param in params {
            let Some(NodeKind::Parameter {
                name,
                annotation,
                default,
                is_property: true,
            }) = tree.kind(*param).cloned()
            else {
                continue;
            };
            let Some(member_name) = tree.identifier_name(name) else {
                continue;
            };
            let ty = self.declared_or_pending(
                annotation.as_ref(),
                default.map(Pending::Expression),
                *param,
            );
            members.push(Member {
                name: member_name.to_owned(),
                kind: MemberKind::Property,
                ty,
            });
        }
        members
    }

    /// Resolves an annotation, or schedules inference from `fallback`.
    fn declared_or_pending(
        &mut self,
        annotation: Option<&TypeExpr>,
        fallback: Option<Pending>,
        at: NodeId,
    ) -> TypeId {
        if let Some(ty) = annotation {
            return self.resolve_type_expr(ty, at);
        }
        match fallback {
            Some(pending) => {
                let placeholder = self.table.reserve();
                self.pending.insert(placeholder, pending);
                placeholder
            }
            None => TypeId::UNKNOWN,
        }
    }

    fn bind_values(&mut self, order: &[NodeId]) {
        let tree = self.tree;
        for node in order {
            let Some(kind) = tree.kind(*node).cloned() else {
                continue;
            };
            match kind {
                NodeKind::VariableDeclarator {
                    name,
                    annotation,
                    init,
                } => {
                    let ty = self.declared_or_pending(
                        annotation.as_ref(),
                        init.map(Pending::Expression),
                        *node,
                    );
                    self.bind(name, ty);
                }
                NodeKind::Parameter {
                    name,
                    annotation,
                    default,
                    ..
                } => {
                    let ty = self.declared_or_pending(
                        annotation.as_ref(),
                        default.map(Pending::Expression),
                        *node,
                    );
                    self.bind(name, ty);
                }
                NodeKind::FunctionDeclaration {
                    name: Some(name),
                    return_type,
                    body,
                    ..
                } => {
                    let returns =
                        self.declared_or_pending(return_type.as_ref(), body.map(Pending::Body), *node);
                    let ty = self.table.alloc(TypeData::Function {
                        return_type: returns,
                    });
                    self.bind(name, ty);
                }
                _ => {}
            }
        }
    }

    /// Binds the identifier `name` in the scope enclosing it.
    fn bind(&mut self, name: NodeId, ty: TypeId) {
        let Some(text) = self.tree.identifier_name(name).map(str::to_owned) else {
            return;
        };
        let Some(owner) = self.scope_owner(name) else {
            return;
        };
        let scope = self.scopes.entry(owner).or_default();
        if scope.contains_key(&text) {
            // Overload signatures and redeclarations keep the first binding.
            return;
        }
        let symbol = SymbolId::from_index(self.symbols.len());
        self.symbols.push(ty);
        scope.insert(text, symbol);
        self.node_symbols.insert(name, symbol);
    }

    /// Returns the nearest scope-creating ancestor of a declaration name.
    ///
    /// Function names bind in the scope around the function, not inside it.
    fn scope_owner(&self, name: NodeId) -> Option<NodeId> {
        let declaration = self.tree.parent(name)?;
        let start = match self.tree.syntax_kind(declaration) {
            Some(SyntaxKind::FunctionDeclaration) => self.tree.parent(declaration)?,
            _ => declaration,
        };
        std::iter::once(start)
            .chain(self.tree.ancestors(start))
            .find(|node| creates_scope(self.tree.syntax_kind(*node)))
    }

    /// Looks up a value binding visible from `at`.
    pub(super) fn lookup_value(&self, name: &str, at: NodeId) -> Option<SymbolId> {
        std::iter::once(at)
            .chain(self.tree.ancestors(at))
            .find_map(|node| self.scopes.get(&node).and_then(|scope| scope.get(name)))
            .copied()
    }

    /// Looks up a generic parameter visible from `at`.
    pub(super) fn lookup_type_param(&self, name: &str, at: NodeId) -> Option<TypeId> {
        std::iter::once(at)
            .chain(self.tree.ancestors(at))
            .filter_map(|node| self.type_params.get(&node))
            .find_map(|params| {
                params
                    .iter()
                    .find(|(param, _)| param == name)
                    .map(|(_, id)| *id)
            })
    }

    /// Looks up a declared type by name, file declarations first.
    pub(super) fn lookup_type_name(&self, name: &str) -> Option<TypeId> {
        self.type_names
            .get(name)
            .or_else(|| self.prelude.type_named(name))
            .copied()
    }

    pub(super) fn define(&mut self, id: TypeId, data: TypeData) {
        if let Err(error) = self.table.define(id, data) {
            trace!(target: SEMANTICS_TARGET, %error, "dropped type definition");
        }
    }

    /// Resolves a deferred placeholder by inferring its source.
    pub(super) fn settle(&mut self, ty: TypeId, depth: usize) {
        let Some(pending) = self.pending.remove(&ty) else {
            return;
        };
        let inferred = match pending {
            Pending::Expression(node) => self.infer(node, depth),
            Pending::Body(node) => self.infer_body(node, depth),
        };
        let data = match inferred {
            Some(target) if target != ty => TypeData::Alias {
                name: String::new(),
                type_params: Vec::new(),
                target,
            },
            _ => TypeData::Unknown,
        };
        self.define(ty, data);
    }

    fn settle_all(&mut self) {
        let mut remaining: Vec<TypeId> = self.pending.keys().copied().collect();
        remaining.sort_unstable();
        for ty in remaining {
            self.settle(ty, 0);
        }
    }
}

/// Children before parents, siblings in document order.
fn postorder(tree: &SyntaxTree) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(tree.len());
    let mut stack = vec![(tree.root(), false)];
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
        } else {
            stack.push((node, true));
            stack.extend(
                tree.children(node)
                    .into_iter()
                    .rev()
                    .map(|child| (child, false)),
            );
        }
    }
    order
}

const fn creates_scope(kind: Option<SyntaxKind>) -> bool {
    matches!(
        kind,
        Some(
            SyntaxKind::Program
                | SyntaxKind::BlockStatement
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::MethodDefinition
        )
    )
}

const fn is_expression(kind: Option<SyntaxKind>) -> bool {
    matches!(
        kind,
        Some(
            SyntaxKind::CallExpression
                | SyntaxKind::NewExpression
                | SyntaxKind::MemberExpression
                | SyntaxKind::IndexExpression
                | SyntaxKind::Identifier
                | SyntaxKind::ThisExpression
                | SyntaxKind::Literal
                | SyntaxKind::ArrayExpression
                | SyntaxKind::ObjectExpression
                | SyntaxKind::TypeAssertion
                | SyntaxKind::AwaitExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::NonNullExpression
                | SyntaxKind::AssignmentExpression
                | SyntaxKind::FunctionExpression
        )
    )
}
