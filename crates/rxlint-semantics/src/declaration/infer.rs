//! Bounded expression type inference.

use rxlint_syntax::{Field, LiteralKind, NodeId, NodeKind, SyntaxKind, TypeExpr};
use tracing::trace;

use crate::types::{TypeData, TypeId};

use super::SEMANTICS_TARGET;
use super::binder::{Binder, Pending};

impl Binder<'_> {
    /// Infers the type of `node`, memoising the answer.
    ///
    /// Returns `None` when the expression cannot be typed, when inference
    /// re-enters a node already in progress, or when `depth` exceeds the
    /// resolution bound.
    pub(super) fn infer(&mut self, node: NodeId, depth: usize) -> Option<TypeId> {
        if let Some(cached) = self.inferred.get(&node) {
            return *cached;
        }
        if depth > self.max_depth {
            trace!(
                target: SEMANTICS_TARGET,
                node = node.index(),
                depth,
                "inference depth exceeded"
            );
            return None;
        }
        if !self.in_progress.insert(node) {
            return None;
        }
        let result = self.infer_uncached(node, depth + 1);
        self.in_progress.remove(&node);
        self.inferred.insert(node, result);
        result
    }

    fn infer_uncached(&mut self, node: NodeId, depth: usize) -> Option<TypeId> {
        let tree = self.tree;
        match tree.kind(node)? {
            NodeKind::Identifier { name } => self.infer_identifier(node, name, depth),
            NodeKind::ThisExpression => tree
                .ancestors(node)
                .find_map(|ancestor| self.classes.get(&ancestor))
                .copied(),
            NodeKind::Literal { kind } => Some(literal_type(*kind)),
            NodeKind::ArrayExpression { elements } => {
                let element = elements
                    .first()
                    .and_then(|first| self.infer(*first, depth))
                    .unwrap_or(TypeId::UNKNOWN);
                Some(self.table.alloc(TypeData::Array(element)))
            }
            NodeKind::ObjectExpression { .. } => Some(self.table.alloc(TypeData::Object {
                members: Vec::new(),
            })),
            NodeKind::CallExpression { callee, .. } => {
                let callee_type = self.infer(*callee, depth)?;
                self.return_type_of(callee_type, depth)
            }
            NodeKind::NewExpression {
                callee,
                type_arguments,
                ..
            } => self.instantiate(*callee, type_arguments, node),
            NodeKind::MemberExpression { object, property } => {
                let object_type = self.infer(*object, depth)?;
                let name = tree.identifier_name(*property)?;
                self.member_type(object_type, name, depth)
            }
            NodeKind::IndexExpression { object, .. } => {
                let object_type = self.infer(*object, depth)?;
                let shape = self.resolve_shape(object_type, depth);
                match self.table.get(shape) {
                    Some(TypeData::Array(element)) => Some(*element),
                    _ => None,
                }
            }
            NodeKind::TypeAssertion {
                expression,
                annotation,
            } => match annotation {
                TypeExpr::Unsupported { .. } => self.infer(*expression, depth),
                declared => Some(self.resolve_type_expr(declared, node)),
            },
            NodeKind::AwaitExpression { argument } => {
                let awaited = self.infer(*argument, depth)?;
                Some(self.unwrap_promise(awaited, depth))
            }
            NodeKind::ParenthesizedExpression { expression } => self.infer(*expression, depth),
            NodeKind::NonNullExpression { expression } => {
                let inner = self.infer(*expression, depth)?;
                Some(self.strip_nullish(inner, depth))
            }
            NodeKind::AssignmentExpression { right, .. } => self.infer(*right, depth),
            NodeKind::FunctionExpression {
                return_type, body, ..
            } => {
                let returns = match (return_type, body) {
                    (Some(declared), _) => self.resolve_type_expr(declared, node),
                    (None, Some(block)) => {
                        let placeholder = self.table.reserve();
                        self.pending.insert(placeholder, Pending::Body(*block));
                        placeholder
                    }
                    (None, None) => TypeId::UNKNOWN,
                };
                Some(self.table.alloc(TypeData::Function {
                    return_type: returns,
                }))
            }
            _ => None,
        }
    }

    fn infer_identifier(&mut self, node: NodeId, name: &str, depth: usize) -> Option<TypeId> {
        let tree = self.tree;
        if let Some(parent) = tree.parent(node) {
            // `a.subscribe` names a member, not a binding.
            if tree.field(parent, Field::Property) == Some(node) {
                return None;
            }
        }
        if let Some(symbol) = self.lookup_value(name, node) {
            self.node_symbols.insert(node, symbol);
            let ty = self.symbols.get(symbol.index()).copied()?;
            self.settle(ty, depth);
            return Some(ty);
        }
        if let Some(global) = self.prelude.value_named(name) {
            return Some(*global);
        }
        (name == "undefined").then_some(TypeId::UNDEFINED)
    }

    /// Infers the return type of a function body: the concise-body
    /// expression, or the union of every `return` argument in a block.
    pub(super) fn infer_body(&mut self, body: NodeId, depth: usize) -> Option<TypeId> {
        if self.tree.syntax_kind(body) != Some(SyntaxKind::BlockStatement) {
            return self.infer(body, depth);
        }
        let arguments = self.return_arguments(body);
        if arguments.is_empty() {
            return Some(TypeId::VOID);
        }
        let returned: Vec<TypeId> = arguments
            .into_iter()
            .filter_map(|argument| self.infer(argument, depth))
            .collect();
        self.union_of(returned)
    }

    /// Collects `return` arguments in `block`, ignoring nested functions.
    fn return_arguments(&self, block: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![block];
        while let Some(current) = stack.pop() {
            match self.tree.kind(current) {
                Some(NodeKind::ReturnStatement {
                    argument: Some(argument),
                }) => found.push(*argument),
                Some(
                    NodeKind::FunctionDeclaration { .. }
                    | NodeKind::FunctionExpression { .. }
                    | NodeKind::ClassDeclaration { .. },
                ) if current != block => {}
                Some(_) => stack.extend(self.tree.children(current).into_iter().rev()),
                None => {}
            }
        }
        found
    }

    fn instantiate(
        &mut self,
        callee: NodeId,
        type_arguments: &[TypeExpr],
        at: NodeId,
    ) -> Option<TypeId> {
        let tree = self.tree;
        let name_node = tree.field(callee, Field::Property).unwrap_or(callee);
        let name = tree.identifier_name(name_node)?;
        let arguments: Vec<TypeId> = type_arguments
            .iter()
            .map(|argument| self.resolve_type_expr(argument, at))
            .collect();
        let data = match (self.lookup_type_name(name), arguments.is_empty()) {
            (Some(target), true) => return Some(target),
            (Some(target), false) => TypeData::Reference { target, arguments },
            (None, _) => TypeData::Opaque {
                name: name.to_owned(),
                arguments,
            },
        };
        Some(self.table.alloc(data))
    }
}

const fn literal_type(kind: LiteralKind) -> TypeId {
    match kind {
        LiteralKind::String | LiteralKind::Template => TypeId::STRING,
        LiteralKind::Number => TypeId::NUMBER,
        LiteralKind::BigInt => TypeId::BIGINT,
        LiteralKind::Boolean => TypeId::BOOLEAN,
        LiteralKind::Null => TypeId::NULL,
        LiteralKind::Undefined => TypeId::UNDEFINED,
        LiteralKind::Regex => TypeId::UNKNOWN,
    }
}
