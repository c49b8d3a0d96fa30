//! Annotation resolution and structural member lookup.

use rxlint_syntax::{MemberKind, NodeId, TypeExpr, TypeKeyword};

use crate::types::{DeclaredType, Member, TypeData, TypeId, TypeTable};

use super::binder::Binder;

impl Binder<'_> {
    /// Resolves a written type as seen from node `at`.
    pub(super) fn resolve_type_expr(&mut self, expr: &TypeExpr, at: NodeId) -> TypeId {
        match expr {
            TypeExpr::Keyword(keyword) => match keyword {
                TypeKeyword::Any => TypeId::ANY,
                TypeKeyword::Unknown => TypeId::UNKNOWN,
                TypeKeyword::Never => TypeId::NEVER,
                TypeKeyword::Number => TypeId::NUMBER,
                TypeKeyword::String => TypeId::STRING,
                TypeKeyword::Boolean => TypeId::BOOLEAN,
                TypeKeyword::BigInt => TypeId::BIGINT,
                TypeKeyword::Symbol => TypeId::SYMBOL,
                TypeKeyword::Void => TypeId::VOID,
                TypeKeyword::Undefined => TypeId::UNDEFINED,
                TypeKeyword::Null => TypeId::NULL,
                TypeKeyword::Object => self.table.alloc(TypeData::Object {
                    members: Vec::new(),
                }),
            },
            TypeExpr::Literal(kind) => match kind {
                rxlint_syntax::LiteralKind::Number => TypeId::NUMBER,
                rxlint_syntax::LiteralKind::BigInt => TypeId::BIGINT,
                rxlint_syntax::LiteralKind::Boolean => TypeId::BOOLEAN,
                rxlint_syntax::LiteralKind::Null => TypeId::NULL,
                rxlint_syntax::LiteralKind::Undefined => TypeId::UNDEFINED,
                _ => TypeId::STRING,
            },
            TypeExpr::Named { name, arguments } => self.resolve_named(name, arguments, at),
            TypeExpr::Union(members) => {
                let resolved = self.resolve_all(members, at);
                self.table.alloc(TypeData::Union(resolved))
            }
            TypeExpr::Intersection(members) => {
                let resolved = self.resolve_all(members, at);
                self.table.alloc(TypeData::Intersection(resolved))
            }
            TypeExpr::Array(element) => {
                let resolved = self.resolve_type_expr(element, at);
                self.table.alloc(TypeData::Array(resolved))
            }
            TypeExpr::Tuple(elements) => {
                let resolved = self.resolve_all(elements, at);
                self.table.alloc(TypeData::Tuple(resolved))
            }
            TypeExpr::Function { return_type } => {
                let resolved = self.resolve_type_expr(return_type, at);
                self.table.alloc(TypeData::Function {
                    return_type: resolved,
                })
            }
            TypeExpr::Object { members } => {
                let resolved = members
                    .iter()
                    .map(|member| Member {
                        name: member.name.clone(),
                        kind: member.kind,
                        ty: self.resolve_type_expr(&member.ty, at),
                    })
                    .collect();
                self.table.alloc(TypeData::Object { members: resolved })
            }
            TypeExpr::Unsupported { .. } => TypeId::UNKNOWN,
        }
    }

    fn resolve_all(&mut self, exprs: &[TypeExpr], at: NodeId) -> Vec<TypeId> {
        exprs
            .iter()
            .map(|expr| self.resolve_type_expr(expr, at))
            .collect()
    }

    fn resolve_named(&mut self, name: &str, arguments: &[TypeExpr], at: NodeId) -> TypeId {
        if let Some(param) = self.lookup_type_param(name, at) {
            return param;
        }
        let resolved = self.resolve_all(arguments, at);
        if matches!(name, "Array" | "ReadonlyArray") {
            let element = resolved.first().copied().unwrap_or(TypeId::UNKNOWN);
            return self.table.alloc(TypeData::Array(element));
        }
        match self.lookup_type_name(name) {
            Some(target) if resolved.is_empty() => target,
            Some(target) => self.table.alloc(TypeData::Reference {
                target,
                arguments: resolved,
            }),
            None => self.table.alloc(TypeData::Opaque {
                name: name.to_owned(),
                arguments: resolved,
            }),
        }
    }

    /// Follows aliases, inferred placeholders, generic alias instantiations
    /// and type-parameter bounds to the type that carries structure.
    pub(super) fn resolve_shape(&mut self, ty: TypeId, depth: usize) -> TypeId {
        let mut current = ty;
        for _ in 0..=self.max_depth {
            self.settle(current, depth);
            let next = match self.table.get(current) {
                Some(TypeData::Alias { target, .. }) => *target,
                Some(TypeData::TypeParameter {
                    constraint: Some(bound),
                    ..
                }) => *bound,
                Some(TypeData::Reference { target, .. }) => match self.table.get(*target) {
                    Some(TypeData::Alias { target: aliased, .. }) => *aliased,
                    _ => return current,
                },
                _ => return current,
            };
            if next == current {
                return current;
            }
            current = next;
        }
        current
    }

    /// Returns the type of `object.name`. Methods yield a function type.
    pub(super) fn member_type(&mut self, object: TypeId, name: &str, depth: usize) -> Option<TypeId> {
        if depth > self.max_depth {
            return None;
        }
        let shape = self.resolve_shape(object, depth);
        match self.table.get(shape).cloned()? {
            TypeData::Declared(declared) => self.declared_member(&declared, &[], name, depth),
            TypeData::Reference { target, arguments } => {
                let base = self.resolve_shape(target, depth);
                match self.table.get(base).cloned()? {
                    TypeData::Declared(declared) => {
                        self.declared_member(&declared, &arguments, name, depth)
                    }
                    _ => self.member_type(base, name, depth + 1),
                }
            }
            TypeData::Object { members } => {
                let member = members.into_iter().find(|member| member.name == name)?;
                Some(self.member_value(&member, member.ty, depth))
            }
            TypeData::Union(constituents) => {
                let mut found = Vec::new();
                for constituent in constituents {
                    if let Some(ty) = self.member_type(constituent, name, depth + 1) {
                        found.push(ty);
                    }
                }
                self.union_of(found)
            }
            TypeData::Intersection(constituents) => {
                for constituent in constituents {
                    if let Some(ty) = self.member_type(constituent, name, depth + 1) {
                        return Some(ty);
                    }
                }
                None
            }
            TypeData::Array(_) | TypeData::Tuple(_) if name == "length" => Some(TypeId::NUMBER),
            _ => None,
        }
    }

    fn declared_member(
        &mut self,
        declared: &DeclaredType,
        arguments: &[TypeId],
        name: &str,
        depth: usize,
    ) -> Option<TypeId> {
        if let Some(member) = declared.members.iter().find(|member| member.name == name) {
            self.settle(member.ty, depth);
            let ty = self.substitute(member.ty, &declared.type_params, arguments, depth);
            return Some(self.member_value(member, ty, depth));
        }
        for supertype in &declared.supertypes {
            let instantiated = self.substitute(*supertype, &declared.type_params, arguments, depth);
            if let Some(ty) = self.member_type(instantiated, name, depth + 1) {
                return Some(ty);
            }
        }
        None
    }

    /// Replaces generic parameters in `ty` with the matching arguments.
    ///
    /// Only the structure written in annotations is rewritten; aliases and
    /// declarations are left as they are.
    fn substitute(
        &mut self,
        ty: TypeId,
        params: &[TypeId],
        arguments: &[TypeId],
        depth: usize,
    ) -> TypeId {
        if params.is_empty() || arguments.is_empty() || depth > self.max_depth {
            return ty;
        }
        if let Some(index) = params.iter().position(|param| *param == ty) {
            return arguments.get(index).copied().unwrap_or(ty);
        }
        let next = depth + 1;
        let rewritten = match self.table.get(ty).cloned() {
            Some(TypeData::Reference {
                target,
                arguments: inner,
            }) => TypeData::Reference {
                target,
                arguments: self.substitute_all(&inner, params, arguments, next),
            },
            Some(TypeData::Union(members)) => {
                TypeData::Union(self.substitute_all(&members, params, arguments, next))
            }
            Some(TypeData::Intersection(members)) => {
                TypeData::Intersection(self.substitute_all(&members, params, arguments, next))
            }
            Some(TypeData::Array(element)) => {
                TypeData::Array(self.substitute(element, params, arguments, next))
            }
            Some(TypeData::Function { return_type }) => TypeData::Function {
                return_type: self.substitute(return_type, params, arguments, next),
            },
            _ => return ty,
        };
        if self.table.get(ty) == Some(&rewritten) {
            return ty;
        }
        self.table.alloc(rewritten)
    }

    fn substitute_all(
        &mut self,
        types: &[TypeId],
        params: &[TypeId],
        arguments: &[TypeId],
        depth: usize,
    ) -> Vec<TypeId> {
        types
            .iter()
            .map(|ty| self.substitute(*ty, params, arguments, depth))
            .collect()
    }

    fn member_value(&mut self, member: &Member, ty: TypeId, depth: usize) -> TypeId {
        self.settle(ty, depth);
        match member.kind {
            MemberKind::Property => ty,
            MemberKind::Method => self.table.alloc(TypeData::Function { return_type: ty }),
        }
    }

    /// Returns what calling a value of type `callee` produces.
    pub(super) fn return_type_of(&mut self, callee: TypeId, depth: usize) -> Option<TypeId> {
        let shape = self.resolve_shape(callee, depth);
        match self.table.get(shape).cloned()? {
            TypeData::Function { return_type } => {
                self.settle(return_type, depth);
                Some(return_type)
            }
            TypeData::Union(constituents) => {
                let mut returns = Vec::new();
                for constituent in constituents {
                    if let Some(ty) = self.return_type_of(constituent, depth + 1) {
                        returns.push(ty);
                    }
                }
                self.union_of(returns)
            }
            _ => None,
        }
    }

    /// Unwraps `Promise<T>` to `T`; other types are returned unchanged.
    pub(super) fn unwrap_promise(&mut self, ty: TypeId, depth: usize) -> TypeId {
        let shape = self.resolve_shape(ty, depth);
        if let Some(TypeData::Reference { target, arguments }) = self.table.get(shape) {
            if is_named(&self.table, *target, "Promise") {
                return arguments.first().copied().unwrap_or(TypeId::UNKNOWN);
            }
        }
        ty
    }

    /// Removes `null`, `undefined` and `void` from a union.
    pub(super) fn strip_nullish(&mut self, ty: TypeId, depth: usize) -> TypeId {
        let shape = self.resolve_shape(ty, depth);
        let Some(TypeData::Union(constituents)) = self.table.get(shape).cloned() else {
            return ty;
        };
        let kept: Vec<TypeId> = constituents
            .into_iter()
            .filter(|constituent| {
                !matches!(
                    self.table.get(*constituent),
                    Some(TypeData::Primitive(primitive)) if primitive.is_nullish()
                )
            })
            .collect();
        self.union_of(kept).unwrap_or(TypeId::NEVER)
    }

    /// Builds a union of distinct types; a single type is returned as is.
    pub(super) fn union_of(&mut self, mut types: Vec<TypeId>) -> Option<TypeId> {
        types.dedup();
        match types.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => Some(self.table.alloc(TypeData::Union(types))),
        }
    }
}

fn is_named(table: &TypeTable, ty: TypeId, name: &str) -> bool {
    matches!(table.get(ty), Some(TypeData::Declared(declared)) if declared.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;

    #[test]
    fn promise_detection_matches_declared_name() {
        let mut table = TypeTable::new();
        let promise = table.alloc(TypeData::Declared(DeclaredType {
            name: String::from("Promise"),
            kind: crate::types::DeclarationKind::Interface,
            type_params: Vec::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
        }));
        assert!(is_named(&table, promise, "Promise"));
        assert!(!is_named(&table, TypeId::NUMBER, "Promise"));
        assert!(PrimitiveType::Null.is_nullish());
    }
}
