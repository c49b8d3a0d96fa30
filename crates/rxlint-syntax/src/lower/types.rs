//! Lowering of Tree-sitter type nodes into [`TypeExpr`].

use crate::tree::LiteralKind;
use crate::types::{MemberKind, TypeExpr, TypeKeyword, TypeMember, TypeParameter};

use super::{named_children, node_text};

/// Lowers a node in type position.
///
/// Annotation wrappers (`: T`) are unwrapped. Constructs without a model
/// become [`TypeExpr::Unsupported`] carrying their source text.
pub(super) fn lower_type(node: tree_sitter::Node<'_>, source: &str) -> TypeExpr {
    match node.kind() {
        "type_annotation" | "omitting_type_annotation" | "adding_type_annotation"
        | "opting_type_annotation" | "parenthesized_type" | "readonly_type" | "constraint"
        | "default_type" => first_type(node, source),
        "asserts_annotation" => TypeExpr::Keyword(TypeKeyword::Void),
        "type_predicate_annotation" | "type_predicate" => TypeExpr::Keyword(TypeKeyword::Boolean),
        "predefined_type" => keyword_or_unsupported(node_text(node, source)),
        "undefined" => TypeExpr::Keyword(TypeKeyword::Undefined),
        "null" => TypeExpr::Keyword(TypeKeyword::Null),
        "type_identifier" | "identifier" => TypeExpr::named(node_text(node, source)),
        "nested_type_identifier" | "member_expression" => {
            TypeExpr::named(last_segment(node_text(node, source)))
        }
        "generic_type" => lower_generic(node, source),
        "union_type" => {
            let mut members = Vec::new();
            flatten(node, source, "union_type", &mut members);
            TypeExpr::Union(members)
        }
        "intersection_type" => {
            let mut members = Vec::new();
            flatten(node, source, "intersection_type", &mut members);
            TypeExpr::Intersection(members)
        }
        "array_type" => TypeExpr::Array(Box::new(first_type(node, source))),
        "tuple_type" => TypeExpr::Tuple(
            named_children(node)
                .into_iter()
                .map(|member| lower_type(member, source))
                .collect(),
        ),
        "literal_type" => lower_literal_type(node, source),
        "function_type" | "constructor_type" => {
            let return_type = node
                .child_by_field_name("return_type")
                .or_else(|| node.child_by_field_name("type"))
                .or_else(|| named_children(node).into_iter().last());
            TypeExpr::Function {
                return_type: Box::new(
                    return_type.map_or(TypeExpr::Keyword(TypeKeyword::Unknown), |ty| {
                        lower_type(ty, source)
                    }),
                ),
            }
        }
        "object_type" | "interface_body" => TypeExpr::Object {
            members: lower_members(node, source),
        },
        _ => TypeExpr::Unsupported {
            text: node_text(node, source).to_owned(),
        },
    }
}

/// Lowers a `type_parameters` node.
pub(super) fn lower_type_parameters(
    node: Option<tree_sitter::Node<'_>>,
    source: &str,
) -> Vec<TypeParameter> {
    let Some(parameters) = node else {
        return Vec::new();
    };
    named_children(parameters)
        .into_iter()
        .filter(|child| child.kind() == "type_parameter")
        .filter_map(|child| {
            let name = child.child_by_field_name("name")?;
            Some(TypeParameter {
                name: node_text(name, source).to_owned(),
                constraint: child
                    .child_by_field_name("constraint")
                    .map(|constraint| lower_type(constraint, source)),
            })
        })
        .collect()
}

/// Lowers the children of a `type_arguments` node.
pub(super) fn lower_type_arguments(
    node: Option<tree_sitter::Node<'_>>,
    source: &str,
) -> Vec<TypeExpr> {
    node.map(|arguments| {
        named_children(arguments)
            .into_iter()
            .map(|argument| lower_type(argument, source))
            .collect()
    })
    .unwrap_or_default()
}

/// Returns the final dotted segment of a qualified name, with any type
/// arguments removed.
pub(super) fn last_segment(text: &str) -> &str {
    let without_arguments = text.split('<').next().unwrap_or(text);
    without_arguments
        .rsplit('.')
        .next()
        .unwrap_or(without_arguments)
        .trim()
}

fn first_type(node: tree_sitter::Node<'_>, source: &str) -> TypeExpr {
    named_children(node).into_iter().next().map_or_else(
        || TypeExpr::Unsupported {
            text: node_text(node, source).to_owned(),
        },
        |inner| lower_type(inner, source),
    )
}

fn keyword_or_unsupported(text: &str) -> TypeExpr {
    TypeKeyword::from_keyword(text).map_or_else(
        || TypeExpr::Unsupported {
            text: text.to_owned(),
        },
        TypeExpr::Keyword,
    )
}

fn lower_generic(node: tree_sitter::Node<'_>, source: &str) -> TypeExpr {
    let name = node
        .child_by_field_name("name")
        .map_or_else(|| node_text(node, source), |name| node_text(name, source));
    TypeExpr::Named {
        name: last_segment(name).to_owned(),
        arguments: lower_type_arguments(node.child_by_field_name("type_arguments"), source),
    }
}

fn flatten(node: tree_sitter::Node<'_>, source: &str, kind: &str, out: &mut Vec<TypeExpr>) {
    for child in named_children(node) {
        if child.kind() == kind {
            flatten(child, source, kind, out);
            continue;
        }
        match (kind, lower_type(child, source)) {
            ("union_type", TypeExpr::Union(members))
            | ("intersection_type", TypeExpr::Intersection(members)) => out.extend(members),
            (_, lowered) => out.push(lowered),
        }
    }
}

fn lower_literal_type(node: tree_sitter::Node<'_>, source: &str) -> TypeExpr {
    let Some(inner) = named_children(node).into_iter().next() else {
        return keyword_or_unsupported(node_text(node, source));
    };
    match inner.kind() {
        "string" | "template_string" => TypeExpr::Literal(LiteralKind::String),
        "number" | "unary_expression" => TypeExpr::Literal(LiteralKind::Number),
        "true" | "false" => TypeExpr::Literal(LiteralKind::Boolean),
        "null" => TypeExpr::Keyword(TypeKeyword::Null),
        "undefined" => TypeExpr::Keyword(TypeKeyword::Undefined),
        _ => TypeExpr::Unsupported {
            text: node_text(node, source).to_owned(),
        },
    }
}

fn lower_members(node: tree_sitter::Node<'_>, source: &str) -> Vec<TypeMember> {
    named_children(node)
        .into_iter()
        .filter_map(|member| {
            let name = member.child_by_field_name("name")?;
            let (kind, ty) = match member.kind() {
                "property_signature" => (
                    MemberKind::Property,
                    member.child_by_field_name("type").map_or(
                        TypeExpr::Keyword(TypeKeyword::Any),
                        |ty| lower_type(ty, source),
                    ),
                ),
                "method_signature" => (
                    MemberKind::Method,
                    member.child_by_field_name("return_type").map_or(
                        TypeExpr::Keyword(TypeKeyword::Any),
                        |ty| lower_type(ty, source),
                    ),
                ),
                _ => return None,
            };
            Some(TypeMember {
                name: node_text(name, source).to_owned(),
                kind,
                ty,
            })
        })
        .collect()
}
