//! Unit and behaviour tests for the semantic layer.

mod type_table_tests;

use rxlint_core::AnalysisLimits;
use rxlint_syntax::{NodeId, NodeKind, SupportedLanguage, SyntaxTree};

use crate::{DeclarationModel, Prelude, SemanticModel, TypeData, TypeId};

/// Parses `source` and builds its declaration model over the rxjs prelude.
pub(crate) fn build(source: &str) -> (SyntaxTree, DeclarationModel) {
    let tree = rxlint_syntax::parse(source, SupportedLanguage::TypeScript).expect("parse");
    let prelude = Prelude::rxjs().expect("prelude");
    let model = DeclarationModel::build(&tree, &prelude, &AnalysisLimits::default());
    (tree, model)
}

/// Returns the expression of the last expression statement in document order.
pub(crate) fn last_expression(tree: &SyntaxTree) -> NodeId {
    tree.preorder()
        .into_iter()
        .filter_map(|id| match tree.kind(id) {
            Some(NodeKind::ExpressionStatement { expression }) => Some(*expression),
            _ => None,
        })
        .last()
        .expect("an expression statement")
}

/// Renders a type roughly as TypeScript would print it.
pub(crate) fn describe(model: &dyn SemanticModel, ty: TypeId) -> String {
    describe_bounded(model, ty, 0)
}

fn describe_bounded(model: &dyn SemanticModel, ty: TypeId, depth: usize) -> String {
    if depth > 16 {
        return String::from("...");
    }
    let next = depth + 1;
    let list = |types: &[TypeId], separator: &str| {
        types
            .iter()
            .map(|inner| describe_bounded(model, *inner, next))
            .collect::<Vec<_>>()
            .join(separator)
    };
    match model.type_data(ty) {
        None => String::from("<missing>"),
        Some(TypeData::Any) => String::from("any"),
        Some(TypeData::Unknown) => String::from("unknown"),
        Some(TypeData::Never) => String::from("never"),
        Some(TypeData::Primitive(primitive)) => format!("{primitive:?}").to_lowercase(),
        Some(TypeData::Declared(declared)) => declared.name.clone(),
        Some(TypeData::Reference { target, arguments }) => {
            let name = match model.type_data(*target) {
                Some(TypeData::Declared(declared)) => declared.name.clone(),
                Some(TypeData::Alias { name, .. }) => name.clone(),
                _ => describe_bounded(model, *target, next),
            };
            format!("{name}<{}>", list(arguments, ", "))
        }
        Some(TypeData::Alias { target, .. }) => describe_bounded(model, *target, next),
        Some(TypeData::Union(members)) => list(members, " | "),
        Some(TypeData::Intersection(members)) => list(members, " & "),
        Some(TypeData::Array(element)) => format!("{}[]", describe_bounded(model, *element, next)),
        Some(TypeData::Tuple(elements)) => format!("[{}]", list(elements, ", ")),
        Some(TypeData::Function { return_type }) => {
            format!("() => {}", describe_bounded(model, *return_type, next))
        }
        Some(TypeData::Object { .. }) => String::from("{}"),
        Some(TypeData::TypeParameter { name, .. } | TypeData::Opaque { name, .. }) => name.clone(),
    }
}
