//! Lowering from the Tree-sitter concrete tree into [`SyntaxTree`].
//!
//! Each Tree-sitter node of interest becomes one arena node. Nodes are
//! allocated before their children so parents always precede children in
//! the arena, and the root is always [`NodeId`] zero. Lowering keeps its
//! own work stack, so arbitrarily deep expressions are safe.

mod types;

use rxlint_core::Span;

use crate::language::SupportedLanguage;
use crate::position::span_of;
use crate::tree::{Comment, LiteralKind, Node, NodeId, NodeKind, SyntaxTree};
use crate::types::{TypeExpr, TypeParameter};

use self::types::{last_segment, lower_type, lower_type_arguments, lower_type_parameters};

/// Lowers a parsed file.
pub(crate) fn lower(
    tree: &tree_sitter::Tree,
    source: &str,
    language: SupportedLanguage,
) -> SyntaxTree {
    let root = tree.root_node();
    let mut lowerer = Lowerer {
        source,
        nodes: Vec::new(),
    };
    lowerer.run(root);

    SyntaxTree::from_parts(
        lowerer.nodes,
        collect_comments(tree, source),
        source.to_owned(),
        language,
        root.has_error(),
    )
}

/// A child position a node asks to have lowered.
enum Child<'t> {
    Node(tree_sitter::Node<'t>),
    /// An optional field that is not present.
    Absent,
    /// A bare arrow-function parameter, wrapped in a synthetic parameter.
    BareParameter(tree_sitter::Node<'t>),
}

impl<'t> Child<'t> {
    fn field(node: tree_sitter::Node<'t>, name: &str) -> Self {
        node.child_by_field_name(name).map_or(Self::Absent, Self::Node)
    }

    fn all(node: tree_sitter::Node<'t>) -> Vec<Self> {
        named_children(node).into_iter().map(Self::Node).collect()
    }
}

/// How a node is assembled once its children have ids.
///
/// Child ids arrive in the order the node's [`Child`] list named them.
enum Shape {
    Program,
    Block,
    ExpressionStatement,
    Return,
    Declarations,
    Declarator {
        annotation: Option<TypeExpr>,
    },
    Function {
        type_parameters: Vec<TypeParameter>,
        params: usize,
        return_type: Option<TypeExpr>,
    },
    FunctionExpression {
        params: usize,
        return_type: Option<TypeExpr>,
    },
    Parameter {
        annotation: Option<TypeExpr>,
        is_property: bool,
    },
    BareParameter,
    Class {
        type_parameters: Vec<TypeParameter>,
        extends: Option<TypeExpr>,
        implements: Vec<TypeExpr>,
    },
    Property {
        annotation: Option<TypeExpr>,
    },
    Method {
        params: usize,
        return_type: Option<TypeExpr>,
    },
    Interface {
        type_parameters: Vec<TypeParameter>,
        extends: Vec<TypeExpr>,
    },
    TypeAlias {
        type_parameters: Vec<TypeParameter>,
        value: TypeExpr,
    },
    Call,
    New {
        type_arguments: Vec<TypeExpr>,
    },
    Member,
    Index,
    Assignment,
    Assertion {
        annotation: Option<TypeExpr>,
    },
    Parenthesized,
    NonNull,
    Await,
    Spread,
    Array,
    Object,
    Leaf(NodeKind),
    Other,
}

/// A node whose children are still being lowered.
struct Frame<'t> {
    id: NodeId,
    label: &'static str,
    shape: Shape,
    pending: std::vec::IntoIter<Child<'t>>,
    lowered: Vec<Option<NodeId>>,
}

impl<'t> Frame<'t> {
    fn new(id: NodeId, label: &'static str, (shape, children): (Shape, Vec<Child<'t>>)) -> Self {
        Self {
            id,
            label,
            shape,
            lowered: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
        }
    }
}

struct Lowerer<'src> {
    source: &'src str,
    nodes: Vec<Node>,
}

impl Lowerer<'_> {
    /// Lowers the tree rooted at `root` with an explicit stack of frames,
    /// so nesting depth never grows the call stack.
    ///
    /// Each node is allocated before its first child and each child subtree
    /// is finished before its next sibling starts, which keeps the arena in
    /// pre-order.
    fn run(&mut self, root: tree_sitter::Node<'_>) {
        let root_id = self.alloc_span(span_of(root), root.kind(), None);
        let mut stack = vec![Frame::new(
            root_id,
            root.kind(),
            (Shape::Program, Child::all(root)),
        )];
        while let Some(frame) = stack.last_mut() {
            match frame.pending.next() {
                Some(Child::Absent) => frame.lowered.push(None),
                Some(Child::Node(child)) => {
                    let parent = frame.id;
                    let id = self.alloc_span(span_of(child), child.kind(), Some(parent));
                    stack.push(Frame::new(id, child.kind(), self.plan(child)));
                }
                Some(Child::BareParameter(bare)) => {
                    let parent = frame.id;
                    let id = self.alloc_span(span_of(bare), "required_parameter", Some(parent));
                    stack.push(Frame::new(
                        id,
                        "required_parameter",
                        (Shape::BareParameter, vec![Child::Node(bare)]),
                    ));
                }
                None => {
                    let Some(done) = stack.pop() else {
                        break;
                    };
                    let id = done.id;
                    let kind = self.build(done);
                    self.finish(id, kind);
                    if let Some(parent) = stack.last_mut() {
                        parent.lowered.push(Some(id));
                    }
                }
            }
        }
    }

    fn alloc_span(&mut self, span: Span, label: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(
            NodeKind::Other {
                label: label.to_owned(),
                children: Vec::new(),
            },
            span,
            parent,
        ));
        id
    }

    fn finish(&mut self, id: NodeId, kind: NodeKind) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.set_kind(kind);
        }
    }

    fn is_identifier(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.index()).map(Node::kind),
            Some(NodeKind::Identifier { .. })
        )
    }

    fn text(&self, node: tree_sitter::Node<'_>) -> &str {
        node_text(node, self.source)
    }

    fn annotation(&self, node: tree_sitter::Node<'_>, field: &str) -> Option<TypeExpr> {
        node.child_by_field_name(field)
            .map(|ty| lower_type(ty, self.source))
    }

    fn type_parameters(&self, node: tree_sitter::Node<'_>) -> Vec<TypeParameter> {
        lower_type_parameters(node.child_by_field_name("type_parameters"), self.source)
    }

    /// Decides the shape of `node` and which children it lowers, in order.
    fn plan<'t>(&self, node: tree_sitter::Node<'t>) -> (Shape, Vec<Child<'t>>) {
        match node.kind() {
            "statement_block" | "class_static_block" => (Shape::Block, Child::all(node)),
            "expression_statement" => wrap(node, Shape::ExpressionStatement),
            "return_statement" => (
                Shape::Return,
                first_child(node).map(Child::Node).into_iter().collect(),
            ),
            "lexical_declaration" | "variable_declaration" => {
                (Shape::Declarations, Child::all(node))
            }
            "variable_declarator" => match node.child_by_field_name("name") {
                Some(name) => (
                    Shape::Declarator {
                        annotation: self.annotation(node, "type"),
                    },
                    vec![Child::Node(name), Child::field(node, "value")],
                ),
                None => other(node),
            },
            "function_declaration"
            | "generator_function_declaration"
            | "function_signature" => {
                let params = parameters(node);
                let mut children = vec![Child::field(node, "name")];
                let shape = Shape::Function {
                    type_parameters: self.type_parameters(node),
                    params: params.len(),
                    return_type: self.annotation(node, "return_type"),
                };
                children.extend(params);
                children.push(Child::field(node, "body"));
                (shape, children)
            }
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                let mut children = parameters(node);
                let shape = Shape::FunctionExpression {
                    params: children.len(),
                    return_type: self.annotation(node, "return_type"),
                };
                children.push(Child::field(node, "body"));
                (shape, children)
            }
            "required_parameter" | "optional_parameter" => self.plan_parameter(node),
            "class_declaration" | "abstract_class_declaration" | "class" => {
                self.plan_class(node)
            }
            "public_field_definition" | "property_signature" => {
                match node.child_by_field_name("name") {
                    Some(name) => (
                        Shape::Property {
                            annotation: self.annotation(node, "type"),
                        },
                        vec![Child::Node(name), Child::field(node, "value")],
                    ),
                    None => other(node),
                }
            }
            "method_definition" | "method_signature" | "abstract_method_signature" => {
                let Some(name) = node.child_by_field_name("name") else {
                    return other(node);
                };
                let params = parameters(node);
                let shape = Shape::Method {
                    params: params.len(),
                    return_type: self.annotation(node, "return_type"),
                };
                let mut children = vec![Child::Node(name)];
                children.extend(params);
                children.push(Child::field(node, "body"));
                (shape, children)
            }
            "interface_declaration" => self.plan_interface(node),
            "type_alias_declaration" => match node.child_by_field_name("name") {
                Some(name) => (
                    Shape::TypeAlias {
                        type_parameters: self.type_parameters(node),
                        value: self.annotation(node, "value").unwrap_or_else(|| {
                            TypeExpr::Unsupported {
                                text: String::new(),
                            }
                        }),
                    },
                    vec![Child::Node(name)],
                ),
                None => other(node),
            },
            "call_expression" => plan_call(node),
            "new_expression" => match node.child_by_field_name("constructor") {
                Some(callee) => {
                    let mut children = vec![Child::Node(callee)];
                    children.extend(arguments(node.child_by_field_name("arguments")));
                    (
                        Shape::New {
                            type_arguments: lower_type_arguments(
                                node.child_by_field_name("type_arguments"),
                                self.source,
                            ),
                        },
                        children,
                    )
                }
                None => other(node),
            },
            "member_expression" => (
                Shape::Member,
                vec![Child::field(node, "object"), Child::field(node, "property")],
            ),
            "subscript_expression" => (
                Shape::Index,
                vec![Child::field(node, "object"), Child::field(node, "index")],
            ),
            "identifier"
            | "property_identifier"
            | "type_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "private_property_identifier"
            | "statement_identifier" => leaf(NodeKind::Identifier {
                name: self.text(node).to_owned(),
            }),
            "this" => leaf(NodeKind::ThisExpression),
            "string" => leaf(literal(LiteralKind::String)),
            "template_string" => leaf(literal(LiteralKind::Template)),
            "number" => {
                if self.text(node).ends_with('n') {
                    leaf(literal(LiteralKind::BigInt))
                } else {
                    leaf(literal(LiteralKind::Number))
                }
            }
            "true" | "false" => leaf(literal(LiteralKind::Boolean)),
            "null" => leaf(literal(LiteralKind::Null)),
            "undefined" => leaf(literal(LiteralKind::Undefined)),
            "regex" => leaf(literal(LiteralKind::Regex)),
            "array" => (Shape::Array, Child::all(node)),
            "object" => (Shape::Object, Child::all(node)),
            "as_expression" | "type_assertion" => self.plan_assertion(node),
            "satisfies_expression" | "parenthesized_expression" => {
                wrap(node, Shape::Parenthesized)
            }
            "non_null_expression" => wrap(node, Shape::NonNull),
            "await_expression" => wrap(node, Shape::Await),
            "spread_element" => wrap(node, Shape::Spread),
            "assignment_expression" | "augmented_assignment_expression" => (
                Shape::Assignment,
                vec![Child::field(node, "left"), Child::field(node, "right")],
            ),
            _ => other(node),
        }
    }

    /// Assembles the kind of a finished frame from its lowered children.
    fn build(&self, frame: Frame<'_>) -> NodeKind {
        let Frame {
            label,
            shape,
            lowered,
            ..
        } = frame;
        let mut slots = lowered.into_iter();
        match shape {
            Shape::Program => NodeKind::Program {
                body: slots.flatten().collect(),
            },
            Shape::Block => NodeKind::BlockStatement {
                body: slots.flatten().collect(),
            },
            Shape::Declarations => NodeKind::VariableDeclaration {
                declarators: slots.flatten().collect(),
            },
            Shape::Array => NodeKind::ArrayExpression {
                elements: slots.flatten().collect(),
            },
            Shape::Object => NodeKind::ObjectExpression {
                properties: slots.flatten().collect(),
            },
            Shape::Return => NodeKind::ReturnStatement {
                argument: next(&mut slots),
            },
            Shape::ExpressionStatement => match next(&mut slots) {
                Some(expression) => NodeKind::ExpressionStatement { expression },
                None => other_kind(label, slots),
            },
            Shape::Parenthesized => match next(&mut slots) {
                Some(expression) => NodeKind::ParenthesizedExpression { expression },
                None => other_kind(label, slots),
            },
            Shape::NonNull => match next(&mut slots) {
                Some(expression) => NodeKind::NonNullExpression { expression },
                None => other_kind(label, slots),
            },
            Shape::Await => match next(&mut slots) {
                Some(argument) => NodeKind::AwaitExpression { argument },
                None => other_kind(label, slots),
            },
            Shape::Spread => match next(&mut slots) {
                Some(argument) => NodeKind::SpreadElement { argument },
                None => other_kind(label, slots),
            },
            Shape::Declarator { annotation } => match next(&mut slots) {
                Some(name) => NodeKind::VariableDeclarator {
                    name,
                    annotation,
                    init: next(&mut slots),
                },
                None => other_kind(label, slots),
            },
            Shape::Function {
                type_parameters,
                params,
                return_type,
            } => NodeKind::FunctionDeclaration {
                name: next(&mut slots),
                type_parameters,
                params: take(&mut slots, params),
                return_type,
                body: next(&mut slots),
            },
            Shape::FunctionExpression {
                params,
                return_type,
            } => NodeKind::FunctionExpression {
                params: take(&mut slots, params),
                return_type,
                body: next(&mut slots),
            },
            Shape::Parameter {
                annotation,
                is_property,
            } => match next(&mut slots) {
                Some(name) => NodeKind::Parameter {
                    name,
                    annotation,
                    default: next(&mut slots),
                    is_property,
                },
                None => other_kind(label, slots),
            },
            Shape::BareParameter => match next(&mut slots) {
                Some(name) => NodeKind::Parameter {
                    name,
                    annotation: None,
                    default: None,
                    is_property: false,
                },
                None => other_kind(label, slots),
            },
            Shape::Class {
                type_parameters,
                extends,
                implements,
            } => NodeKind::ClassDeclaration {
                name: next(&mut slots),
                type_parameters,
                extends,
                implements,
                members: slots.flatten().collect(),
            },
            Shape::Property { annotation } => match next(&mut slots) {
                Some(name) => NodeKind::PropertyDefinition {
                    name,
                    annotation,
                    value: next(&mut slots),
                },
                None => other_kind(label, slots),
            },
            Shape::Method {
                params,
                return_type,
            } => match next(&mut slots) {
                Some(name) => NodeKind::MethodDefinition {
                    name,
                    params: take(&mut slots, params),
                    return_type,
                    body: next(&mut slots),
                },
                None => other_kind(label, slots),
            },
            Shape::Interface {
                type_parameters,
                extends,
            } => match next(&mut slots) {
                Some(name) => NodeKind::InterfaceDeclaration {
                    name,
                    type_parameters,
                    extends,
                    members: slots.flatten().collect(),
                },
                None => other_kind(label, slots),
            },
            Shape::TypeAlias {
                type_parameters,
                value,
            } => match next(&mut slots) {
                Some(name) => NodeKind::TypeAliasDeclaration {
                    name,
                    type_parameters,
                    value,
                },
                None => other_kind(label, slots),
            },
            Shape::Call => match next(&mut slots) {
                Some(callee) => NodeKind::CallExpression {
                    callee,
                    arguments: slots.flatten().collect(),
                },
                None => other_kind(label, slots),
            },
            Shape::New { type_arguments } => match next(&mut slots) {
                Some(callee) => NodeKind::NewExpression {
                    callee,
                    type_arguments,
                    arguments: slots.flatten().collect(),
                },
                None => other_kind(label, slots),
            },
            Shape::Member => match (next(&mut slots), next(&mut slots)) {
                (Some(object), Some(property)) if self.is_identifier(property) => {
                    NodeKind::MemberExpression { object, property }
                }
                (object, property) => pair(label, object, property),
            },
            Shape::Index => match (next(&mut slots), next(&mut slots)) {
                (Some(object), Some(index)) => NodeKind::IndexExpression { object, index },
                (object, index) => pair(label, object, index),
            },
            Shape::Assignment => match (next(&mut slots), next(&mut slots)) {
                (Some(left), Some(right)) => NodeKind::AssignmentExpression { left, right },
                (left, right) => pair(label, left, right),
            },
            Shape::Assertion { annotation } => match (slots.flatten().next_back(), annotation) {
                (Some(expression), Some(ty)) => NodeKind::TypeAssertion {
                    expression,
                    annotation: ty,
                },
                // `x as const` keeps the type of `x`.
                (Some(expression), None) => NodeKind::ParenthesizedExpression { expression },
                (None, _) => other_kind(label, std::iter::empty()),
            },
            Shape::Leaf(kind) => kind,
            Shape::Other => other_kind(label, slots),
        }
    }

    fn plan_parameter<'t>(&self, node: tree_sitter::Node<'t>) -> (Shape, Vec<Child<'t>>) {
        let Some(pattern) = node.child_by_field_name("pattern") else {
            return other(node);
        };
        let mut cursor = node.walk();
        let is_property = node.children(&mut cursor).any(|child| {
            matches!(
                child.kind(),
                "accessibility_modifier" | "override_modifier" | "readonly"
            )
        });
        (
            Shape::Parameter {
                annotation: self.annotation(node, "type"),
                is_property,
            },
            vec![Child::Node(pattern), Child::field(node, "value")],
        )
    }

    fn plan_class<'t>(&self, node: tree_sitter::Node<'t>) -> (Shape, Vec<Child<'t>>) {
        let mut extends = None;
        let mut implements = Vec::new();
        for heritage in named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "class_heritage")
        {
            for clause in named_children(heritage) {
                match clause.kind() {
                    "extends_clause" => {
                        extends = clause.child_by_field_name("value").map(|value| {
                            TypeExpr::Named {
                                name: last_segment(self.text(value)).to_owned(),
                                arguments: lower_type_arguments(
                                    clause.child_by_field_name("type_arguments"),
                                    self.source,
                                ),
                            }
                        });
                    }
                    "implements_clause" => implements.extend(
                        named_children(clause)
                            .into_iter()
                            .map(|ty| lower_type(ty, self.source)),
                    ),
                    _ => {}
                }
            }
        }
        let mut children = vec![Child::field(node, "name")];
        if let Some(body) = node.child_by_field_name("body") {
            children.extend(Child::all(body));
        }
        (
            Shape::Class {
                type_parameters: self.type_parameters(node),
                extends,
                implements,
            },
            children,
        )
    }

    fn plan_interface<'t>(&self, node: tree_sitter::Node<'t>) -> (Shape, Vec<Child<'t>>) {
        let Some(name) = node.child_by_field_name("name") else {
            return other(node);
        };
        let extends = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "extends_type_clause")
            .flat_map(named_children)
            .map(|ty| lower_type(ty, self.source))
            .collect();
        let mut children = vec![Child::Node(name)];
        if let Some(body) = node.child_by_field_name("body") {
            children.extend(Child::all(body));
        }
        (
            Shape::Interface {
                type_parameters: self.type_parameters(node),
                extends,
            },
            children,
        )
    }

    fn plan_assertion<'t>(&self, node: tree_sitter::Node<'t>) -> (Shape, Vec<Child<'t>>) {
        let is_as = node.kind() == "as_expression";
        let mut expressions = Vec::new();
        let mut annotation = None;
        for child in named_children(node) {
            match child.kind() {
                "type_arguments" => {
                    annotation = lower_type_arguments(Some(child), self.source)
                        .into_iter()
                        .next();
                }
                _ if is_as && !expressions.is_empty() => {
                    annotation = Some(lower_type(child, self.source));
                }
                _ => expressions.push(Child::Node(child)),
            }
        }
        (Shape::Assertion { annotation }, expressions)
    }
}

fn next(slots: &mut impl Iterator<Item = Option<NodeId>>) -> Option<NodeId> {
    slots.next().flatten()
}

fn take(slots: &mut impl Iterator<Item = Option<NodeId>>, count: usize) -> Vec<NodeId> {
    slots.by_ref().take(count).flatten().collect()
}

fn pair(label: &str, first: Option<NodeId>, second: Option<NodeId>) -> NodeKind {
    NodeKind::Other {
        label: label.to_owned(),
        children: first.into_iter().chain(second).collect(),
    }
}

fn other_kind(label: &str, slots: impl Iterator<Item = Option<NodeId>>) -> NodeKind {
    NodeKind::Other {
        label: label.to_owned(),
        children: slots.flatten().collect(),
    }
}

fn other(node: tree_sitter::Node<'_>) -> (Shape, Vec<Child<'_>>) {
    (Shape::Other, Child::all(node))
}

const fn leaf<'t>(kind: NodeKind) -> (Shape, Vec<Child<'t>>) {
    (Shape::Leaf(kind), Vec::new())
}

/// A node that wraps its first named child, or falls back to `Other`.
fn wrap(node: tree_sitter::Node<'_>, shape: Shape) -> (Shape, Vec<Child<'_>>) {
    match first_child(node) {
        Some(inner) => (shape, vec![Child::Node(inner)]),
        None => other(node),
    }
}

fn first_child(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    named_children(node).into_iter().next()
}

fn parameters(node: tree_sitter::Node<'_>) -> Vec<Child<'_>> {
    if let Some(list) = node.child_by_field_name("parameters") {
        return Child::all(list);
    }
    // Arrow functions with a single bare parameter: `x => x.pipe()`.
    node.child_by_field_name("parameter")
        .map(Child::BareParameter)
        .into_iter()
        .collect()
}

fn arguments(list: Option<tree_sitter::Node<'_>>) -> Vec<Child<'_>> {
    list.map(Child::all).unwrap_or_default()
}

fn plan_call(node: tree_sitter::Node<'_>) -> (Shape, Vec<Child<'_>>) {
    let Some(callee) = node.child_by_field_name("function") else {
        return other(node);
    };
    let mut children = vec![Child::Node(callee)];
    match node.child_by_field_name("arguments") {
        // Tagged templates pass the template as the sole argument.
        Some(template) if template.kind() == "template_string" => {
            children.push(Child::Node(template));
        }
        list => children.extend(arguments(list)),
    }
    (Shape::Call, children)
}

const fn literal(kind: LiteralKind) -> NodeKind {
    NodeKind::Literal { kind }
}

/// Returns the named children of `node`, skipping comments.
pub(super) fn named_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

pub(super) fn node_text<'src>(node: tree_sitter::Node<'_>, source: &'src str) -> &'src str {
    source.get(node.byte_range()).unwrap_or_default()
}

fn collect_comments(tree: &tree_sitter::Tree, source: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            comments.push(Comment {
                text: node_text(node, source).to_owned(),
                span: span_of(node),
            });
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}
