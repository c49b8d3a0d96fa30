//! The typed syntax tree consumed by the semantic and pattern layers.
//!
//! Nodes live in one arena owned by [`SyntaxTree`] and are addressed by
//! [`NodeId`]. Every node records its parent, so upward walks are cheap, and
//! [`SyntaxTree::children`] yields children in source order so a pre-order
//! walk visits nodes in document order.

use rxlint_core::Span;

use crate::language::SupportedLanguage;
use crate::types::{TypeExpr, TypeParameter};

/// Stable identifier of a node within one [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// Literal categories recognised in expressions and literal types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// A quoted string.
    String,
    /// A template string.
    Template,
    /// A numeric literal.
    Number,
    /// A big integer literal.
    BigInt,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// `undefined`.
    Undefined,
    /// A regular-expression literal.
    Regex,
}

/// Fieldless tag of a [`NodeKind`], used for pattern indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    /// Root of a source file.
    Program,
    /// An expression evaluated as a statement.
    ExpressionStatement,
    /// A braced statement list.
    BlockStatement,
    /// `return` with an optional value.
    ReturnStatement,
    /// `const`, `let` or `var` declaration.
    VariableDeclaration,
    /// One binding inside a variable declaration.
    VariableDeclarator,
    /// A named function declaration or signature.
    FunctionDeclaration,
    /// An arrow function or function expression.
    FunctionExpression,
    /// A formal parameter.
    Parameter,
    /// A class declaration or class expression.
    ClassDeclaration,
    /// A class field or interface property.
    PropertyDefinition,
    /// A class method or interface method signature.
    MethodDefinition,
    /// An interface declaration.
    InterfaceDeclaration,
    /// A type alias declaration.
    TypeAliasDeclaration,
    /// A call expression.
    CallExpression,
    /// A `new` expression.
    NewExpression,
    /// A dotted property access.
    MemberExpression,
    /// A computed property access.
    IndexExpression,
    /// A name.
    Identifier,
    /// `this`.
    ThisExpression,
    /// A literal value.
    Literal,
    /// An array literal.
    ArrayExpression,
    /// An object literal.
    ObjectExpression,
    /// An `as` expression or angle-bracket assertion.
    TypeAssertion,
    /// `await` applied to an expression.
    AwaitExpression,
    /// A parenthesised expression, including `satisfies` wrappers.
    ParenthesizedExpression,
    /// A postfix `!` assertion.
    NonNullExpression,
    /// An assignment.
    AssignmentExpression,
    /// A spread element.
    SpreadElement,
    /// Any construct without a dedicated kind.
    Other,
}

impl SyntaxKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 30] = [
        Self::Program,
        Self::ExpressionStatement,
        Self::BlockStatement,
        Self::ReturnStatement,
        Self::VariableDeclaration,
        Self::VariableDeclarator,
        Self::FunctionDeclaration,
        Self::FunctionExpression,
        Self::Parameter,
        Self::ClassDeclaration,
        Self::PropertyDefinition,
        Self::MethodDefinition,
        Self::InterfaceDeclaration,
        Self::TypeAliasDeclaration,
        Self::CallExpression,
        Self::NewExpression,
        Self::MemberExpression,
        Self::IndexExpression,
        Self::Identifier,
        Self::ThisExpression,
        Self::Literal,
        Self::ArrayExpression,
        Self::ObjectExpression,
        Self::TypeAssertion,
        Self::AwaitExpression,
        Self::ParenthesizedExpression,
        Self::NonNullExpression,
        Self::AssignmentExpression,
        Self::SpreadElement,
        Self::Other,
    ];

    /// Returns the position of this kind in [`SyntaxKind::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Returns the display name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::BlockStatement => "BlockStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::VariableDeclarator => "VariableDeclarator",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::FunctionExpression => "FunctionExpression",
            Self::Parameter => "Parameter",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::PropertyDefinition => "PropertyDefinition",
            Self::MethodDefinition => "MethodDefinition",
            Self::InterfaceDeclaration => "InterfaceDeclaration",
            Self::TypeAliasDeclaration => "TypeAliasDeclaration",
            Self::CallExpression => "CallExpression",
            Self::NewExpression => "NewExpression",
            Self::MemberExpression => "MemberExpression",
            Self::IndexExpression => "IndexExpression",
            Self::Identifier => "Identifier",
            Self::ThisExpression => "ThisExpression",
            Self::Literal => "Literal",
            Self::ArrayExpression => "ArrayExpression",
            Self::ObjectExpression => "ObjectExpression",
            Self::TypeAssertion => "TypeAssertion",
            Self::AwaitExpression => "AwaitExpression",
            Self::ParenthesizedExpression => "ParenthesizedExpression",
            Self::NonNullExpression => "NonNullExpression",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::SpreadElement => "SpreadElement",
            Self::Other => "Other",
        }
    }
}

/// Named child slots used by structural patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The called expression of a call or `new` expression.
    Callee,
    /// The receiver of a member or index access.
    Object,
    /// The accessed name of a member access.
    Property,
    /// The wrapped expression of a statement, parenthesis or assertion.
    Expression,
    /// The operand of `await`, spread or `return`.
    Argument,
    /// The declared name of a binding or declaration.
    Name,
    /// The initialiser of a binding, parameter default or field.
    Init,
    /// The body of a function or method.
    Body,
}

impl Field {
    /// Returns the kinds of node that carry this field.
    #[must_use]
    pub const fn owner_kinds(self) -> &'static [SyntaxKind] {
        match self {
            Self::Callee => &[SyntaxKind::CallExpression, SyntaxKind::NewExpression],
            Self::Object => &[SyntaxKind::MemberExpression, SyntaxKind::IndexExpression],
            Self::Property => &[SyntaxKind::MemberExpression],
            Self::Expression => &[
                SyntaxKind::ExpressionStatement,
                SyntaxKind::ParenthesizedExpression,
                SyntaxKind::NonNullExpression,
                SyntaxKind::TypeAssertion,
            ],
            Self::Argument => &[
                SyntaxKind::AwaitExpression,
                SyntaxKind::SpreadElement,
                SyntaxKind::ReturnStatement,
            ],
            Self::Name => &[
                SyntaxKind::VariableDeclarator,
                SyntaxKind::FunctionDeclaration,
                SyntaxKind::Parameter,
                SyntaxKind::ClassDeclaration,
                SyntaxKind::PropertyDefinition,
                SyntaxKind::MethodDefinition,
                SyntaxKind::InterfaceDeclaration,
                SyntaxKind::TypeAliasDeclaration,
            ],
            Self::Init => &[
                SyntaxKind::VariableDeclarator,
                SyntaxKind::Parameter,
                SyntaxKind::PropertyDefinition,
            ],
            Self::Body => &[
                SyntaxKind::FunctionDeclaration,
                SyntaxKind::FunctionExpression,
                SyntaxKind::MethodDefinition,
            ],
        }
    }

    /// Returns the kinds of node that can occupy this field.
    #[must_use]
    pub const fn occupant_kinds(self) -> Option<&'static [SyntaxKind]> {
        match self {
            Self::Property => Some(&[SyntaxKind::Identifier]),
            Self::Name => Some(&[SyntaxKind::Identifier, SyntaxKind::Other]),
            Self::Body => Some(&[
                SyntaxKind::BlockStatement,
                SyntaxKind::CallExpression,
                SyntaxKind::NewExpression,
                SyntaxKind::MemberExpression,
                SyntaxKind::IndexExpression,
                SyntaxKind::Identifier,
                SyntaxKind::ThisExpression,
                SyntaxKind::Literal,
                SyntaxKind::ArrayExpression,
                SyntaxKind::ObjectExpression,
                SyntaxKind::TypeAssertion,
                SyntaxKind::AwaitExpression,
                SyntaxKind::ParenthesizedExpression,
                SyntaxKind::NonNullExpression,
                SyntaxKind::AssignmentExpression,
                SyntaxKind::FunctionExpression,
                SyntaxKind::ClassDeclaration,
                SyntaxKind::Other,
            ]),
            _ => None,
        }
    }
}

/// Payload of a syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root of a source file.
    Program {
        /// Top-level statements.
        body: Vec<NodeId>,
    },
    /// An expression evaluated for its effect.
    ExpressionStatement {
        /// The evaluated expression.
        expression: NodeId,
    },
    /// A braced statement list.
    BlockStatement {
        /// Statements in order.
        body: Vec<NodeId>,
    },
    /// `return` with an optional value.
    ReturnStatement {
        /// The returned expression.
        argument: Option<NodeId>,
    },
    /// `const`, `let` or `var` declaration.
    VariableDeclaration {
        /// One entry per binding.
        declarators: Vec<NodeId>,
    },
    /// One binding.
    VariableDeclarator {
        /// The bound name or destructuring pattern.
        name: NodeId,
        /// Declared type, if annotated.
        annotation: Option<TypeExpr>,
        /// Initialiser expression.
        init: Option<NodeId>,
    },
    /// A named function declaration or overload signature.
    FunctionDeclaration {
        /// Function name.
        name: Option<NodeId>,
        /// Generic parameters.
        type_parameters: Vec<TypeParameter>,
        /// Formal parameters.
        params: Vec<NodeId>,
        /// Declared return type.
        return_type: Option<TypeExpr>,
        /// Body block; absent for signatures.
        body: Option<NodeId>,
    },
    /// An arrow function or function expression.
    FunctionExpression {
        /// Formal parameters.
        params: Vec<NodeId>,
        /// Declared return type.
        return_type: Option<TypeExpr>,
        /// Body block or concise-body expression.
        body: Option<NodeId>,
    },
    /// A formal parameter.
    Parameter {
        /// The bound name or pattern.
        name: NodeId,
        /// Declared type.
        annotation: Option<TypeExpr>,
        /// Default value.
        default: Option<NodeId>,
        /// Whether the parameter also declares a class property.
        is_property: bool,
    },
    /// A class declaration or class expression.
    ClassDeclaration {
        /// Class name.
        name: Option<NodeId>,
        /// Generic parameters.
        type_parameters: Vec<TypeParameter>,
        /// The `extends` target.
        extends: Option<TypeExpr>,
        /// `implements` targets.
        implements: Vec<TypeExpr>,
        /// Class members in order.
        members: Vec<NodeId>,
    },
    /// A class field or interface property.
    PropertyDefinition {
        /// Property name.
        name: NodeId,
        /// Declared type.
        annotation: Option<TypeExpr>,
        /// Field initialiser.
        value: Option<NodeId>,
    },
    /// A class method, constructor or method signature.
    MethodDefinition {
        /// Method name.
        name: NodeId,
        /// Formal parameters.
        params: Vec<NodeId>,
        /// Declared return type.
        return_type: Option<TypeExpr>,
        /// Body block; absent for signatures.
        body: Option<NodeId>,
    },
    /// An interface declaration.
    InterfaceDeclaration {
        /// Interface name.
        name: NodeId,
        /// Generic parameters.
        type_parameters: Vec<TypeParameter>,
        /// Extended interfaces.
        extends: Vec<TypeExpr>,
        /// Property and method signatures.
        members: Vec<NodeId>,
    },
    /// A type alias declaration.
    TypeAliasDeclaration {
        /// Alias name.
        name: NodeId,
        /// Generic parameters.
        type_parameters: Vec<TypeParameter>,
        /// Aliased type.
        value: TypeExpr,
    },
    /// A call expression.
    CallExpression {
        /// Called expression.
        callee: NodeId,
        /// Arguments in order.
        arguments: Vec<NodeId>,
    },
    /// A `new` expression.
    NewExpression {
        /// Constructed expression.
        callee: NodeId,
        /// Explicit type arguments.
        type_arguments: Vec<TypeExpr>,
        /// Arguments in order.
        arguments: Vec<NodeId>,
    },
    /// A dotted property access such as `a.b` or `a?.b`.
    MemberExpression {
        /// The receiver.
        object: NodeId,
        /// The accessed name; always an [`NodeKind::Identifier`].
        property: NodeId,
    },
    /// A computed property access such as `a[b]`.
    IndexExpression {
        /// The receiver.
        object: NodeId,
        /// The index expression.
        index: NodeId,
    },
    /// A name.
    Identifier {
        /// The identifier text.
        name: String,
    },
    /// `this`.
    ThisExpression,
    /// A literal value.
    Literal {
        /// Literal category.
        kind: LiteralKind,
    },
    /// An array literal.
    ArrayExpression {
        /// Elements in order.
        elements: Vec<NodeId>,
    },
    /// An object literal.
    ObjectExpression {
        /// Properties in order.
        properties: Vec<NodeId>,
    },
    /// `expr as T` or `<T>expr`.
    TypeAssertion {
        /// The asserted expression.
        expression: NodeId,
        /// The asserted type.
        annotation: TypeExpr,
    },
    /// `await expr`.
    AwaitExpression {
        /// The awaited expression.
        argument: NodeId,
    },
    /// `(expr)` or `expr satisfies T`.
    ParenthesizedExpression {
        /// The wrapped expression.
        expression: NodeId,
    },
    /// `expr!`.
    NonNullExpression {
        /// The asserted expression.
        expression: NodeId,
    },
    /// An assignment, including compound assignments.
    AssignmentExpression {
        /// Assignment target.
        left: NodeId,
        /// Assigned value.
        right: NodeId,
    },
    /// `...expr`.
    SpreadElement {
        /// The spread expression.
        argument: NodeId,
    },
    /// Any other construct, labelled with its grammar kind.
    Other {
        /// Grammar kind of the construct.
        label: String,
        /// Lowered named children in order.
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Returns the fieldless tag of this kind.
    #[must_use]
    pub const fn syntax_kind(&self) -> SyntaxKind {
        match self {
            Self::Program { .. } => SyntaxKind::Program,
            Self::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            Self::BlockStatement { .. } => SyntaxKind::BlockStatement,
            Self::ReturnStatement { .. } => SyntaxKind::ReturnStatement,
            Self::VariableDeclaration { .. } => SyntaxKind::VariableDeclaration,
            Self::VariableDeclarator { .. } => SyntaxKind::VariableDeclarator,
            Self::FunctionDeclaration { .. } => SyntaxKind::FunctionDeclaration,
            Self::FunctionExpression { .. } => SyntaxKind::FunctionExpression,
            Self::Parameter { .. } => SyntaxKind::Parameter,
            Self::ClassDeclaration { .. } => SyntaxKind::ClassDeclaration,
            Self::PropertyDefinition { .. } => SyntaxKind::PropertyDefinition,
            Self::MethodDefinition { .. } => SyntaxKind::MethodDefinition,
            Self::InterfaceDeclaration { .. } => SyntaxKind::InterfaceDeclaration,
            Self::TypeAliasDeclaration { .. } => SyntaxKind::TypeAliasDeclaration,
            Self::CallExpression { .. } => SyntaxKind::CallExpression,
            Self::NewExpression { .. } => SyntaxKind::NewExpression,
            Self::MemberExpression { .. } => SyntaxKind::MemberExpression,
            Self::IndexExpression { .. } => SyntaxKind::IndexExpression,
            Self::Identifier { .. } => SyntaxKind::Identifier,
            Self::ThisExpression => SyntaxKind::ThisExpression,
            Self::Literal { .. } => SyntaxKind::Literal,
            Self::ArrayExpression { .. } => SyntaxKind::ArrayExpression,
            Self::ObjectExpression { .. } => SyntaxKind::ObjectExpression,
            Self::TypeAssertion { .. } => SyntaxKind::TypeAssertion,
            Self::AwaitExpression { .. } => SyntaxKind::AwaitExpression,
            Self::ParenthesizedExpression { .. } => SyntaxKind::ParenthesizedExpression,
            Self::NonNullExpression { .. } => SyntaxKind::NonNullExpression,
            Self::AssignmentExpression { .. } => SyntaxKind::AssignmentExpression,
            Self::SpreadElement { .. } => SyntaxKind::SpreadElement,
            Self::Other { .. } => SyntaxKind::Other,
        }
    }

    /// Returns the child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Program { body } | Self::BlockStatement { body } => body.clone(),
            Self::ExpressionStatement { expression }
            | Self::ParenthesizedExpression { expression }
            | Self::NonNullExpression { expression }
            | Self::TypeAssertion { expression, .. } => vec![*expression],
            Self::ReturnStatement { argument } => argument.iter().copied().collect(),
            Self::VariableDeclaration { declarators } => declarators.clone(),
            Self::VariableDeclarator { name, init, .. } => {
                std::iter::once(*name).chain(*init).collect()
            }
            Self::FunctionDeclaration {
                name, params, body, ..
            } => name
                .iter()
                .copied()
                .chain(params.iter().copied())
                .chain(*body)
                .collect(),
            Self::FunctionExpression { params, body, .. } => {
                params.iter().copied().chain(*body).collect()
            }
            Self::Parameter { name, default, .. } => {
                std::iter::once(*name).chain(*default).collect()
            }
            Self::ClassDeclaration { name, members, .. } => {
                name.iter().copied().chain(members.iter().copied()).collect()
            }
            Self::PropertyDefinition { name, value, .. } => {
                std::iter::once(*name).chain(*value).collect()
            }
            Self::MethodDefinition {
                name, params, body, ..
            } => std::iter::once(*name)
                .chain(params.iter().copied())
                .chain(*body)
                .collect(),
            Self::InterfaceDeclaration { name, members, .. } => std::iter::once(*name)
                .chain(members.iter().copied())
                .collect(),
            Self::TypeAliasDeclaration { name, .. } => vec![*name],
            Self::CallExpression { callee, arguments }
            | Self::NewExpression {
                callee, arguments, ..
            } => std::iter::once(*callee)
                .chain(arguments.iter().copied())
                .collect(),
            Self::MemberExpression { object, property } => vec![*object, *property],
            Self::IndexExpression { object, index } => vec![*object, *index],
            Self::Identifier { .. } | Self::ThisExpression | Self::Literal { .. } => Vec::new(),
            Self::ArrayExpression { elements } => elements.clone(),
            Self::ObjectExpression { properties } => properties.clone(),
            Self::AwaitExpression { argument } | Self::SpreadElement { argument } => {
                vec![*argument]
            }
            Self::AssignmentExpression { left, right } => vec![*left, *right],
            Self::Other { children, .. } => children.clone(),
        }
    }

    /// Returns the node occupying `field`, if this kind carries it.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<NodeId> {
        match (field, self) {
            (
                Field::Callee,
                Self::CallExpression { callee, .. } | Self::NewExpression { callee, .. },
            ) => Some(*callee),
            (
                Field::Object,
                Self::MemberExpression { object, .. } | Self::IndexExpression { object, .. },
            ) => Some(*object),
            (Field::Property, Self::MemberExpression { property, .. }) => Some(*property),
            (
                Field::Expression,
                Self::ExpressionStatement { expression }
                | Self::ParenthesizedExpression { expression }
                | Self::NonNullExpression { expression }
                | Self::TypeAssertion { expression, .. },
            ) => Some(*expression),
            (
                Field::Argument,
                Self::AwaitExpression { argument } | Self::SpreadElement { argument },
            ) => Some(*argument),
            (Field::Argument, Self::ReturnStatement { argument }) => *argument,
            (
                Field::Name,
                Self::VariableDeclarator { name, .. }
                | Self::Parameter { name, .. }
                | Self::PropertyDefinition { name, .. }
                | Self::MethodDefinition { name, .. }
                | Self::InterfaceDeclaration { name, .. }
                | Self::TypeAliasDeclaration { name, .. },
            ) => Some(*name),
            (
                Field::Name,
                Self::FunctionDeclaration { name, .. } | Self::ClassDeclaration { name, .. },
            ) => *name,
            (
                Field::Init,
                Self::VariableDeclarator { init: value, .. }
                | Self::Parameter { default: value, .. }
                | Self::PropertyDefinition { value, .. },
            ) => *value,
            (
                Field::Body,
                Self::FunctionDeclaration { body, .. }
                | Self::FunctionExpression { body, .. }
                | Self::MethodDefinition { body, .. },
            ) => *body,
            _ => None,
        }
    }
}

/// One node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
}

impl Node {
    pub(crate) const fn new(kind: NodeKind, span: Span, parent: Option<NodeId>) -> Self {
        Self { kind, span, parent }
    }

    pub(crate) fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    /// Returns the node payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the fieldless tag of the payload.
    #[must_use]
    pub const fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the parent node, absent only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A source comment with its text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Full comment text including delimiters.
    pub text: String,
    /// Source span of the comment.
    pub span: Span,
}

/// A lowered source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    comments: Vec<Comment>,
    source: String,
    language: SupportedLanguage,
    has_errors: bool,
}

impl SyntaxTree {
    pub(crate) const fn from_parts(
        nodes: Vec<Node>,
        comments: Vec<Comment>,
        source: String,
        language: SupportedLanguage,
        has_errors: bool,
    ) -> Self {
        Self {
            nodes,
            comments,
            source,
            language,
            has_errors,
        }
    }

    /// Returns the root [`NodeKind::Program`] node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with identifier `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the payload of `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// Returns the fieldless tag of `id`.
    #[must_use]
    pub fn syntax_kind(&self, id: NodeId) -> Option<SyntaxKind> {
        self.node(id).map(Node::syntax_kind)
    }

    /// Returns the span of `id`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.node(id).map(Node::span)
    }

    /// Returns the parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Returns the children of `id` in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).map(NodeKind::children).unwrap_or_default()
    }

    /// Returns the node in `field` of `id`.
    #[must_use]
    pub fn field(&self, id: NodeId, field: Field) -> Option<NodeId> {
        self.kind(id).and_then(|kind| kind.field(field))
    }

    /// Returns the identifier text when `id` is an identifier.
    #[must_use]
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Returns the call arguments when `id` is a call or `new` expression.
    #[must_use]
    pub fn arguments(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.kind(id)? {
            NodeKind::CallExpression { arguments, .. } | NodeKind::NewExpression { arguments, .. } => {
                Some(arguments)
            }
            _ => None,
        }
    }

    /// Returns the source text covered by `id`.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.span(id)
            .and_then(|span| self.source.get(span.byte_range()))
            .unwrap_or_default()
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |current| self.parent(*current))
    }

    /// Returns every node identifier in pre-order document order.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return order;
        }
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            let children = self.children(id);
            stack.extend(children.into_iter().rev());
        }
        order
    }

    /// Returns the comments of the file in document order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the dialect the file was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns `true` if the parser recovered from syntax errors.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.has_errors
    }
}
