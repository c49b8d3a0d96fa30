//! Structural selectors over syntax nodes.

use std::fmt;

use regex::Regex;
use rxlint_syntax::{Field, NodeId, SyntaxKind, SyntaxTree};

/// A set of [`SyntaxKind`]s packed into a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u64);

impl KindSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns the set of every kind.
    #[must_use]
    pub fn all() -> Self {
        Self::from_kinds(&SyntaxKind::ALL)
    }

    /// Builds a set from a list of kinds.
    #[must_use]
    pub fn from_kinds(kinds: &[SyntaxKind]) -> Self {
        kinds
            .iter()
            .fold(Self::EMPTY, |set, kind| set.with(*kind))
    }

    /// Returns a copy of this set that also contains `kind`.
    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | (1 << kind.ordinal()))
    }

    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.0 & (1 << kind.ordinal()) != 0
    }

    /// Returns the kinds in both sets.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the kinds in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no kind is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the kinds in the set in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        SyntaxKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

/// A predicate over the shape of a node and its surroundings.
///
/// Selectors are built with the constructor functions and combined with
/// [`Selector::and`] / [`Selector::or`]. They are compiled into a
/// [`CompiledPattern`](super::CompiledPattern) before use.
///
/// # Example
///
/// ```
/// use rxlint::pattern::Selector;
/// use rxlint_syntax::{Field, SyntaxKind};
///
/// // A call whose callee is a `.pipe` member access.
/// let selector = Selector::kind(SyntaxKind::CallExpression).and(Selector::field(
///     Field::Callee,
///     Selector::field(Field::Property, Selector::name("pipe")),
/// ));
/// assert!(selector.possible_kinds().contains(SyntaxKind::CallExpression));
/// ```
#[derive(Debug, Clone)]
pub enum Selector {
    /// Matches every node.
    Any,
    /// Matches nodes of one kind.
    Kind(SyntaxKind),
    /// Matches an identifier with exactly this name.
    Name(String),
    /// Matches an identifier whose name matches the expression.
    NameMatches(Regex),
    /// Matches a call or `new` expression with this many arguments.
    ArgumentCount(usize),
    /// Matches when the node's `field` child matches the inner selector.
    Field(Field, Box<Selector>),
    /// Matches when the node is the `field` child of a parent that matches
    /// the inner selector.
    FieldOf(Field, Box<Selector>),
    /// Matches when the direct parent matches the inner selector.
    Parent(Box<Selector>),
    /// Matches when some proper descendant matches the inner selector.
    Has(Box<Selector>),
    /// Matches when every inner selector matches.
    And(Vec<Selector>),
    /// Matches when any inner selector matches.
    Or(Vec<Selector>),
}

impl Selector {
    /// Matches nodes of `kind`.
    #[must_use]
    pub const fn kind(kind: SyntaxKind) -> Self {
        Self::Kind(kind)
    }

    /// Matches identifiers named `name`.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Matches identifiers whose name matches `pattern`.
    #[must_use]
    pub const fn name_matches(pattern: Regex) -> Self {
        Self::NameMatches(pattern)
    }

    /// Matches calls with exactly `count` arguments.
    #[must_use]
    pub const fn argument_count(count: usize) -> Self {
        Self::ArgumentCount(count)
    }

    /// Navigates to the `field` child and tests it with `inner`.
    #[must_use]
    pub fn field(field: Field, inner: Self) -> Self {
        Self::Field(field, Box::new(inner))
    }

    /// Requires the node to be the `field` child of a parent matching
    /// `parent`.
    #[must_use]
    pub fn field_of(field: Field, parent: Self) -> Self {
        Self::FieldOf(field, Box::new(parent))
    }

    /// Requires the direct parent to match `parent`.
    #[must_use]
    pub fn parent(parent: Self) -> Self {
        Self::Parent(Box::new(parent))
    }

    /// Requires some descendant to match `inner`.
    #[must_use]
    pub fn has(inner: Self) -> Self {
        Self::Has(Box::new(inner))
    }

    /// Conjunction with `other`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Disjunction with `other`, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut parts) => {
                parts.push(other);
                Self::Or(parts)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// Returns the kinds a matching node could have.
    ///
    /// An empty set means the selector can never match.
    #[must_use]
    pub fn possible_kinds(&self) -> KindSet {
        match self {
            Self::Any => KindSet::all(),
            Self::Kind(kind) => KindSet::EMPTY.with(*kind),
            Self::Name(_) | Self::NameMatches(_) => KindSet::EMPTY.with(SyntaxKind::Identifier),
            Self::ArgumentCount(_) => KindSet::from_kinds(&[
                SyntaxKind::CallExpression,
                SyntaxKind::NewExpression,
            ]),
            Self::Field(field, inner) => {
                let occupants = field
                    .occupant_kinds()
                    .map_or_else(KindSet::all, KindSet::from_kinds);
                if occupants.intersect(inner.possible_kinds()).is_empty() {
                    KindSet::EMPTY
                } else {
                    KindSet::from_kinds(field.owner_kinds())
                }
            }
            Self::FieldOf(field, parent) => {
                let owners = KindSet::from_kinds(field.owner_kinds());
                if owners.intersect(parent.possible_kinds()).is_empty() {
                    KindSet::EMPTY
                } else {
                    field
                        .occupant_kinds()
                        .map_or_else(KindSet::all, KindSet::from_kinds)
                }
            }
            Self::Parent(inner) | Self::Has(inner) => {
                if inner.possible_kinds().is_empty() {
                    KindSet::EMPTY
                } else {
                    KindSet::all()
                }
            }
            Self::And(parts) => parts
                .iter()
                .fold(KindSet::all(), |set, part| set.intersect(part.possible_kinds())),
            Self::Or(parts) => parts
                .iter()
                .fold(KindSet::EMPTY, |set, part| set.union(part.possible_kinds())),
        }
    }

    /// Tests `node` against this selector.
    ///
    /// `budget` bounds the number of nodes a descendant search may visit.
    #[must_use]
    pub fn matches(&self, tree: &SyntaxTree, node: NodeId, budget: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(kind) => tree.syntax_kind(node) == Some(*kind),
            Self::Name(name) => tree.identifier_name(node) == Some(name.as_str()),
            Self::NameMatches(pattern) => tree
                .identifier_name(node)
                .is_some_and(|name| pattern.is_match(name)),
            Self::ArgumentCount(count) => tree
                .arguments(node)
                .is_some_and(|arguments| arguments.len() == *count),
            Self::Field(field, inner) => tree
                .field(node, *field)
                .is_some_and(|child| inner.matches(tree, child, budget)),
            Self::FieldOf(field, parent) => tree.parent(node).is_some_and(|owner| {
                tree.field(owner, *field) == Some(node) && parent.matches(tree, owner, budget)
            }),
            Self::Parent(parent) => tree
                .parent(node)
                .is_some_and(|owner| parent.matches(tree, owner, budget)),
            Self::Has(inner) => has_descendant(tree, node, inner, budget),
            Self::And(parts) => parts.iter().all(|part| part.matches(tree, node, budget)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(tree, node, budget)),
        }
    }
}

fn has_descendant(tree: &SyntaxTree, node: NodeId, inner: &Selector, budget: usize) -> bool {
    let mut stack = tree.children(node);
    stack.reverse();
    let mut visited = 0_usize;
    while let Some(current) = stack.pop() {
        visited += 1;
        if visited > budget {
            return false;
        }
        if inner.matches(tree, current, budget) {
            return true;
        }
        stack.extend(tree.children(current).into_iter().rev());
    }
    false
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Kind(kind) => f.write_str(kind.as_str()),
            Self::Name(name) => write!(f, "[name={name:?}]"),
            Self::NameMatches(pattern) => write!(f, "[name=/{}/]", pattern.as_str()),
            Self::ArgumentCount(count) => write!(f, "[arguments.length={count}]"),
            Self::Field(field, inner) => write!(f, "[{field:?}: {inner}]"),
            Self::FieldOf(field, parent) => write!(f, "{parent} > {field:?}"),
            Self::Parent(parent) => write!(f, "{parent} > *"),
            Self::Has(inner) => write!(f, ":has({inner})"),
            Self::And(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Or(parts) => {
                f.write_str(":is(")?;
                for (index, part) in parts.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}
