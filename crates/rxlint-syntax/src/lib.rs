//! Tree-sitter powered syntax layer for rxlint.
//!
//! This crate parses TypeScript and TSX sources and lowers the concrete
//! Tree-sitter tree into a compact, typed [`SyntaxTree`]:
//!
//! - every node has a [`NodeKind`] payload, a source [`Span`] and a parent
//!   link;
//! - children are returned in source order, so a pre-order walk visits
//!   nodes in document order;
//! - type annotations are kept as [`TypeExpr`] values for the semantic
//!   layer to resolve;
//! - comments are collected separately for suppression handling.
//!
//! Parsing is error-tolerant. A file with syntax errors still yields a tree;
//! the regions Tree-sitter could not parse become [`NodeKind::Other`] nodes
//! labelled `ERROR`.
//!
//! [`Span`]: rxlint_core::Span

mod error;
mod language;
mod lower;
mod parser;
mod position;
mod tree;
mod types;

pub use error::SyntaxError;
pub use language::{SupportedLanguage, UnknownDialect};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use tree::{Comment, Field, LiteralKind, Node, NodeId, NodeKind, SyntaxKind, SyntaxTree};
pub use types::{MemberKind, TypeExpr, TypeKeyword, TypeMember, TypeParameter};

/// Parses and lowers `source` as `language`.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the parser cannot be initialised or the
/// source cannot be parsed at all.
pub fn parse(source: &str, language: SupportedLanguage) -> Result<SyntaxTree, SyntaxError> {
    Parser::new(language)?.parse_tree(source)
}

#[cfg(test)]
mod tests;
