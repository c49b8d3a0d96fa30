//! Error-tolerant tree-sitter front end.
//!
//! A [`ParseResult`] always carries a tree. Regions tree-sitter could not
//! make sense of are listed by [`ParseResult::errors`] and survive lowering
//! as opaque nodes.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::lower::lower;
use crate::position::point_to_one_based;
use crate::tree::SyntaxTree;

/// Longest source excerpt kept in a [`SyntaxErrorInfo`].
const SNIPPET_CHARS: usize = 48;

/// A concrete tree together with the text it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Dialect the source was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Whether any ERROR or MISSING node is present.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Lists ERROR and MISSING nodes in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut found = Vec::new();
        let mut pending = vec![self.tree.root_node()];
        while let Some(node) = pending.pop() {
            if node.is_error() || node.is_missing() {
                found.push(SyntaxErrorInfo::new(node, &self.source));
            }
            if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                pending.extend(children.into_iter().rev());
            }
        }
        found
    }

    /// Lowers the concrete tree into the typed [`SyntaxTree`].
    #[must_use]
    pub fn lower(&self) -> SyntaxTree {
        lower(&self.tree, &self.source, self.language)
    }
}

/// One unparseable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range covered by the region.
    pub byte_range: Range<usize>,
    /// One-based start line.
    pub line: u32,
    /// One-based start column.
    pub column: u32,
    /// Start of the offending text, ellipsised when long.
    pub context: String,
    /// `syntax error`, or `missing <kind>` for inserted tokens.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn new(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let text = source.get(byte_range.clone()).unwrap_or_default();
        let context = if text.chars().count() > SNIPPET_CHARS {
            let head: String = text.chars().take(SNIPPET_CHARS.saturating_sub(3)).collect();
            format!("{head}...")
        } else {
            text.to_owned()
        };
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            String::from("syntax error")
        };
        let (line, column) = point_to_one_based(node.start_position());
        Self {
            byte_range,
            line,
            column,
            context,
            message,
        }
    }
}

/// A tree-sitter parser bound to one dialect.
///
/// Parsers are cheap to create but not `Sync`; each worker thread builds
/// its own.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Loads the grammar for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::GrammarLoad`] if tree-sitter rejects the
    /// grammar, which happens when the grammar and runtime ABI differ.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.grammar())
            .map_err(|error| SyntaxError::grammar_load(language, error.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Parses `source` without lowering it.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::SourceTooLarge`] when offsets would not fit
    /// in a `u32`, and [`SyntaxError::NoTree`] when tree-sitter gives up.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        if u32::try_from(source.len()).is_err() {
            return Err(SyntaxError::SourceTooLarge {
                bytes: source.len(),
            });
        }
        let tree = self
            .inner
            .parse(source, None)
            .ok_or(SyntaxError::NoTree {
                language: self.language,
            })?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }

    /// Parses and lowers `source`.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`Parser::parse`].
    pub fn parse_tree(&mut self, source: &str) -> Result<SyntaxTree, SyntaxError> {
        Ok(self.parse(source)?.lower())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse_ts(source: &str) -> ParseResult {
        Parser::new(SupportedLanguage::TypeScript)
            .and_then(|mut parser| parser.parse(source))
            .expect("typescript parses")
    }

    #[rstest]
    #[case(SupportedLanguage::TypeScript, "function hello(): string { return 'hi'; }")]
    #[case(SupportedLanguage::Tsx, "const el = <div>{items$}</div>;")]
    fn well_formed_sources_have_no_errors(
        #[case] language: SupportedLanguage,
        #[case] source: &str,
    ) {
        let result = Parser::new(language)
            .and_then(|mut parser| parser.parse(source))
            .expect("parse");
        assert!(!result.has_errors());
        assert!(result.errors().is_empty());
        assert_eq!(result.language(), language);
    }

    #[rstest]
    #[case("function broken( {")]
    #[case("source.pipe(take(1);")]
    fn broken_sources_list_errors(#[case] source: &str) {
        let result = parse_ts(source);
        assert!(result.has_errors());
        assert!(!result.errors().is_empty());
    }

    #[test]
    fn errors_carry_one_based_positions() {
        let result = parse_ts("const ok = 1;\nconst = ;\n");
        let first = result.errors().into_iter().next().expect("has error");
        assert_eq!(first.line, 2);
        assert!(first.column >= 1);
    }

    #[test]
    fn long_error_regions_are_ellipsised() {
        let body = "x ".repeat(60);
        let result = parse_ts(&format!("const = {body} = ;"));
        assert!(
            result
                .errors()
                .iter()
                .all(|error| error.context.chars().count() <= SNIPPET_CHARS)
        );
    }
}
