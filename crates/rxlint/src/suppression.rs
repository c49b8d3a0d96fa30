//! Inline comments that silence findings.
//!
//! Two directives are recognised, in line or block comments:
//!
//! - `// rxlint-disable-next-line [ids]` silences the following line;
//! - `// rxlint-disable-line [ids]` silences the line the comment is on.
//!
//! `ids` is a comma-separated list of check identifiers; without it every
//! check is silenced. Text after `--` is a free-form justification.

use rustc_hash::FxHashMap;
use rxlint_syntax::SyntaxTree;

use crate::reporter::Finding;

const NEXT_LINE: &str = "rxlint-disable-next-line";
const SAME_LINE: &str = "rxlint-disable-line";

/// Which checks a directive silences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressionScope {
    /// Every check.
    All,
    /// Only the listed checks.
    Checks(Vec<String>),
}

impl SuppressionScope {
    fn covers(&self, check_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Checks(ids) => ids.iter().any(|id| id == check_id),
        }
    }
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// `true` for `disable-next-line`, `false` for `disable-line`.
    pub next_line: bool,
    /// The silenced checks.
    pub scope: SuppressionScope,
}

impl Directive {
    /// Parses the text of one comment, delimiters included.
    ///
    /// # Example
    ///
    /// ```
    /// use rxlint::{Directive, SuppressionScope};
    ///
    /// let parsed = Directive::parse("// rxlint-disable-next-line no-unsafe-first -- legacy");
    /// assert_eq!(
    ///     parsed,
    ///     Some(Directive {
    ///         next_line: true,
    ///         scope: SuppressionScope::Checks(vec![String::from("no-unsafe-first")]),
    ///     })
    /// );
    /// assert_eq!(Directive::parse("// plain comment"), None);
    /// ```
    #[must_use]
    pub fn parse(comment: &str) -> Option<Self> {
        let body = strip_delimiters(comment);
        let directive = body.split("--").next().unwrap_or_default().trim();
        let (next_line, rest) = match directive.strip_prefix(NEXT_LINE) {
            Some(after) => (true, after),
            None => (false, directive.strip_prefix(SAME_LINE)?),
        };
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let ids: Vec<String> = rest
            .split([',', ' ', '\t'])
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect();
        let scope = if ids.is_empty() {
            SuppressionScope::All
        } else {
            SuppressionScope::Checks(ids)
        };
        Some(Self { next_line, scope })
    }
}

fn strip_delimiters(comment: &str) -> &str {
    let trimmed = comment.trim();
    if let Some(line) = trimmed.strip_prefix("//") {
        return line.trim();
    }
    trimmed
        .strip_prefix("/*")
        .map(|block| block.strip_suffix("*/").unwrap_or(block))
        .unwrap_or(trimmed)
        .trim()
}

/// The suppressions declared in one file, keyed by zero-based line.
#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    by_line: FxHashMap<u32, Vec<SuppressionScope>>,
}

impl Suppressions {
    /// Collects every directive in the comments of `tree`.
    #[must_use]
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        let mut suppressions = Self::default();
        for comment in tree.comments() {
            let Some(directive) = Directive::parse(&comment.text) else {
                continue;
            };
            let line = if directive.next_line {
                comment.span.end.line.saturating_add(1)
            } else {
                comment.span.start.line
            };
            suppressions
                .by_line
                .entry(line)
                .or_default()
                .push(directive.scope);
        }
        suppressions
    }

    /// Returns `true` if `check_id` is silenced on zero-based `line`.
    #[must_use]
    pub fn suppresses(&self, check_id: &str, line: u32) -> bool {
        self.by_line
            .get(&line)
            .is_some_and(|scopes| scopes.iter().any(|scope| scope.covers(check_id)))
    }

    /// Returns `true` if `finding` starts on a silenced line.
    #[must_use]
    pub fn suppresses_finding(&self, finding: &Finding) -> bool {
        self.suppresses(&finding.check_id, finding.primary_span().start.line)
    }

    /// Returns `true` if the file declares no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}
