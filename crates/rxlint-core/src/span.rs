//! Source locations attached to syntax nodes and findings.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Zero-based line and byte column, as tree-sitter reports them.
///
/// ```
/// use rxlint_core::LineCol;
///
/// assert_eq!(LineCol::new(10, 4).one_based(), (11, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineCol {
    /// Zero-based line.
    pub line: u32,
    /// Zero-based byte offset within the line.
    pub column: u32,
}

impl LineCol {
    /// Builds a position from zero-based coordinates.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position as people count it, saturating at `u32::MAX`.
    #[must_use]
    pub const fn one_based(&self) -> (u32, u32) {
        (self.line.saturating_add(1), self.column.saturating_add(1))
    }
}

/// Renders as one-based `line:column`.
impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.one_based();
        write!(f, "{line}:{column}")
    }
}

/// Half-open byte range plus the line/column of both ends.
///
/// Offsets are `u32`; the parser refuses sources that do not fit.
///
/// ```
/// use rxlint_core::{LineCol, Span};
///
/// let call = Span::new(10, 42, LineCol::new(2, 0), LineCol::new(4, 0));
/// let callee = Span::new(12, 20, LineCol::new(2, 2), LineCol::new(2, 10));
/// assert!(call.contains(&callee));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First byte covered.
    pub start_byte: u32,
    /// First byte past the end.
    pub end_byte: u32,
    /// Position of `start_byte`.
    pub start: LineCol,
    /// Position of `end_byte`.
    pub end: LineCol,
}

impl Span {
    /// Builds a span from its byte offsets and positions.
    #[must_use]
    pub const fn new(start_byte: u32, end_byte: u32, start: LineCol, end: LineCol) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }

    /// Bytes covered.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Whether the span covers nothing, as for a MISSING token.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies within this span, ends included.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start_byte <= other.start_byte && other.end_byte <= self.end_byte
    }

    /// The byte range for slicing the source text.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        let widen = |offset: u32| usize::try_from(offset).unwrap_or(usize::MAX);
        widen(self.start_byte)..widen(self.end_byte)
    }
}
