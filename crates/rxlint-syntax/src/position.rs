//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based `usize` values. The syntax tree
//! stores them as `u32` spans; error messages prefer one-based line and
//! column numbers.

use rxlint_core::{LineCol, Span};

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

fn point_to_line_col(pos: tree_sitter::Point) -> LineCol {
    LineCol::new(
        u32::try_from(pos.row).unwrap_or(u32::MAX),
        u32::try_from(pos.column).unwrap_or(u32::MAX),
    )
}

/// Builds the zero-based [`Span`] covered by a Tree-sitter node.
#[must_use]
pub(crate) fn span_of(node: tree_sitter::Node<'_>) -> Span {
    Span::new(
        u32::try_from(node.start_byte()).unwrap_or(u32::MAX),
        u32::try_from(node.end_byte()).unwrap_or(u32::MAX),
        point_to_line_col(node.start_position()),
        point_to_line_col(node.end_position()),
    )
}
