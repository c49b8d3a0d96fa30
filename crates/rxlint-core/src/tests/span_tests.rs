//! Tests for [`LineCol`] and [`Span`].

use rstest::rstest;

use crate::{LineCol, Span};

#[rstest]
#[case(LineCol::new(0, 0), "1:1")]
#[case(LineCol::new(4, 17), "5:18")]
fn positions_display_one_based(#[case] pos: LineCol, #[case] expected: &str) {
    assert_eq!(pos.to_string(), expected);
}

#[test]
fn one_based_positions_saturate() {
    assert_eq!(
        LineCol::new(u32::MAX, u32::MAX).one_based(),
        (u32::MAX, u32::MAX)
    );
}

#[test]
fn positions_order_by_line_then_column() {
    assert!(LineCol::new(1, 30) < LineCol::new(2, 0));
    assert!(LineCol::new(2, 3) < LineCol::new(2, 4));
}

#[test]
fn span_length_and_range_follow_byte_offsets() {
    let span = Span::new(10, 42, LineCol::new(2, 0), LineCol::new(4, 0));
    assert_eq!(span.len(), 32);
    assert!(!span.is_empty());
    assert_eq!(span.byte_range(), 10..42);
    assert!(Span::new(7, 7, LineCol::new(0, 7), LineCol::new(0, 7)).is_empty());
}

#[rstest]
#[case::nested(Span::new(12, 20, LineCol::new(0, 12), LineCol::new(0, 20)), true)]
#[case::identical(Span::new(10, 42, LineCol::new(0, 10), LineCol::new(0, 42)), true)]
#[case::overlapping(Span::new(5, 20, LineCol::new(0, 5), LineCol::new(0, 20)), false)]
#[case::disjoint(Span::new(50, 60, LineCol::new(1, 0), LineCol::new(1, 10)), false)]
fn span_containment(#[case] other: Span, #[case] expected: bool) {
    let outer = Span::new(10, 42, LineCol::new(0, 10), LineCol::new(0, 42));
    assert_eq!(outer.contains(&other), expected);
}

#[test]
fn spans_serialise_offsets_and_positions() {
    let span = Span::new(12, 42, LineCol::new(2, 0), LineCol::new(4, 0));
    let json = serde_json::to_value(span).expect("serialise");
    assert_eq!(json["start_byte"], 12);
    assert_eq!(json["end"]["line"], 4);
}
