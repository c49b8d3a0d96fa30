//! Tests for inline suppression directives.

use rstest::rstest;
use rxlint_syntax::SupportedLanguage;

use super::{lint, positions};
use crate::{Directive, SuppressionScope, Suppressions};

#[rstest]
#[case::all_next_line("// rxlint-disable-next-line", Some((true, None)))]
#[case::same_line("// rxlint-disable-line no-ignored-observable", Some((false, Some(vec!["no-ignored-observable"]))))]
#[case::block_comment(
    "/* rxlint-disable-next-line no-unsafe-first, no-ignored-subscribe */",
    Some((true, Some(vec!["no-unsafe-first", "no-ignored-subscribe"])))
)]
#[case::justification(
    "// rxlint-disable-line -- the stream is fire-and-forget",
    Some((false, None))
)]
#[case::plain_comment("// just a note", None)]
#[case::similar_prefix("// rxlint-disable-lines", None)]
fn directives_parse(#[case] comment: &str, #[case] shape: Option<(bool, Option<Vec<&str>>)>) {
    let expected = shape.map(|(next_line, ids)| Directive {
        next_line,
        scope: ids.map_or(SuppressionScope::All, |list| {
            SuppressionScope::Checks(list.into_iter().map(str::to_owned).collect())
        }),
    });
    assert_eq!(Directive::parse(comment), expected);
}

#[test]
fn next_line_directive_silences_the_following_line() {
    let source = "\
// rxlint-disable-next-line
of(1);
of(2);
";
    assert_eq!(positions(&lint(source)), ["3:1 no-ignored-observable"]);
}

#[test]
fn same_line_directive_names_checks() {
    let source = "\
declare const action$: Observable<Action>;
action$.pipe(take(1)); // rxlint-disable-line no-unsafe-first
";
    let report = lint(source);
    assert_eq!(positions(&report), ["2:1 no-ignored-observable"]);
    assert_eq!(report.suppressed, 1);
}

#[test]
fn directives_for_other_checks_do_not_apply() {
    let source = "\
// rxlint-disable-next-line no-unsafe-first
of(1);
";
    let report = lint(source);
    assert_eq!(positions(&report), ["2:1 no-ignored-observable"]);
    assert_eq!(report.suppressed, 0);
}

#[test]
fn suppressions_are_keyed_by_zero_based_line() {
    let tree = rxlint_syntax::parse(
        "const a = 1;\n/* rxlint-disable-next-line no-ignored-observable */\nof(1);\n",
        SupportedLanguage::TypeScript,
    )
    .expect("parse");
    let suppressions = Suppressions::from_tree(&tree);
    assert!(!suppressions.is_empty());
    assert!(suppressions.suppresses("no-ignored-observable", 2));
    assert!(!suppressions.suppresses("no-ignored-observable", 1));
    assert!(!suppressions.suppresses("no-unsafe-first", 2));
}
