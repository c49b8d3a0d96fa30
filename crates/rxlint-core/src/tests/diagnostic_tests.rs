//! Tests for diagnostic types.

use rstest::rstest;

use crate::{Diagnostic, DiagnosticCode, DiagnosticReport};

#[rstest]
#[case::settings_parse(DiagnosticCode::SettingsParse, "E_RXLINT_SETTINGS_PARSE")]
#[case::unknown_check(DiagnosticCode::UnknownCheck, "E_RXLINT_UNKNOWN_CHECK")]
#[case::invalid_option(DiagnosticCode::InvalidOption, "E_RXLINT_INVALID_OPTION")]
#[case::invalid_regex(DiagnosticCode::InvalidRegex, "E_RXLINT_INVALID_REGEX")]
#[case::unsatisfiable(
    DiagnosticCode::UnsatisfiablePattern,
    "E_RXLINT_UNSATISFIABLE_PATTERN"
)]
fn codes_have_stable_spellings(#[case] code: DiagnosticCode, #[case] spelling: &str) {
    assert_eq!(code.to_string(), spelling);
    assert_eq!(spelling.parse(), Ok(code));
}

#[test]
fn unknown_codes_do_not_parse() {
    let error = "E_RXLINT_NOPE".parse::<DiagnosticCode>().expect_err("unknown");
    assert_eq!(error.to_string(), "unknown diagnostic code `E_RXLINT_NOPE`");
}

#[rstest]
#[case::with_origin(
    Diagnostic::new(DiagnosticCode::InvalidRegex, "unclosed group").with_origin("no-unsafe-first"),
    "E_RXLINT_INVALID_REGEX: no-unsafe-first: unclosed group"
)]
#[case::without_origin(
    Diagnostic::new(DiagnosticCode::SettingsParse, "expected value at line 1 column 1"),
    "E_RXLINT_SETTINGS_PARSE: expected value at line 1 column 1"
)]
fn diagnostics_render_code_origin_and_message(
    #[case] diagnostic: Diagnostic,
    #[case] expected: &str,
) {
    assert_eq!(diagnostic.to_string(), expected);
}

#[test]
fn notes_accumulate() {
    let diagnostic = Diagnostic::new(DiagnosticCode::InvalidRegex, "unclosed group")
        .with_note("escape literal parentheses")
        .with_note("patterns use the `regex` crate syntax");
    assert_eq!(diagnostic.notes().len(), 2);
}

#[test]
fn reports_keep_insertion_order() {
    let mut report = DiagnosticReport::single(DiagnosticCode::UnknownCheck, "first", None);
    report.extend(DiagnosticReport::single(
        DiagnosticCode::InvalidOption,
        "second",
        Some("no-unsafe-first"),
    ));
    report.push(Diagnostic::new(DiagnosticCode::InvalidRegex, "third"));

    let codes: Vec<_> = report.diagnostics().iter().map(Diagnostic::code).collect();
    assert_eq!(
        codes,
        [
            DiagnosticCode::UnknownCheck,
            DiagnosticCode::InvalidOption,
            DiagnosticCode::InvalidRegex,
        ]
    );
}

#[test]
fn reports_display_their_first_diagnostic() {
    let report: DiagnosticReport = [
        Diagnostic::new(DiagnosticCode::InvalidRegex, "bad pattern"),
        Diagnostic::new(DiagnosticCode::UnknownCheck, "no such check"),
    ]
    .into_iter()
    .collect();
    let error: &dyn std::error::Error = &report;
    assert_eq!(error.to_string(), "E_RXLINT_INVALID_REGEX: bad pattern");
    assert_eq!(DiagnosticReport::default().to_string(), "no diagnostics");
}

#[test]
fn reports_serialise_as_a_list() {
    let report = DiagnosticReport::single(
        DiagnosticCode::InvalidOption,
        "unknown field `observables`",
        Some("no-unsafe-first"),
    );
    let json = serde_json::to_value(&report).expect("serialise");
    assert_eq!(json[0]["code"], "InvalidOption");
    assert_eq!(json[0]["origin"], "no-unsafe-first");
    assert!(json[0].get("notes").is_none());
}
