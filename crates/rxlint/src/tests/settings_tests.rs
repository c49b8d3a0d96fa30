//! Tests for loading session settings.

use std::io::Write;

use rstest::rstest;
use rxlint_core::{DiagnosticCode, DiagnosticReport};
use serde_json::json;

use crate::{CheckSettings, Settings, SettingsError};

#[test]
fn empty_settings_enable_everything() {
    let settings = Settings::from_json("{}").expect("settings");
    assert!(settings.checks.is_empty());
    assert_eq!(settings, Settings::default());
}

#[test]
fn enabled_defaults_to_true() {
    let settings = Settings::from_json(
        r#"{ "checks": { "no-ignored-subscribe": {}, "no-unsafe-first": { "enabled": false } } }"#,
    )
    .expect("settings");
    assert_eq!(
        settings.check("no-ignored-subscribe"),
        Some(&CheckSettings::default())
    );
    assert_eq!(
        settings.check("no-unsafe-first"),
        Some(&CheckSettings::disabled())
    );
    assert_eq!(settings.check("no-ignored-observable"), None);
}

#[test]
fn options_are_kept_verbatim() {
    let settings = Settings::from_json(
        r#"{ "checks": { "no-unsafe-first": { "options": { "observable": "epic\\$$" } } } }"#,
    )
    .expect("settings");
    let expected = Settings::default().with_check(
        "no-unsafe-first",
        CheckSettings::with_options(json!({ "observable": "epic\\$$" })),
    );
    assert_eq!(settings, expected);
}

#[rstest]
#[case::not_json("checks:")]
#[case::unknown_top_level_key(r#"{ "rules": {} }"#)]
#[case::unknown_check_key(r#"{ "checks": { "no-unsafe-first": { "level": "error" } } }"#)]
#[case::wrong_type(r#"{ "checks": { "no-unsafe-first": { "enabled": "yes" } } }"#)]
fn malformed_settings_are_rejected(#[case] text: &str) {
    let error = Settings::from_json(text).expect_err("should be rejected");
    assert!(matches!(error, SettingsError::Parse { .. }));
    let report = DiagnosticReport::from(error);
    let codes: Vec<DiagnosticCode> = report
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.code())
        .collect();
    assert_eq!(codes, [DiagnosticCode::SettingsParse]);
}

#[test]
fn settings_load_from_files() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "checks": { "no-ignored-observable": { "enabled": false } } }"#)
        .expect("write settings");
    let settings = Settings::from_file(file.path()).expect("settings");
    assert_eq!(
        settings.check("no-ignored-observable"),
        Some(&CheckSettings::disabled())
    );
}

#[test]
fn missing_files_report_their_path() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("absent.json");
    let error = Settings::from_file(&path).expect_err("missing file");
    let report = DiagnosticReport::from(error);
    let diagnostic = report.diagnostics().first().expect("diagnostic");
    assert_eq!(diagnostic.code(), DiagnosticCode::SettingsParse);
    assert_eq!(diagnostic.origin(), Some(path.display().to_string().as_str()));
}
