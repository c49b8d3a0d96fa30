//! Unit and behaviour tests for the check host.

mod behaviour;
mod oracle_tests;
mod settings_tests;
mod suppression_tests;

use std::sync::Arc;

use rxlint_core::AnalysisLimits;
use rxlint_semantics::Prelude;
use rxlint_syntax::SupportedLanguage;

use crate::{CheckRegistry, FileReport, Linter, Settings};

/// Activates every built-in check with `settings`.
pub(crate) fn linter(settings: &Settings) -> Linter {
    let activation = Linter::activate(
        &CheckRegistry::builtin(),
        settings,
        AnalysisLimits::default(),
        Arc::new(Prelude::rxjs().expect("prelude")),
    );
    assert!(
        activation.errors.is_empty(),
        "unexpected activation errors: {:?}",
        activation.errors
    );
    activation.linter
}

/// Checks `source` as TypeScript with `settings`.
pub(crate) fn lint_with(settings: &Settings, source: &str) -> FileReport {
    linter(settings)
        .check_source("test.ts", SupportedLanguage::TypeScript, source)
        .expect("check source")
}

/// Checks `source` as TypeScript with default settings.
pub(crate) fn lint(source: &str) -> FileReport {
    lint_with(&Settings::default(), source)
}

/// Renders findings as `line:column check-id` with one-based positions,
/// pointing at the primary span.
pub(crate) fn positions(report: &FileReport) -> Vec<String> {
    report
        .findings
        .iter()
        .map(|finding| {
            let (line, column) = finding.primary_span().start.one_based();
            format!("{line}:{column} {}", finding.check_id)
        })
        .collect()
}
