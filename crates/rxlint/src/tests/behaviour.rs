//! Behaviour-driven tests for the built-in checks.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;

use super::{lint_with, positions};
use crate::{CheckSettings, FileReport, Settings};

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').replace("\\n", "\n")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct TestWorld {
    source: Option<String>,
    settings: Settings,
    report: Option<FileReport>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

#[given("the TypeScript source {source}")]
fn given_source(world: &mut TestWorld, source: QuotedString) {
    world.source = Some(source.as_str().to_owned());
}

#[given("the no-unsafe-first observable pattern {pattern}")]
fn given_observable_pattern(world: &mut TestWorld, pattern: QuotedString) {
    let configured = std::mem::take(&mut world.settings).with_check(
        "no-unsafe-first",
        CheckSettings::with_options(json!({ "observable": pattern.as_str() })),
    );
    world.settings = configured;
}

#[given("the check {id} is disabled")]
fn given_disabled(world: &mut TestWorld, id: String) {
    let configured = std::mem::take(&mut world.settings).with_check(id, CheckSettings::disabled());
    world.settings = configured;
}

#[when("the source is checked")]
fn when_checked(world: &mut TestWorld) {
    let source = world.source.as_deref().expect("source should be set");
    world.report = Some(lint_with(&world.settings, source));
}

#[then("the findings are {expected}")]
fn then_findings(world: &mut TestWorld, expected: QuotedString) {
    let report = world.report.as_ref().expect("source should be checked");
    let wanted: Vec<&str> = expected.as_str().split(", ").collect();
    assert_eq!(positions(report), wanted);
}

#[then("there are no findings")]
fn then_no_findings(world: &mut TestWorld) {
    let report = world.report.as_ref().expect("source should be checked");
    assert!(report.findings.is_empty(), "unexpected findings: {:?}", report.findings);
}

#[scenario(path = "tests/features/checks.feature")]
fn check_behaviour(world: TestWorld) {
    let _ = world;
}
