//! Behaviour tests for activation diagnostics.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{Diagnostic, DiagnosticCode, DiagnosticReport};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Quoted(String);

impl FromStr for Quoted {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

#[derive(Default)]
struct TestWorld {
    report: DiagnosticReport,
    rendered: Vec<String>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

#[given("check {origin} reported {code} with message {message}")]
fn given_reported(world: &mut TestWorld, origin: Quoted, code: Quoted, message: Quoted) {
    let parsed = DiagnosticCode::from_str(&code.0).expect("known code");
    world
        .report
        .push(Diagnostic::new(parsed, message.0).with_origin(origin.0));
}

#[when("the report is rendered")]
fn when_rendered(world: &mut TestWorld) {
    world.rendered = world
        .report
        .diagnostics()
        .iter()
        .map(ToString::to_string)
        .collect();
}

#[then("line {index} reads {expected}")]
fn then_line_reads(world: &mut TestWorld, index: usize, expected: Quoted) {
    let line = world
        .rendered
        .get(index.saturating_sub(1))
        .expect("rendered line");
    assert_eq!(line, &expected.0);
}

#[scenario(path = "tests/features/rxlint_core.feature")]
fn rxlint_core_behaviour(world: TestWorld) {
    let _ = world;
}
