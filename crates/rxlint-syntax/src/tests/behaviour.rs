//! Behaviour-driven tests for parsing and lowering.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{SupportedLanguage, SyntaxTree};

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
    tree: Option<SyntaxTree>,
}

impl TestWorld {
    fn tree(&self) -> &SyntaxTree {
        self.tree.as_ref().expect("source should be parsed")
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

#[given("the TypeScript source {source}")]
fn given_source(world: &mut TestWorld, source: QuotedString) {
    world.source = Some(source.as_str().to_owned());
}

#[when("the source is parsed")]
fn when_parsed(world: &mut TestWorld) {
    let source = world.source.as_deref().expect("source should be set");
    world.tree = Some(crate::parse(source, SupportedLanguage::TypeScript).expect("parse"));
}

#[then("the node kinds in document order are {kinds}")]
fn then_kinds(world: &mut TestWorld, kinds: QuotedString) {
    let tree = world.tree();
    let actual: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| tree.syntax_kind(id))
        .map(|kind| kind.as_str())
        .collect();
    assert_eq!(actual.join(", "), kinds.as_str());
}

#[then("the comment count is {count}")]
fn then_comment_count(world: &mut TestWorld, count: usize) {
    assert_eq!(world.tree().comments().len(), count);
}

#[scenario(path = "tests/features/lowering.feature")]
fn lowering_behaviour(world: TestWorld) {
    let _ = world;
}
