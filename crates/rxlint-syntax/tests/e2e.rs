//! End-to-end tests for `rxlint-syntax` using insta for snapshot testing.

use insta::assert_snapshot;
use rstest::rstest;

use rxlint_syntax::{NodeKind, Parser, SupportedLanguage, SyntaxError, SyntaxTree, parse};

fn parse_ts(source: &str) -> SyntaxTree {
    parse(source, SupportedLanguage::TypeScript).unwrap_or_else(|err| panic!("parse: {err}"))
}

fn kind_outline(tree: &SyntaxTree) -> String {
    tree.preorder()
        .into_iter()
        .filter_map(|id| tree.syntax_kind(id))
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn snapshot_pipe_declaration_outline() {
    let tree = parse_ts("const total$ = of(1, 2).pipe(take(1));");
    assert_snapshot!(
        kind_outline(&tree),
        @"Program VariableDeclaration VariableDeclarator Identifier CallExpression MemberExpression CallExpression Identifier Literal Literal Identifier CallExpression Identifier Literal"
    );
}

#[test]
fn snapshot_declared_types() {
    let tree = parse_ts(
        "let a: Observable<number> | null;\nlet b: Subject<string>[];\nlet c: () => Observable<void>;\n",
    );
    let declared: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| match tree.kind(id) {
            Some(NodeKind::VariableDeclarator {
                annotation: Some(annotation),
                ..
            }) => Some(annotation.to_string()),
            _ => None,
        })
        .collect();
    assert_snapshot!(
        declared.join("; "),
        @"Observable<number> | null; Subject<string>[]; () => Observable<void>"
    );
}

#[test]
fn parse_errors_point_at_the_broken_line() {
    let mut parser =
        Parser::new(SupportedLanguage::TypeScript).unwrap_or_else(|err| panic!("parser: {err}"));
    let result = parser
        .parse("const ok = 1;\nconst = ;\n")
        .unwrap_or_else(|err| panic!("parse: {err}"));

    let positions: Vec<_> = result
        .errors()
        .iter()
        .map(|error| error.line)
        .collect();
    assert!(positions.iter().all(|line| *line == 2), "{positions:?}");
    assert!(result.lower().has_errors());
}

#[rstest]
#[case("effects.ts", true)]
#[case("view.tsx", true)]
#[case("legacy.js", false)]
#[case("README", false)]
fn language_detection_matches_extension(#[case] path: &str, #[case] supported: bool) {
    let detected = SupportedLanguage::detect(std::path::Path::new(path));
    assert_eq!(detected.is_ok(), supported);
    if let Err(error) = detected {
        assert!(matches!(
            error,
            SyntaxError::UnsupportedExtension { .. } | SyntaxError::MissingExtension { .. }
        ));
    }
}

#[test]
fn spans_report_zero_based_positions() {
    let tree = parse_ts("\n  source$.subscribe();");
    let statement = tree
        .children(tree.root())
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("statement"));
    let span = tree.span(statement).unwrap_or_else(|| panic!("span"));

    assert_eq!(span.start.line, 1);
    assert_eq!(span.start.column, 2);
    assert_eq!(span.start.one_based(), (2, 3));
    assert_eq!(tree.text(statement), "source$.subscribe();");
}
