//! Tests for lowering statements and expressions.

use rstest::{fixture, rstest};

use crate::{Field, LiteralKind, NodeId, NodeKind, SupportedLanguage, SyntaxKind, SyntaxTree};

fn parse_ts(source: &str) -> SyntaxTree {
    crate::parse(source, SupportedLanguage::TypeScript).expect("parse")
}

fn kinds(tree: &SyntaxTree) -> Vec<SyntaxKind> {
    tree.preorder()
        .into_iter()
        .filter_map(|id| tree.syntax_kind(id))
        .collect()
}

fn first_of(tree: &SyntaxTree, kind: SyntaxKind) -> NodeId {
    tree.preorder()
        .into_iter()
        .find(|id| tree.syntax_kind(*id) == Some(kind))
        .unwrap_or_else(|| panic!("no {} node", kind.as_str()))
}

#[fixture]
fn subscribe_call() -> SyntaxTree {
    parse_ts("source$.subscribe();")
}

#[rstest]
fn lowers_argumentless_subscribe(subscribe_call: SyntaxTree) {
    assert_eq!(
        kinds(&subscribe_call),
        vec![
            SyntaxKind::Program,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::CallExpression,
            SyntaxKind::MemberExpression,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
        ]
    );

    let call = first_of(&subscribe_call, SyntaxKind::CallExpression);
    assert_eq!(subscribe_call.arguments(call), Some(&[][..]));

    let member = subscribe_call
        .field(call, Field::Callee)
        .expect("callee");
    let property = subscribe_call
        .field(member, Field::Property)
        .expect("property");
    assert_eq!(subscribe_call.identifier_name(property), Some("subscribe"));
    assert_eq!(subscribe_call.text(member), "source$.subscribe");
}

#[rstest]
fn parents_link_back_to_the_root(subscribe_call: SyntaxTree) {
    let call = first_of(&subscribe_call, SyntaxKind::CallExpression);
    let ancestors: Vec<_> = subscribe_call
        .ancestors(call)
        .filter_map(|id| subscribe_call.syntax_kind(id))
        .collect();

    assert_eq!(
        ancestors,
        vec![SyntaxKind::ExpressionStatement, SyntaxKind::Program]
    );
    assert_eq!(subscribe_call.parent(subscribe_call.root()), None);
}

#[test]
fn preorder_visits_nodes_in_document_order() {
    let tree = parse_ts("const total$ = of(1, 2).pipe(take(1));\nfoo.bar(baz);\n");
    let starts: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| tree.span(id))
        .map(|span| span.start_byte)
        .collect();

    assert_eq!(starts.len(), tree.len());
    assert!(starts.windows(2).all(|pair| pair.first() <= pair.get(1)));
}

#[test]
fn call_arguments_keep_their_order() {
    let tree = parse_ts("of(1, 'two', ...rest);");
    let call = first_of(&tree, SyntaxKind::CallExpression);
    let arguments: Vec<_> = tree
        .arguments(call)
        .expect("arguments")
        .iter()
        .filter_map(|id| tree.kind(*id).cloned())
        .collect();

    assert!(matches!(
        arguments.as_slice(),
        [
            NodeKind::Literal {
                kind: LiteralKind::Number
            },
            NodeKind::Literal {
                kind: LiteralKind::String
            },
            NodeKind::SpreadElement { .. },
        ]
    ));
}

#[test]
fn constructor_parameter_properties_are_flagged() {
    let tree = parse_ts(
        "class Effects {\n  constructor(private readonly actions$: Actions, plain: number) {}\n}\n",
    );
    let flags: Vec<_> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| match tree.kind(id) {
            Some(NodeKind::Parameter { is_property, .. }) => Some(*is_property),
            _ => None,
        })
        .collect();

    assert_eq!(flags, vec![true, false]);
}

#[test]
fn bare_arrow_parameter_becomes_a_parameter_node() {
    let tree = parse_ts("const f = action$ => action$.pipe();");
    let function = first_of(&tree, SyntaxKind::FunctionExpression);
    let Some(NodeKind::FunctionExpression { params, body, .. }) = tree.kind(function) else {
        panic!("expected a function expression");
    };

    assert_eq!(params.len(), 1);
    let param = *params.first().expect("parameter");
    assert_eq!(tree.syntax_kind(param), Some(SyntaxKind::Parameter));
    let name = tree.field(param, Field::Name).expect("name");
    assert_eq!(tree.identifier_name(name), Some("action$"));
    assert_eq!(
        body.and_then(|id| tree.syntax_kind(id)),
        Some(SyntaxKind::CallExpression)
    );
}

const DEEP: usize = 10_000;

#[rstest]
#[case::pipe_chain(format!("source${};", ".pipe()".repeat(DEEP)), "source$", 2 * DEEP + 2)]
#[case::parentheses(format!("{}x{};", "(".repeat(DEEP), ")".repeat(DEEP)), "x", DEEP + 2)]
fn deep_nesting_lowers_in_preorder(
    #[case] source: String,
    #[case] innermost: &str,
    #[case] depth: usize,
) {
    let tree = parse_ts(&source);
    assert!(!tree.has_errors());

    let order = tree.preorder();
    assert_eq!(order.len(), tree.len());
    assert!(order.iter().enumerate().all(|(index, id)| id.index() == index));

    let leaf = order
        .into_iter()
        .find(|id| tree.identifier_name(*id) == Some(innermost))
        .expect("innermost identifier");
    assert_eq!(tree.ancestors(leaf).count(), depth);
}

#[rstest]
#[case("(source$ as Observable<number>).subscribe();", SyntaxKind::TypeAssertion)]
#[case("source$!.subscribe();", SyntaxKind::NonNullExpression)]
#[case("(source$).subscribe();", SyntaxKind::ParenthesizedExpression)]
fn wrapped_receivers_keep_their_wrapper(#[case] source: &str, #[case] wrapper: SyntaxKind) {
    let tree = parse_ts(source);
    let member = first_of(&tree, SyntaxKind::MemberExpression);
    let object = tree.field(member, Field::Object).expect("object");

    let mut current = object;
    while tree.syntax_kind(current) == Some(SyntaxKind::ParenthesizedExpression)
        && wrapper != SyntaxKind::ParenthesizedExpression
    {
        current = tree.field(current, Field::Expression).expect("inner");
    }
    assert_eq!(tree.syntax_kind(current), Some(wrapper));
}

#[test]
fn comments_are_collected_in_order() {
    let tree = parse_ts(
        "// rxlint-disable-next-line no-ignored-subscribe\nsource$.subscribe(); /* trailing */\n",
    );
    let texts: Vec<_> = tree.comments().iter().map(|c| c.text.as_str()).collect();

    assert_eq!(
        texts,
        vec![
            "// rxlint-disable-next-line no-ignored-subscribe",
            "/* trailing */"
        ]
    );
    let first = tree.comments().first().expect("comment");
    assert_eq!(first.span.start.line, 0);
}

#[test]
fn syntax_errors_still_produce_a_tree() {
    let tree = parse_ts("other$.subscribe();\nconst = ;\n");

    assert!(tree.has_errors());
    assert_eq!(tree.syntax_kind(tree.root()), Some(SyntaxKind::Program));
    assert!(
        tree.preorder()
            .into_iter()
            .any(|id| tree.identifier_name(id) == Some("other$"))
    );
}

#[test]
fn tsx_sources_parse() {
    let tree = crate::parse(
        "const view = <List items={items$} />;\nitems$.subscribe();\n",
        SupportedLanguage::Tsx,
    )
    .expect("parse");

    assert!(!tree.has_errors());
    assert!(
        tree.preorder()
            .into_iter()
            .any(|id| tree.syntax_kind(id) == Some(SyntaxKind::ExpressionStatement))
    );
}
