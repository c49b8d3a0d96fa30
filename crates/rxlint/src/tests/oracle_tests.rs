//! Tests for the type oracle over hand-built models.

use rstest::{fixture, rstest};
use rxlint_semantics::{
    DeclarationKind, DeclaredType, Member, StaticModel, TypeData, TypeId,
};
use rxlint_syntax::{MemberKind, NodeId, SupportedLanguage, SyntaxKind, SyntaxTree};

use crate::TypeOracle;

const DEPTH: usize = 32;

struct Bench {
    tree: SyntaxTree,
    node: NodeId,
    model: StaticModel,
}

impl Bench {
    /// Assigns `ty` to the node under test and asks both oracle questions.
    fn ask(&mut self, ty: TypeId) -> (bool, bool) {
        self.model.set_node_type(self.node, ty);
        let oracle = TypeOracle::new(&self.model, DEPTH);
        (
            oracle.could_be_observable(self.node),
            oracle.is_reference_type(self.node),
        )
    }

    fn opaque(&mut self, name: &str) -> TypeId {
        self.model.alloc(TypeData::Opaque {
            name: name.to_owned(),
            arguments: Vec::new(),
        })
    }

    fn alias(&mut self, name: &str, target: TypeId) -> TypeId {
        self.model.alloc(TypeData::Alias {
            name: name.to_owned(),
            type_params: Vec::new(),
            target,
        })
    }

    fn parameter(&mut self, name: &str, constraint: Option<TypeId>) -> TypeId {
        self.model.alloc(TypeData::TypeParameter {
            name: name.to_owned(),
            constraint,
        })
    }

    fn declared(&mut self, name: &str, supertypes: Vec<TypeId>, members: Vec<Member>) -> TypeId {
        self.model.alloc(TypeData::Declared(DeclaredType {
            name: name.to_owned(),
            kind: DeclarationKind::Interface,
            type_params: Vec::new(),
            supertypes,
            members,
        }))
    }
}

fn method(name: &str) -> Member {
    Member {
        name: name.to_owned(),
        kind: MemberKind::Method,
        ty: TypeId::ANY,
    }
}

#[fixture]
fn bench() -> Bench {
    let tree = rxlint_syntax::parse("value;", SupportedLanguage::TypeScript).expect("parse");
    let node = tree
        .preorder()
        .into_iter()
        .find(|id| tree.syntax_kind(*id) == Some(SyntaxKind::Identifier))
        .expect("identifier");
    Bench {
        tree,
        node,
        model: StaticModel::new(),
    }
}

#[rstest]
#[case::number(TypeId::NUMBER)]
#[case::string(TypeId::STRING)]
#[case::boolean(TypeId::BOOLEAN)]
#[case::bigint(TypeId::BIGINT)]
#[case::symbol(TypeId::SYMBOL)]
#[case::void(TypeId::VOID)]
#[case::undefined(TypeId::UNDEFINED)]
#[case::null(TypeId::NULL)]
#[case::any(TypeId::ANY)]
#[case::unknown(TypeId::UNKNOWN)]
#[case::never(TypeId::NEVER)]
fn intrinsic_types_are_neither(mut bench: Bench, #[case] ty: TypeId) {
    assert_eq!(bench.ask(ty), (false, false));
}

#[rstest]
#[case::observable("Observable", true)]
#[case::subject("Subject", true)]
#[case::behavior_subject("BehaviorSubject", true)]
#[case::grouped("GroupedObservable", true)]
#[case::promise("Promise", false)]
#[case::map("Map", false)]
fn named_types_are_classified_by_name(
    mut bench: Bench,
    #[case] name: &str,
    #[case] observable: bool,
) {
    let ty = bench.opaque(name);
    assert_eq!(bench.ask(ty), (observable, true));
}

#[rstest]
fn union_with_an_observable_member_could_be_observable(mut bench: Bench) {
    let observable = bench.opaque("Observable");
    let union = bench
        .model
        .alloc(TypeData::Union(vec![TypeId::NUMBER, observable]));
    assert_eq!(bench.ask(union), (true, false));
}

#[rstest]
fn nullable_object_is_a_reference_type(mut bench: Bench) {
    let observable = bench.opaque("Observable");
    let union = bench.model.alloc(TypeData::Union(vec![
        observable,
        TypeId::UNDEFINED,
        TypeId::NULL,
    ]));
    assert_eq!(bench.ask(union), (true, true));
}

#[rstest]
fn nullish_only_union_is_not_a_reference_type(mut bench: Bench) {
    let union = bench
        .model
        .alloc(TypeData::Union(vec![TypeId::UNDEFINED, TypeId::NULL]));
    assert_eq!(bench.ask(union), (false, false));
}

#[rstest]
fn subscribe_method_makes_a_declaration_observable(mut bench: Bench) {
    let store = bench.declared("Store", Vec::new(), vec![method("subscribe")]);
    assert_eq!(bench.ask(store), (true, true));
}

#[rstest]
fn subscribe_property_is_not_enough(mut bench: Bench) {
    let object = bench.model.alloc(TypeData::Object {
        members: vec![Member {
            name: String::from("subscribe"),
            kind: MemberKind::Property,
            ty: TypeId::ANY,
        }],
    });
    assert_eq!(bench.ask(object), (false, true));
}

#[rstest]
fn supertype_chain_is_followed(mut bench: Bench) {
    let observable = bench.opaque("Observable");
    let base = bench.declared("Base", vec![observable], Vec::new());
    let derived = bench.declared("Derived", vec![base], Vec::new());
    assert_eq!(bench.ask(derived), (true, true));
}

#[rstest]
fn aliases_are_followed(mut bench: Bench) {
    let observable = bench.opaque("Observable");
    let inner = bench.alias("Inner", observable);
    let outer = bench.alias("Outer", inner);
    assert_eq!(bench.ask(outer), (true, true));
}

#[rstest]
fn generic_alias_arguments_are_substituted(mut bench: Bench) {
    // type Maybe<T> = T | undefined; Maybe<Observable>
    let param = bench.parameter("T", None);
    let body = bench
        .model
        .alloc(TypeData::Union(vec![param, TypeId::UNDEFINED]));
    let maybe = bench.model.alloc(TypeData::Alias {
        name: String::from("Maybe"),
        type_params: vec![param],
        target: body,
    });
    let observable = bench.opaque("Observable");
    let instance = bench.model.alloc(TypeData::Reference {
        target: maybe,
        arguments: vec![observable],
    });
    let primitive = bench.model.alloc(TypeData::Reference {
        target: maybe,
        arguments: vec![TypeId::STRING],
    });
    assert_eq!(bench.ask(instance), (true, true));
    assert_eq!(bench.ask(primitive), (false, false));
}

#[rstest]
fn type_parameter_bounds_are_followed(mut bench: Bench) {
    let observable = bench.opaque("Observable");
    let bounded = bench.parameter("S", Some(observable));
    let unbounded = bench.parameter("U", None);
    assert_eq!(bench.ask(bounded), (true, true));
    assert_eq!(bench.ask(unbounded), (false, false));
}

#[rstest]
fn alias_cycles_terminate_as_false(mut bench: Bench) {
    let table = bench.model.table_mut();
    let first = table.reserve();
    let second = table.reserve();
    table
        .define(first, TypeData::Alias {
            name: String::from("A"),
            type_params: Vec::new(),
            target: second,
        })
        .expect("define A");
    table
        .define(second, TypeData::Alias {
            name: String::from("B"),
            type_params: Vec::new(),
            target: first,
        })
        .expect("define B");
    assert_eq!(bench.ask(first), (false, false));
}

#[rstest]
fn deep_chains_are_cut_off(mut bench: Bench) {
    let mut ty = bench.opaque("Observable");
    for index in 0..8 {
        ty = bench.alias(&format!("Layer{index}"), ty);
    }
    bench.model.set_node_type(bench.node, ty);
    assert!(!TypeOracle::new(&bench.model, 4).could_be_observable(bench.node));
    assert!(TypeOracle::new(&bench.model, DEPTH).could_be_observable(bench.node));
}

#[rstest]
fn untyped_nodes_are_neither(bench: Bench) {
    let oracle = TypeOracle::new(&bench.model, DEPTH);
    assert!(!oracle.could_be_observable(bench.node));
    assert!(!oracle.is_reference_type(bench.node));
}

#[rstest]
fn symbol_types_back_up_node_types(mut bench: Bench) {
    let observable = bench.opaque("Subject");
    let symbol = bench.model.add_symbol(observable);
    bench.model.bind_symbol(bench.node, symbol);
    let oracle = TypeOracle::new(&bench.model, DEPTH);
    assert!(oracle.could_be_observable(bench.node));
    assert!(oracle.is_reference_type(bench.node));
}

#[rstest]
fn answers_are_stable_across_queries(mut bench: Bench) {
    let observable = bench.opaque("ReplaySubject");
    bench.model.set_node_type(bench.node, observable);
    let oracle = TypeOracle::new(&bench.model, DEPTH);
    let first = oracle.could_be_observable(bench.node);
    assert_eq!(oracle.could_be_observable(bench.node), first);
    assert!(oracle.type_could_be_observable(observable));
    assert!(bench.tree.span(bench.node).is_some());
}
