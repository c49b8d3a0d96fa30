//! Tests for the type arena and the host-built model.

use rstest::rstest;
use rxlint_syntax::{SupportedLanguage, parse};

use crate::{
    PrimitiveType, SemanticModel, SemanticsError, StaticModel, TypeData, TypeId, TypeTable,
};

#[rstest]
#[case(PrimitiveType::Number, TypeId::NUMBER)]
#[case(PrimitiveType::String, TypeId::STRING)]
#[case(PrimitiveType::Undefined, TypeId::UNDEFINED)]
#[case(PrimitiveType::Null, TypeId::NULL)]
fn primitives_are_interned(#[case] kind: PrimitiveType, #[case] expected: TypeId) {
    let table = TypeTable::new();
    assert_eq!(TypeTable::primitive(kind), expected);
    assert_eq!(table.get(expected), Some(&TypeData::Primitive(kind)));
}

#[test]
fn reserved_types_read_as_unknown_until_defined() {
    let mut table = TypeTable::new();
    let id = table.reserve();
    assert_eq!(table.get(id), Some(&TypeData::Unknown));

    table
        .define(id, TypeData::Array(TypeId::NUMBER))
        .expect("define");
    assert_eq!(table.get(id), Some(&TypeData::Array(TypeId::NUMBER)));
}

#[test]
fn defining_a_foreign_id_fails() {
    let mut larger = TypeTable::new();
    let foreign = larger.alloc(TypeData::Never);
    let mut table = TypeTable::new();

    let result = table.define(foreign, TypeData::Any);
    assert!(matches!(result, Err(SemanticsError::UnknownType { .. })));
}

#[test]
fn static_model_answers_what_the_host_recorded() {
    let tree = parse("let total = 1;\ntotal;", SupportedLanguage::TypeScript).expect("parse");
    let usage = super::last_expression(&tree);

    let mut model = StaticModel::new();
    let observable = model.alloc(TypeData::Opaque {
        name: String::from("Observable"),
        arguments: vec![TypeId::NUMBER],
    });
    let symbol = model.add_symbol(observable);
    model.bind_symbol(usage, symbol);

    assert_eq!(model.resolve_type(usage), None);
    assert_eq!(model.symbol_of(usage), Some(symbol));
    assert_eq!(model.resolve_symbol_type(symbol), Some(observable));
    assert_eq!(super::describe(&model, observable), "Observable");
}
