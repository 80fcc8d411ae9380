//! Tree walk: qualified names, enums, fields, functions.

use pretty_assertions::assert_eq;
use rstest::rstest;
use thrift_model::ModelGenerator;
use thrift_model::model::{FunctionMode, Primitive, TypeKind};

use crate::helpers::model_helpers::{field, service, ty, type_id};

#[test]
fn test_enum_auto_increment() {
    let built = ModelGenerator::new()
        .generate("colors", "enum E { A, B = 5, C, D = 2, E }")
        .unwrap();
    let model = built.model();
    let TypeKind::Enum(values) = &ty(model, built.root(), "colors.E").kind else {
        panic!("expected an enum");
    };
    let values: Vec<(&str, i32)> = values.iter().map(|v| (v.name.as_str(), v.value)).collect();
    assert_eq!(values, vec![("A", 0), ("B", 5), ("C", 6), ("D", 2), ("E", 3)]);
}

#[test]
fn test_hex_enum_values_seed_counter() {
    let built = ModelGenerator::new()
        .generate("flags", "enum F { X = 0x10, Y }")
        .unwrap();
    let TypeKind::Enum(values) = &ty(built.model(), built.root(), "flags.F").kind else {
        panic!("expected an enum");
    };
    assert_eq!(values[0].value, 16);
    assert_eq!(values[1].value, 17);
}

#[test]
fn test_qualified_names_follow_packages() {
    let source = r#"
        struct Top {}
        package outer {
            struct Mid {}
            package inner {
                service Svc {}
            }
        }
    "#;
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let model = built.model();
    let document = built.root_document();

    assert!(document.all_types.contains_key("doc.Top"));
    assert!(document.all_types.contains_key("outer.Mid"));
    assert!(document.services_by_name.contains_key("outer.inner.Svc"));

    let names: Vec<&str> = document
        .all_packages
        .iter()
        .map(|&p| model[p].qualified_name.as_str())
        .collect();
    assert_eq!(names, vec!["outer", "outer.inner"]);
    assert_eq!(document.packages.len(), 1);

    let inner = document.all_packages[1];
    assert_eq!(model[inner].parent, Some(document.all_packages[0]));
    assert_eq!(model[document.all_packages[0]].subpackages, vec![inner]);
}

#[test]
fn test_field_ids_and_types() {
    let source = r#"
        struct Point {
            1: i32 x,
            0x2: optional double y;
            string label
        }
    "#;
    let built = ModelGenerator::new().generate("shapes", source).unwrap();
    let point = ty(built.model(), built.root(), "shapes.Point");

    assert_eq!(field(point, "x").id, Some(1));
    assert_eq!(field(point, "x").ty, Some(Primitive::Int32.type_id()));
    assert_eq!(field(point, "y").id, Some(2));
    assert_eq!(field(point, "y").ty, Some(Primitive::Double.type_id()));
    assert_eq!(field(point, "label").id, None);
}

#[test]
fn test_positions_are_zero_based() {
    let built = ModelGenerator::new()
        .generate("doc", "\n  struct A {\n    1: i32 x\n  }")
        .unwrap();
    let a = ty(built.model(), built.root(), "doc.A");
    assert_eq!((a.info.line(), a.info.column()), (1, 2));
    assert_eq!(field(a, "x").info.line(), 2);
}

#[test]
fn test_collections_are_anonymous() {
    let source = "struct Bag { 1: map<string, list<i64>> items }";
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let model = built.model();
    let bag = ty(model, built.root(), "doc.Bag");
    let map = field(bag, "items").ty.unwrap();

    assert_eq!(model[map].qualified_name, "");
    assert_eq!(model.type_name(map), "map<string,list<int64>>");
    assert!(!built.root_document().all_types.values().any(|&t| t == map));
}

#[test]
fn test_self_reference_resolves_during_walk() {
    let source = "struct Node { 1: list<Node> children }";
    let built = ModelGenerator::new().generate("tree", source).unwrap();
    let model = built.model();
    let node = type_id(model, built.root(), "tree.Node");
    let list = field(&model[node], "children").ty.unwrap();

    assert_eq!(model[list].kind, TypeKind::List(Some(node)));
    assert!(built.root_document().unresolved_types.is_empty());
}

#[test]
fn test_forward_reference_is_resolved_locally() {
    let source = r#"
        struct User { 1: Address home }
        struct Address { 1: string street }
    "#;
    let built = ModelGenerator::new().generate("people", source).unwrap();
    let model = built.model();
    let user = ty(model, built.root(), "people.User");
    let home = field(user, "home").ty.unwrap();

    assert!(model[home].as_ref_placeholder().is_some());
    assert_eq!(model.real_type(home), type_id(model, built.root(), "people.Address"));
    assert_eq!(model[home].qualified_name, "people.Address");
    assert!(built.root_document().unresolved_types.is_empty());
}

#[test]
fn test_same_unknown_name_shares_one_placeholder() {
    let source = r#"
        struct A { 1: Missing m }
        struct B { 1: Missing m }
    "#;
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let model = built.model();
    let a = field(ty(model, built.root(), "doc.A"), "m").ty;
    let b = field(ty(model, built.root(), "doc.B"), "m").ty;

    assert_eq!(a, b);
    assert_eq!(built.root_document().unresolved_types.len(), 1);
}

#[rstest]
#[case("oneway void f()", FunctionMode::Oneway)]
#[case("async void f()", FunctionMode::Async)]
#[case("event void f()", FunctionMode::Event)]
#[case("deferred i32 f()", FunctionMode::Deferred)]
#[case("property get set i32 f()", FunctionMode::PropertyGetSet)]
#[case("property get set changed i32 f()", FunctionMode::PropertyGetSetChanged)]
#[case("property get changed i32 f()", FunctionMode::PropertyGetChanged)]
#[case("property set set<i32> f()", FunctionMode::None)]
#[case("i32 f()", FunctionMode::None)]
fn test_function_modes(#[case] declaration: &str, #[case] expected: FunctionMode) {
    let source = format!("service S {{ {declaration} }}");
    let built = ModelGenerator::new().generate("doc", &source).unwrap();
    let svc = service(built.model(), built.root(), "doc.S");
    assert_eq!(svc.functions[0].mode, expected);
}

#[test]
fn test_function_signature() {
    let source = r#"
        exception Oops { 1: string why }
        service Calc {
            double divide(1: double a, 2: double b) throws (1: Oops oops)
            void reset()
        }
    "#;
    let built = ModelGenerator::new().generate("calc", source).unwrap();
    let model = built.model();
    let calc_id = thrift_model::model::ServiceId::from_index(0);
    let calc = &model[calc_id];
    let divide = &calc.functions[0];

    assert_eq!(divide.name, "divide");
    assert_eq!(divide.return_type, Some(Primitive::Double.type_id()));
    let params: Vec<(&str, Option<i32>)> = divide
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.id))
        .collect();
    assert_eq!(params, vec![("a", Some(1)), ("b", Some(2))]);
    assert_eq!(
        divide.exceptions[0].ty,
        Some(type_id(model, built.root(), "calc.Oops"))
    );
    assert_eq!(divide.service, calc_id);
    assert_eq!(calc.functions[1].return_type, Some(Primitive::Void.type_id()));
    assert!(calc.functions[1].params.is_empty());
}

#[test]
fn test_unsigned_and_service_pointer_types() {
    let source = "struct Handle { 1: u16 port, 2: service* target, 3: byte b }";
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let handle = ty(built.model(), built.root(), "doc.Handle");
    assert_eq!(field(handle, "port").ty, Some(Primitive::UInt16.type_id()));
    assert_eq!(field(handle, "target").ty, Some(Primitive::ServicePtr.type_id()));
    assert_eq!(field(handle, "b").ty, Some(Primitive::Int8.type_id()));
}

#[test]
fn test_union_and_includes_recorded() {
    let source = r#"
        include "base/common.thrift"
        cpp_include "<vector>"
        namespace cpp example
        union Choice { 1: i32 number, 2: string text }
    "#;
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let document = built.root_document();
    let declared: Vec<&str> = document
        .includes
        .iter()
        .map(|i| i.declared_path.as_str())
        .collect();
    assert_eq!(declared, vec!["base/common.thrift"]);
    assert!(!document.includes[0].is_loaded());
    assert!(matches!(
        ty(built.model(), built.root(), "doc.Choice").kind,
        TypeKind::Union(ref fields) if fields.len() == 2
    ));
}
