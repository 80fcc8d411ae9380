//! Validity propagation over generated models.

use rstest::rstest;
use thrift_model::ModelGenerator;
use thrift_model::model::{Primitive, TypeKind};

use crate::helpers::model_helpers::{resolved, service_id, type_id};

#[test]
fn test_typedef_chain_collapses_to_primitive() {
    let pipeline = resolved("nums", "typedef i32 MyInt\ntypedef MyInt MyInt2");
    let model = pipeline.model();
    let my_int2 = type_id(model, pipeline.root(), "nums.MyInt2");
    let real = model.real_type(my_int2);

    assert_eq!(real, Primitive::Int32.type_id());
    assert_eq!(model[real].kind, TypeKind::Primitive(Primitive::Int32));
}

#[test]
fn test_typedef_of_forward_declared_struct() {
    let pipeline = resolved("doc", "typedef Later Alias\nstruct Later {}");
    let model = pipeline.model();
    let alias = type_id(model, pipeline.root(), "doc.Alias");
    assert_eq!(model.real_type(alias), type_id(model, pipeline.root(), "doc.Later"));
    assert!(model.type_is_valid(alias));
}

#[rstest]
#[case::valid("service S { i32 f(1: i32 a) throws (1: E e) }", true)]
#[case::unresolved_param("service S { void f(1: Missing a) }", false)]
#[case::unresolved_return("service S { Missing f() }", false)]
#[case::unresolved_exception("service S { void f() throws (1: Missing e) }", false)]
#[case::unresolved_extends("service S extends Nowhere { void f() }", false)]
#[case::invalid_base("service Base { Missing f() }\nservice S extends Base { void g() }", false)]
#[case::valid_base("service Base { void f() }\nservice S extends Base { void g() }", true)]
#[case::invalid_struct_param("struct Bad { 1: Missing m }\nservice S { void f(1: Bad b) }", false)]
fn test_service_validity(#[case] body: &str, #[case] expected: bool) {
    let source = format!("exception E {{}}\n{body}");
    let pipeline = resolved("svc", &source);
    let model = pipeline.model();
    let s = service_id(model, pipeline.root(), "svc.S");
    assert_eq!(model.service_is_valid(s), expected);
}

#[test]
fn test_document_validity_requires_everything_resolved() {
    assert!(resolved("ok", "struct A { 1: list<B> bs }\nstruct B {}").is_valid());
    assert!(!resolved("bad", "struct A { 1: Missing m }").is_valid());
}

#[test]
fn test_validity_before_global_resolution() {
    let built = ModelGenerator::new()
        .generate("doc", "struct A { 1: other.Thing t }")
        .unwrap();
    let model = built.model();
    let a = type_id(model, built.root(), "doc.A");
    assert!(!model.type_is_valid(a));
    assert!(!model.document_is_valid(built.root()));
}
