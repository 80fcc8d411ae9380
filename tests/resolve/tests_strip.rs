//! Alias strip pass.

use thrift_model::model::TypeKind;
use thrift_model::{IncludeConfig, ModelGenerator, Primitive};

use crate::helpers::fixtures::write_tree;
use crate::helpers::model_helpers::{field, resolved, service, ty, type_id};

#[test]
fn test_strip_rewrites_uses_to_real_types() {
    let source = r#"
        typedef i64 Id
        typedef Id UserId
        struct User { 1: UserId id, 2: list<UserId> friends, 3: Profile profile }
        struct Profile {}
        service Users { User get(1: UserId id) }
    "#;
    let stripped = resolved("users", source).strip_aliases();
    let model = stripped.model();
    let root = stripped.root();
    let user = ty(model, root, "users.User");

    assert_eq!(field(user, "id").ty, Some(Primitive::Int64.type_id()));
    let friends = field(user, "friends").ty.unwrap();
    assert_eq!(model[friends].kind, TypeKind::List(Some(Primitive::Int64.type_id())));
    assert_eq!(field(user, "profile").ty, Some(type_id(model, root, "users.Profile")));

    let get = &service(model, root, "users.Users").functions[0];
    assert_eq!(get.params[0].ty, Some(Primitive::Int64.type_id()));
    assert_eq!(get.return_type, Some(type_id(model, root, "users.User")));

    let document = stripped.root_document();
    assert!(!document.all_types.contains_key("users.Id"));
    assert!(!document.all_types.contains_key("users.UserId"));
    assert!(document.types.iter().all(|&t| !model[t].is_alias()));
}

#[test]
fn test_strip_reaches_included_documents() {
    let dir = write_tree(&[
        ("types.thrift", "typedef string Name\nstruct Tag { 1: Name name }"),
        ("main.thrift", "include \"types.thrift\"\nstruct Item { 1: types.Name name }"),
    ]);
    let stripped = ModelGenerator::new()
        .load_file(dir.path().join("main.thrift"))
        .unwrap()
        .load_includes(&IncludeConfig::new())
        .resolve()
        .strip_aliases();
    let model = stripped.model();
    let types = stripped.root_document().includes[0].document.unwrap();

    assert!(!model[types].all_types.contains_key("types.Name"));
    let tag = ty(model, types, "types.Tag");
    assert_eq!(field(tag, "name").ty, Some(Primitive::String.type_id()));
    let item = ty(model, stripped.root(), "main.Item");
    assert_eq!(field(item, "name").ty, Some(Primitive::String.type_id()));
}

#[test]
fn test_unresolved_placeholders_survive_strip() {
    let stripped = resolved("doc", "struct A { 1: Missing m }").strip_aliases();
    let model = stripped.model();
    let a = ty(model, stripped.root(), "doc.A");
    let m = field(a, "m").ty.unwrap();

    assert!(model[m].as_ref_placeholder().is_some());
    assert!(stripped.root_document().unresolved_types.contains_key("Missing"));
}
