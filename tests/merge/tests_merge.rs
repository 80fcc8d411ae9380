//! Fragment merging.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use thrift_model::model::{DeclInfo, Document, Include, Model};
use thrift_model::{MergeSummary, ModelError, merge_documents};

#[test]
fn test_merge_rejects_other_namespace() {
    let mut model = Model::new();
    let a = model.add_document(Document::new("alpha"));
    let b = model.add_document(Document::new("beta"));

    let error = merge_documents(&mut model, a, b).unwrap_err();
    assert!(matches!(
        error,
        ModelError::NamespaceMismatch { ref expected, ref found } if expected == "alpha" && found == "beta"
    ));
}

#[test]
fn test_merge_into_itself_is_a_no_op() {
    let mut model = Model::new();
    let a = model.add_document(Document::new("alpha"));
    assert_eq!(merge_documents(&mut model, a, a).unwrap(), MergeSummary::default());
}

#[test]
fn test_merge_of_empty_fragments() {
    let mut model = Model::new();
    let a = model.add_document(Document::new("alpha"));
    let b = model.add_document(Document::new("alpha"));

    assert_eq!(merge_documents(&mut model, a, b).unwrap(), MergeSummary::default());
    assert!(!model[a].has_unresolved());
}

fn include(declared_path: &str, resolved_path: Option<&str>) -> Include {
    let mut include = Include::new(declared_path, DeclInfo::default());
    include.resolved_path = resolved_path.map(PathBuf::from);
    include
}

#[test]
fn test_merge_reconciles_includes() {
    let mut model = Model::new();
    let common = model.add_document(Document::new("common"));

    let mut destination = Document::new("alpha");
    destination.includes = vec![
        include("common.thrift", Some("/idl/common.thrift")),
        include("a.thrift", None),
    ];
    let mut source = Document::new("alpha");
    let mut loaded = include("./common.thrift", Some("/idl/common.thrift"));
    loaded.document = Some(common);
    source.includes = vec![
        loaded,
        include("a.thrift", Some("/idl/a.thrift")),
        include("b.thrift", None),
    ];
    let destination = model.add_document(destination);
    let source = model.add_document(source);

    merge_documents(&mut model, destination, source).unwrap();
    let includes = &model[destination].includes;

    let declared: Vec<&str> = includes.iter().map(|i| i.declared_path.as_str()).collect();
    assert_eq!(declared, vec!["common.thrift", "a.thrift", "b.thrift"]);
    assert_eq!(includes[0].document, Some(common));
    assert_eq!(includes[0].resolved_path, Some(PathBuf::from("/idl/common.thrift")));
    assert_eq!(includes[1].resolved_path, Some(PathBuf::from("/idl/a.thrift")));
    assert!(!includes[2].is_loaded());
    assert!(model[source].includes.is_empty());
}

#[cfg(feature = "archive")]
mod bundled {
    use pretty_assertions::assert_eq;
    use thrift_model::model::TypeKind;
    use thrift_model::{ArchiveLoader, ArchiveOptions, ModelGenerator, Pipeline, Resolved};

    use crate::helpers::fixtures::zip_bytes;
    use crate::helpers::model_helpers::{field, field_real_type, service, service_id, ty, type_id};

    fn bundle(entries: &[(&str, &str)]) -> Pipeline<Resolved> {
        let generator = ModelGenerator::new();
        ArchiveLoader::new(&generator, ArchiveOptions::default())
            .load_bytes("bundle", &zip_bytes(entries))
            .expect("bundle loads")
            .resolve()
    }

    #[test]
    fn test_forward_reference_across_fragments() {
        let pipeline = bundle(&[
            ("user.thrift", "struct User { 1: Address home }"),
            ("address.thrift", "struct Address { 1: string street }"),
        ]);
        let model = pipeline.model();
        let user = ty(model, pipeline.root(), "bundle.User");

        assert_eq!(
            field_real_type(model, user, "home"),
            type_id(model, pipeline.root(), "bundle.Address")
        );
        assert!(pipeline.is_valid());
    }

    #[test]
    fn test_typedef_completed_by_later_fragment() {
        let pipeline = bundle(&[
            ("alias.thrift", "typedef Later Alias"),
            ("later.thrift", "struct Later {}"),
        ]);
        let model = pipeline.model();
        let alias = type_id(model, pipeline.root(), "bundle.Alias");
        assert_eq!(
            model.real_type(alias),
            type_id(model, pipeline.root(), "bundle.Later")
        );
    }

    #[test]
    fn test_open_typedef_completed_from_later_fragment() {
        let pipeline = bundle(&[
            ("1.thrift", "package p { typedef Foo X }"),
            ("2.thrift", "package q { struct Foo {} }\npackage p { typedef q.Foo X }"),
        ]);
        let model = pipeline.model();
        let root = pipeline.root();
        let x = type_id(model, root, "p.X");

        assert_eq!(model.real_type(x), type_id(model, root, "q.Foo"));
        assert!(model.type_is_valid(x));
        let p = &model[pipeline.root_document().packages[0]];
        assert_eq!(p.types, vec![x]);
    }

    #[test]
    fn test_extends_follows_surviving_service() {
        let pipeline = bundle(&[
            ("a.thrift", "service Base {}"),
            ("b.thrift", "service Base {}\nservice Child extends Base {}"),
        ]);
        let model = pipeline.model();
        let root = pipeline.root();
        let child = service(model, root, "bundle.Child");
        let extends = child.extends.expect("child extends a base");

        assert_eq!(model[extends].resolved, Some(service_id(model, root, "bundle.Base")));
        assert_eq!(pipeline.root_document().services.len(), 2);
        assert!(pipeline.is_valid());
    }

    #[test]
    fn test_first_definition_wins() {
        let pipeline = bundle(&[
            ("one.thrift", "struct Point { 1: i32 x }\nservice Api { void a() }"),
            ("two.thrift", "struct Point { 1: string y }\nservice Api { void b() }"),
        ]);
        let model = pipeline.model();
        let point = ty(model, pipeline.root(), "bundle.Point");
        assert_eq!(point.fields().unwrap().len(), 1);
        assert_eq!(field(point, "x").id, Some(1));

        let api = service(model, pipeline.root(), "bundle.Api");
        assert_eq!(api.functions[0].name, "a");
        assert_eq!(pipeline.root_document().types.len(), 1);
        assert_eq!(pipeline.root_document().services.len(), 1);
    }

    #[test]
    fn test_packages_fold_together() {
        let pipeline = bundle(&[
            ("a.thrift", "package geo { struct A {} package deep { struct X {} } }"),
            ("b.thrift", "package geo { struct B { 1: A a } package deep { struct Y {} } }"),
        ]);
        let model = pipeline.model();
        let document = pipeline.root_document();

        assert_eq!(document.packages.len(), 1);
        let geo = &model[document.packages[0]];
        let names: Vec<&str> = geo.types.iter().map(|&t| model[t].name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(geo.subpackages.len(), 1);
        assert_eq!(model[geo.subpackages[0]].types.len(), 2);

        let b = ty(model, pipeline.root(), "geo.B");
        let a = field(b, "a").ty.unwrap();
        assert_eq!(model.real_type(a), type_id(model, pipeline.root(), "geo.A"));
        assert!(matches!(model[model.real_type(a)].kind, TypeKind::Struct(_)));
        for &package in &document.all_packages {
            assert_eq!(model[package].document, pipeline.root());
        }
    }
}
