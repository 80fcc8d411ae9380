//! Include loading from the file system.

use std::path::Path;

use pretty_assertions::assert_eq;
use thrift_model::{IncludeConfig, IncludeError, Linked, ModelGenerator, Pipeline};

use crate::helpers::fixtures::{write_file, write_tree};
use crate::helpers::model_helpers::ty;

fn link(main: &Path, config: &IncludeConfig) -> Pipeline<Linked> {
    ModelGenerator::new()
        .load_file(main)
        .expect("main parses")
        .load_includes(config)
}

#[test]
fn test_nearest_directory_beats_fallback_root() {
    let dir = write_tree(&[
        ("project/shared.thrift", "struct Near {}"),
        ("project/src/api/main.thrift", "include \"shared.thrift\""),
        ("lib/shared.thrift", "struct Far {}"),
    ]);
    let config = IncludeConfig::new().with_include_path(dir.path().join("lib"));
    let linked = link(&dir.path().join("project/src/api/main.thrift"), &config);
    let model = linked.model();
    let include = &linked.root_document().includes[0];

    let shared = include.document.expect("include loaded");
    assert!(model[shared].all_types.contains_key("shared.Near"));
    assert!(!model[shared].all_types.contains_key("shared.Far"));
    assert_eq!(
        include.resolved_path.as_deref(),
        Some(
            dir.path()
                .join("project/shared.thrift")
                .canonicalize()
                .unwrap()
                .as_path()
        )
    );
    assert!(linked.include_failures().is_empty());
}

#[test]
fn test_fallback_roots_in_order() {
    let dir = write_tree(&[
        ("app/main.thrift", "include \"dep.thrift\""),
        ("first/dep.thrift", "struct First {}"),
        ("second/dep.thrift", "struct Second {}"),
    ]);
    let config = IncludeConfig::new()
        .with_include_path(dir.path().join("missing"))
        .with_include_path(dir.path().join("first"))
        .with_include_path(dir.path().join("second"));
    let linked = link(&dir.path().join("app/main.thrift"), &config);

    let dep = linked.root_document().includes[0].document.unwrap();
    ty(linked.model(), dep, "dep.First");
}

#[test]
fn test_shared_include_is_loaded_once() {
    let dir = write_tree(&[
        ("main.thrift", "include \"a.thrift\"\ninclude \"b.thrift\""),
        ("a.thrift", "include \"common.thrift\""),
        ("b.thrift", "include \"./common.thrift\""),
        ("common.thrift", "struct Shared {}"),
    ]);
    let linked = link(&dir.path().join("main.thrift"), &IncludeConfig::new());
    let model = linked.model();
    let root = linked.root_document();
    let a = root.includes[0].document.unwrap();
    let b = root.includes[1].document.unwrap();

    assert_eq!(model[a].includes[0].document, model[b].includes[0].document);
    assert_eq!(model.document_count(), 4);
}

#[test]
fn test_include_cycle_terminates() {
    let dir = write_tree(&[
        ("a.thrift", "include \"b.thrift\"\nstruct A { 1: b.B b }"),
        ("b.thrift", "include \"a.thrift\"\nstruct B { 1: a.A a }"),
    ]);
    let resolved = link(&dir.path().join("a.thrift"), &IncludeConfig::new()).resolve();
    let model = resolved.model();
    let b = resolved.root_document().includes[0].document.unwrap();

    assert_eq!(model[b].includes[0].document, Some(resolved.root()));
    assert_eq!(model.document_count(), 2);
    assert!(resolved.is_valid());
}

#[test]
fn test_failed_includes_are_recorded() {
    let dir = write_tree(&[
        (
            "main.thrift",
            "include \"gone.thrift\"\ninclude \"broken.thrift\"\ninclude \"fine.thrift\"",
        ),
        ("broken.thrift", "struct {"),
        ("fine.thrift", "struct Fine {}"),
    ]);
    let linked = link(&dir.path().join("main.thrift"), &IncludeConfig::new());
    let failures = linked.include_failures();

    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].declared_path, "gone.thrift");
    assert!(matches!(failures[0].error, IncludeError::NotFound { .. }));
    assert_eq!(failures[1].declared_path, "broken.thrift");
    assert!(matches!(failures[1].error, IncludeError::Syntax { .. }));
    assert!(failures.iter().all(|f| f.document == linked.root()));

    let includes = &linked.root_document().includes;
    assert!(!includes[0].is_loaded());
    assert!(!includes[1].is_loaded());
    assert!(includes[2].is_loaded());
}

#[test]
fn test_unlinked_documents_keep_includes_pending() {
    let dir = write_tree(&[("main.thrift", "include \"dep.thrift\"")]);
    write_file(dir.path(), "dep.thrift", "struct Dep {}");
    let linked = ModelGenerator::new()
        .load_file(dir.path().join("main.thrift"))
        .unwrap()
        .skip_includes();

    assert!(!linked.root_document().includes[0].is_loaded());
    assert_eq!(linked.model().document_count(), 1);
}

#[test]
fn test_missing_root_is_an_io_error() {
    let dir = write_tree(&[]);
    let error = ModelGenerator::new()
        .load_file(dir.path().join("absent.thrift"))
        .unwrap_err();
    assert!(matches!(error, thrift_model::ModelError::Io { .. }));
}
