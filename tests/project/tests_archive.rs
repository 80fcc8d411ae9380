//! Archive bundles.

use thrift_model::{ArchiveLoader, ArchiveOptions, EntryFilter, ModelError, ModelGenerator};

use crate::helpers::fixtures::{write_tree, zip_bytes};

#[test]
fn test_default_filter_takes_thrift_entries() {
    let bytes = zip_bytes(&[
        ("idl/a.thrift", "struct A {}"),
        ("idl/B.THRIFT", "struct B {}"),
        ("README.md", "struct NotIdl {}"),
    ]);
    let generator = ModelGenerator::new();
    let linked = ArchiveLoader::new(&generator, ArchiveOptions::default())
        .load_bytes("bundle", &bytes)
        .unwrap();
    let document = linked.root_document();

    assert_eq!(document.name, "bundle");
    assert!(document.all_types.contains_key("bundle.A"));
    assert!(document.all_types.contains_key("bundle.B"));
    assert!(!document.all_types.contains_key("bundle.NotIdl"));
}

#[test]
fn test_pattern_filter() {
    let bytes = zip_bytes(&[
        ("idl/a.idl", "struct A {}"),
        ("other/b.idl", "struct B {}"),
        ("idl/c.thrift", "struct C {}"),
    ]);
    let options =
        ArchiveOptions::default().with_filter(EntryFilter::pattern(r"^idl/.*\.idl$").unwrap());
    let generator = ModelGenerator::new();
    let linked = ArchiveLoader::new(&generator, options)
        .load_bytes("bundle", &bytes)
        .unwrap();
    let names: Vec<&String> = linked.root_document().all_types.keys().filter(|k| k.starts_with("bundle.")).collect();

    assert_eq!(names, vec!["bundle.A"]);
}

#[test]
fn test_entry_syntax_error_names_the_entry() {
    let bytes = zip_bytes(&[("good.thrift", "struct A {}"), ("bad.thrift", "struct {")]);
    let generator = ModelGenerator::new();
    let error = ArchiveLoader::new(&generator, ArchiveOptions::default())
        .load_bytes("bundle", &bytes)
        .unwrap_err();

    assert!(matches!(error, ModelError::Syntax { ref document, .. } if document == "bad.thrift"));
}

#[test]
fn test_archive_without_entries_yields_empty_document() {
    let generator = ModelGenerator::new();
    let linked = ArchiveLoader::new(&generator, ArchiveOptions::default())
        .load_bytes("empty", &zip_bytes(&[("notes.txt", "hello")]))
        .unwrap();

    assert_eq!(linked.root_document().name, "empty");
    assert!(linked.root_document().types.is_empty());
}

#[test]
fn test_archive_includes_are_not_followed() {
    let bytes = zip_bytes(&[("a.thrift", "include \"b.thrift\"\nstruct A {}")]);
    let generator = ModelGenerator::new();
    let linked = ArchiveLoader::new(&generator, ArchiveOptions::default())
        .load_bytes("bundle", &bytes)
        .unwrap();
    assert!(linked.root_document().includes.is_empty());
    assert_eq!(linked.model().document_count(), 1);
}

#[test]
fn test_load_archive_from_disk_uses_file_name() {
    let dir = write_tree(&[]);
    let path = dir.path().join("services.v2.zip");
    std::fs::write(&path, zip_bytes(&[("x.thrift", "service X {}")])).unwrap();

    let resolved = ModelGenerator::new()
        .load_archive(&path, ArchiveOptions::default())
        .unwrap()
        .resolve();
    assert_eq!(resolved.root_document().name, "services");
    assert!(resolved.root_document().services_by_name.contains_key("services.X"));
}

#[test]
fn test_invalid_container_is_an_archive_error() {
    let generator = ModelGenerator::new();
    let error = ArchiveLoader::new(&generator, ArchiveOptions::default())
        .load_bytes("bundle", b"not a zip")
        .unwrap_err();
    assert!(matches!(error, ModelError::Archive(_)));
}
