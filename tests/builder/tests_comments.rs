//! Doc-comment association through the full front end.

use pretty_assertions::assert_eq;
use thrift_model::ModelGenerator;
use thrift_model::model::TypeKind;

use crate::helpers::model_helpers::{field, service, ty};

#[test]
fn test_comment_separated_by_blank_line_attaches() {
    let built = ModelGenerator::new()
        .generate("doc", "// The answer\n\nstruct A {}")
        .unwrap();
    assert_eq!(ty(built.model(), built.root(), "doc.A").info.comment, "// The answer");
}

#[test]
fn test_comment_directly_above_does_not_attach() {
    let built = ModelGenerator::new()
        .generate("doc", "// The answer\nstruct A {}")
        .unwrap();
    assert_eq!(ty(built.model(), built.root(), "doc.A").info.comment, "");
}

#[test]
fn test_comment_is_consumed_once() {
    let source = "/** Shared */\n\nstruct A {\n\n  1: i32 x\n}";
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let a = ty(built.model(), built.root(), "doc.A");
    assert_eq!(a.info.comment, "/** Shared */");
    assert_eq!(field(a, "x").info.comment, "");
}

#[test]
fn test_metadata_from_comments() {
    let source = r#"/**
 * Legacy point.
 * @Version 2.1
 * @deprecated use Point3
 * @owner geometry
 */

struct Point {}
"#;
    let built = ModelGenerator::new().generate("doc", source).unwrap();
    let info = &ty(built.model(), built.root(), "doc.Point").info;
    assert_eq!(info.version.as_deref(), Some("2.1"));
    assert!(info.deprecated);
    assert_eq!(info.annotations.get("owner").map(String::as_str), Some("geometry"));
    assert_eq!(
        info.annotations.get("deprecated").map(String::as_str),
        Some("use Point3")
    );
}

#[test]
fn test_members_claim_their_own_comments() {
    let source = r#"
// Colors

enum Color {
  // first

  RED,
  GREEN
}

service Paint {
  // fills

  void fill(1: Color c)
}
"#;
    let built = ModelGenerator::new().generate("art", source).unwrap();
    let model = built.model();
    let color = ty(model, built.root(), "art.Color");
    assert_eq!(color.info.comment, "// Colors");
    let TypeKind::Enum(values) = &color.kind else {
        panic!("expected an enum");
    };
    assert_eq!(values[0].info.comment, "// first");
    assert_eq!(values[1].info.comment, "");

    let paint = service(model, built.root(), "art.Paint");
    assert_eq!(paint.info.comment, "");
    assert_eq!(paint.functions[0].info.comment, "// fills");
}
