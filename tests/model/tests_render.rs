//! Diagnostic text rendering.

use crate::helpers::model_helpers::resolved;

#[test]
fn test_render_lists_declarations() {
    let source = r#"
include "missing.thrift"

package geo {
  struct Point { 1: double x, 2: double y }
}

enum Kind { A, B = 4 }

service Api extends Base {
  oneway void ping(1: geo.Point p)
}
"#;
    let pipeline = resolved("doc", source);
    let text = pipeline
        .model()
        .display_document(pipeline.root())
        .to_string();

    assert!(text.starts_with("document doc\n"));
    assert!(text.contains("  include \"missing.thrift\" not loaded\n"));
    assert!(text.contains("  package geo\n    struct geo.Point\n      1: double x\n"));
    assert!(text.contains("  enum doc.Kind\n    A = 0\n    B = 4\n"));
    assert!(text.contains("  service doc.Api extends Base (unresolved)\n"));
    assert!(text.contains("    oneway void ping(1: geo.Point p)\n"));
    assert!(text.contains("  unresolved service Base\n"));
}
