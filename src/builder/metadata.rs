//! Metadata markers inside claimed doc comments.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::DeclInfo;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@version\s+([0-9.]+)").expect("version regex must compile"));

static ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[\s*/])@(\w+)[ \t]*([^\r\n]*)").expect("annotation regex must compile")
});

const DEPRECATED_MARKER: &str = "@deprecated";

/// Stores `comment` on `info` and extracts version, deprecation and
/// annotations from it.
pub fn apply_comment(info: &mut DeclInfo, comment: String) {
    if comment.is_empty() {
        return;
    }
    info.version = VERSION_REGEX
        .captures(&comment)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());
    info.deprecated = comment.contains(DEPRECATED_MARKER);
    for captures in ANNOTATION_REGEX.captures_iter(&comment) {
        let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let value = value.as_str().trim();
        let value = value.strip_suffix("*/").unwrap_or(value).trim_end();
        info.annotations
            .insert(key.as_str().to_string(), value.to_string());
    }
    info.comment = comment;
}
