//! Domain constants.

/// File extension of IDL documents (without the leading dot).
pub const IDL_EXTENSION: &str = "thrift";

/// Encoding label used when no charset is detected or the detected label is unknown.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Environment variable holding fallback include roots, in platform path-list syntax.
pub const INCLUDE_PATH_ENV: &str = "THRIFT_INCLUDE_PATH";
