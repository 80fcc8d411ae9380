//! Foundation types shared by every layer:
//! - [`Position`] - 0-based line/column of a declaration
//! - [`LineIndex`] - byte offset to line/column conversion
//! - Domain constants (file extension, default encoding, env var names)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod line_index;
mod position;

pub use line_index::{LineCol, LineIndex};
pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
