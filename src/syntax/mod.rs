//! Syntax layer consumed by the model builder.
//!
//! - [`TreeNode`] - the tree abstraction the builder walks (kind, indexed
//!   children, first child of a kind, line/column, text)
//! - [`SyntaxTree`] / [`CstNode`] - the rowan-backed implementation over the
//!   reference parser
//! - [`SourceToken`] - token stream items fed to the comment associator
//! - [`decode`] - byte-to-text decoding with charset detection

pub mod decode;
mod tree;

pub use decode::{BomDetector, CharsetDetector, decode_text};
pub use tree::{Channel, CstNode, SourceToken, SyntaxTree, TreeNode};
