//! Rowan-based parser for Thrift IDL
//!
//! This module provides the reference front end using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST is lossless: it preserves all whitespace and comments, so the
//! comment associator can be fed the complete token stream after parsing.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! syntax::CstNode → TreeNode abstraction consumed by the model builder
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod lexer;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, ThriftLanguage};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
