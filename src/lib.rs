//! # thrift-model
//!
//! Semantic model builder for Thrift IDL documents: turns parsed
//! declarations into a linked graph where every name reference points at its
//! defining entity, wherever in the include graph it lives.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → ModelGenerator + typestate stages (Built → Linked → Resolved → Stripped)
//!   ↓
//! project   → Include loader, include paths, archive bundles
//!   ↓
//! merge     → Document merger for fragments of one namespace
//!   ↓
//! resolve   → Local and global resolvers, alias strip pass
//!   ↓
//! builder   → Tree walk, comment association, comment metadata
//!   ↓
//! model     → Arena of documents, packages, types and services
//!   ↓
//! syntax    → TreeNode abstraction, byte-to-text decoding
//!   ↓
//! parser    → Logos lexer, recursive-descent parser (rowan CST)
//!   ↓
//! base      → Positions, LineIndex, constants
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use thrift_model::{IncludeConfig, ModelGenerator};
//!
//! # fn main() -> Result<(), thrift_model::ModelError> {
//! let resolved = ModelGenerator::new()
//!     .load_file("idl/service.thrift")?
//!     .load_includes(&IncludeConfig::from_env())
//!     .resolve();
//! println!("{}", resolved.model().display_document(resolved.root()));
//! # Ok(())
//! # }
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → model → builder → ...)
// ============================================================================

/// Foundation types: Position, LineIndex, constants
pub mod base;

/// Parser: Logos lexer, recursive-descent parser producing a rowan CST
pub mod parser;

/// Syntax: TreeNode abstraction over the CST, decoding
pub mod syntax;

/// Semantic model: arena, entities, validity, rendering
pub mod model;

/// Model builder: tree walk and comment association
pub mod builder;

/// Reference resolution passes
pub mod resolve;

/// Document merger
pub mod merge;

/// Include and archive loading
pub mod project;

/// Generation pipeline
pub mod pipeline;

mod error;

pub use error::{IncludeError, IncludeFailure, ModelError, Result};
pub use merge::{MergeSummary, merge_documents};
pub use model::{DocumentId, Model, Primitive, TypeId};
pub use pipeline::{Built, Linked, ModelGenerator, Pipeline, Resolved, Stripped};
pub use project::{ArchiveOptions, EntryFilter, IncludeConfig};

#[cfg(feature = "archive")]
pub use project::ArchiveLoader;
