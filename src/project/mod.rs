//! Loading documents from the file system.
//!
//! - [`IncludeLoader`] - expands the include graph of a document
//! - [`IncludeConfig`] - fallback include roots
//! - [`ArchiveLoader`] - merges every IDL entry of a ZIP bundle into one
//!   document (feature `archive`)

mod config;
mod include_loader;

#[cfg(feature = "archive")]
mod archive;

pub use config::{ArchiveOptions, EntryFilter, IncludeConfig};
pub use include_loader::IncludeLoader;

#[cfg(feature = "archive")]
pub use archive::ArchiveLoader;
