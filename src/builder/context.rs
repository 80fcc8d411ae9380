//! Per-walk scope threaded through the recursive descent.

use crate::model::{DocumentId, Model, PackageId};

/// Where the walk currently is. Cheap to copy; nested scopes get a new value
/// instead of mutating shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkContext {
    pub document: DocumentId,
    pub package: Option<PackageId>,
}

impl WalkContext {
    pub fn new(document: DocumentId) -> Self {
        Self {
            document,
            package: None,
        }
    }

    pub fn in_package(self, package: PackageId) -> Self {
        Self {
            package: Some(package),
            ..self
        }
    }

    /// Qualified name of `name` declared in this scope: the enclosing
    /// package's qualified name, or the document name at top level.
    pub fn qualify(&self, model: &Model, name: &str) -> String {
        match self.package {
            Some(package) => format!("{}.{}", model[package].qualified_name, name),
            None => model[self.document].qualify(name),
        }
    }
}
