//! Documents, packages and includes.

use std::path::PathBuf;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ids::{DocumentId, PackageId, ServiceId, ServiceRefId, TypeId};
use super::info::DeclInfo;
use super::types::Primitive;

/// An `include` directive and, once loaded, the document it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    /// Literal path string as written in the source.
    pub declared_path: String,
    pub resolved_path: Option<PathBuf>,
    /// Shared with every other include of the same file in one load.
    pub document: Option<DocumentId>,
    pub info: DeclInfo,
}

impl Include {
    pub fn new(declared_path: impl Into<String>, info: DeclInfo) -> Self {
        Self {
            declared_path: declared_path.into(),
            resolved_path: None,
            document: None,
            info,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }
}

/// A namespace node. Parent links are ids, never ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: SmolStr,
    pub qualified_name: String,
    pub parent: Option<PackageId>,
    pub document: DocumentId,
    pub subpackages: Vec<PackageId>,
    pub types: Vec<TypeId>,
    pub services: Vec<ServiceId>,
    pub info: DeclInfo,
}

/// Root scope of one parsed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Also the qualified-name prefix of top-level declarations.
    pub name: SmolStr,
    pub path: Option<PathBuf>,
    pub includes: Vec<Include>,
    /// Packages declared at document level.
    pub packages: Vec<PackageId>,
    /// Every package of the document, nested ones included.
    pub all_packages: Vec<PackageId>,
    /// Types declared at document level.
    pub types: Vec<TypeId>,
    /// Services declared at document level.
    pub services: Vec<ServiceId>,
    pub all_services: Vec<ServiceId>,
    pub services_by_name: IndexMap<String, ServiceId>,
    /// Every named type by qualified name, primitives included.
    pub all_types: IndexMap<String, TypeId>,
    /// Type placeholders awaiting resolution, keyed by declared name.
    pub unresolved_types: IndexMap<SmolStr, TypeId>,
    /// `extends` placeholders awaiting resolution, keyed by declared name.
    pub unresolved_services: IndexMap<SmolStr, ServiceRefId>,
}

impl Document {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let all_types = Primitive::ALL
            .iter()
            .map(|primitive| (primitive.name().to_string(), primitive.type_id()))
            .collect();
        Self {
            name: name.into(),
            path: None,
            includes: Vec::new(),
            packages: Vec::new(),
            all_packages: Vec::new(),
            types: Vec::new(),
            services: Vec::new(),
            all_services: Vec::new(),
            services_by_name: IndexMap::new(),
            all_types,
            unresolved_types: IndexMap::new(),
            unresolved_services: IndexMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Qualified name of a declaration at document level.
    pub fn qualify(&self, name: &str) -> String {
        if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.name, name)
        }
    }

    pub fn has_unresolved(&self) -> bool {
        !self.unresolved_types.is_empty() || !self.unresolved_services.is_empty()
    }

    /// Drops every entity from the document. Used on merged-away fragments.
    pub(crate) fn clear(&mut self) {
        *self = Self {
            name: std::mem::take(&mut self.name),
            ..Self::default()
        };
    }
}
