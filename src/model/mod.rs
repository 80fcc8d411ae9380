//! Semantic model of a set of IDL documents.
//!
//! Every entity created during one load lives in a single [`Model`] arena and
//! is addressed by a copyable id. Links between entities (package parents,
//! owning packages, resolved placeholder targets) are ids as well, so the
//! cyclic shape of the graph never turns into cyclic ownership.
//!
//! ```text
//! Model
//!  ├── documents   Document { includes, packages, types, services, registries }
//!  ├── packages    Package  { parent, subpackages, types, services }
//!  ├── types       Type     { kind: Primitive | Struct | ... | Ref(TypeRef) }
//!  ├── services    Service  { functions, extends: ServiceRefId }
//!  └── service_refs
//! ```
//!
//! The first [`TypeId`]s are reserved for the primitive types, so every
//! document of a model shares one instance of each primitive.

mod document;
mod ids;
mod info;
mod render;
mod service;
mod types;
mod validity;

pub use document::{Document, Include, Package};
pub use ids::{DocumentId, PackageId, ServiceId, ServiceRefId, TypeId};
pub use info::DeclInfo;
pub use render::DocumentDisplay;
pub use service::{Function, FunctionMode, Service, ServiceRef};
pub use types::{EnumValue, Field, Primitive, Type, TypeKind, TypeRef};

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashSet;

/// Arena owning every document, package, type and service of one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    documents: Vec<Document>,
    packages: Vec<Package>,
    types: Vec<Type>,
    services: Vec<Service>,
    service_refs: Vec<ServiceRef>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            packages: Vec::new(),
            types: Primitive::ALL.iter().copied().map(Type::primitive).collect(),
            services: Vec::new(),
            service_refs: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Storage
    // ---------------------------------------------------------------------

    pub fn add_document(&mut self, document: Document) -> DocumentId {
        self.documents.push(document);
        DocumentId::from_index(self.documents.len() - 1)
    }

    pub fn add_package(&mut self, package: Package) -> PackageId {
        self.packages.push(package);
        PackageId::from_index(self.packages.len() - 1)
    }

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId::from_index(self.types.len() - 1)
    }

    pub fn add_service(&mut self, service: Service) -> ServiceId {
        self.services.push(service);
        ServiceId::from_index(self.services.len() - 1)
    }

    pub fn add_service_ref(&mut self, service_ref: ServiceRef) -> ServiceRefId {
        self.service_refs.push(service_ref);
        ServiceRefId::from_index(self.service_refs.len() - 1)
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + use<> {
        (0..self.documents.len()).map(DocumentId::from_index)
    }

    pub fn package_ids(&self) -> impl Iterator<Item = PackageId> + use<> {
        (0..self.packages.len()).map(PackageId::from_index)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + use<> {
        (0..self.types.len()).map(TypeId::from_index)
    }

    pub fn service_ids(&self) -> impl Iterator<Item = ServiceId> + use<> {
        (0..self.services.len()).map(ServiceId::from_index)
    }

    pub fn service_ref_ids(&self) -> impl Iterator<Item = ServiceRefId> + use<> {
        (0..self.service_refs.len()).map(ServiceRefId::from_index)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn get_document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id.index())
    }

    pub fn get_type(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    pub fn get_service(&self, id: ServiceId) -> Option<&Service> {
        self.services.get(id.index())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Follows typedef and placeholder chains to the first non-alias type.
    ///
    /// An unresolved link ends the chain at that alias; a cyclic chain stops
    /// at the node that closes the cycle.
    pub fn real_type(&self, id: TypeId) -> TypeId {
        let mut current = id;
        let mut seen = FxHashSet::default();
        while seen.insert(current) {
            match self[current].alias_target() {
                Some(next) if !seen.contains(&next) => current = next,
                _ => break,
            }
        }
        current
    }

    /// Looks up a named type in one document's registry.
    pub fn find_type(&self, document: DocumentId, qualified_name: &str) -> Option<TypeId> {
        self[document].all_types.get(qualified_name).copied()
    }

    /// Looks up a service in one document's registry.
    pub fn find_service(&self, document: DocumentId, qualified_name: &str) -> Option<ServiceId> {
        self[document].services_by_name.get(qualified_name).copied()
    }

    /// The package itself followed by its ancestors, innermost first.
    pub fn package_chain(&self, package: PackageId) -> Vec<PackageId> {
        let mut chain = vec![package];
        let mut current = self[package].parent;
        while let Some(parent) = current {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self[parent].parent;
        }
        chain
    }

    /// Documents reachable from `root` through loaded includes, included
    /// documents before their includers, `root` last.
    pub fn include_graph(&self, root: DocumentId) -> Vec<DocumentId> {
        let mut order = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_includes(root, &mut visited, &mut order);
        order
    }

    fn collect_includes(
        &self,
        document: DocumentId,
        visited: &mut FxHashSet<DocumentId>,
        order: &mut Vec<DocumentId>,
    ) {
        if !visited.insert(document) {
            return;
        }
        for include in &self[document].includes {
            if let Some(included) = include.document {
                self.collect_includes(included, visited, order);
            }
        }
        order.push(document);
    }

    /// Fully qualified name of a type for display; anonymous types render
    /// their shape (`list<int32>`), placeholders their declared name.
    pub fn type_name(&self, id: TypeId) -> String {
        let ty = &self[id];
        let element = |slot: Option<TypeId>| match slot {
            Some(id) => self.type_name(id),
            None => "?".to_string(),
        };
        match &ty.kind {
            TypeKind::List(inner) => format!("list<{}>", element(*inner)),
            TypeKind::Set(inner) => format!("set<{}>", element(*inner)),
            TypeKind::Map { key, value } => {
                format!("map<{},{}>", element(*key), element(*value))
            }
            TypeKind::Ref(type_ref) if ty.qualified_name.is_empty() => {
                type_ref.declared_name.to_string()
            }
            _ => ty.qualified_name.clone(),
        }
    }

    pub(crate) fn documents_mut(&mut self) -> &mut [Document] {
        &mut self.documents
    }

    pub(crate) fn packages_mut(&mut self) -> &mut [Package] {
        &mut self.packages
    }

    pub(crate) fn types_mut(&mut self) -> &mut [Type] {
        &mut self.types
    }

    pub(crate) fn services_mut(&mut self) -> &mut [Service] {
        &mut self.services
    }

    pub(crate) fn service_refs_mut(&mut self) -> &mut [ServiceRef] {
        &mut self.service_refs
    }
}

macro_rules! impl_arena_index {
    ($id:ty => $field:ident: $entity:ty) => {
        impl Index<$id> for Model {
            type Output = $entity;

            fn index(&self, id: $id) -> &$entity {
                &self.$field[id.index()]
            }
        }

        impl IndexMut<$id> for Model {
            fn index_mut(&mut self, id: $id) -> &mut $entity {
                &mut self.$field[id.index()]
            }
        }
    };
}

impl_arena_index!(DocumentId => documents: Document);
impl_arena_index!(PackageId => packages: Package);
impl_arena_index!(TypeId => types: Type);
impl_arena_index!(ServiceId => services: Service);
impl_arena_index!(ServiceRefId => service_refs: ServiceRef);
