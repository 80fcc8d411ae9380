//! Document merger.
//!
//! Folds a fragment into another fragment declaring the same namespace, as
//! done for archive bundles where every entry is parsed on its own. On any
//! clash the destination's entity wins and every id pointing at the losing
//! entity is rewired to the winner.

use std::mem;

use rustc_hash::FxHashMap;

use crate::error::ModelError;
use crate::model::{
    Document, DocumentId, Include, Model, PackageId, ServiceId, ServiceRefId, TypeId, TypeKind,
};
use crate::resolve::resolve_local;

/// Counts of what a merge did, for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// Entities moved over from the source.
    pub adopted: usize,
    /// Source entities folded into an existing destination entity.
    pub merged: usize,
    /// Destination forward declarations completed from the source.
    pub completed: usize,
}

/// Merges `source` into `destination` and empties `source`.
///
/// Fails if the two documents declare different namespaces. After the merge
/// the destination's placeholders are resolved against its enlarged
/// registries.
pub fn merge_documents(
    model: &mut Model,
    destination: DocumentId,
    source: DocumentId,
) -> Result<MergeSummary, ModelError> {
    if model[destination].name != model[source].name {
        return Err(ModelError::NamespaceMismatch {
            expected: model[destination].name.to_string(),
            found: model[source].name.to_string(),
        });
    }
    if destination == source {
        return Ok(MergeSummary::default());
    }

    let mut merger = Merger {
        model,
        destination,
        rewire: Rewire::default(),
        summary: MergeSummary::default(),
    };
    merger.merge_scopes(source);
    merger.merge_registries(source);
    merger.merge_includes(source);
    let Merger { model, rewire, summary, .. } = merger;
    rewire.apply(model, source, destination);
    model[source].clear();
    resolve_local(model, destination);

    tracing::debug!(
        document = %model[destination].name,
        adopted = summary.adopted,
        merged = summary.merged,
        completed = summary.completed,
        "merged fragment"
    );
    Ok(summary)
}

/// Ids of merged-away entities and the entities that replace them.
#[derive(Debug, Default)]
struct Rewire {
    types: FxHashMap<TypeId, TypeId>,
    services: FxHashMap<ServiceId, ServiceId>,
    service_refs: FxHashMap<ServiceRefId, ServiceRefId>,
    packages: FxHashMap<PackageId, PackageId>,
}

impl Rewire {
    fn ty(&self, id: TypeId) -> TypeId {
        self.types.get(&id).copied().unwrap_or(id)
    }

    fn service(&self, id: ServiceId) -> ServiceId {
        self.services.get(&id).copied().unwrap_or(id)
    }

    fn service_ref(&self, id: ServiceRefId) -> ServiceRefId {
        self.service_refs.get(&id).copied().unwrap_or(id)
    }

    fn package(&self, id: PackageId) -> PackageId {
        self.packages.get(&id).copied().unwrap_or(id)
    }

    /// Rewrites every id in the arena and moves the source's entities to
    /// the destination document.
    fn apply(&self, model: &mut Model, source: DocumentId, destination: DocumentId) {
        let document = |id: DocumentId| if id == source { destination } else { id };

        for ty in model.types_mut() {
            ty.map_type_ids(|id| self.ty(id));
            ty.package = ty.package.map(|p| self.package(p));
            ty.document = ty.document.map(document);
            if let TypeKind::Ref(type_ref) = &mut ty.kind {
                type_ref.scope = type_ref.scope.map(|p| self.package(p));
            }
        }
        for service in model.services_mut() {
            service.map_type_ids(|id| self.ty(id));
            service.package = service.package.map(|p| self.package(p));
            service.document = document(service.document);
            service.extends = service.extends.map(|r| self.service_ref(r));
            for function in &mut service.functions {
                function.service = self.service(function.service);
            }
        }
        for service_ref in model.service_refs_mut() {
            service_ref.resolved = service_ref.resolved.map(|s| self.service(s));
            service_ref.scope = service_ref.scope.map(|p| self.package(p));
            service_ref.document = document(service_ref.document);
        }
        for package in model.packages_mut() {
            package.parent = package.parent.map(|p| self.package(p));
            package.document = document(package.document);
            for id in &mut package.types {
                *id = self.ty(*id);
            }
            for id in &mut package.services {
                *id = self.service(*id);
            }
        }
        for doc in model.documents_mut() {
            for include in &mut doc.includes {
                include.document = include.document.map(document);
            }
            for id in doc.all_types.values_mut().chain(doc.unresolved_types.values_mut()) {
                *id = self.ty(*id);
            }
            for id in doc.services_by_name.values_mut() {
                *id = self.service(*id);
            }
            for id in doc.unresolved_services.values_mut() {
                *id = self.service_ref(*id);
            }
        }
    }
}

struct Merger<'m> {
    model: &'m mut Model,
    destination: DocumentId,
    rewire: Rewire,
    summary: MergeSummary,
}

impl Merger<'_> {
    fn merge_scopes(&mut self, source: DocumentId) {
        let dest = self.destination;

        let dest_types = mem::take(&mut self.model[dest].types);
        let src_types = mem::take(&mut self.model[source].types);
        self.model[dest].types = self.merge_types(dest_types, src_types);

        let dest_services = mem::take(&mut self.model[dest].services);
        let src_services = mem::take(&mut self.model[source].services);
        self.model[dest].services = self.merge_services(dest_services, src_services);

        let dest_packages = mem::take(&mut self.model[dest].packages);
        let src_packages = mem::take(&mut self.model[source].packages);
        self.model[dest].packages = self.merge_packages(dest_packages, src_packages);
    }

    /// First-wins by qualified name. A destination alias whose chain does
    /// not end at a real type is completed with the source side's real type
    /// instead.
    fn merge_types(&mut self, mut dest: Vec<TypeId>, src: Vec<TypeId>) -> Vec<TypeId> {
        for incoming in src {
            let name = &self.model[incoming].qualified_name;
            let existing = dest
                .iter()
                .copied()
                .find(|&id| self.model[id].qualified_name == *name);
            let Some(existing) = existing else {
                dest.push(incoming);
                self.summary.adopted += 1;
                continue;
            };
            let real = self.model.real_type(incoming);
            let end = self.model.real_type(existing);
            let open_alias = self.model[existing].is_alias() && self.model[end].is_alias();
            if open_alias && !self.model[real].is_alias() {
                // the incoming chain stays alive for the source's own uses
                match &mut self.model[existing].kind {
                    TypeKind::Typedef { target } => *target = Some(real),
                    TypeKind::Ref(type_ref) => type_ref.resolved = Some(real),
                    _ => {}
                }
                self.summary.completed += 1;
            } else {
                self.rewire.types.insert(incoming, existing);
                self.summary.merged += 1;
            }
        }
        dest
    }

    fn merge_services(&mut self, mut dest: Vec<ServiceId>, src: Vec<ServiceId>) -> Vec<ServiceId> {
        if dest.is_empty() {
            self.summary.adopted += src.len();
            return src;
        }
        for incoming in src {
            let name = &self.model[incoming].qualified_name;
            match dest
                .iter()
                .copied()
                .find(|&id| self.model[id].qualified_name == *name)
            {
                Some(existing) => {
                    self.rewire.services.insert(incoming, existing);
                    self.summary.merged += 1;
                }
                None => {
                    dest.push(incoming);
                    self.summary.adopted += 1;
                }
            }
        }
        dest
    }

    fn merge_packages(&mut self, mut dest: Vec<PackageId>, src: Vec<PackageId>) -> Vec<PackageId> {
        for incoming in src {
            let name = &self.model[incoming].qualified_name;
            match dest
                .iter()
                .copied()
                .find(|&id| self.model[id].qualified_name == *name)
            {
                Some(existing) => self.merge_package(existing, incoming),
                None => {
                    dest.push(incoming);
                    self.summary.adopted += 1;
                }
            }
        }
        dest
    }

    fn merge_package(&mut self, dest: PackageId, src: PackageId) {
        self.rewire.packages.insert(src, dest);
        self.summary.merged += 1;

        let dest_types = mem::take(&mut self.model[dest].types);
        let src_types = mem::take(&mut self.model[src].types);
        self.model[dest].types = self.merge_types(dest_types, src_types);

        let dest_services = mem::take(&mut self.model[dest].services);
        let src_services = mem::take(&mut self.model[src].services);
        self.model[dest].services = self.merge_services(dest_services, src_services);

        let dest_packages = mem::take(&mut self.model[dest].subpackages);
        let src_packages = mem::take(&mut self.model[src].subpackages);
        self.model[dest].subpackages = self.merge_packages(dest_packages, src_packages);
    }

    /// Reconciles the flat registries after the scope trees were merged.
    fn merge_registries(&mut self, source: DocumentId) {
        let dest = self.destination;
        let name = self.model[source].name.clone();
        let src = mem::replace(&mut self.model[source], Document::new(name));

        let rewire = &mut self.rewire;
        let target = &mut self.model[dest];

        target.all_packages.extend(
            src.all_packages
                .iter()
                .copied()
                .filter(|p| !rewire.packages.contains_key(p)),
        );
        target.all_services.extend(
            src.all_services
                .iter()
                .copied()
                .filter(|s| !rewire.services.contains_key(s)),
        );
        for (name, id) in src.services_by_name {
            if !rewire.services.contains_key(&id) {
                target.services_by_name.entry(name).or_insert(id);
            }
        }
        for (name, id) in src.all_types {
            if !rewire.types.contains_key(&id) {
                target.all_types.entry(name).or_insert(id);
            }
        }
        for (name, id) in src.unresolved_types {
            match target.unresolved_types.get(&name) {
                Some(&existing) => {
                    rewire.types.insert(id, existing);
                }
                None => {
                    target.unresolved_types.insert(name, id);
                }
            }
        }
        for (name, id) in src.unresolved_services {
            match target.unresolved_services.get(&name) {
                Some(&existing) => {
                    rewire.service_refs.insert(id, existing);
                }
                None => {
                    target.unresolved_services.insert(name, id);
                }
            }
        }
        // keep the includes for merge_includes
        self.model[source].includes = src.includes;
    }

    /// Matches includes by resolved location, then by declared path; a
    /// match keeps whatever loaded state either side has.
    fn merge_includes(&mut self, source: DocumentId) {
        let incoming = mem::take(&mut self.model[source].includes);
        let includes = &mut self.model[self.destination].includes;
        for include in incoming {
            let position = includes
                .iter()
                .position(|existing| {
                    existing.resolved_path.is_some() && existing.resolved_path == include.resolved_path
                })
                .or_else(|| {
                    includes
                        .iter()
                        .position(|existing| existing.declared_path == include.declared_path)
                });
            match position {
                Some(index) => complete_include(&mut includes[index], include),
                None => includes.push(include),
            }
        }
    }
}

fn complete_include(existing: &mut Include, incoming: Include) {
    if existing.document.is_none() {
        existing.document = incoming.document;
    }
    if existing.resolved_path.is_none() {
        existing.resolved_path = incoming.resolved_path;
    }
}
