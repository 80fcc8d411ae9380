//! Alias strip pass.
//!
//! Irreversible: typedefs and resolved placeholders disappear from every
//! registry of the include graph, and every use is rewritten to the real
//! type. Unresolved placeholders stay where they are.

use rustc_hash::FxHashSet;

use crate::model::{DocumentId, Model, TypeId};

/// Rewrites uses to real types and drops alias entries. Returns the number
/// of registry entries removed.
pub fn strip_aliases(model: &mut Model, root: DocumentId) -> usize {
    let graph: FxHashSet<DocumentId> = model.include_graph(root).into_iter().collect();
    let real: Vec<TypeId> = model.type_ids().map(|id| model.real_type(id)).collect();
    let is_alias: Vec<bool> = model.type_ids().map(|id| model[id].is_alias()).collect();
    let in_graph = |document: Option<DocumentId>| document.is_some_and(|d| graph.contains(&d));

    for ty in model.types_mut() {
        if in_graph(ty.document) {
            ty.map_type_ids(|id| real[id.index()]);
        }
    }
    for service in model.services_mut() {
        if in_graph(Some(service.document)) {
            service.map_type_ids(|id| real[id.index()]);
        }
    }

    let keep = |id: &TypeId| !is_alias[id.index()];
    let mut removed = 0;
    for &document in &graph {
        let doc = &mut model[document];
        let before = doc.all_types.len();
        doc.all_types.retain(|_, id| keep(id));
        removed += before - doc.all_types.len();
        doc.types.retain(keep);
        let packages = doc.all_packages.clone();
        for package in packages {
            model[package].types.retain(keep);
        }
    }
    tracing::debug!(removed, "stripped aliases");
    removed
}
