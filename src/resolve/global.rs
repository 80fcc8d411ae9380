//! Resolution across the whole include graph.

use rustc_hash::FxHashMap;

use crate::model::{DocumentId, Model, ServiceId, TypeId};

use super::{bind_service, bind_type};

/// Types and services of every document reachable from a root, by
/// qualified name. Built per call and dropped afterwards.
#[derive(Debug, Default)]
pub struct GlobalRegistry {
    pub types: FxHashMap<String, TypeId>,
    pub services: FxHashMap<String, ServiceId>,
}

impl GlobalRegistry {
    /// Included documents are registered before their includers, so on a
    /// qualified-name clash the includer's entry wins.
    pub fn build(model: &Model, graph: &[DocumentId]) -> Self {
        let mut registry = Self::default();
        for &document in graph {
            let document = &model[document];
            for (name, &id) in &document.all_types {
                if model[id].as_ref_placeholder().is_none() {
                    registry.types.insert(name.clone(), id);
                }
            }
            for &id in &document.all_services {
                registry
                    .services
                    .insert(model[id].qualified_name.clone(), id);
            }
        }
        registry
    }
}

/// Resolves every pending placeholder in the include graph of `root`.
///
/// Type placeholders are tried against each package of their recorded
/// scope chain (innermost first), then as a fully qualified name. Service
/// placeholders are only tried as a fully qualified name. Returns the number
/// of placeholders still unresolved afterwards.
pub fn resolve_global(model: &mut Model, root: DocumentId) -> usize {
    let graph = model.include_graph(root);
    let registry = GlobalRegistry::build(model, &graph);
    tracing::debug!(
        documents = graph.len(),
        types = registry.types.len(),
        services = registry.services.len(),
        "built global registry"
    );

    let mut remaining = 0;
    for &document in &graph {
        let pending: Vec<_> = model[document]
            .unresolved_types
            .iter()
            .map(|(name, &id)| (name.clone(), id))
            .collect();
        for (name, placeholder) in pending {
            let scope = model[placeholder]
                .as_ref_placeholder()
                .and_then(|type_ref| type_ref.scope);
            let chain = scope.map(|p| model.package_chain(p)).unwrap_or_default();
            let target = chain
                .iter()
                .find_map(|&p| {
                    registry
                        .types
                        .get(&format!("{}.{}", model[p].qualified_name, name))
                })
                .or_else(|| registry.types.get(name.as_str()))
                .copied()
                .filter(|&target| target != placeholder);
            match target {
                Some(target) => {
                    tracing::trace!(name = %name, resolved_to = %model[target].qualified_name, "resolved globally");
                    bind_type(model, placeholder, target);
                    model[document].unresolved_types.shift_remove(&name);
                }
                None => {
                    tracing::warn!(document = %model[document].name, name = %name, "unresolved type reference");
                    remaining += 1;
                }
            }
        }

        let pending: Vec<_> = model[document]
            .unresolved_services
            .iter()
            .map(|(name, &id)| (name.clone(), id))
            .collect();
        for (name, service_ref) in pending {
            match registry.services.get(name.as_str()) {
                Some(&target) => {
                    bind_service(model, service_ref, target);
                    model[document].unresolved_services.shift_remove(&name);
                }
                None => {
                    tracing::warn!(document = %model[document].name, name = %name, "unresolved service reference");
                    remaining += 1;
                }
            }
        }
    }
    remaining
}
