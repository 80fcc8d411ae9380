//! Resolution against a single document's own registries.
//!
//! Runs at the end of every document walk, and again on the surviving
//! fragment after a merge.

use crate::model::{DocumentId, Model, Package, PackageId, ServiceId, TypeId};

use super::{bind_service, bind_type};

/// Looks `name` up in `document`: first as written, then qualified by each
/// package of the scope chain (innermost first), or by the document name at
/// top level.
pub(crate) fn lookup_type(
    model: &Model,
    document: DocumentId,
    scope: Option<PackageId>,
    name: &str,
) -> Option<TypeId> {
    let types = &model[document].all_types;
    if let Some(&id) = types.get(name) {
        return Some(id);
    }
    match scope {
        Some(package) => model
            .package_chain(package)
            .into_iter()
            .find_map(|p| types.get(&format!("{}.{}", model[p].qualified_name, name)))
            .copied(),
        None => types.get(&model[document].qualify(name)).copied(),
    }
}

pub(crate) fn lookup_service(
    model: &Model,
    document: DocumentId,
    scope: Option<PackageId>,
    name: &str,
) -> Option<ServiceId> {
    let services = &model[document].services_by_name;
    if let Some(&id) = services.get(name) {
        return Some(id);
    }
    match scope {
        Some(package) => model
            .package_chain(package)
            .into_iter()
            .find_map(|p| services.get(&format!("{}.{}", model[p].qualified_name, name)))
            .copied(),
        None => services.get(&model[document].qualify(name)).copied(),
    }
}

/// Walks down from `package` following the segments of `name`, testing
/// leaf names at the bottom. A leading segment equal to the package's own
/// qualified name is stripped first.
fn search_package<T>(
    model: &Model,
    package: PackageId,
    name: &str,
    leaf: &dyn Fn(&Package, &str) -> Option<T>,
) -> Option<T> {
    let current = &model[package];
    let name = name
        .strip_prefix(current.qualified_name.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    if name.contains('.') {
        current.subpackages.iter().find_map(|&sub| {
            let rest = name
                .strip_prefix(model[sub].name.as_str())?
                .strip_prefix('.')?;
            search_package(model, sub, rest, leaf)
        })
    } else {
        leaf(current, name)
    }
}

pub fn find_type_in_package(model: &Model, package: PackageId, name: &str) -> Option<TypeId> {
    search_package(model, package, name, &|p, leaf| {
        p.types.iter().copied().find(|&id| model[id].name == leaf)
    })
}

pub fn find_service_in_package(model: &Model, package: PackageId, name: &str) -> Option<ServiceId> {
    search_package(model, package, name, &|p, leaf| {
        p.services.iter().copied().find(|&id| model[id].name == leaf)
    })
}

/// Resolves what can be resolved inside `document` and drains the
/// resolved entries from its unresolved registries. Returns how many
/// placeholders are still pending.
pub fn resolve_local(model: &mut Model, document: DocumentId) -> usize {
    let pending: Vec<_> = model[document]
        .unresolved_types
        .iter()
        .map(|(name, &id)| (name.clone(), id))
        .collect();
    for (name, placeholder) in pending {
        let scope = model[placeholder]
            .as_ref_placeholder()
            .and_then(|type_ref| type_ref.scope);
        let target = lookup_type(model, document, scope, &name)
            .or_else(|| scope.and_then(|package| find_type_in_package(model, package, &name)))
            .filter(|&target| target != placeholder);
        if let Some(target) = target {
            tracing::trace!(name = %name, resolved_to = %model[target].qualified_name, "resolved locally");
            bind_type(model, placeholder, target);
            model[document].unresolved_types.shift_remove(&name);
        }
    }

    let pending: Vec<_> = model[document]
        .unresolved_services
        .iter()
        .map(|(name, &id)| (name.clone(), id))
        .collect();
    for (name, service_ref) in pending {
        let scope = model[service_ref].scope;
        let target = lookup_service(model, document, scope, &name)
            .or_else(|| scope.and_then(|package| find_service_in_package(model, package, &name)));
        if let Some(target) = target {
            bind_service(model, service_ref, target);
            model[document].unresolved_services.shift_remove(&name);
        }
    }

    let document = &model[document];
    document.unresolved_types.len() + document.unresolved_services.len()
}
