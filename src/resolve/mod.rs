//! Reference resolution.
//!
//! Three passes, always in this order:
//!
//! 1. [`resolve_local`] at the end of each document walk, against that
//!    document's registries only
//! 2. [`resolve_global`] once the include graph is loaded, against
//!    registries spanning every reachable document
//! 3. [`strip_aliases`] (optional) replaces typedef and placeholder uses
//!    with the types they stand for

mod global;
mod local;
mod strip;

pub use global::{GlobalRegistry, resolve_global};
pub use local::{find_service_in_package, find_type_in_package, resolve_local};
pub use strip::strip_aliases;

pub(crate) use local::lookup_type;

use crate::model::{Model, ServiceId, ServiceRefId, TypeId, TypeKind};

/// Points `placeholder` at `target` and copies the target's names onto it.
pub(crate) fn bind_type(model: &mut Model, placeholder: TypeId, target: TypeId) {
    let source = &model[target];
    let (name, qualified_name, package) =
        (source.name.clone(), source.qualified_name.clone(), source.package);
    let ty = &mut model[placeholder];
    ty.name = name;
    ty.qualified_name = qualified_name;
    ty.package = package;
    if let TypeKind::Ref(type_ref) = &mut ty.kind {
        type_ref.resolved = Some(target);
    }
}

pub(crate) fn bind_service(model: &mut Model, service_ref: ServiceRefId, target: ServiceId) {
    let qualified_name = model[target].qualified_name.clone();
    let reference = &mut model[service_ref];
    reference.qualified_name = qualified_name;
    reference.resolved = Some(target);
}
