//! Recursive reachability checks.
//!
//! An entity is valid when every type and service it transitively touches is
//! resolved and itself valid. A type or service already under inspection
//! counts as valid, which keeps mutually recursive structs finite.

use rustc_hash::FxHashSet;

use super::{DocumentId, Field, Function, Model, ServiceId, TypeId, TypeKind};

struct Validator<'a> {
    model: &'a Model,
    types: FxHashSet<TypeId>,
    services: FxHashSet<ServiceId>,
}

impl<'a> Validator<'a> {
    fn new(model: &'a Model) -> Self {
        Self {
            model,
            types: FxHashSet::default(),
            services: FxHashSet::default(),
        }
    }

    fn slot(&mut self, slot: Option<TypeId>) -> bool {
        slot.is_some_and(|id| self.ty(id))
    }

    fn ty(&mut self, id: TypeId) -> bool {
        if !self.types.insert(id) {
            return true;
        }
        let model = self.model;
        match &model[id].kind {
            TypeKind::Primitive(_) | TypeKind::Enum(_) => true,
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                fields.iter().all(|field| self.field(field))
            }
            TypeKind::Typedef { target } => self.slot(*target),
            TypeKind::Ref(type_ref) => self.slot(type_ref.resolved),
            TypeKind::List(element) | TypeKind::Set(element) => self.slot(*element),
            TypeKind::Map { key, value } => self.slot(*key) && self.slot(*value),
        }
    }

    fn field(&mut self, field: &Field) -> bool {
        self.slot(field.ty)
    }

    fn function(&mut self, function: &Function) -> bool {
        self.slot(function.return_type)
            && function.params.iter().all(|field| self.field(field))
            && function.exceptions.iter().all(|field| self.field(field))
    }

    fn service(&mut self, id: ServiceId) -> bool {
        if !self.services.insert(id) {
            return true;
        }
        let model = self.model;
        let service = &model[id];
        let extends_valid = match service.extends {
            Some(extends) => model[extends]
                .resolved
                .is_some_and(|base| self.service(base)),
            None => true,
        };
        extends_valid && service.functions.iter().all(|function| self.function(function))
    }
}

impl Model {
    pub fn type_is_valid(&self, id: TypeId) -> bool {
        Validator::new(self).ty(id)
    }

    pub fn field_is_valid(&self, field: &Field) -> bool {
        Validator::new(self).field(field)
    }

    pub fn function_is_valid(&self, function: &Function) -> bool {
        Validator::new(self).function(function)
    }

    /// False if the `extends` chain or any function signature is unresolved
    /// or invalid.
    pub fn service_is_valid(&self, id: ServiceId) -> bool {
        Validator::new(self).service(id)
    }

    /// True when nothing is left unresolved and every registered type and
    /// service is valid.
    pub fn document_is_valid(&self, id: DocumentId) -> bool {
        let document = &self[id];
        if document.has_unresolved() {
            return false;
        }
        let mut validator = Validator::new(self);
        document.all_types.values().all(|&ty| validator.ty(ty))
            && document.all_services.iter().all(|&service| validator.service(service))
    }
}
