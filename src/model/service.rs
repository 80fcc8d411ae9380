//! Services, their functions and `extends` placeholders.

use smol_str::SmolStr;

use super::ids::{DocumentId, PackageId, ServiceId, ServiceRefId, TypeId};
use super::info::DeclInfo;
use super::types::Field;

/// Calling convention of a function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FunctionMode {
    #[default]
    None,
    Event,
    Oneway,
    Async,
    Deferred,
    PropertyGetSet,
    PropertyGetSetChanged,
    PropertyGetChanged,
}

impl FunctionMode {
    /// Maps modifier words (`oneway`, `property get set`, ...) to a mode.
    /// Anything unrecognized is [`FunctionMode::None`].
    pub fn from_modifiers<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words: Vec<&str> = words.into_iter().collect();
        match words.as_slice() {
            ["oneway"] => FunctionMode::Oneway,
            ["async"] => FunctionMode::Async,
            ["event"] => FunctionMode::Event,
            ["deferred"] => FunctionMode::Deferred,
            ["property", accessors @ ..] => {
                let has = |word: &str| accessors.contains(&word);
                match (has("get"), has("set"), has("changed")) {
                    (true, true, false) => FunctionMode::PropertyGetSet,
                    (true, true, true) => FunctionMode::PropertyGetSetChanged,
                    (true, false, true) => FunctionMode::PropertyGetChanged,
                    _ => FunctionMode::None,
                }
            }
            _ => FunctionMode::None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            FunctionMode::None => "",
            FunctionMode::Event => "event",
            FunctionMode::Oneway => "oneway",
            FunctionMode::Async => "async",
            FunctionMode::Deferred => "deferred",
            FunctionMode::PropertyGetSet => "property get set",
            FunctionMode::PropertyGetSetChanged => "property get set changed",
            FunctionMode::PropertyGetChanged => "property get changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: SmolStr,
    pub mode: FunctionMode,
    pub params: Vec<Field>,
    pub exceptions: Vec<Field>,
    pub return_type: Option<TypeId>,
    /// Owning service.
    pub service: ServiceId,
    pub info: DeclInfo,
}

/// Placeholder for a service named in an `extends` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRef {
    pub declared_name: SmolStr,
    /// Last-known qualified name; updated on resolution.
    pub qualified_name: String,
    pub scope: Option<PackageId>,
    pub document: DocumentId,
    pub resolved: Option<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: SmolStr,
    pub qualified_name: String,
    pub package: Option<PackageId>,
    pub document: DocumentId,
    pub functions: Vec<Function>,
    pub extends: Option<ServiceRefId>,
    pub info: DeclInfo,
}

impl Service {
    /// Every type id referenced by a function signature.
    pub fn signature_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.functions.iter().flat_map(|function| {
            function
                .return_type
                .into_iter()
                .chain(function.params.iter().filter_map(|f| f.ty))
                .chain(function.exceptions.iter().filter_map(|f| f.ty))
        })
    }

    pub(crate) fn map_type_ids(&mut self, mut map: impl FnMut(TypeId) -> TypeId) {
        for function in &mut self.functions {
            if let Some(ty) = &mut function.return_type {
                *ty = map(*ty);
            }
            for field in function.params.iter_mut().chain(function.exceptions.iter_mut()) {
                if let Some(ty) = &mut field.ty {
                    *ty = map(*ty);
                }
            }
        }
    }
}
