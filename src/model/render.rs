//! Human-oriented, non-stable text rendering of a document for diagnostics.

use std::fmt;

use super::{DocumentId, Field, Model, PackageId, ServiceId, TypeId, TypeKind};

/// Returned by [`Model::display_document`].
pub struct DocumentDisplay<'a> {
    model: &'a Model,
    document: DocumentId,
}

impl Model {
    pub fn display_document(&self, document: DocumentId) -> DocumentDisplay<'_> {
        DocumentDisplay {
            model: self,
            document,
        }
    }
}

impl DocumentDisplay<'_> {
    fn write_package(&self, f: &mut fmt::Formatter<'_>, id: PackageId, depth: usize) -> fmt::Result {
        let package = &self.model[id];
        writeln!(f, "{:indent$}package {}", "", package.qualified_name, indent = depth * 2)?;
        for &ty in &package.types {
            self.write_type(f, ty, depth + 1)?;
        }
        for &service in &package.services {
            self.write_service(f, service, depth + 1)?;
        }
        for &sub in &package.subpackages {
            self.write_package(f, sub, depth + 1)?;
        }
        Ok(())
    }

    fn write_type(&self, f: &mut fmt::Formatter<'_>, id: TypeId, depth: usize) -> fmt::Result {
        let model = self.model;
        let ty = &model[id];
        let pad = depth * 2;
        write!(f, "{:pad$}{} {}", "", ty.kind_keyword(), ty.qualified_name)?;
        if let Some(version) = &ty.info.version {
            write!(f, " @version {version}")?;
        }
        if ty.info.deprecated {
            write!(f, " @deprecated")?;
        }
        match &ty.kind {
            TypeKind::Typedef { target } => {
                writeln!(f, " = {}", self.slot_name(*target))
            }
            TypeKind::Ref(type_ref) => {
                writeln!(f, " -> {}", self.slot_name(type_ref.resolved))
            }
            TypeKind::Enum(values) => {
                writeln!(f)?;
                for value in values {
                    writeln!(f, "{:pad$}{} = {}", "", value.name, value.value, pad = pad + 2)?;
                }
                Ok(())
            }
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                writeln!(f)?;
                for field in fields {
                    writeln!(f, "{:pad$}{}", "", self.field(field), pad = pad + 2)?;
                }
                Ok(())
            }
            TypeKind::Primitive(_) | TypeKind::List(_) | TypeKind::Set(_) | TypeKind::Map { .. } => {
                writeln!(f)
            }
        }
    }

    fn write_service(&self, f: &mut fmt::Formatter<'_>, id: ServiceId, depth: usize) -> fmt::Result {
        let model = self.model;
        let service = &model[id];
        let pad = depth * 2;
        write!(f, "{:pad$}service {}", "", service.qualified_name)?;
        if let Some(extends) = service.extends {
            let base = &model[extends];
            match base.resolved {
                Some(resolved) => write!(f, " extends {}", model[resolved].qualified_name)?,
                None => write!(f, " extends {} (unresolved)", base.declared_name)?,
            }
        }
        writeln!(f)?;
        for function in &service.functions {
            write!(f, "{:pad$}", "", pad = pad + 2)?;
            if !function.mode.keyword().is_empty() {
                write!(f, "{} ", function.mode.keyword())?;
            }
            let params: Vec<String> = function.params.iter().map(|p| self.field(p)).collect();
            write!(
                f,
                "{} {}({})",
                self.slot_name(function.return_type),
                function.name,
                params.join(", ")
            )?;
            if !function.exceptions.is_empty() {
                let exceptions: Vec<String> =
                    function.exceptions.iter().map(|e| self.field(e)).collect();
                write!(f, " throws ({})", exceptions.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn field(&self, field: &Field) -> String {
        let ty = self.slot_name(field.ty);
        match field.id {
            Some(id) => format!("{id}: {ty} {}", field.name),
            None => format!("{ty} {}", field.name),
        }
    }

    fn slot_name(&self, slot: Option<TypeId>) -> String {
        slot.map(|id| self.model.type_name(id))
            .unwrap_or_else(|| "?".to_string())
    }
}

impl fmt::Display for DocumentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = &self.model[self.document];
        write!(f, "document {}", document.name)?;
        if let Some(path) = &document.path {
            write!(f, " ({})", path.display())?;
        }
        writeln!(f)?;
        for include in &document.includes {
            let state = match (&include.document, &include.resolved_path) {
                (Some(id), _) => format!("loaded as {}", self.model[*id].name),
                (None, Some(path)) => format!("found at {}", path.display()),
                (None, None) => "not loaded".to_string(),
            };
            writeln!(f, "  include \"{}\" {}", include.declared_path, state)?;
        }
        for &package in &document.packages {
            self.write_package(f, package, 1)?;
        }
        for &ty in &document.types {
            self.write_type(f, ty, 1)?;
        }
        for &service in &document.services {
            self.write_service(f, service, 1)?;
        }
        for name in document.unresolved_types.keys() {
            writeln!(f, "  unresolved type {name}")?;
        }
        for name in document.unresolved_services.keys() {
            writeln!(f, "  unresolved service {name}")?;
        }
        Ok(())
    }
}
