//! Types: the closed set of type variants plus fields and enum values.

use smol_str::SmolStr;

use super::ids::{DocumentId, PackageId, TypeId};
use super::info::DeclInfo;

/// Built-in types. Each has one reserved [`TypeId`] shared by every
/// document in a [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Double,
    String,
    Binary,
    Void,
    /// Sentinel for `service*` (a reference to any service).
    ServicePtr,
}

impl Primitive {
    /// All primitives, in reserved-id order.
    pub const ALL: [Primitive; 14] = [
        Primitive::Bool,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::UInt8,
        Primitive::UInt16,
        Primitive::UInt32,
        Primitive::UInt64,
        Primitive::Double,
        Primitive::String,
        Primitive::Binary,
        Primitive::Void,
        Primitive::ServicePtr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt8 => "uint8",
            Primitive::UInt16 => "uint16",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Double => "double",
            Primitive::String => "string",
            Primitive::Binary => "binary",
            Primitive::Void => "void",
            Primitive::ServicePtr => "service*",
        }
    }

    pub fn type_id(self) -> TypeId {
        TypeId::from_index(self as usize)
    }
}

impl TypeId {
    pub fn primitive(primitive: Primitive) -> TypeId {
        primitive.type_id()
    }
}

/// A field of a struct/union/exception, or a function parameter/exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: SmolStr,
    /// Explicit numeric id; `None` when the declaration has none.
    pub id: Option<i32>,
    /// `None` only when the declaration carried no type at all.
    pub ty: Option<TypeId>,
    pub info: DeclInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: SmolStr,
    pub value: i32,
    pub info: DeclInfo,
}

/// Placeholder for a type name that was not known where it was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub declared_name: SmolStr,
    /// Package the name was encountered in; `None` at document level.
    pub scope: Option<PackageId>,
    pub resolved: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Primitive(Primitive),
    Struct(Vec<Field>),
    Union(Vec<Field>),
    Exception(Vec<Field>),
    Enum(Vec<EnumValue>),
    Typedef { target: Option<TypeId> },
    Ref(TypeRef),
    List(Option<TypeId>),
    Set(Option<TypeId>),
    Map {
        key: Option<TypeId>,
        value: Option<TypeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: SmolStr,
    /// Empty for anonymous collection types and unresolved placeholders.
    pub qualified_name: String,
    pub package: Option<PackageId>,
    pub document: Option<DocumentId>,
    pub info: DeclInfo,
    pub kind: TypeKind,
}

impl Type {
    pub fn new(name: impl Into<SmolStr>, qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            package: None,
            document: None,
            info: DeclInfo::default(),
            kind,
        }
    }

    /// An anonymous type (collection or placeholder) owned by `document`.
    pub fn anonymous(document: DocumentId, kind: TypeKind) -> Self {
        Self {
            document: Some(document),
            ..Self::new("", "", kind)
        }
    }

    pub(crate) fn primitive(primitive: Primitive) -> Self {
        Self::new(primitive.name(), primitive.name(), TypeKind::Primitive(primitive))
    }

    /// Fields of struct-like types.
    pub fn fields(&self) -> Option<&[Field]> {
        match &self.kind {
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                Some(fields)
            }
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Vec<Field>> {
        match &mut self.kind {
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                Some(fields)
            }
            _ => None,
        }
    }

    /// Typedefs and placeholders stand for another type.
    pub fn is_alias(&self) -> bool {
        matches!(self.kind, TypeKind::Typedef { .. } | TypeKind::Ref(_))
    }

    pub fn as_ref_placeholder(&self) -> Option<&TypeRef> {
        match &self.kind {
            TypeKind::Ref(type_ref) => Some(type_ref),
            _ => None,
        }
    }

    /// The next type in an alias chain, if this is a resolved alias.
    pub fn alias_target(&self) -> Option<TypeId> {
        match &self.kind {
            TypeKind::Typedef { target } => *target,
            TypeKind::Ref(type_ref) => type_ref.resolved,
            _ => None,
        }
    }

    /// Every type id this type directly points at.
    pub fn referenced_types(&self) -> Vec<TypeId> {
        match &self.kind {
            TypeKind::Primitive(_) | TypeKind::Enum(_) => Vec::new(),
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                fields.iter().filter_map(|f| f.ty).collect()
            }
            TypeKind::Typedef { target } => target.iter().copied().collect(),
            TypeKind::Ref(type_ref) => type_ref.resolved.iter().copied().collect(),
            TypeKind::List(element) | TypeKind::Set(element) => element.iter().copied().collect(),
            TypeKind::Map { key, value } => key.iter().chain(value.iter()).copied().collect(),
        }
    }

    /// Keyword describing the variant, as used in diagnostic text.
    pub fn kind_keyword(&self) -> &'static str {
        match self.kind {
            TypeKind::Primitive(_) => "primitive",
            TypeKind::Struct(_) => "struct",
            TypeKind::Union(_) => "union",
            TypeKind::Exception(_) => "exception",
            TypeKind::Enum(_) => "enum",
            TypeKind::Typedef { .. } => "typedef",
            TypeKind::Ref(_) => "ref",
            TypeKind::List(_) => "list",
            TypeKind::Set(_) => "set",
            TypeKind::Map { .. } => "map",
        }
    }

    /// Rewrite every directly referenced type id through `map`.
    pub(crate) fn map_type_ids(&mut self, mut map: impl FnMut(TypeId) -> TypeId) {
        let mut apply = |slot: &mut Option<TypeId>| {
            if let Some(id) = slot {
                *id = map(*id);
            }
        };
        match &mut self.kind {
            TypeKind::Primitive(_) | TypeKind::Enum(_) => {}
            TypeKind::Struct(fields) | TypeKind::Union(fields) | TypeKind::Exception(fields) => {
                for field in fields {
                    apply(&mut field.ty);
                }
            }
            TypeKind::Typedef { target } => apply(target),
            TypeKind::Ref(type_ref) => apply(&mut type_ref.resolved),
            TypeKind::List(element) | TypeKind::Set(element) => apply(element),
            TypeKind::Map { key, value } => {
                apply(key);
                apply(value);
            }
        }
    }
}
