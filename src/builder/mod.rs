//! Model builder: walks one parsed document and produces a [`Document`].
//!
//! The walk dispatches on node kind (package, service, enum, struct, union,
//! exception, typedef, include). Names used before they are declared become
//! placeholders registered in the document's unresolved registries; the
//! local resolver runs once the walk is complete.
//!
//! Comments are claimed for every declaration through the
//! [`CommentAssociator`], which has already seen the whole token stream.

mod comments;
mod context;
mod metadata;

pub use comments::CommentAssociator;
pub use context::WalkContext;
pub use metadata::apply_comment;

use smol_str::SmolStr;

use crate::base::Position;
use crate::model::{
    DeclInfo, Document, DocumentId, EnumValue, Field, Function, FunctionMode, Include, Model,
    Package, Primitive, Service, ServiceId, ServiceRef, ServiceRefId, Type, TypeId, TypeKind,
    TypeRef,
};
use crate::parser::SyntaxKind;
use crate::resolve::{lookup_type, resolve_local};
use crate::syntax::TreeNode;

/// Parses an integer literal node. Hex literals carry a `0x` prefix.
/// Values that do not fit an `i32` count as absent.
pub fn parse_integer(kind: SyntaxKind, text: &str) -> Option<i32> {
    let value = match kind {
        SyntaxKind::INTEGER => text.parse::<i64>().ok()?,
        SyntaxKind::HEX_INTEGER => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            i64::from_str_radix(digits, 16).ok()?
        }
        _ => return None,
    };
    i32::try_from(value).ok()
}

fn primitive_for(keyword: SyntaxKind) -> Option<Primitive> {
    let primitive = match keyword {
        SyntaxKind::VOID_KW => Primitive::Void,
        SyntaxKind::BOOL_KW => Primitive::Bool,
        SyntaxKind::BYTE_KW | SyntaxKind::I8_KW => Primitive::Int8,
        SyntaxKind::I16_KW => Primitive::Int16,
        SyntaxKind::I32_KW => Primitive::Int32,
        SyntaxKind::I64_KW => Primitive::Int64,
        SyntaxKind::U8_KW => Primitive::UInt8,
        SyntaxKind::U16_KW => Primitive::UInt16,
        SyntaxKind::U32_KW => Primitive::UInt32,
        SyntaxKind::U64_KW => Primitive::UInt64,
        SyntaxKind::DOUBLE_KW => Primitive::Double,
        SyntaxKind::STRING_KW => Primitive::String,
        SyntaxKind::BINARY_KW => Primitive::Binary,
        _ => return None,
    };
    Some(primitive)
}

fn identifier<N: TreeNode>(node: &N) -> SmolStr {
    node.first_child_of(SyntaxKind::IDENT)
        .map(|ident| SmolStr::new(ident.text()))
        .unwrap_or_default()
}

fn type_child<N: TreeNode>(node: &N) -> Option<N> {
    node.children().find(|child| child.kind().is_type())
}

/// Builds one document into a [`Model`].
pub struct ModelBuilder<'m> {
    model: &'m mut Model,
    comments: CommentAssociator,
    record_includes: bool,
}

impl<'m> ModelBuilder<'m> {
    pub fn new(model: &'m mut Model, comments: CommentAssociator) -> Self {
        Self {
            model,
            comments,
            record_includes: true,
        }
    }

    /// Drops `include` directives instead of recording them.
    pub fn ignore_includes(mut self) -> Self {
        self.record_includes = false;
        self
    }

    /// Walks `root`, runs the local resolver and returns the new document.
    pub fn build<N: TreeNode>(mut self, document: Document, root: &N) -> DocumentId {
        let id = self.model.add_document(document);
        self.walk_body(WalkContext::new(id), root);
        let pending = resolve_local(self.model, id);
        let document = &self.model[id];
        tracing::debug!(
            document = %document.name,
            types = document.all_types.len(),
            services = document.all_services.len(),
            pending,
            "generated document"
        );
        id
    }

    fn walk_body<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::PACKAGE => self.walk_package(ctx, &child),
                SyntaxKind::SERVICE => self.walk_service(ctx, &child),
                SyntaxKind::ENUM => self.walk_enum(ctx, &child),
                SyntaxKind::STRUCT => self.walk_struct(ctx, &child, TypeKind::Struct(Vec::new())),
                SyntaxKind::UNION => self.walk_struct(ctx, &child, TypeKind::Union(Vec::new())),
                SyntaxKind::EXCEPTION => {
                    self.walk_struct(ctx, &child, TypeKind::Exception(Vec::new()))
                }
                SyntaxKind::TYPEDEF => self.walk_typedef(ctx, &child),
                SyntaxKind::INCLUDE if self.record_includes => self.walk_include(ctx, &child),
                _ => {}
            }
        }
    }

    fn decl_info<N: TreeNode>(&mut self, node: &N) -> DeclInfo {
        let mut info = DeclInfo::at(Position::new(node.line(), node.column()));
        apply_comment(&mut info, self.comments.claim(node.line()));
        info
    }

    fn walk_include<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        let path = node
            .first_child_of(SyntaxKind::LITERAL)
            .map(|literal| {
                let text = literal.text();
                text.trim_matches(|c| c == '"' || c == '\'').to_string()
            })
            .unwrap_or_default();
        let info = DeclInfo::at(Position::new(node.line(), node.column()));
        self.model[ctx.document]
            .includes
            .push(Include::new(path, info));
    }

    fn walk_package<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        let name = identifier(node);
        let qualified_name = match ctx.package {
            Some(parent) => format!("{}.{}", self.model[parent].qualified_name, name),
            None => name.to_string(),
        };
        let info = self.decl_info(node);
        let id = self.model.add_package(Package {
            name,
            qualified_name,
            parent: ctx.package,
            document: ctx.document,
            subpackages: Vec::new(),
            types: Vec::new(),
            services: Vec::new(),
            info,
        });
        match ctx.package {
            Some(parent) => self.model[parent].subpackages.push(id),
            None => self.model[ctx.document].packages.push(id),
        }
        self.model[ctx.document].all_packages.push(id);
        self.walk_body(ctx.in_package(id), node);
    }

    /// Creates a named type in the current scope and registers it.
    fn declare_type<N: TreeNode>(&mut self, ctx: WalkContext, node: &N, kind: TypeKind) -> TypeId {
        let name = identifier(node);
        let qualified_name = ctx.qualify(self.model, &name);
        let info = self.decl_info(node);
        let id = self.model.add_type(Type {
            name,
            qualified_name: qualified_name.clone(),
            package: ctx.package,
            document: Some(ctx.document),
            info,
            kind,
        });
        match ctx.package {
            Some(package) => self.model[package].types.push(id),
            None => self.model[ctx.document].types.push(id),
        }
        self.model[ctx.document].all_types.insert(qualified_name, id);
        id
    }

    fn walk_struct<N: TreeNode>(&mut self, ctx: WalkContext, node: &N, kind: TypeKind) {
        // registered before its fields so self references resolve directly
        let id = self.declare_type(ctx, node, kind);
        let fields = self.fields(ctx, node);
        if let Some(slot) = self.model[id].fields_mut() {
            *slot = fields;
        }
    }

    fn walk_typedef<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        let id = self.declare_type(ctx, node, TypeKind::Typedef { target: None });
        let target = type_child(node).and_then(|ty| self.type_of(ctx, &ty));
        self.model[id].kind = TypeKind::Typedef { target };
    }

    fn walk_enum<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        let id = self.declare_type(ctx, node, TypeKind::Enum(Vec::new()));
        let mut next = 0i32;
        let mut values = Vec::new();
        for value in node.children().filter(|c| c.kind() == SyntaxKind::ENUM_VALUE) {
            let explicit = value
                .children()
                .find(|c| matches!(c.kind(), SyntaxKind::INTEGER | SyntaxKind::HEX_INTEGER))
                .and_then(|literal| parse_integer(literal.kind(), &literal.text()));
            if let Some(explicit) = explicit {
                next = explicit;
            }
            let info = self.decl_info(&value);
            values.push(EnumValue {
                name: identifier(&value),
                value: next,
                info,
            });
            next = next.wrapping_add(1);
        }
        self.model[id].kind = TypeKind::Enum(values);
    }

    fn fields<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) -> Vec<Field> {
        node.children()
            .filter(|child| child.kind() == SyntaxKind::FIELD)
            .map(|field| self.field(ctx, &field))
            .collect()
    }

    fn field<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) -> Field {
        let info = self.decl_info(node);
        let id = node
            .first_child_of(SyntaxKind::FIELD_ID)
            .and_then(|field_id| field_id.child(0))
            .and_then(|literal| parse_integer(literal.kind(), &literal.text()));
        let ty = type_child(node).and_then(|ty| self.type_of(ctx, &ty));
        Field {
            name: identifier(node),
            id,
            ty,
            info,
        }
    }

    /// Type of a type node: a primitive, a new anonymous collection, a known
    /// named type or a placeholder.
    fn type_of<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) -> Option<TypeId> {
        match node.kind() {
            SyntaxKind::BASE_TYPE => node
                .child(0)
                .and_then(|keyword| primitive_for(keyword.kind()))
                .map(Primitive::type_id),
            SyntaxKind::SERVICE_PTR_TYPE => Some(Primitive::ServicePtr.type_id()),
            SyntaxKind::NAMED_TYPE => Some(self.find_type(ctx, &node.text())),
            SyntaxKind::LIST_TYPE | SyntaxKind::SET_TYPE | SyntaxKind::MAP_TYPE => {
                let elements: Vec<N> = node.children().filter(|c| c.kind().is_type()).collect();
                let mut element = |index: usize| {
                    elements
                        .get(index)
                        .and_then(|element| self.type_of(ctx, element))
                };
                let kind = match node.kind() {
                    SyntaxKind::LIST_TYPE => TypeKind::List(element(0)),
                    SyntaxKind::SET_TYPE => TypeKind::Set(element(0)),
                    _ => TypeKind::Map {
                        key: element(0),
                        value: element(1),
                    },
                };
                Some(self.model.add_type(Type::anonymous(ctx.document, kind)))
            }
            _ => None,
        }
    }

    /// A known type in scope, or the placeholder registered for `name`.
    fn find_type(&mut self, ctx: WalkContext, name: &str) -> TypeId {
        if let Some(id) = lookup_type(self.model, ctx.document, ctx.package, name) {
            return id;
        }
        if let Some(&id) = self.model[ctx.document].unresolved_types.get(name) {
            return id;
        }
        let placeholder = Type {
            name: SmolStr::new(name),
            ..Type::anonymous(
                ctx.document,
                TypeKind::Ref(TypeRef {
                    declared_name: SmolStr::new(name),
                    scope: ctx.package,
                    resolved: None,
                }),
            )
        };
        let id = self.model.add_type(placeholder);
        self.model[ctx.document]
            .unresolved_types
            .insert(SmolStr::new(name), id);
        id
    }

    fn walk_service<N: TreeNode>(&mut self, ctx: WalkContext, node: &N) {
        let name = identifier(node);
        let qualified_name = ctx.qualify(self.model, &name);
        let info = self.decl_info(node);
        let extends = node.first_child_of(SyntaxKind::EXTENDS).map(|extends| {
            let declared_name = identifier(&extends);
            self.service_placeholder(ctx, declared_name)
        });
        let id = self.model.add_service(Service {
            name,
            qualified_name: qualified_name.clone(),
            package: ctx.package,
            document: ctx.document,
            functions: Vec::new(),
            extends,
            info,
        });
        let functions = node
            .children()
            .filter(|child| child.kind() == SyntaxKind::FUNCTION)
            .map(|function| self.function(ctx, id, &function))
            .collect();
        self.model[id].functions = functions;

        match ctx.package {
            Some(package) => self.model[package].services.push(id),
            None => self.model[ctx.document].services.push(id),
        }
        let document = &mut self.model[ctx.document];
        document.all_services.push(id);
        document.services_by_name.insert(qualified_name, id);
    }

    fn service_placeholder(&mut self, ctx: WalkContext, declared_name: SmolStr) -> ServiceRefId {
        if let Some(&existing) = self.model[ctx.document]
            .unresolved_services
            .get(&declared_name)
        {
            return existing;
        }
        let id = self.model.add_service_ref(ServiceRef {
            declared_name: declared_name.clone(),
            qualified_name: String::new(),
            scope: ctx.package,
            document: ctx.document,
            resolved: None,
        });
        self.model[ctx.document]
            .unresolved_services
            .insert(declared_name, id);
        id
    }

    fn function<N: TreeNode>(&mut self, ctx: WalkContext, service: ServiceId, node: &N) -> Function {
        let info = self.decl_info(node);
        let mode = node
            .child(0)
            .filter(|first| first.kind() == SyntaxKind::FUNCTION_MODE)
            .map(|modifier| {
                let words: Vec<String> = modifier.children().map(|word| word.text()).collect();
                FunctionMode::from_modifiers(words.iter().map(String::as_str))
            })
            .unwrap_or_default();
        let return_type = type_child(node).and_then(|ty| self.type_of(ctx, &ty));
        let params = match node.first_child_of(SyntaxKind::PARAM_LIST) {
            Some(list) => self.fields(ctx, &list),
            None => Vec::new(),
        };
        let exceptions = match node.first_child_of(SyntaxKind::THROWS) {
            Some(throws) => self.fields(ctx, &throws),
            None => Vec::new(),
        };
        Function {
            name: identifier(node),
            mode,
            params,
            exceptions,
            return_type,
            service,
            info,
        }
    }
}
