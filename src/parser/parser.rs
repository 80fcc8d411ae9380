//! Recursive descent parser for Thrift IDL
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {:?}", self.message, self.range)
    }
}

/// Parse Thrift source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_document();
    parser.finish()
}

const DEFINITION_START: &[SyntaxKind] = &[
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::TYPEDEF_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::UNION_KW,
    SyntaxKind::EXCEPTION_KW,
    SyntaxKind::SERVICE_KW,
    SyntaxKind::INCLUDE_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::R_BRACE,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Look ahead `n` non-trivia tokens from the current position
    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current_kind()));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Consume an optional `,` or `;` list separator
    fn eat_separator(&mut self) {
        if matches!(self.nth(0), SyntaxKind::COMMA | SyntaxKind::SEMICOLON) {
            self.skip_trivia();
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Runs `member` until `close` (or EOF), forcing progress on stuck input
    fn parse_members(&mut self, close: SyntaxKind, mut member: impl FnMut(&mut Self)) {
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(close) {
                break;
            }
            let pos_before = self.pos;
            member(self);
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Document = (Include | CppInclude | Namespace | Definition)*
    fn parse_document(&mut self) {
        self.start_node(SyntaxKind::DOCUMENT);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            let pos_before = self.pos;
            match self.current_kind() {
                SyntaxKind::INCLUDE_KW => self.parse_include(SyntaxKind::INCLUDE),
                SyntaxKind::CPP_INCLUDE_KW => self.parse_include(SyntaxKind::CPP_INCLUDE),
                SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
                _ => self.parse_definition(),
            }
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// Include = ('include' | 'cpp_include') LITERAL
    fn parse_include(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::LITERAL);
        self.eat_separator();
        self.finish_node();
    }

    /// Namespace = 'namespace' (IDENT | '*') IDENT
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE);
        self.bump();
        self.skip_trivia();
        if !self.eat(SyntaxKind::IDENT) && !self.eat(SyntaxKind::STAR) {
            self.error("expected namespace scope");
        }
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.eat_separator();
        self.finish_node();
    }

    fn parse_definition(&mut self) {
        match self.current_kind() {
            SyntaxKind::PACKAGE_KW => self.parse_package(),
            SyntaxKind::CONST_KW => self.parse_const(),
            SyntaxKind::TYPEDEF_KW => self.parse_typedef(),
            SyntaxKind::ENUM_KW => self.parse_enum(),
            SyntaxKind::STRUCT_KW => self.parse_struct_like(SyntaxKind::STRUCT),
            SyntaxKind::UNION_KW => self.parse_struct_like(SyntaxKind::UNION),
            SyntaxKind::EXCEPTION_KW => self.parse_struct_like(SyntaxKind::EXCEPTION),
            SyntaxKind::SERVICE_KW => self.parse_service(),
            _ => {
                self.error_recover(
                    format!("unexpected token: {:?}", self.current_kind()),
                    DEFINITION_START,
                );
            }
        }
    }

    /// Package = 'package' IDENT '{' Definition* '}'
    fn parse_package(&mut self) {
        self.start_node(SyntaxKind::PACKAGE);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members(SyntaxKind::R_BRACE, |p| p.parse_definition());
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
    }

    /// Const = 'const' Type IDENT '=' ConstValue
    fn parse_const(&mut self) {
        self.start_node(SyntaxKind::CONST);
        self.bump();
        self.skip_trivia();
        self.parse_type();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        self.expect(SyntaxKind::EQ);
        self.skip_trivia();
        self.parse_const_value();
        self.eat_separator();
        self.finish_node();
    }

    /// ConstValue = INTEGER | HEX_INTEGER | DOUBLE | LITERAL | IDENT | ConstList | ConstMap
    fn parse_const_value(&mut self) {
        self.start_node(SyntaxKind::CONST_VALUE);
        match self.current_kind() {
            SyntaxKind::INTEGER
            | SyntaxKind::HEX_INTEGER
            | SyntaxKind::DOUBLE
            | SyntaxKind::LITERAL
            | SyntaxKind::IDENT => self.bump(),
            SyntaxKind::L_BRACKET => {
                self.bump();
                self.parse_members(SyntaxKind::R_BRACKET, |p| {
                    p.parse_const_value();
                    p.eat_separator();
                });
                self.expect(SyntaxKind::R_BRACKET);
            }
            SyntaxKind::L_BRACE => {
                self.bump();
                self.parse_members(SyntaxKind::R_BRACE, |p| {
                    p.parse_const_value();
                    p.skip_trivia();
                    p.expect(SyntaxKind::COLON);
                    p.skip_trivia();
                    p.parse_const_value();
                    p.eat_separator();
                });
                self.expect(SyntaxKind::R_BRACE);
            }
            _ => self.error(format!("expected constant value, found {:?}", self.current_kind())),
        }
        self.finish_node();
    }

    /// Typedef = 'typedef' Type IDENT Annotations?
    fn parse_typedef(&mut self) {
        self.start_node(SyntaxKind::TYPEDEF);
        self.bump();
        self.skip_trivia();
        self.parse_type();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.parse_annotations();
        self.eat_separator();
        self.finish_node();
    }

    /// Enum = 'enum' IDENT '{' EnumValue* '}'
    fn parse_enum(&mut self) {
        self.start_node(SyntaxKind::ENUM);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members(SyntaxKind::R_BRACE, |p| {
                if p.at(SyntaxKind::IDENT) {
                    p.parse_enum_value();
                } else {
                    p.error_recover(
                        format!("expected enum value, found {:?}", p.current_kind()),
                        &[SyntaxKind::IDENT, SyntaxKind::R_BRACE],
                    );
                }
            });
            self.expect(SyntaxKind::R_BRACE);
        }
        self.parse_annotations();
        self.finish_node();
    }

    /// EnumValue = IDENT ('=' INTEGER)? Annotations?
    fn parse_enum_value(&mut self) {
        self.start_node(SyntaxKind::ENUM_VALUE);
        self.bump();
        if self.nth(0) == SyntaxKind::EQ {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            if !self.eat(SyntaxKind::INTEGER) && !self.eat(SyntaxKind::HEX_INTEGER) {
                self.error("expected integer enum value");
            }
        }
        self.parse_annotations();
        self.eat_separator();
        self.finish_node();
    }

    /// StructLike = ('struct' | 'union' | 'exception') IDENT '{' Field* '}' Annotations?
    fn parse_struct_like(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members(SyntaxKind::R_BRACE, |p| p.parse_field());
            self.expect(SyntaxKind::R_BRACE);
        }
        self.parse_annotations();
        self.finish_node();
    }

    /// Field = FieldId? ('required' | 'optional')? Type IDENT ('=' ConstValue)? Annotations?
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::FIELD);
        if self.at_any(&[SyntaxKind::INTEGER, SyntaxKind::HEX_INTEGER])
            && self.nth(1) == SyntaxKind::COLON
        {
            self.start_node(SyntaxKind::FIELD_ID);
            self.bump();
            self.skip_trivia();
            self.bump();
            self.finish_node();
            self.skip_trivia();
        }
        if self.eat(SyntaxKind::REQUIRED_KW) || self.eat(SyntaxKind::OPTIONAL_KW) {
            self.skip_trivia();
        }
        self.parse_type();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        if self.nth(0) == SyntaxKind::EQ {
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
            self.parse_const_value();
        }
        self.parse_annotations();
        self.eat_separator();
        self.finish_node();
    }

    /// Type = BaseType | 'service' '*' | ListType | SetType | MapType | IDENT
    fn parse_type(&mut self) {
        let kind = self.current_kind();
        if kind.is_base_type_keyword() {
            self.start_node(SyntaxKind::BASE_TYPE);
            self.bump();
            self.finish_node();
            return;
        }
        match kind {
            SyntaxKind::IDENT => {
                self.start_node(SyntaxKind::NAMED_TYPE);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::SERVICE_KW if self.nth(1) == SyntaxKind::STAR => {
                self.start_node(SyntaxKind::SERVICE_PTR_TYPE);
                self.bump();
                self.skip_trivia();
                self.bump();
                self.finish_node();
            }
            SyntaxKind::LIST_KW | SyntaxKind::SET_KW => {
                let node = if kind == SyntaxKind::LIST_KW {
                    SyntaxKind::LIST_TYPE
                } else {
                    SyntaxKind::SET_TYPE
                };
                self.start_node(node);
                self.bump();
                self.skip_trivia();
                self.expect(SyntaxKind::LT);
                self.skip_trivia();
                self.parse_type();
                self.skip_trivia();
                self.expect(SyntaxKind::GT);
                self.finish_node();
            }
            SyntaxKind::MAP_KW => {
                self.start_node(SyntaxKind::MAP_TYPE);
                self.bump();
                self.skip_trivia();
                self.expect(SyntaxKind::LT);
                self.skip_trivia();
                self.parse_type();
                self.skip_trivia();
                self.expect(SyntaxKind::COMMA);
                self.skip_trivia();
                self.parse_type();
                self.skip_trivia();
                self.expect(SyntaxKind::GT);
                self.finish_node();
            }
            _ => {
                self.error(format!("expected type, found {:?}", kind));
                if !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
                    self.start_node(SyntaxKind::ERROR);
                    self.bump();
                    self.finish_node();
                }
            }
        }
    }

    /// Service = 'service' IDENT ('extends' IDENT)? '{' Function* '}' Annotations?
    fn parse_service(&mut self) {
        self.start_node(SyntaxKind::SERVICE);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        if self.nth(0) == SyntaxKind::EXTENDS_KW {
            self.skip_trivia();
            self.start_node(SyntaxKind::EXTENDS);
            self.bump();
            self.skip_trivia();
            self.expect(SyntaxKind::IDENT);
            self.finish_node();
        }
        self.skip_trivia();
        if self.expect(SyntaxKind::L_BRACE) {
            self.parse_members(SyntaxKind::R_BRACE, |p| p.parse_function());
            self.expect(SyntaxKind::R_BRACE);
        }
        self.parse_annotations();
        self.finish_node();
    }

    /// Function = FunctionMode? Type IDENT '(' Field* ')' Throws? Annotations?
    fn parse_function(&mut self) {
        self.start_node(SyntaxKind::FUNCTION);
        if self.current_kind().is_function_mode() {
            self.parse_function_mode();
            self.skip_trivia();
        }
        self.parse_type();
        self.skip_trivia();
        self.expect(SyntaxKind::IDENT);
        self.skip_trivia();
        if self.expect(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::PARAM_LIST);
            self.parse_members(SyntaxKind::R_PAREN, |p| p.parse_field());
            self.finish_node();
            self.expect(SyntaxKind::R_PAREN);
        }
        if self.nth(0) == SyntaxKind::THROWS_KW {
            self.skip_trivia();
            self.start_node(SyntaxKind::THROWS);
            self.bump();
            self.skip_trivia();
            if self.expect(SyntaxKind::L_PAREN) {
                self.parse_members(SyntaxKind::R_PAREN, |p| p.parse_field());
                self.expect(SyntaxKind::R_PAREN);
            }
            self.finish_node();
        }
        self.parse_annotations();
        self.eat_separator();
        self.finish_node();
    }

    /// FunctionMode = 'oneway' | 'async' | 'event' | 'deferred' | 'property' ('get' | 'set' | 'changed')+
    fn parse_function_mode(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_MODE);
        let is_property = self.at(SyntaxKind::PROPERTY_KW);
        self.bump();
        if is_property {
            loop {
                let accessor = match self.nth_token(0) {
                    Some(t) if t.kind == SyntaxKind::IDENT => {
                        matches!(t.text, "get" | "changed")
                    }
                    // `set<...>` is the return type, not an accessor
                    Some(t) if t.kind == SyntaxKind::SET_KW => self.nth(1) != SyntaxKind::LT,
                    _ => false,
                };
                if !accessor {
                    break;
                }
                self.skip_trivia();
                self.bump();
            }
        }
        self.finish_node();
    }

    /// Annotations = '(' (IDENT ('=' LITERAL)? Separator?)* ')'
    fn parse_annotations(&mut self) {
        if self.nth(0) != SyntaxKind::L_PAREN {
            return;
        }
        self.skip_trivia();
        self.start_node(SyntaxKind::ANNOTATIONS);
        self.bump();
        self.parse_members(SyntaxKind::R_PAREN, |p| {
            if !p.eat(SyntaxKind::IDENT) {
                p.error_recover("expected annotation name", &[SyntaxKind::R_PAREN]);
                return;
            }
            if p.nth(0) == SyntaxKind::EQ {
                p.skip_trivia();
                p.bump();
                p.skip_trivia();
                p.expect(SyntaxKind::LITERAL);
            }
            p.eat_separator();
        });
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }
}
