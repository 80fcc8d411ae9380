//! Logos-based lexer for Thrift IDL
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token (trivia included), so the parser can build a
//! lossless tree.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*")]
    Ident,

    #[regex(r"[+-]?[0-9]+")]
    Integer,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInteger,

    #[regex(r"[+-]?[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?")]
    Double,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Literal,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("include")]
    Include,
    #[token("cpp_include")]
    CppInclude,
    #[token("namespace")]
    Namespace,
    #[token("package")]
    Package,
    #[token("const")]
    Const,
    #[token("typedef")]
    Typedef,
    #[token("enum")]
    Enum,
    #[token("struct")]
    Struct,
    #[token("union")]
    Union,
    #[token("exception")]
    Exception,
    #[token("service")]
    Service,
    #[token("extends")]
    Extends,
    #[token("throws")]
    Throws,
    #[token("required")]
    Required,
    #[token("optional")]
    Optional,
    #[token("oneway")]
    Oneway,
    #[token("async")]
    Async,
    #[token("event")]
    Event,
    #[token("deferred")]
    Deferred,
    #[token("property")]
    Property,
    #[token("void")]
    Void,
    #[token("bool")]
    Bool,
    #[token("byte")]
    Byte,
    #[token("i8")]
    I8,
    #[token("i16")]
    I16,
    #[token("i32")]
    I32,
    #[token("i64")]
    I64,
    #[token("u8")]
    U8,
    #[token("u16")]
    U16,
    #[token("u32")]
    U32,
    #[token("u64")]
    U64,
    #[token("double")]
    DoubleKw,
    #[token("string")]
    String,
    #[token("binary")]
    Binary,
    #[token("list")]
    List,
    #[token("set")]
    Set,
    #[token("map")]
    Map,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            HexInteger => SyntaxKind::HEX_INTEGER,
            Double => SyntaxKind::DOUBLE,
            Literal => SyntaxKind::LITERAL,

            // Punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Eq => SyntaxKind::EQ,
            Star => SyntaxKind::STAR,

            // Keywords
            Include => SyntaxKind::INCLUDE_KW,
            CppInclude => SyntaxKind::CPP_INCLUDE_KW,
            Namespace => SyntaxKind::NAMESPACE_KW,
            Package => SyntaxKind::PACKAGE_KW,
            Const => SyntaxKind::CONST_KW,
            Typedef => SyntaxKind::TYPEDEF_KW,
            Enum => SyntaxKind::ENUM_KW,
            Struct => SyntaxKind::STRUCT_KW,
            Union => SyntaxKind::UNION_KW,
            Exception => SyntaxKind::EXCEPTION_KW,
            Service => SyntaxKind::SERVICE_KW,
            Extends => SyntaxKind::EXTENDS_KW,
            Throws => SyntaxKind::THROWS_KW,
            Required => SyntaxKind::REQUIRED_KW,
            Optional => SyntaxKind::OPTIONAL_KW,
            Oneway => SyntaxKind::ONEWAY_KW,
            Async => SyntaxKind::ASYNC_KW,
            Event => SyntaxKind::EVENT_KW,
            Deferred => SyntaxKind::DEFERRED_KW,
            Property => SyntaxKind::PROPERTY_KW,
            Void => SyntaxKind::VOID_KW,
            Bool => SyntaxKind::BOOL_KW,
            Byte => SyntaxKind::BYTE_KW,
            I8 => SyntaxKind::I8_KW,
            I16 => SyntaxKind::I16_KW,
            I32 => SyntaxKind::I32_KW,
            I64 => SyntaxKind::I64_KW,
            U8 => SyntaxKind::U8_KW,
            U16 => SyntaxKind::U16_KW,
            U32 => SyntaxKind::U32_KW,
            U64 => SyntaxKind::U64_KW,
            DoubleKw => SyntaxKind::DOUBLE_KW,
            String => SyntaxKind::STRING_KW,
            Binary => SyntaxKind::BINARY_KW,
            List => SyntaxKind::LIST_KW,
            Set => SyntaxKind::SET_KW,
            Map => SyntaxKind::MAP_KW,
        }
    }
}
