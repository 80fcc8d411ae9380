//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of a Thrift IDL document (including the `package` and function-mode
//! extensions).

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (packages, declarations, fields, types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,       // `// ...` or `# ...`
    BLOCK_COMMENT,      // `/* ... */`

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier, possibly dotted (`other.Foo`)
    INTEGER,            // 42, -7
    HEX_INTEGER,        // 0x1F
    DOUBLE,             // 3.14
    LITERAL,            // "path" or 'path'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    LT,                 // <
    GT,                 // >
    COMMA,              // ,
    SEMICOLON,          // ;
    COLON,              // :
    EQ,                 // =
    STAR,               // *

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    INCLUDE_KW,
    CPP_INCLUDE_KW,
    NAMESPACE_KW,
    PACKAGE_KW,
    CONST_KW,
    TYPEDEF_KW,
    ENUM_KW,
    STRUCT_KW,
    UNION_KW,
    EXCEPTION_KW,
    SERVICE_KW,
    EXTENDS_KW,
    THROWS_KW,
    REQUIRED_KW,
    OPTIONAL_KW,
    // function modes
    ONEWAY_KW,
    ASYNC_KW,
    EVENT_KW,
    DEFERRED_KW,
    PROPERTY_KW,
    // types
    VOID_KW,
    BOOL_KW,
    BYTE_KW,
    I8_KW,
    I16_KW,
    I32_KW,
    I64_KW,
    U8_KW,
    U16_KW,
    U32_KW,
    U64_KW,
    DOUBLE_KW,
    STRING_KW,
    BINARY_KW,
    LIST_KW,
    SET_KW,
    MAP_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    DOCUMENT,
    INCLUDE,
    CPP_INCLUDE,
    NAMESPACE,
    PACKAGE,
    CONST,
    CONST_VALUE,
    TYPEDEF,
    ENUM,
    ENUM_VALUE,
    STRUCT,
    UNION,
    EXCEPTION,
    FIELD,
    FIELD_ID,
    SERVICE,
    EXTENDS,
    FUNCTION,
    FUNCTION_MODE,
    PARAM_LIST,
    THROWS,
    ANNOTATIONS,
    // type positions
    BASE_TYPE,
    NAMED_TYPE,
    SERVICE_PTR_TYPE,
    LIST_TYPE,
    SET_TYPE,
    MAP_TYPE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a comment token
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::INCLUDE_KW as u16) && (self as u16) <= (Self::MAP_KW as u16)
    }

    /// Check if this is a base type keyword (`void` included)
    pub fn is_base_type_keyword(self) -> bool {
        (self as u16) >= (Self::VOID_KW as u16) && (self as u16) <= (Self::BINARY_KW as u16)
    }

    /// Check if this node kind occupies a type position
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::BASE_TYPE
                | Self::NAMED_TYPE
                | Self::SERVICE_PTR_TYPE
                | Self::LIST_TYPE
                | Self::SET_TYPE
                | Self::MAP_TYPE
        )
    }

    /// Check if this is a function-mode keyword
    pub fn is_function_mode(self) -> bool {
        matches!(
            self,
            Self::ONEWAY_KW | Self::ASYNC_KW | Self::EVENT_KW | Self::DEFERRED_KW | Self::PROPERTY_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThriftLanguage {}

impl rowan::Language for ThriftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ThriftLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ThriftLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ThriftLanguage>;
