//! Declaration metadata shared by every declared entity.

use indexmap::IndexMap;

use crate::base::Position;

/// Source position plus the metadata extracted from the attached doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclInfo {
    pub position: Position,
    /// Raw text of the claimed comment run, empty when none was attached.
    pub comment: String,
    /// Dotted numeric literal following `@version`.
    pub version: Option<String>,
    pub deprecated: bool,
    /// `@word rest-of-line` entries; a repeated word keeps the last value.
    pub annotations: IndexMap<String, String>,
}

impl DeclInfo {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }
}
