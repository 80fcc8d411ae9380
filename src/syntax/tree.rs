//! Tree-node abstraction and its rowan-backed implementation.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::parser::{self, Parse, SyntaxElement, SyntaxError, SyntaxKind};

/// A node of a parsed IDL document, as seen by the model builder.
///
/// Children exclude trivia (whitespace and comments). Lines and columns are
/// 0-based.
pub trait TreeNode: Clone {
    fn kind(&self) -> SyntaxKind;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;

    fn line(&self) -> u32;

    fn column(&self) -> u32;

    /// Source text of the node without trivia.
    fn text(&self) -> String;

    fn children(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.child_count()).filter_map(move |index| self.child(index))
    }

    fn first_child_of(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().find(|child| child.kind() == kind)
    }
}

/// Which channel a token travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Tokens the grammar consumes.
    Content,
    /// Whitespace and comments.
    Hidden,
}

/// One token of the source stream, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken {
    pub kind: SyntaxKind,
    pub channel: Channel,
    pub line: u32,
    pub text: SmolStr,
}

impl SourceToken {
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }
}

/// A parsed document: the CST plus the line index needed for positions.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    parse: Parse,
    line_index: Arc<LineIndex>,
}

impl SyntaxTree {
    pub fn parse(text: &str) -> Self {
        Self {
            parse: parser::parse(text),
            line_index: Arc::new(LineIndex::new(text)),
        }
    }

    pub fn root(&self) -> CstNode {
        CstNode {
            element: SyntaxElement::Node(self.parse.syntax()),
            line_index: Arc::clone(&self.line_index),
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.ok()
    }

    /// Every token of the document in source order, trivia included.
    pub fn tokens(&self) -> impl Iterator<Item = SourceToken> + '_ {
        self.parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .map(|token| {
                let kind = token.kind();
                SourceToken {
                    kind,
                    channel: if kind.is_trivia() {
                        Channel::Hidden
                    } else {
                        Channel::Content
                    },
                    line: self.line_index.line_col(token.text_range().start()).line,
                    text: SmolStr::new(token.text()),
                }
            })
    }
}

/// [`TreeNode`] over a rowan element (node or token).
#[derive(Debug, Clone)]
pub struct CstNode {
    element: SyntaxElement,
    line_index: Arc<LineIndex>,
}

impl CstNode {
    fn significant_children(&self) -> impl Iterator<Item = SyntaxElement> + use<> {
        let children = match &self.element {
            SyntaxElement::Node(node) => Some(node.children_with_tokens()),
            SyntaxElement::Token(_) => None,
        };
        children
            .into_iter()
            .flatten()
            .filter(|element| !element.kind().is_trivia())
    }

    fn start_offset(&self) -> rowan::TextSize {
        match &self.element {
            SyntaxElement::Token(token) => token.text_range().start(),
            SyntaxElement::Node(node) => node
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| !token.kind().is_trivia())
                .map(|token| token.text_range().start())
                .unwrap_or_else(|| node.text_range().start()),
        }
    }
}

impl TreeNode for CstNode {
    fn kind(&self) -> SyntaxKind {
        self.element.kind()
    }

    fn child_count(&self) -> usize {
        self.significant_children().count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.significant_children()
            .nth(index)
            .map(|element| CstNode {
                element,
                line_index: Arc::clone(&self.line_index),
            })
    }

    fn line(&self) -> u32 {
        self.line_index.line_col(self.start_offset()).line
    }

    fn column(&self) -> u32 {
        self.line_index.line_col(self.start_offset()).col
    }

    fn text(&self) -> String {
        match &self.element {
            SyntaxElement::Token(token) => token.text().to_string(),
            SyntaxElement::Node(node) => node
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|token| !token.kind().is_trivia())
                .map(|token| token.text().to_string())
                .collect(),
        }
    }
}
