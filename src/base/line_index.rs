//! Byte offset to line/column conversion.

use text_size::TextSize;

/// A 0-based line/column pair. Columns count bytes from the line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Start offsets of every line in a text, for offset to line/column lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
