//! Doc-comment association.
//!
//! Comments are grouped into runs: consecutive comment tokens on one line are
//! joined with a space, and the run is closed by a comment on another line or
//! by any content token. A declaration at line `L` claims the closest run on
//! line `L - 2` or earlier, so a comment must be separated from its
//! declaration by at least one line to attach.

use crate::syntax::{Channel, SourceToken};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CommentRun {
    line: u32,
    text: String,
}

/// Buffers comment runs and hands each out to at most one declaration.
#[derive(Debug, Default)]
pub struct CommentAssociator {
    pending: Option<CommentRun>,
    runs: Vec<CommentRun>,
}

impl CommentAssociator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a whole token stream and flushes the trailing buffer.
    pub fn from_tokens(tokens: impl IntoIterator<Item = SourceToken>) -> Self {
        let mut associator = Self::new();
        for token in tokens {
            associator.push(&token);
        }
        associator.flush();
        associator
    }

    pub fn push(&mut self, token: &SourceToken) {
        if token.is_comment() {
            match &mut self.pending {
                Some(run) if run.line == token.line => {
                    run.text.push(' ');
                    run.text.push_str(&token.text);
                }
                _ => {
                    self.flush();
                    self.pending = Some(CommentRun {
                        line: token.line,
                        text: token.text.to_string(),
                    });
                }
            }
        } else if token.channel == Channel::Content {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        let Some(run) = self.pending.take() else {
            return;
        };
        match self.runs.last_mut() {
            Some(last) if last.line == run.line => {
                last.text.push(' ');
                last.text.push_str(&run.text);
            }
            _ => self.runs.push(run),
        }
    }

    /// Removes and returns the run closest to `declaration_line` that ends at
    /// least one line above it. Returns an empty string when none qualifies.
    pub fn claim(&mut self, declaration_line: u32) -> String {
        let mut chosen = None;
        for (index, run) in self.runs.iter().enumerate() {
            if run.line > declaration_line {
                break;
            }
            if run.line + 2 <= declaration_line {
                chosen = Some(index);
            }
        }
        match chosen {
            Some(index) => self.runs.remove(index).text,
            None => String::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.runs.len()
    }
}
