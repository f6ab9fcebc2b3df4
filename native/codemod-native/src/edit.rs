//! Span edits against the original source text.
//!
//! The parsed tree is only used for analysis. Output is produced by splicing
//! replacement text into the untouched input, so anything outside an edited
//! range comes back byte-for-byte.

use crate::error::{Result, TransformError};
use oxc_span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct RewritePlan {
    edits: Vec<Edit>,
}

impl RewritePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push(Edit {
            start: span.start,
            end: span.end,
            text: text.into(),
        });
    }

    pub fn insert(&mut self, at: u32, text: impl Into<String>) {
        self.edits.push(Edit {
            start: at,
            end: at,
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Splices every edit into `source`.
    ///
    /// Edits are ordered by position; insertions at the same offset keep the
    /// order they were planned in. Two edits covering the same bytes are an
    /// error, since each node may be rewritten at most once.
    pub fn apply(mut self, source: &str) -> Result<String> {
        // Stable sort keeps planning order for equal keys.
        self.edits.sort_by_key(|e| (e.start, e.end));

        let mut out = String::with_capacity(source.len() + self.edits.len() * 16);
        let mut cursor = 0usize;
        for edit in &self.edits {
            let start = edit.start as usize;
            let end = edit.end as usize;
            if start < cursor || end > source.len() || start > end {
                return Err(TransformError::OverlappingEdit {
                    start: edit.start,
                    end: edit.end,
                });
            }
            out.push_str(&source[cursor..start]);
            out.push_str(&edit.text);
            cursor = end;
        }
        out.push_str(&source[cursor..]);
        Ok(out)
    }
}
