//! Utilities module for semiquote.
//!
//! This module provides various utility functions used across the codebase.

mod paths;

pub use paths::{collect_js_files_gitignore, is_excluded, normalize_display_path};

use crate::syntax::lexer::is_line_terminator;
use text_size::TextSize;

/// A utility struct to convert byte offsets to line and column numbers.
///
/// Tokens and edits carry byte offsets; diagnostics are reported with
/// 1-based lines and columns. LF, CRLF, CR, U+2028 and U+2029 all end a line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source for line terminators.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            if !is_line_terminator(ch) {
                continue;
            }
            if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                chars.next();
                line_starts.push(i + 2);
            } else {
                line_starts.push(i + ch.len_utf8());
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = usize::from(offset);
        // Binary search to find which line range the offset falls into.
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair; the
    /// column counts characters from the start of the line.
    #[must_use]
    pub fn line_col(&self, source: &str, offset: TextSize) -> (usize, usize) {
        let line = self.line_index(offset);
        let line_start = self.line_starts[line - 1];
        let offset = usize::from(offset).min(source.len());
        let column = source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count());
        (line, column + 1)
    }

    /// Returns true when both offsets fall on the same line.
    #[must_use]
    pub fn same_line(&self, a: TextSize, b: TextSize) -> bool {
        self.line_index(a) == self.line_index(b)
    }

    /// Number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
