//! Byte-range safe code rewriter.
//!
//! Every edit is expressed against the original text. Edits are applied
//! back to front so earlier offsets stay valid while later ones change.
//!
//! # Usage
//!
//! ```
//! use semiquote::fix::{ByteRangeRewriter, Edit};
//!
//! let source = "var foo = 'bar'";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::new(10, 15, "\"bar\""));
//! rewriter.add_edit(Edit::insert(15, ";"));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "var foo = \"bar\";");
//! ```

use serde::Serialize;
use text_size::TextRange;

/// A single text replacement over the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional description for logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: None,
        }
    }

    /// Replace the text covered by `range`.
    #[must_use]
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self::new(
            usize::from(range.start()),
            usize::from(range.end()),
            replacement,
        )
    }

    /// Attach a description shown in debug logs.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Create a deletion edit
    #[must_use]
    pub fn delete(start_byte: usize, end_byte: usize) -> Self {
        Self::new(start_byte, end_byte, "")
    }

    /// Create an insertion edit (insert before position)
    #[must_use]
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self::new(position, position, content)
    }

    /// Length of the range being replaced
    #[must_use]
    pub const fn range_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// True for a pure insertion.
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        self.start_byte == self.end_byte
    }

    /// Check if the replaced ranges share at least one byte
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    /// Two edits conflict when they overlap or when both insert at the same
    /// offset (their relative order would be ambiguous). Edits that merely
    /// touch do not conflict.
    #[must_use]
    pub const fn conflicts_with(&self, other: &Self) -> bool {
        self.overlaps(other)
            || (self.is_insertion() && other.is_insertion() && self.start_byte == other.start_byte)
    }
}

/// Why a set of edits could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two edits conflict.
    #[error("edits {edit_a} and {edit_b} overlap")]
    OverlappingEdits {
        /// Index of the first edit.
        edit_a: usize,
        /// Index of the second edit.
        edit_b: usize,
    },
    /// Edit range is out of bounds or reversed.
    #[error("edit {edit_index} out of bounds: end {end_byte} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit.
        edit_index: usize,
        /// End byte of the edit.
        end_byte: usize,
        /// Length of the source.
        source_len: usize,
    },
    /// Edit boundary falls inside a multi-byte character.
    #[error("edit {edit_index} splits a character at byte {offset}")]
    NotCharBoundary {
        /// Index of the bad edit.
        edit_index: usize,
        /// Offending byte offset.
        offset: usize,
    },
}

/// Safe code rewriter using byte ranges
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    /// Original source code
    source: String,
    /// Pending edits
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits conflict, are out of bounds or split a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.end_byte > self.source.len() || edit.start_byte > edit.end_byte {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
            for offset in [edit.start_byte, edit.end_byte] {
                if !self.source.is_char_boundary(offset) {
                    return Err(RewriteError::NotCharBoundary {
                        edit_index: i,
                        offset,
                    });
                }
            }
        }

        // Sorted by start, a conflict can only occur between neighbours.
        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by_key(|&i| (self.edits[i].start_byte, self.edits[i].end_byte));
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if self.edits[a].conflicts_with(&self.edits[b]) {
                return Err(RewriteError::OverlappingEdits {
                    edit_a: a.min(b),
                    edit_b: a.max(b),
                });
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// Edits are applied from the end of the file towards the start. For
    /// equal starts the longer edit goes first, so an insertion at the start
    /// of a replaced range ends up in front of the replacement.
    ///
    /// # Errors
    /// Returns error if edits conflict or are out of bounds
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;
        sorted_edits.sort_by(|a, b| {
            b.start_byte
                .cmp(&a.start_byte)
                .then(b.end_byte.cmp(&a.end_byte))
        });

        for edit in sorted_edits {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requote_and_insert_semicolon() {
        let source = "var foo = 'bar'";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(10, 15, "\"bar\""));
        rewriter.add_edit(Edit::insert(15, ";"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "var foo = \"bar\";");
    }

    #[test]
    fn test_remove_semicolons() {
        let source = "a();\nb();\n";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::delete(3, 4));
        rewriter.add_edit(Edit::delete(8, 9));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "a()\nb()\n");
    }

    #[test]
    fn test_overlapping_edits_error() {
        let source = "var foo = 'bar';";
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edit(Edit::new(10, 15, "`bar`"));
        rewriter.add_edit(Edit::new(14, 16, ""));

        let result = rewriter.apply();
        assert!(matches!(
            result,
            Err(RewriteError::OverlappingEdits { edit_a: 0, edit_b: 1 })
        ));
    }

    #[test]
    fn test_double_insertion_conflicts() {
        let mut rewriter = ByteRangeRewriter::new("a()");
        rewriter.add_edit(Edit::insert(3, ";"));
        rewriter.add_edit(Edit::insert(3, ";"));
        assert!(rewriter.validate().is_err());
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut rewriter = ByteRangeRewriter::new("a()");
        rewriter.add_edit(Edit::insert(10, ";"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_char_boundary_error() {
        let mut rewriter = ByteRangeRewriter::new("'é'");
        rewriter.add_edit(Edit::new(0, 2, "\""));
        assert!(matches!(
            rewriter.validate(),
            Err(RewriteError::NotCharBoundary { offset: 2, .. })
        ));
    }

    #[test]
    fn test_insertion_before_replacement_at_same_start() {
        let mut rewriter = ByteRangeRewriter::new("x 'a'");
        rewriter.add_edit(Edit::new(2, 5, "\"a\""));
        rewriter.add_edit(Edit::insert(2, "; "));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "x ; \"a\"");
    }

    #[test]
    fn test_touching_edits_apply() {
        let mut rewriter = ByteRangeRewriter::new("'a';");
        rewriter.add_edit(Edit::new(0, 3, "\"a\""));
        rewriter.add_edit(Edit::delete(3, 4));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "\"a\"");
    }

    #[test]
    fn test_empty_edits() {
        let source = "foo()";
        let rewriter = ByteRangeRewriter::new(source);
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, source);
    }

    #[test]
    fn test_conflicts_with() {
        let replace = Edit::new(2, 5, "x");
        assert!(replace.conflicts_with(&Edit::new(4, 6, "y")));
        assert!(!replace.conflicts_with(&Edit::insert(5, ";")));
        assert!(!replace.conflicts_with(&Edit::insert(2, ";")));
        assert!(Edit::insert(5, ";").conflicts_with(&Edit::insert(5, ";")));
        assert!(replace.conflicts_with(&Edit::insert(3, ";")));
    }
}
