//! Autofix support.
//!
//! Rules attach at most one [`Edit`] to each diagnostic. `merge_fixes`
//! turns those into a non-overlapping edit set, and `ByteRangeRewriter`
//! applies that set against the original text.

mod merge;
mod rewriter;

pub use merge::{merge_fixes, MergedFixes};
pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
