//! Merging of per-diagnostic fixes into one edit set.

use super::Edit;
use crate::rules::Diagnostic;

/// Diagnostics in source order and the edits that survived merging.
#[derive(Debug, Clone, Default)]
pub struct MergedFixes {
    /// All diagnostics, sorted by position; dropped fixes are `None`.
    pub diagnostics: Vec<Diagnostic>,
    /// Non-conflicting edits sorted by start offset.
    pub edits: Vec<Edit>,
}

/// Merges the fixes of `diagnostics`, given in registration order.
///
/// A fix is kept unless it conflicts with one kept before it (overlapping
/// ranges, or two insertions at one offset). A dropped fix leaves its
/// diagnostic reported without a fix.
#[must_use]
pub fn merge_fixes(mut diagnostics: Vec<Diagnostic>) -> MergedFixes {
    let mut edits: Vec<Edit> = Vec::new();
    for diagnostic in &mut diagnostics {
        let Some(fix) = diagnostic.fix.take() else {
            continue;
        };
        if let Some(kept) = edits.iter().find(|kept| kept.conflicts_with(&fix)) {
            tracing::debug!(
                "dropping {} fix at {}..{}: conflicts with edit at {}..{}",
                diagnostic.rule_id,
                fix.start_byte,
                fix.end_byte,
                kept.start_byte,
                kept.end_byte
            );
            continue;
        }
        edits.push(fix.clone());
        diagnostic.fix = Some(fix);
    }

    diagnostics.sort_by_key(|d| (d.start_byte, d.end_byte));
    edits.sort_by_key(|e| (e.start_byte, e.end_byte));
    MergedFixes { diagnostics, edits }
}
