//! Single source analysis logic.
//!
//! Both entry points are pure functions of the text and the style
//! configuration; the multi-file driver runs them in parallel.

use super::types::{FixedSource, SourceReport};
use crate::config::StyleConfig;
use crate::fix::{merge_fixes, ByteRangeRewriter};
use crate::linter::LinterVisitor;
use crate::rules::{get_rules, Context};
use crate::syntax::{parse, SyntaxError};
use crate::utils::LineIndex;

/// Upper bound on fix-then-recheck rounds for one text.
pub const MAX_FIX_PASSES: usize = 10;

/// Parses `source` and runs every enabled rule over it.
///
/// # Errors
///
/// Returns the [`SyntaxError`] of a source that does not parse; such a
/// source is never partially checked.
pub fn analyze_source(source: &str, config: &StyleConfig) -> Result<SourceReport, SyntaxError> {
    let parsed = parse(source)?;
    let line_index = LineIndex::new(source);
    let context = Context {
        source,
        tokens: &parsed.tokens,
        line_index: &line_index,
        arrow_body_ends: &parsed.arrow_body_ends,
    };

    let mut visitor = LinterVisitor::new(get_rules(config), context);
    visitor.visit_program(&parsed.program);

    let merged = merge_fixes(visitor.diagnostics);
    Ok(SourceReport {
        diagnostics: merged.diagnostics,
        edits: merged.edits,
    })
}

/// Applies fixes to `source` until nothing fixable is left.
///
/// Each pass applies the merged edit set of a fresh analysis; fixes dropped
/// for overlapping an earlier one are picked up by the next pass. A pass
/// whose output would not parse is discarded.
///
/// # Errors
///
/// Returns the [`SyntaxError`] of an input that does not parse.
pub fn fix_source(source: &str, config: &StyleConfig) -> Result<FixedSource, SyntaxError> {
    let mut report = analyze_source(source, config)?;
    let mut output = source.to_owned();
    let mut fixes_applied = 0;

    for pass in 1..=MAX_FIX_PASSES {
        if report.edits.is_empty() {
            break;
        }
        let count = report.edits.len();
        let mut rewriter = ByteRangeRewriter::new(output.as_str());
        rewriter.add_edits(std::mem::take(&mut report.edits));
        let candidate = match rewriter.apply() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("fix pass {pass} rejected: {e}");
                break;
            }
        };
        match analyze_source(&candidate, config) {
            Ok(next) => {
                tracing::debug!("fix pass {pass} applied {count} edits");
                output = candidate;
                fixes_applied += count;
                report = next;
            }
            Err(e) => {
                tracing::warn!("fix pass {pass} produced unparsable text ({e}); keeping previous pass");
                break;
            }
        }
    }

    Ok(FixedSource {
        output,
        fixes_applied,
        remaining: report.diagnostics,
    })
}
