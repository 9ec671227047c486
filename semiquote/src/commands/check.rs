//! Report printing and exit status for a finished analysis.

use crate::analyzer::AnalysisResult;
use anyhow::Result;
use std::io::Write;

/// Options for reporting an analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckOptions {
    /// Emit JSON instead of text.
    pub json: bool,
    /// Print only the one-line summary.
    pub quiet: bool,
}

/// Prints `result` and returns the process exit code: 0 when clean, 1 when
/// violations remain or a file failed to parse.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn run_check<W: Write>(
    result: &AnalysisResult,
    options: &CheckOptions,
    writer: &mut W,
) -> Result<i32> {
    if options.json {
        crate::output::print_json(writer, result)?;
    } else if options.quiet {
        crate::output::print_report_quiet(writer, result)?;
    } else {
        crate::output::print_report(writer, result)?;
    }
    writer.flush()?;

    Ok(i32::from(!result.is_clean()))
}
