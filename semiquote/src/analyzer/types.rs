//! Type definitions for analysis results.

use crate::fix::Edit;
use crate::rules::Diagnostic;
use serde::Serialize;

/// Represents a file that could not be read or parsed.
#[derive(Debug, Serialize, Clone)]
pub struct ParseError {
    /// The file where the error occurred.
    pub file: std::path::PathBuf,
    /// The error message.
    pub error: String,
    /// 1-based line of the error, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column of the error, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
}

/// Outcome of checking one source text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceReport {
    /// Violations in source order; `fix` is set where an edit survived merging.
    pub diagnostics: Vec<Diagnostic>,
    /// The surviving edits, non-overlapping and sorted by start offset.
    pub edits: Vec<Edit>,
}

impl SourceReport {
    /// Number of diagnostics that carry a fix.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable()).count()
    }
}

/// Result of iterated fixing of one source text.
#[derive(Debug, Clone)]
pub struct FixedSource {
    /// Text after all passes.
    pub output: String,
    /// Number of edits applied across all passes.
    pub fixes_applied: usize,
    /// Violations left in `output`.
    pub remaining: Vec<Diagnostic>,
}

/// Diagnostics of one file on disk.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The analysed file.
    pub file: std::path::PathBuf,
    /// Violations in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Number of diagnostics that carry a fix.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable()).count()
    }
}

/// Holds the results of the analysis.
/// This struct is serialized to JSON if requested.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// Files with at least one violation, sorted by path.
    pub files: Vec<FileReport>,
    /// Files that could not be read or parsed.
    pub parse_errors: Vec<ParseError>,
    /// Summary statistics of the analysis.
    pub analysis_summary: AnalysisSummary,
}

impl AnalysisResult {
    /// True when no violation was found and every file parsed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.analysis_summary.violations == 0 && self.parse_errors.is_empty()
    }
}

/// Summary statistics for the analysis result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSummary {
    /// Total number of files scanned.
    pub total_files: usize,
    /// Number of files with at least one violation.
    pub files_with_violations: usize,
    /// Total number of violations.
    pub violations: usize,
    /// Violations that carry a fix.
    pub fixable: usize,
    /// Edits written (or, in dry-run mode, that would be written) by `--fix`.
    pub fixed: usize,
    /// Total number of parse errors found.
    pub parse_errors_count: usize,
}
