//! Processing methods for the analyzer.
//!
//! Contains: `analyze_paths`, `analyze_file_list`, `process_single_file`,
//! `aggregate_results`, `analyze_code`

use super::{analyze_source, AnalysisResult, AnalysisSummary, Analyzer, FileReport, ParseError};
use crate::syntax::SyntaxError;
use crate::utils::{collect_js_files_gitignore, LineIndex};
use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files to process per chunk in parallel processing.
/// Bounds how many sources are held in memory at once on large trees.
const CHUNK_SIZE: usize = 500;

impl Analyzer {
    /// Runs the analysis on multiple paths (files or directories).
    ///
    /// An empty list analyzes the current directory. Files named directly
    /// are analyzed whatever their extension; directories are walked for
    /// `.js`, `.mjs` and `.cjs` files.
    ///
    /// # Errors
    ///
    /// Returns an error when a path does not exist.
    pub fn analyze_paths(&mut self, paths: &[PathBuf]) -> Result<AnalysisResult> {
        let default_root = [PathBuf::from(".")];
        let roots = if paths.is_empty() {
            &default_root[..]
        } else {
            paths
        };

        let mut all_files: Vec<PathBuf> = Vec::new();
        for root in roots {
            if !root.exists() {
                anyhow::bail!("the file or directory '{}' does not exist", root.display());
            }
            let (files, dirs) = collect_js_files_gitignore(root, &self.exclude_folders);
            tracing::debug!(
                "{}: {} files in {dirs} directories",
                root.display(),
                files.len()
            );
            all_files.extend(files);
        }
        all_files.sort();
        all_files.dedup();

        Ok(self.analyze_file_list(&all_files))
    }

    /// Analyzes a specific list of files.
    pub fn analyze_file_list(&mut self, files: &[PathBuf]) -> AnalysisResult {
        let total_files = files.len();
        self.total_files_analyzed = total_files;
        if let Some(pb) = &self.progress_bar {
            pb.set_length(total_files as u64);
        }

        // Each chunk is processed in parallel, then results are merged.
        let mut all_results = Vec::with_capacity(total_files);
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_results: Vec<Result<FileReport, ParseError>> = chunk
                .par_iter()
                .map(|file_path| self.process_single_file(file_path))
                .collect();
            all_results.extend(chunk_results);
        }

        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }

        aggregate_results(all_results, total_files)
    }

    /// Reads and checks one file.
    fn process_single_file(&self, file_path: &Path) -> Result<FileReport, ParseError> {
        let outcome = match fs::read_to_string(file_path) {
            Ok(source) => self.analyze_code(&source, file_path),
            Err(e) => Err(ParseError {
                file: file_path.to_path_buf(),
                error: format!("failed to read file: {e}"),
                line: None,
                col: None,
            }),
        };
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
        outcome
    }

    /// Checks source text that belongs to `file_path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for text that does not parse.
    pub fn analyze_code(&self, source: &str, file_path: &Path) -> Result<FileReport, ParseError> {
        if self.verbose {
            tracing::debug!("analyzing {}", file_path.display());
        }
        match analyze_source(source, &self.style) {
            Ok(report) => Ok(FileReport {
                file: file_path.to_path_buf(),
                diagnostics: report.diagnostics,
            }),
            Err(e) => Err(syntax_error_to_parse_error(file_path, source, &e)),
        }
    }
}

/// Positions a syntax error for reporting.
pub(crate) fn syntax_error_to_parse_error(
    file_path: &Path,
    source: &str,
    error: &SyntaxError,
) -> ParseError {
    let position = error.offset().map(|offset| {
        let offset = text_size::TextSize::try_from(offset.min(source.len())).unwrap_or_default();
        LineIndex::new(source).line_col(source, offset)
    });
    ParseError {
        file: file_path.to_path_buf(),
        error: error.to_string(),
        line: position.map(|(line, _)| line),
        col: position.map(|(_, col)| col),
    }
}

fn aggregate_results(
    results: Vec<Result<FileReport, ParseError>>,
    total_files: usize,
) -> AnalysisResult {
    let mut files = Vec::new();
    let mut parse_errors = Vec::new();
    let mut summary = AnalysisSummary {
        total_files,
        ..AnalysisSummary::default()
    };

    for result in results {
        match result {
            Ok(report) if report.diagnostics.is_empty() => {}
            Ok(report) => {
                summary.files_with_violations += 1;
                summary.violations += report.diagnostics.len();
                summary.fixable += report.fixable_count();
                files.push(report);
            }
            Err(error) => parse_errors.push(error),
        }
    }
    summary.parse_errors_count = parse_errors.len();

    AnalysisResult {
        files,
        parse_errors,
        analysis_summary: summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_analyze_paths_reports_violations_and_parse_errors() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("clean.js"), "var a = \"b\";\n")?;
        fs::write(dir.path().join("dirty.js"), "var a = 'b'\n")?;
        fs::write(dir.path().join("broken.js"), "var a = (;\n")?;

        let mut analyzer = Analyzer::default();
        let result = analyzer.analyze_paths(&[dir.path().to_path_buf()])?;

        assert_eq!(result.analysis_summary.total_files, 3);
        assert_eq!(result.analysis_summary.files_with_violations, 1);
        assert_eq!(result.analysis_summary.violations, 2);
        assert_eq!(result.analysis_summary.fixable, 2);
        assert_eq!(result.parse_errors.len(), 1);
        assert_eq!(result.parse_errors[0].line, Some(1));
        assert!(!result.is_clean());
        Ok(())
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let mut analyzer = Analyzer::default();
        assert!(analyzer
            .analyze_paths(&[PathBuf::from("does/not/exist.js")])
            .is_err());
    }

    #[test]
    fn test_many_files_across_chunks() -> anyhow::Result<()> {
        let dir = tempdir()?;
        for i in 0..(CHUNK_SIZE + 3) {
            fs::write(dir.path().join(format!("f{i}.js")), "a()\n")?;
        }
        let mut analyzer = Analyzer::default();
        let result = analyzer.analyze_paths(&[dir.path().to_path_buf()])?;
        assert_eq!(result.analysis_summary.total_files, CHUNK_SIZE + 3);
        assert_eq!(result.analysis_summary.violations, CHUNK_SIZE + 3);
        Ok(())
    }
}
