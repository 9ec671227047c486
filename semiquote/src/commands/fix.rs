//! `--fix`: rewrite files with every safe fix applied.

use crate::analyzer::{fix_source, AnalysisResult, FixedSource};
use crate::config::StyleConfig;
use crate::rules::Diagnostic;
use crate::utils::normalize_display_path;

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for the fix command.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixOptions {
    /// Dry-run mode (show what would change)
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Result of fixing one file.
#[derive(Debug, Serialize)]
pub struct FixResult {
    /// File that was fixed
    pub file: PathBuf,
    /// Number of edits applied across all passes
    pub fixes_applied: usize,
    /// Violations left after fixing
    pub remaining: Vec<Diagnostic>,
    /// Whether the file was rewritten on disk
    pub written: bool,
}

/// Applies fixes to every file of `results` that has a fixable violation.
///
/// Files are fixed and written in parallel; messages are printed afterwards
/// in path order. Files that fail to read or whose fixed text fails to
/// parse are reported and skipped.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn run_fix<W: Write>(
    results: &AnalysisResult,
    style: &StyleConfig,
    options: &FixOptions,
    mut writer: W,
) -> Result<Vec<FixResult>> {
    if options.dry_run {
        writeln!(writer, "{}", "[DRY-RUN] Fixes that would be applied:".yellow())?;
    } else if options.verbose {
        writeln!(writer, "{}", "Applying style fixes...".cyan())?;
    }

    let targets: Vec<&Path> = results
        .files
        .iter()
        .filter(|report| report.fixable_count() > 0)
        .map(|report| report.file.as_path())
        .collect();

    if targets.is_empty() {
        if options.dry_run || options.verbose {
            writeln!(writer, "  Nothing to fix.")?;
        }
        return Ok(vec![]);
    }

    let outcomes: Vec<(&Path, Result<FixResult>)> = targets
        .par_iter()
        .map(|path| (*path, fix_file(path, style, options.dry_run)))
        .collect();

    let mut all_results = Vec::with_capacity(outcomes.len());
    for (path, outcome) in outcomes {
        let display = normalize_display_path(path);
        match outcome {
            Ok(res) if options.dry_run => {
                writeln!(
                    writer,
                    "  Would apply {} fixes to {} ({} violations left)",
                    res.fixes_applied,
                    display,
                    res.remaining.len()
                )?;
                all_results.push(res);
            }
            Ok(res) => {
                if res.written {
                    writeln!(
                        writer,
                        "  {} {} ({} fixes)",
                        "Fixed:".green(),
                        display,
                        res.fixes_applied
                    )?;
                }
                all_results.push(res);
            }
            Err(e) => {
                writeln!(writer, "  {} {}: {:#}", "Skip:".yellow(), display, e)?;
            }
        }
    }

    Ok(all_results)
}

fn fix_file(path: &Path, style: &StyleConfig, dry_run: bool) -> Result<FixResult> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let FixedSource {
        output,
        fixes_applied,
        remaining,
    } = fix_source(&content, style)?;

    let written = !dry_run && fixes_applied > 0 && output != content;
    if written {
        fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!("wrote {} ({fixes_applied} fixes)", path.display());
    }

    Ok(FixResult {
        file: path.to_path_buf(),
        fixes_applied,
        remaining,
        written,
    })
}

/// Replaces the diagnostics of fixed files with what is left after fixing
/// and recomputes the summary.
///
/// In dry-run mode only `fixed` is updated; the files are unchanged, so their
/// violations still stand.
pub fn apply_fix_results(result: &mut AnalysisResult, fixes: Vec<FixResult>, dry_run: bool) {
    result.analysis_summary.fixed = fixes.iter().map(|f| f.fixes_applied).sum();
    if dry_run {
        return;
    }

    for fix in fixes {
        if let Some(report) = result.files.iter_mut().find(|r| r.file == fix.file) {
            report.diagnostics = fix.remaining;
        }
    }
    result.files.retain(|report| !report.diagnostics.is_empty());

    let summary = &mut result.analysis_summary;
    summary.files_with_violations = result.files.len();
    summary.violations = result.files.iter().map(|r| r.diagnostics.len()).sum();
    summary.fixable = result.files.iter().map(|r| r.fixable_count()).sum();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use tempfile::TempDir;

    fn analyze(dir: &TempDir) -> AnalysisResult {
        Analyzer::default()
            .analyze_paths(&[dir.path().to_path_buf()])
            .unwrap()
    }

    #[test]
    fn test_fix_rewrites_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "var a = 'b'\nfoo()\n").unwrap();

        let mut result = analyze(&dir);
        let mut out = Vec::new();
        let fixes = run_fix(
            &result,
            &StyleConfig::default(),
            &FixOptions::default(),
            &mut out,
        )
        .unwrap();

        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].fixes_applied, 3);
        assert!(fixes[0].written);
        assert_eq!(fs::read_to_string(&file).unwrap(), "var a = \"b\";\nfoo();\n");

        apply_fix_results(&mut result, fixes, false);
        assert_eq!(result.analysis_summary.fixed, 3);
        assert_eq!(result.analysis_summary.violations, 0);
        assert!(result.files.is_empty());
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "foo()\n").unwrap();

        let mut result = analyze(&dir);
        let options = FixOptions {
            dry_run: true,
            verbose: false,
        };
        let mut out = Vec::new();
        let fixes = run_fix(&result, &StyleConfig::default(), &options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("[DRY-RUN]"));
        assert!(text.contains("Would apply 1 fixes"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "foo()\n");

        apply_fix_results(&mut result, fixes, true);
        assert_eq!(result.analysis_summary.fixed, 1);
        assert_eq!(result.analysis_summary.violations, 1);
    }

    #[test]
    fn test_unfixable_violations_remain() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "`use strict`\n").unwrap();

        let mut result = analyze(&dir);
        let fixes = run_fix(
            &result,
            &StyleConfig::default(),
            &FixOptions::default(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(fixes[0].remaining.len(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "`use strict`;\n");

        apply_fix_results(&mut result, fixes, false);
        assert_eq!(result.analysis_summary.violations, 1);
        assert_eq!(result.analysis_summary.fixable, 0);
    }
}
