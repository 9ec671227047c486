use crate::analyzer::{AnalysisResult, AnalysisSummary, FileReport};
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
    let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
    sorted_defaults.sort_unstable();
    if folders.is_empty() {
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Create and return a spinner for file discovery (used when file count is unknown).
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_spinner() -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("semiquote checking your code…");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn count_cell(count: usize, bad: Color) -> Cell {
    let cell = Cell::new(count);
    if count == 0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(bad).add_attribute(Attribute::Bold)
    }
}

/// Print the violations of one file, one per line, as `file:line:col`.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_report(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    let file = normalize_display_path(&report.file);
    for d in &report.diagnostics {
        let location = format!("{file}:{}:{}", d.line, d.col);
        let marker = if d.is_fixable() {
            " (fixable)".cyan().to_string()
        } else {
            String::new()
        };
        writeln!(
            writer,
            "{}: {} {}{}",
            location.bold(),
            d.message,
            format!("[{}]", d.rule_id).dimmed(),
            marker
        )?;
    }
    Ok(())
}

/// Print the files that could not be read or parsed.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_parse_errors(
    writer: &mut impl Write,
    errors: &[crate::analyzer::ParseError],
) -> std::io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", "Parse Errors".bold().underline().red())?;

    let mut table = create_table(vec!["File", "Location", "Error"]);

    for e in errors {
        let location = match (e.line, e.col) {
            (Some(line), Some(col)) => format!("{line}:{col}"),
            _ => "-".to_owned(),
        };
        table.add_row(vec![
            Cell::new(normalize_display_path(&e.file)).add_attribute(Attribute::Bold),
            Cell::new(location),
            Cell::new(&e.error).fg(Color::Red),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the summary table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(writer: &mut impl Write, summary: &AnalysisSummary) -> std::io::Result<()> {
    let mut table = create_table(vec![
        "Files",
        "With violations",
        "Violations",
        "Fixable",
        "Fixed",
        "Parse errors",
    ]);
    table.add_row(vec![
        Cell::new(summary.total_files),
        count_cell(summary.files_with_violations, Color::Yellow),
        count_cell(summary.violations, Color::Red),
        Cell::new(summary.fixable).fg(Color::Cyan),
        Cell::new(summary.fixed).fg(Color::Green),
        count_cell(summary.parse_errors_count, Color::Red),
    ]);
    writeln!(writer, "\n{table}")?;
    Ok(())
}

/// Print the full report: every violation, parse errors, then the summary.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    if result.is_clean() {
        writeln!(writer, "{}", "✓ All clean! No style violations found.".green())?;
        return print_summary(writer, &result.analysis_summary);
    }

    for report in &result.files {
        print_file_report(writer, report)?;
    }
    print_parse_errors(writer, &result.parse_errors)?;
    print_summary(writer, &result.analysis_summary)
}

/// Print the one-line recap used by `--quiet`.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report_quiet(writer: &mut impl Write, result: &AnalysisResult) -> std::io::Result<()> {
    let s = &result.analysis_summary;
    writeln!(
        writer,
        "[SUMMARY] {} violations ({} fixable) in {} of {} files, {} parse errors",
        s.violations, s.fixable, s.files_with_violations, s.total_files, s.parse_errors_count
    )
}

/// Print the analysis result as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(writer: &mut impl Write, result: &AnalysisResult) -> anyhow::Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(result)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_source, ParseError};
    use crate::config::StyleConfig;
    use std::path::PathBuf;

    fn sample() -> AnalysisResult {
        let report = analyze_source("var a = 'b'", &StyleConfig::default()).unwrap();
        AnalysisResult {
            files: vec![FileReport {
                file: PathBuf::from("src/a.js"),
                diagnostics: report.diagnostics,
            }],
            parse_errors: vec![ParseError {
                file: PathBuf::from("src/b.js"),
                error: "unexpected end of input, expected expression".to_owned(),
                line: Some(3),
                col: Some(7),
            }],
            analysis_summary: AnalysisSummary {
                total_files: 2,
                files_with_violations: 1,
                violations: 2,
                fixable: 2,
                fixed: 0,
                parse_errors_count: 1,
            },
        }
    }

    #[test]
    fn test_report_lists_locations() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        print_report(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("src/a.js:1:9: Strings must use doublequote. [quotes] (fixable)"));
        assert!(text.contains("src/a.js:1:12: Missing semicolon. [semi] (fixable)"));
        assert!(text.contains("Parse Errors"));
        assert!(text.contains("3:7"));
    }

    #[test]
    fn test_quiet_report() {
        let mut buffer = Vec::new();
        print_report_quiet(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "[SUMMARY] 2 violations (2 fixable) in 1 of 2 files, 1 parse errors\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        print_json(&mut buffer, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["analysis_summary"]["violations"], 2);
        assert_eq!(value["files"][0]["diagnostics"][0]["message_id"], "wrongQuotes");
        assert_eq!(value["files"][0]["diagnostics"][1]["fix"]["replacement"], ";");
    }

    #[test]
    fn test_spinner_hidden_in_tests() {
        assert!(create_spinner().is_hidden());
    }
}
