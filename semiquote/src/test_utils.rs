//! Helpers shared by rule tests.

use crate::analyzer::analyze_source;
use crate::config::StyleConfig;
use crate::rules::Diagnostic;

/// Checks `source` with `config` and returns the diagnostics in source order.
///
/// # Panics
///
/// Panics when `source` does not parse; rule tests only feed valid code.
#[must_use]
#[allow(clippy::panic)]
pub fn lint_with(source: &str, config: &StyleConfig) -> Vec<Diagnostic> {
    match analyze_source(source, config) {
        Ok(report) => report.diagnostics,
        Err(e) => panic!("test source does not parse: {e}\n{source}"),
    }
}

/// Applies every fix to `source` and returns the result.
///
/// # Panics
///
/// Panics when `source` does not parse.
#[must_use]
#[allow(clippy::panic)]
pub fn fix_with(source: &str, config: &StyleConfig) -> String {
    match crate::analyzer::fix_source(source, config) {
        Ok(fixed) => fixed.output,
        Err(e) => panic!("test source does not parse: {e}\n{source}"),
    }
}
