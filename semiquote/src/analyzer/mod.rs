//! semiquote analyzer module.
//!
//! This module contains the analysis engine, broken down into:
//! - `types`: Result types (`AnalysisResult`, `ParseError`, `AnalysisSummary`)
//! - `single_file`: the pure per-source pipeline (`analyze_source`, `fix_source`)
//! - `processing`: file discovery, parallel processing and aggregation
//! - Core `Analyzer` struct and implementation

mod builder;
mod processing;
mod single_file;
/// Result types and analysis summaries.
pub mod types;

// Re-export types for public API
pub use single_file::{analyze_source, fix_source, MAX_FIX_PASSES};
pub use types::{
    AnalysisResult, AnalysisSummary, FileReport, FixedSource, ParseError, SourceReport,
};

use crate::config::StyleConfig;

/// The multi-file analyzer.
/// Configuration options for the analysis are stored here.
pub struct Analyzer {
    /// Resolved rule options.
    pub style: StyleConfig,
    /// Folders to exclude from analysis, on top of the defaults.
    pub exclude_folders: Vec<String>,
    /// Total number of files analyzed.
    pub total_files_analyzed: usize,
    /// Progress bar for tracking analysis progress (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
    /// Whether to enable verbose logging.
    pub verbose: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            exclude_folders: Vec::new(),
            total_files_analyzed: 0,
            progress_bar: None,
            verbose: false,
        }
    }
}
