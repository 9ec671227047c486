//! Builder-style methods for the analyzer.

use super::Analyzer;
use crate::config::StyleConfig;

impl Analyzer {
    /// Creates a new `Analyzer` for the given rule options.
    #[must_use]
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Builder-style method to set verbose mode.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder-style method to set excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders = folders;
        self
    }

    /// Builder-style method to set the rule options.
    #[must_use]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress(mut self, progress_bar: std::sync::Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }
}
