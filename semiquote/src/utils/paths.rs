//! Path utilities for semiquote.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - JavaScript file discovery with gitignore support

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, JS_EXTENSIONS};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use semiquote::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\index.js")), "src/index.js");
/// assert_eq!(normalize_display_path(Path::new("./lib/util.mjs")), "lib/util.mjs");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

fn has_js_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| JS_EXTENSIONS.contains(&ext))
}

/// Collects JavaScript files (`.js`, `.mjs`, `.cjs`) under `root`.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude and the
/// global gitignore in addition to the default exclusions (`node_modules`,
/// `dist`, `coverage`, ...). A `root` that is itself a file is returned as
/// is, whatever its extension.
///
/// Returns the files found, sorted, and the number of directories visited.
#[must_use]
pub fn collect_js_files_gitignore(
    root: &std::path::Path,
    exclude: &[String],
) -> (Vec<std::path::PathBuf>, usize) {
    use ignore::WalkBuilder;

    if root.is_file() {
        return (vec![root.to_path_buf()], 0);
    }

    let all_excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    // filter_entry prunes excluded directories before descending into them.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if has_js_extension(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => tracing::debug!("walk error: {e}"),
        }
    }

    files.sort();
    (files, dir_count)
}
