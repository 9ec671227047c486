//! Commands module - CLI command implementations.
//!
//! `check` prints a finished analysis; `fix` rewrites files before that.

mod check;
mod fix;

// Re-export all public items
pub use check::{run_check, CheckOptions};
pub use fix::{apply_fix_results, run_fix, FixOptions, FixResult};
