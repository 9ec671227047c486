//! Core library for the semiquote style checker.
//!
//! This library checks and fixes the quote style of string and template
//! literals and the semicolons that end statements and class fields in
//! JavaScript source, including tokenizing, parsing and rule execution.

#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the core analyzer logic.
/// This includes the `Analyzer` struct and the single-source pipeline.
pub mod analyzer;

/// Module for loading configuration.
pub mod config;

/// Module containing test utilities.
/// This helps in writing tests for the analyzer and rules.
pub mod test_utils;

/// Module containing the style rules and the data they exchange with the walker.
pub mod rules;

/// Module containing utility functions.
/// This includes line indexing and file discovery.
pub mod utils;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module containing shared constants and regex patterns.
pub mod constants;
/// Module containing the linter logic and visitor.
pub mod linter;

/// Module for rich CLI output formatting with colored text and spinners.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for merging and applying byte-range fixes.
pub mod fix;

/// Tokenizer and parser for ECMAScript source.
pub mod syntax;
