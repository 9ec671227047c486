use crate::config::{
    AllowTemplateLiterals, ContinuationChars, QuoteStyle, QuotesSection, SemiMode, SemiSection,
    SemiquoteConfig,
};
use crate::rules::ids::ALL_RULE_IDS;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.semiquote.toml):
  Create this file in your project root to set defaults.
  A \"semiquote\" object in package.json is read the same way.

  [semiquote]
  exclude_folders = [\"vendor\"]   # Skipped on top of node_modules, dist, ...
  ignore = [\"semi\"]              # Disable rules by id

  [semiquote.quotes]
  style = \"single\"               # single | double | backtick
  avoid_escape = true
  allow_template_literals = \"avoidEscape\"   # true | false | always | never | avoidEscape
  ignore_string_literals = false

  [semiquote.semi]
  mode = \"never\"                 # always | never
  omit_last_in_one_line_block = false
  omit_last_in_one_line_class_body = false
  before_statement_continuation_chars = \"any\"   # always | any | never

  Command line flags override the file, option by option.
";

/// Options of the `quotes` rule.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct QuoteArgs {
    /// Quote style for string literals.
    #[arg(long, value_enum)]
    pub quotes: Option<QuoteStyle>,

    /// Allow the other quote style when it avoids escaping.
    #[arg(long)]
    pub avoid_escape: bool,

    /// When template literals without substitutions are accepted.
    #[arg(long, value_enum)]
    pub allow_template_literals: Option<AllowTemplateLiterals>,

    /// Leave plain string literals alone (ignored with `--quotes backtick`).
    #[arg(long)]
    pub ignore_string_literals: bool,
}

/// Options of the `semi` rule.
#[derive(Args, Debug, Default, Clone)]
pub struct SemiArgs {
    /// Require or disallow semicolons.
    #[arg(long, value_enum)]
    pub semi: Option<SemiMode>,

    /// With `--semi never`, how to treat a semicolon before a line that starts
    /// with `[`, `(`, `/`, `+`, `-` or a backtick.
    #[arg(long, value_enum)]
    pub before_statement_continuation_chars: Option<ContinuationChars>,

    /// With `--semi always`, drop the last semicolon of a one-line block.
    #[arg(long)]
    pub omit_last_in_one_line_block: bool,

    /// With `--semi always`, drop the last semicolon of a one-line class body.
    #[arg(long)]
    pub omit_last_in_one_line_class_body: bool,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being analyzed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    name = "semiquote",
    author,
    version,
    about = "semiquote - quote and semicolon style checker and fixer for JavaScript",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Files or directories to check.
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Rewrite files with every safe fix applied.
    #[arg(long)]
    pub fix: bool,

    /// With --fix, report what would change without writing.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,

    /// Quote rule options.
    #[command(flatten)]
    pub quote_args: QuoteArgs,

    /// Semicolon rule options.
    #[command(flatten)]
    pub semi_args: SemiArgs,

    /// Disable a rule by id.
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(ALL_RULE_IDS.iter().copied()))]
    pub disable: Vec<String>,

    /// Folders to exclude from analysis.
    #[arg(long, alias = "exclude-folder")]
    pub exclude: Vec<String>,

    /// Configuration file to use instead of discovering one.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}

impl Cli {
    /// Overlays the command line rule options on a file configuration.
    pub fn apply_overrides(&self, config: &mut SemiquoteConfig) {
        let quotes = config.quotes.get_or_insert_with(QuotesSection::default);
        let q = &self.quote_args;
        if q.quotes.is_some() {
            quotes.style = q.quotes;
        }
        if q.avoid_escape {
            quotes.avoid_escape = Some(true);
        }
        if q.allow_template_literals.is_some() {
            quotes.allow_template_literals = q.allow_template_literals;
        }
        if q.ignore_string_literals {
            quotes.ignore_string_literals = Some(true);
        }

        let semi = config.semi.get_or_insert_with(SemiSection::default);
        let s = &self.semi_args;
        if s.semi.is_some() {
            semi.mode = s.semi;
        }
        if s.before_statement_continuation_chars.is_some() {
            semi.before_statement_continuation_chars = s.before_statement_continuation_chars;
        }
        if s.omit_last_in_one_line_block {
            semi.omit_last_in_one_line_block = Some(true);
        }
        if s.omit_last_in_one_line_class_body {
            semi.omit_last_in_one_line_class_body = Some(true);
        }

        if !self.disable.is_empty() {
            config
                .ignore
                .get_or_insert_with(Vec::new)
                .extend(self.disable.iter().cloned());
        }
        config
            .exclude_folders
            .get_or_insert_with(Vec::new)
            .extend(self.exclude.iter().cloned());
    }
}
