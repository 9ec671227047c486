use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, PACKAGE_JSON_KEY};
use crate::rules::ids::{RULE_ID_QUOTES, RULE_ID_SEMI};

/// Quote character a string must use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `'...'`
    Single,
    /// `"..."`
    #[default]
    Double,
    /// `` `...` ``
    Backtick,
}

impl QuoteStyle {
    /// The delimiter character.
    #[must_use]
    pub const fn quote_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Backtick => '`',
        }
    }

    /// Name used in the `wrongQuotes` message.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Single => "singlequote",
            Self::Double => "doublequote",
            Self::Backtick => "backtick",
        }
    }

    /// Style of a raw string or template literal, from its first character.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.chars().next()? {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            '`' => Some(Self::Backtick),
            _ => None,
        }
    }
}

/// When a template literal without substitutions may stay a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(try_from = "AllowTemplateLiteralsRepr", rename_all = "camelCase")]
pub enum AllowTemplateLiterals {
    /// Every template is accepted (`true` in a configuration file).
    Always,
    /// Templates are converted like strings (`false` in a configuration file).
    #[default]
    Never,
    /// Templates are accepted when converting them would need escaping.
    #[value(alias = "avoidEscape")]
    AvoidEscape,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AllowTemplateLiteralsRepr {
    Flag(bool),
    Name(String),
}

impl TryFrom<AllowTemplateLiteralsRepr> for AllowTemplateLiterals {
    type Error = String;

    fn try_from(value: AllowTemplateLiteralsRepr) -> Result<Self, Self::Error> {
        match value {
            AllowTemplateLiteralsRepr::Flag(true) => Ok(Self::Always),
            AllowTemplateLiteralsRepr::Flag(false) => Ok(Self::Never),
            AllowTemplateLiteralsRepr::Name(name) => match name.as_str() {
                "always" => Ok(Self::Always),
                "never" => Ok(Self::Never),
                "avoidEscape" | "avoid-escape" => Ok(Self::AvoidEscape),
                other => Err(format!(
                    "invalid allowTemplateLiterals value `{other}`, expected true, false, \"always\", \"never\" or \"avoidEscape\""
                )),
            },
        }
    }
}

/// Whether statements end with a semicolon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SemiMode {
    /// Every statement ends with `;`.
    #[default]
    Always,
    /// Semicolons are omitted wherever that is safe.
    Never,
}

/// Semicolon policy in `never` mode before a line starting with `(`, `[`,
/// `` ` ``, `+`, `-` or `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContinuationChars {
    /// A `;` is required there.
    Always,
    /// Existing semicolons there are left alone.
    #[default]
    Any,
    /// A `;` there is removed unless the previous statement could continue.
    Never,
}

/// Resolved options of the `quotes` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QuoteOptions {
    /// Target quote style.
    pub style: QuoteStyle,
    /// Keep a literal whose content would need escaping in the target style.
    pub avoid_escape: bool,
    /// Policy for templates without substitutions.
    pub allow_template_literals: AllowTemplateLiterals,
    /// Skip plain string literals (single/double targets only).
    pub ignore_string_literals: bool,
}

/// Resolved options of the `semi` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SemiOptions {
    /// Always or never.
    pub mode: SemiMode,
    /// In `always` mode, drop the `;` of the last statement of a one-line block.
    pub omit_last_in_one_line_block: bool,
    /// In `always` mode, drop the `;` of the last field of a one-line class body.
    pub omit_last_in_one_line_class_body: bool,
    /// Policy before hazardous continuation characters in `never` mode.
    pub before_statement_continuation_chars: ContinuationChars,
}

/// Immutable configuration for one run. A `None` rule is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleConfig {
    /// `quotes` rule options.
    pub quotes: Option<QuoteOptions>,
    /// `semi` rule options.
    pub semi: Option<SemiOptions>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            quotes: Some(QuoteOptions::default()),
            semi: Some(SemiOptions::default()),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
/// `[semiquote.quotes]` as written in a configuration file.
pub struct QuotesSection {
    /// `single`, `double` or `backtick`.
    pub style: Option<QuoteStyle>,
    /// See [`QuoteOptions::avoid_escape`].
    #[serde(alias = "avoidEscape")]
    pub avoid_escape: Option<bool>,
    /// See [`QuoteOptions::allow_template_literals`].
    #[serde(alias = "allowTemplateLiterals")]
    pub allow_template_literals: Option<AllowTemplateLiterals>,
    /// See [`QuoteOptions::ignore_string_literals`].
    #[serde(alias = "ignoreStringLiterals")]
    pub ignore_string_literals: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// `[semiquote.semi]` as written in a configuration file.
pub struct SemiSection {
    /// `always` or `never`.
    pub mode: Option<SemiMode>,
    /// See [`SemiOptions::omit_last_in_one_line_block`].
    #[serde(alias = "omitLastInOneLineBlock")]
    pub omit_last_in_one_line_block: Option<bool>,
    /// See [`SemiOptions::omit_last_in_one_line_class_body`].
    #[serde(alias = "omitLastInOneLineClassBody")]
    pub omit_last_in_one_line_class_body: Option<bool>,
    /// See [`SemiOptions::before_statement_continuation_chars`].
    #[serde(alias = "beforeStatementContinuationChars")]
    pub before_statement_continuation_chars: Option<ContinuationChars>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for semiquote.
pub struct SemiquoteConfig {
    /// List of folders to exclude.
    #[serde(alias = "excludeFolders")]
    pub exclude_folders: Option<Vec<String>>,
    /// Rule ids to disable (`quotes`, `semi`).
    pub ignore: Option<Vec<String>>,
    /// Quote rule options.
    pub quotes: Option<QuotesSection>,
    /// Semicolon rule options.
    pub semi: Option<SemiSection>,
}

impl SemiquoteConfig {
    fn is_ignored(&self, rule_id: &str) -> bool {
        self.ignore
            .as_deref()
            .is_some_and(|ids| ids.iter().any(|id| id == rule_id))
    }

    /// Resolves the file sections against the defaults.
    #[must_use]
    pub fn style_config(&self) -> StyleConfig {
        let quotes = (!self.is_ignored(RULE_ID_QUOTES)).then(|| {
            let section = self.quotes.clone().unwrap_or_default();
            let defaults = QuoteOptions::default();
            QuoteOptions {
                style: section.style.unwrap_or(defaults.style),
                avoid_escape: section.avoid_escape.unwrap_or(defaults.avoid_escape),
                allow_template_literals: section
                    .allow_template_literals
                    .unwrap_or(defaults.allow_template_literals),
                ignore_string_literals: section
                    .ignore_string_literals
                    .unwrap_or(defaults.ignore_string_literals),
            }
        });
        let semi = (!self.is_ignored(RULE_ID_SEMI)).then(|| {
            let section = self.semi.clone().unwrap_or_default();
            let defaults = SemiOptions::default();
            SemiOptions {
                mode: section.mode.unwrap_or(defaults.mode),
                omit_last_in_one_line_block: section
                    .omit_last_in_one_line_block
                    .unwrap_or(defaults.omit_last_in_one_line_block),
                omit_last_in_one_line_class_body: section
                    .omit_last_in_one_line_class_body
                    .unwrap_or(defaults.omit_last_in_one_line_class_body),
                before_statement_continuation_chars: section
                    .before_statement_continuation_chars
                    .unwrap_or(defaults.before_statement_continuation_chars),
            }
        });
        StyleConfig { quotes, semi }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section.
    pub semiquote: SemiquoteConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

/// Failure to load an explicitly requested configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Invalid TOML or invalid option values.
    #[error("invalid configuration in {}: {source}", .path.display())]
    Toml {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
    /// Invalid JSON or invalid option values.
    #[error("invalid configuration in {}: {source}", .path.display())]
    Json {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// A `package.json` without a `semiquote` key.
    #[error("{} has no \"semiquote\" key", .path.display())]
    MissingKey {
        /// Offending file.
        path: PathBuf,
    },
}

fn is_package_json(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == "package.json")
}

fn parse_package_json(path: &Path, content: &str) -> Result<Option<SemiquoteConfig>, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let Some(section) = value.get(PACKAGE_JSON_KEY) else {
        return Ok(None);
    };
    serde_json::from_value(section.clone())
        .map(Some)
        .map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
}

impl Config {
    /// Resolved rule options.
    #[must_use]
    pub fn style_config(&self) -> StyleConfig {
        self.semiquote.style_config()
    }

    /// Loads configuration from default locations (.semiquote.toml or package.json in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads an explicitly named configuration file.
    ///
    /// A file called `package.json` is read as JSON and must carry a
    /// `semiquote` key; anything else is read as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let semiquote = if is_package_json(path) {
            parse_package_json(path, &content)?.ok_or_else(|| ConfigError::MissingKey {
                path: path.to_path_buf(),
            })?
        } else {
            toml::from_str::<Config>(&content)
                .map_err(|source| ConfigError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?
                .semiquote
        };
        Ok(Self {
            semiquote,
            config_file_path: Some(path.to_path_buf()),
        })
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Invalid files are logged and skipped.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let semiquote_toml = current.join(CONFIG_FILENAME);
            if semiquote_toml.exists() {
                match Self::from_file(&semiquote_toml) {
                    Ok(config) => {
                        tracing::debug!("using configuration {}", semiquote_toml.display());
                        return config;
                    }
                    Err(e) => tracing::warn!("ignoring configuration: {e}"),
                }
            }

            // 2. Try package.json
            let package_json = current.join("package.json");
            if package_json.exists() {
                let loaded = fs::read_to_string(&package_json)
                    .map_err(|source| ConfigError::Read {
                        path: package_json.clone(),
                        source,
                    })
                    .and_then(|content| parse_package_json(&package_json, &content));
                match loaded {
                    Ok(Some(semiquote)) => {
                        tracing::debug!("using configuration {}", package_json.display());
                        return Config {
                            semiquote,
                            config_file_path: Some(package_json),
                        };
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("ignoring configuration: {e}"),
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
