use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the project configuration file.
pub const CONFIG_FILENAME: &str = ".semiquote.toml";

/// Key holding the configuration inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "semiquote";

/// File extensions analysed when walking directories.
pub const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Regex for escape sequences that cannot appear inside a template literal:
/// legacy octal escapes (`\1`, `\01`, `\377`) and the non-octal decimal
/// escapes `\8` and `\9`. A lone `\0` is allowed.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_octal_escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?s)^(?:[^\\]|\\.)*\\(?:[1-9]|0[0-9])")
            .expect("Invalid octal escape regex pattern")
    })
}

/// Regex for a line terminator that is not preceded by an odd number of
/// backslashes, i.e. a real line break rather than a line continuation.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_unescaped_line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^\\])(?:\\\\)*[\r\n\x{2028}\x{2029}]")
            .expect("Invalid line break regex pattern")
    })
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("node_modules");
        s.insert(".git");
        s.insert(".hg");
        s.insert(".svn");
        s.insert("dist");
        s.insert("build");
        s.insert("coverage");
        s.insert(".next");
        s.insert(".nuxt");
        s.insert(".cache");
        s.insert("bower_components");
        s.insert("*.min.js");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_octal_escape_re as OCTAL_ESCAPE_RE;
pub use get_unescaped_line_break_re as UNESCAPED_LINE_BREAK_RE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octal_escape_detection() {
        let re = OCTAL_ESCAPE_RE();
        assert!(re.is_match(r"'\1'"));
        assert!(re.is_match(r"'\01'"));
        assert!(re.is_match(r"'\08'"));
        assert!(re.is_match(r"'prefix \75 suffix'"));
        assert!(re.is_match(r"'\8'"));
        assert!(!re.is_match(r"'\0'"));
        assert!(!re.is_match(r"'\\1'"));
        assert!(!re.is_match("'plain'"));
    }

    #[test]
    fn test_unescaped_line_break_detection() {
        let re = UNESCAPED_LINE_BREAK_RE();
        assert!(re.is_match("back\ntick"));
        assert!(re.is_match("back\\\\\ntick"));
        assert!(re.is_match("\n"));
        assert!(re.is_match("a\u{2028}b"));
        assert!(!re.is_match("foo\\\nbar"));
        assert!(!re.is_match("foo\\\\\\\nbar"));
        assert!(!re.is_match("foo\\nbar"));
    }
}
