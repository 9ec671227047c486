//! Re-quoting of string and template literals.

use crate::config::QuoteStyle;
use crate::constants::OCTAL_ESCAPE_RE;

/// Outcome of [`requote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requote {
    /// The literal is acceptable as written.
    Keep,
    /// The literal is wrong but no equivalent literal exists in the target style.
    Unfixable,
    /// Replacement text, delimiters included.
    Rewrite(String),
}

/// Computes the replacement of the literal `raw` (delimiters included)
/// when moving it from `current` to `target` quotes.
///
/// With `avoid_escape`, a literal whose content contains the target quote
/// and not its own quote is kept. Legacy octal escapes (`\1`, `\01`, `\8`)
/// are illegal in templates, so a backtick target makes them unfixable.
#[must_use]
pub fn requote(raw: &str, current: QuoteStyle, target: QuoteStyle, avoid_escape: bool) -> Requote {
    if current == target {
        return Requote::Keep;
    }
    let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default();
    if avoid_escape && inner.contains(target.quote_char()) && !inner.contains(current.quote_char())
    {
        return Requote::Keep;
    }
    if target == QuoteStyle::Backtick && OCTAL_ESCAPE_RE().is_match(inner) {
        return Requote::Unfixable;
    }
    Requote::Rewrite(switch_quote(inner, current, target))
}

/// Rewrites the body of a literal for new delimiters.
///
/// Escapes of the old quote are dropped, bare occurrences of the new quote
/// are escaped, `${` is escaped when entering a template and unescaped when
/// leaving one, and a raw line break inside a template becomes `\n`. Every
/// other escape, line continuations included, is copied verbatim.
fn switch_quote(inner: &str, current: QuoteStyle, target: QuoteStyle) -> String {
    let old = current.quote_char();
    let new = target.quote_char();
    let from_template = current == QuoteStyle::Backtick;
    let to_template = target == QuoteStyle::Backtick;

    let mut out = String::with_capacity(inner.len() + 2);
    out.push(new);
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push('\\');
                    break;
                };
                if escaped == old {
                    out.push(escaped);
                } else if from_template && escaped == '$' && chars.peek() == Some(&'{') {
                    out.push('$');
                } else {
                    out.push('\\');
                    out.push(escaped);
                    if escaped == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                        out.push('\n');
                    }
                }
            }
            c if c == new => {
                out.push('\\');
                out.push(c);
            }
            '$' if to_template && chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\r' | '\n' if from_template => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            _ => out.push(c),
        }
    }
    out.push(new);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use QuoteStyle::{Backtick, Double, Single};

    fn rewrite(raw: &str, current: QuoteStyle, target: QuoteStyle) -> String {
        match requote(raw, current, target, false) {
            Requote::Rewrite(text) => text,
            other => panic!("expected a rewrite of {raw}, got {other:?}"),
        }
    }

    #[test]
    fn test_same_style_is_kept() {
        assert_eq!(requote("'a'", Single, Single, false), Requote::Keep);
    }

    #[test]
    fn test_single_to_double() {
        assert_eq!(rewrite("'bar'", Single, Double), "\"bar\"");
        assert_eq!(rewrite(r#"'a "b" c'"#, Single, Double), r#""a \"b\" c""#);
        assert_eq!(rewrite(r"'it\'s'", Single, Double), "\"it's\"");
    }

    #[test]
    fn test_other_escapes_are_preserved() {
        assert_eq!(rewrite(r"'\n\t\u{1F600}\x41\\'", Single, Double), r#""\n\t\u{1F600}\x41\\""#);
        assert_eq!(rewrite("'a\\\nb'", Single, Double), "\"a\\\nb\"");
        assert_eq!(rewrite("'a\\\r\nb'", Single, Double), "\"a\\\r\nb\"");
        assert_eq!(rewrite(r#""\'""#, Double, Single), r"'\''");
    }

    #[test]
    fn test_into_backtick() {
        assert_eq!(rewrite("'b${x}a$r'", Single, Backtick), r"`b\${x}a$r`");
        assert_eq!(rewrite("'a`b'", Single, Backtick), r"`a\`b`");
        assert_eq!(rewrite(r"'\0'", Single, Backtick), r"`\0`");
    }

    #[test]
    fn test_out_of_backtick() {
        assert_eq!(rewrite("`bar`", Backtick, Single), "'bar'");
        assert_eq!(rewrite(r"`a\`b`", Backtick, Double), "\"a`b\"");
        assert_eq!(rewrite(r"`\${x}`", Backtick, Double), "\"${x}\"");
        assert_eq!(rewrite("`\"bar\"`", Backtick, Double), r#""\"bar\"""#);
    }

    #[test]
    fn test_raw_line_break_leaving_template() {
        assert_eq!(rewrite("`a\nb`", Backtick, Double), r#""a\nb""#);
        assert_eq!(rewrite("`a\r\nb`", Backtick, Single), r"'a\nb'");
    }

    #[test]
    fn test_octal_escape_into_backtick_is_unfixable() {
        assert_eq!(requote(r"'\1'", Single, Backtick, false), Requote::Unfixable);
        assert_eq!(requote(r"'\08'", Double, Backtick, false), Requote::Unfixable);
        assert_eq!(requote(r"'\9'", Single, Backtick, false), Requote::Unfixable);
        assert_eq!(rewrite(r"'\1'", Single, Double), r#""\1""#);
        assert_eq!(rewrite(r"'\\1'", Single, Backtick), r"`\\1`");
    }

    #[test]
    fn test_avoid_escape() {
        assert_eq!(requote("\"it's\"", Double, Single, true), Requote::Keep);
        assert_eq!(requote("'say \"hi\"'", Single, Double, true), Requote::Keep);
        assert_eq!(requote("`\"`", Backtick, Double, true), Requote::Keep);
        assert_eq!(
            requote(r#""it's \"x\"""#, Double, Single, true),
            Requote::Rewrite(r#"'it\'s "x"'"#.to_owned())
        );
        assert_eq!(
            requote("'plain'", Single, Double, true),
            Requote::Rewrite("\"plain\"".to_owned())
        );
    }
}
