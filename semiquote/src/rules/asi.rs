//! Token-local helpers for automatic semicolon insertion.
//!
//! All lookups are pure functions over the token list and an index; comments
//! are skipped.

use crate::syntax::Token;

/// First non-comment token after `index`.
#[must_use]
pub fn next_significant<'a>(tokens: &[Token<'a>], index: usize) -> Option<(usize, Token<'a>)> {
    tokens
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, t)| !t.kind.is_trivia())
        .map(|(i, t)| (i, *t))
}

/// Last non-comment token before `index`.
#[must_use]
pub fn prev_significant<'a>(tokens: &[Token<'a>], index: usize) -> Option<(usize, Token<'a>)> {
    tokens[..index.min(tokens.len())]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| !t.kind.is_trivia())
        .map(|(i, t)| (i, *t))
}

/// True when a line starting with `next` would be parsed as a continuation
/// of the previous statement: it begins with `(`, `[`, `` ` ``, `+`, `-`
/// or `/` and is not `++`/`--`.
///
/// At a statement boundary a `/` always opens a regular expression, so the
/// first character is all that matters.
#[must_use]
pub fn is_hazardous_follower(next: Option<&Token<'_>>) -> bool {
    next.is_some_and(|token| {
        token.text.starts_with(['(', '[', '`', '+', '-', '/'])
            && token.text != "++"
            && token.text != "--"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;

    fn first_token_hazard(source: &str) -> bool {
        let tokens = tokenize(source).unwrap();
        is_hazardous_follower(tokens.first())
    }

    #[test]
    fn test_hazardous_followers() {
        assert!(first_token_hazard("(a)"));
        assert!(first_token_hazard("[1, 2]"));
        assert!(first_token_hazard("`tpl`"));
        assert!(first_token_hazard("`head${x}`"));
        assert!(first_token_hazard("+x"));
        assert!(first_token_hazard("-x"));
        assert!(first_token_hazard("/re/.test(s)"));
        assert!(first_token_hazard("+=1"));
    }

    #[test]
    fn test_safe_followers() {
        assert!(!first_token_hazard("++x"));
        assert!(!first_token_hazard("--x"));
        assert!(!first_token_hazard("foo()"));
        assert!(!first_token_hazard("'str'"));
        assert!(!first_token_hazard("{}"));
        assert!(!is_hazardous_follower(None));
    }

    #[test]
    fn test_lookups_skip_comments() {
        let tokens = tokenize("a /* c */ // d\n b").unwrap();
        let (next, token) = next_significant(&tokens, 0).unwrap();
        assert_eq!(token.text, "b");
        assert_eq!(next, tokens.len() - 1);
        let (prev, token) = prev_significant(&tokens, next).unwrap();
        assert_eq!((prev, token.text), (0, "a"));
        assert!(next_significant(&tokens, next).is_none());
        assert!(prev_significant(&tokens, 0).is_none());
    }
}
